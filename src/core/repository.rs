//! Fixture repository - high-level seed and query operations.

use crate::core::{fixture, Variant};
use crate::db::{Connection, HistoryRow, OrderRow, Schema, UserRow};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;

/// Row counts written by a seed run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub orders: usize,
    pub history: usize,
}

/// Row counts removed by a cascade delete.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RemovalSummary {
    pub users: i64,
    pub orders: i64,
    pub history: i64,
}

/// Fixture repository over one database connection.
pub struct FixtureRepository {
    conn: Connection,
    variant: Variant,
}

impl FixtureRepository {
    /// Open a repository on the database file at the given path.
    pub fn open<P: AsRef<Path>>(path: P, variant: Variant) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn, variant })
    }

    /// Open an in-memory repository for testing.
    #[cfg(test)]
    pub fn open_in_memory(variant: Variant) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, variant })
    }

    /// Get the underlying connection.
    pub fn conn(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// The schema variant this repository targets.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Create the variant's tables if they are absent.
    pub fn init_schema(&mut self) -> Result<()> {
        Schema::init(&mut self.conn, self.variant)
    }

    /// Insert the fixture dataset in one transaction and commit.
    ///
    /// Schema creation happens first and commits on its own; a failure
    /// mid-insert drops the uncommitted transaction while the DDL persists.
    /// `oversized_mib` adds the stress user whose unique email column holds
    /// a value of that many MiB.
    pub fn seed(&mut self, oversized_mib: Option<usize>) -> Result<SeedSummary> {
        self.init_schema()?;

        let variant = self.variant;
        let mut summary = SeedSummary::default();
        let tx = self.conn.transaction()?;

        match variant {
            Variant::Basic => {
                for user in fixture::users() {
                    tx.execute(
                        "INSERT INTO users (name, email) VALUES (?, ?)",
                        rusqlite::params!(user.full_name(), user.email),
                    )?;
                    summary.users += 1;
                }
                if let Some(mib) = oversized_mib {
                    tx.execute(
                        "INSERT INTO users (name, email) VALUES (?, ?)",
                        rusqlite::params!(
                            format!("{} {}", fixture::STRESS_USER_NAME, fixture::STRESS_USER_SURNAME),
                            fixture::oversized_email(mib)
                        ),
                    )?;
                    summary.users += 1;
                }
                // Autoincrement ids start at 1, so index + 1 is the owner id
                for order in fixture::orders() {
                    tx.execute(
                        "INSERT INTO orders (product_name, price, user_id) VALUES (?, ?, ?)",
                        rusqlite::params!(order.product_name, order.price, (order.user + 1) as i64),
                    )?;
                    summary.orders += 1;
                }
            }
            Variant::Full => {
                for user in fixture::users() {
                    tx.execute(
                        "INSERT INTO users (name, surname, email) VALUES (?, ?, ?)",
                        rusqlite::params!(user.name, user.surname, user.email),
                    )?;
                    summary.users += 1;
                }
                if let Some(mib) = oversized_mib {
                    tx.execute(
                        "INSERT INTO users (name, surname, email) VALUES (?, ?, ?)",
                        rusqlite::params!(
                            fixture::STRESS_USER_NAME,
                            fixture::STRESS_USER_SURNAME,
                            fixture::oversized_email(mib)
                        ),
                    )?;
                    summary.users += 1;
                }
                for order in fixture::orders() {
                    let user = &fixture::users()[order.user];
                    tx.execute(
                        "INSERT INTO orders (product_name, price, user_name, user_surname)
                         VALUES (?, ?, ?, ?)",
                        rusqlite::params!(order.product_name, order.price, user.name, user.surname),
                    )?;
                    let order_id = tx.last_insert_rowid();
                    tx.execute(
                        "INSERT INTO history (order_id) VALUES (?)",
                        rusqlite::params!(order_id),
                    )?;
                    summary.orders += 1;
                    summary.history += 1;
                }
            }
        }

        tx.commit()?;
        Ok(summary)
    }

    /// Get all user rows.
    pub fn users(&mut self) -> Result<Vec<UserRow>> {
        match self.variant {
            Variant::Basic => self.conn.query(
                "SELECT id, name, email FROM users ORDER BY id",
                &[],
                UserRow::from_basic_row,
            ),
            Variant::Full => self.conn.query(
                "SELECT name, surname, email FROM users ORDER BY name, surname",
                &[],
                UserRow::from_full_row,
            ),
        }
    }

    /// Get all order rows.
    pub fn orders(&mut self) -> Result<Vec<OrderRow>> {
        match self.variant {
            Variant::Basic => self.conn.query(
                "SELECT order_id, product_name, price, user_id FROM orders ORDER BY order_id",
                &[],
                OrderRow::from_basic_row,
            ),
            Variant::Full => self.conn.query(
                "SELECT order_id, product_name, price, user_name, user_surname
                 FROM orders ORDER BY order_id",
                &[],
                OrderRow::from_full_row,
            ),
        }
    }

    /// Get all history rows. Empty in the basic variant, which has no
    /// history table.
    pub fn history(&mut self) -> Result<Vec<HistoryRow>> {
        if self.variant == Variant::Basic {
            return Ok(Vec::new());
        }
        self.conn.query(
            "SELECT id, order_id, created_at FROM history ORDER BY id",
            &[],
            HistoryRow::from_row,
        )
    }

    /// Count orders whose user reference does not resolve to a user row.
    pub fn orphaned_orders(&mut self) -> Result<i64> {
        let sql = match self.variant {
            Variant::Basic => {
                "SELECT COUNT(*) FROM orders
                 LEFT JOIN users ON orders.user_id = users.id
                 WHERE users.id IS NULL"
            }
            Variant::Full => {
                "SELECT COUNT(*) FROM orders
                 LEFT JOIN users ON orders.user_name = users.name
                     AND orders.user_surname = users.surname
                 WHERE users.name IS NULL"
            }
        };
        self.conn.query_row(sql, &[], |row| row.get(0))
    }

    /// Delete a user by surrogate id (basic variant).
    pub fn delete_user_by_id(&mut self, id: i64) -> Result<RemovalSummary> {
        if self.variant != Variant::Basic {
            return Err(Error::BadUserKey(
                self.variant.as_str(),
                self.variant.user_key_desc(),
            ));
        }
        self.delete_user(
            "DELETE FROM users WHERE id = ?",
            &[&id as &dyn rusqlite::ToSql],
            || id.to_string(),
        )
    }

    /// Delete a user by composite (name, surname) key (full variant).
    pub fn delete_user_by_name(&mut self, name: &str, surname: &str) -> Result<RemovalSummary> {
        if self.variant != Variant::Full {
            return Err(Error::BadUserKey(
                self.variant.as_str(),
                self.variant.user_key_desc(),
            ));
        }
        self.delete_user(
            "DELETE FROM users WHERE name = ? AND surname = ?",
            &[&name as &dyn rusqlite::ToSql, &surname as &dyn rusqlite::ToSql],
            || format!("{name} {surname}"),
        )
    }

    fn delete_user(
        &mut self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
        describe: impl FnOnce() -> String,
    ) -> Result<RemovalSummary> {
        let orders_before = self.conn.count("orders")?;
        let history_before = match self.variant {
            Variant::Basic => 0,
            Variant::Full => self.conn.count("history")?,
        };

        let users_removed = self.conn.execute(sql, params)?;
        if users_removed == 0 {
            return Err(Error::UserNotFound(describe()));
        }

        let orders_after = self.conn.count("orders")?;
        let history_after = match self.variant {
            Variant::Basic => 0,
            Variant::Full => self.conn.count("history")?,
        };

        Ok(RemovalSummary {
            users: users_removed as i64,
            orders: orders_before - orders_after,
            history: history_before - history_after,
        })
    }
}
