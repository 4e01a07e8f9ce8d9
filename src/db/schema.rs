//! Database schema and row types.

use crate::core::Variant;
use crate::db::Connection as DbConnection;
use crate::error::Result;
use rusqlite::Row;

/// Schema management.
pub struct Schema;

impl Schema {
    /// Initialize the database schema for the given variant.
    ///
    /// All DDL uses IF NOT EXISTS, so re-running against an already seeded
    /// file is a no-op.
    pub fn init(conn: &mut DbConnection, variant: Variant) -> Result<()> {
        match variant {
            Variant::Basic => Self::init_basic(conn),
            Variant::Full => Self::init_full(conn),
        }
    }

    fn init_basic(conn: &mut DbConnection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT UNIQUE
            )",
            &[],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS orders (
                order_id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_name TEXT NOT NULL,
                price REAL,
                user_id INTEGER,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            )",
            &[],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)",
            &[],
        )?;

        Ok(())
    }

    fn init_full(conn: &mut DbConnection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                name TEXT NOT NULL,
                surname TEXT NOT NULL,
                email TEXT UNIQUE,
                PRIMARY KEY (name, surname)
            )",
            &[],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS orders (
                order_id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_name TEXT NOT NULL,
                price REAL,
                user_name TEXT NOT NULL,
                user_surname TEXT NOT NULL,
                FOREIGN KEY (user_name, user_surname)
                    REFERENCES users (name, surname) ON DELETE CASCADE
            )",
            &[],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%S', 'now')),
                FOREIGN KEY (order_id) REFERENCES orders (order_id) ON DELETE CASCADE
            )",
            &[],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_orders_user ON orders(user_name, user_surname)",
            &[],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_order_id ON history(order_id)",
            &[],
        )?;

        Ok(())
    }

    /// Check if the database schema is already initialized.
    pub fn is_initialized(conn: &mut DbConnection) -> bool {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")
            .and_then(|mut stmt| Ok(stmt.exists(())?))
            .unwrap_or(false)
    }
}

/// Row representation of a user from the database.
///
/// The basic variant fills `id`, the full variant fills `surname`.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Option<i64>,
    pub name: String,
    pub surname: Option<String>,
    pub email: Option<String>,
}

impl UserRow {
    /// Create a UserRow from a basic-variant SQLite row (id, name, email).
    pub fn from_basic_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get("id")?),
            name: row.get("name")?,
            surname: None,
            email: row.get("email")?,
        })
    }

    /// Create a UserRow from a full-variant SQLite row (name, surname, email).
    pub fn from_full_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: None,
            name: row.get("name")?,
            surname: row.get("surname")?,
            email: row.get("email")?,
        })
    }

    /// Display name: "name surname" in the full variant, plain name otherwise.
    pub fn display_name(&self) -> String {
        match &self.surname {
            Some(surname) => format!("{} {}", self.name, surname),
            None => self.name.clone(),
        }
    }
}

/// Row representation of an order from the database.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub order_id: i64,
    pub product_name: String,
    pub price: Option<f64>,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_surname: Option<String>,
}

impl OrderRow {
    /// Create an OrderRow from a basic-variant SQLite row.
    pub fn from_basic_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            order_id: row.get("order_id")?,
            product_name: row.get("product_name")?,
            price: row.get("price")?,
            user_id: row.get("user_id")?,
            user_name: None,
            user_surname: None,
        })
    }

    /// Create an OrderRow from a full-variant SQLite row.
    pub fn from_full_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            order_id: row.get("order_id")?,
            product_name: row.get("product_name")?,
            price: row.get("price")?,
            user_id: None,
            user_name: row.get("user_name")?,
            user_surname: row.get("user_surname")?,
        })
    }
}

/// Row representation of a history record (full variant only).
#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub id: i64,
    pub order_id: i64,
    pub created_at: String,
}

impl HistoryRow {
    /// Create a HistoryRow from a SQLite row.
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            order_id: row.get("order_id")?,
            created_at: row.get("created_at")?,
        })
    }
}
