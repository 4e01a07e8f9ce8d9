//! Verification report: the join between orders and users.

use crate::core::{FixtureRepository, Variant};
use crate::error::Result;
use serde::Serialize;

/// One line of the verification report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub user: String,
    pub product: String,
    pub price: Option<f64>,
}

impl ReportRow {
    /// Human-readable rendering, one row per line.
    pub fn render(&self) -> String {
        let price = match self.price {
            Some(p) => format!("${p:.2}"),
            None => "-".to_string(),
        };
        format!(
            "User: {} | Bought: {} | Price: {}",
            self.user, self.product, price
        )
    }
}

/// Fetch the (user, product, price) tuples for every order.
pub fn fetch(repo: &mut FixtureRepository) -> Result<Vec<ReportRow>> {
    let sql = match repo.variant() {
        Variant::Basic => {
            "SELECT users.name AS buyer, orders.product_name, orders.price
             FROM orders
             JOIN users ON orders.user_id = users.id
             ORDER BY orders.order_id"
        }
        Variant::Full => {
            "SELECT users.name || ' ' || users.surname AS buyer,
                    orders.product_name, orders.price
             FROM orders
             JOIN users ON orders.user_name = users.name
                 AND orders.user_surname = users.surname
             ORDER BY orders.order_id"
        }
    };

    repo.conn().query(sql, &[], |row| {
        Ok(ReportRow {
            user: row.get("buyer")?,
            product: row.get("product_name")?,
            price: row.get("price")?,
        })
    })
}

/// JSON rendering of the whole report.
pub fn to_json(rows: &[ReportRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).map_err(crate::error::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_repo(variant: Variant) -> FixtureRepository {
        let mut repo = FixtureRepository::open_in_memory(variant).unwrap();
        repo.seed(None).unwrap();
        repo
    }

    #[test]
    fn test_report_full_variant() {
        let mut repo = seeded_repo(Variant::Full);
        let rows = fetch(&mut repo).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows.contains(&ReportRow {
            user: "Alice Smith".to_string(),
            product: "Laptop".to_string(),
            price: Some(1200.00),
        }));
        assert!(rows.contains(&ReportRow {
            user: "Bob Jones".to_string(),
            product: "Monitor".to_string(),
            price: Some(300.00),
        }));
    }

    #[test]
    fn test_report_basic_variant() {
        let mut repo = seeded_repo(Variant::Basic);
        let rows = fetch(&mut repo).unwrap();

        assert_eq!(rows.len(), 4);
        assert!(rows.contains(&ReportRow {
            user: "Alice Smith".to_string(),
            product: "Mouse".to_string(),
            price: Some(25.50),
        }));
        assert!(rows.contains(&ReportRow {
            user: "Charlie Day".to_string(),
            product: "Keyboard".to_string(),
            price: Some(50.00),
        }));
    }

    #[test]
    fn test_report_empty_before_seed() {
        let mut repo = FixtureRepository::open_in_memory(Variant::Full).unwrap();
        repo.init_schema().unwrap();

        let rows = fetch(&mut repo).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_render_line() {
        let row = ReportRow {
            user: "Alice Smith".to_string(),
            product: "Laptop".to_string(),
            price: Some(1200.00),
        };
        assert_eq!(row.render(), "User: Alice Smith | Bought: Laptop | Price: $1200.00");

        let no_price = ReportRow {
            user: "Bob Jones".to_string(),
            product: "Monitor".to_string(),
            price: None,
        };
        assert_eq!(no_price.render(), "User: Bob Jones | Bought: Monitor | Price: -");
    }

    #[test]
    fn test_report_json() {
        let mut repo = seeded_repo(Variant::Full);
        let rows = fetch(&mut repo).unwrap();

        let json = to_json(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
        assert_eq!(parsed[0]["product"], "Laptop");
        assert_eq!(parsed[0]["price"], 1200.0);
    }
}
