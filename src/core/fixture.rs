//! The hardcoded fixture dataset.

/// A user in the fixture dataset.
///
/// The basic variant stores `name` and `surname` joined as a single name
/// column; the full variant stores them separately as the composite key.
#[derive(Debug, Clone, Copy)]
pub struct FixtureUser {
    pub name: &'static str,
    pub surname: &'static str,
    pub email: &'static str,
}

impl FixtureUser {
    /// The single-column name used by the basic variant.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// An order in the fixture dataset. `user` indexes into [`users`].
#[derive(Debug, Clone, Copy)]
pub struct FixtureOrder {
    pub product_name: &'static str,
    pub price: f64,
    pub user: usize,
}

/// The fixed user rows.
pub fn users() -> &'static [FixtureUser] {
    &[
        FixtureUser {
            name: "Alice",
            surname: "Smith",
            email: "alice@example.com",
        },
        FixtureUser {
            name: "Bob",
            surname: "Jones",
            email: "bob@example.com",
        },
        FixtureUser {
            name: "Charlie",
            surname: "Day",
            email: "charlie@example.com",
        },
    ]
}

/// The fixed order rows.
pub fn orders() -> &'static [FixtureOrder] {
    &[
        FixtureOrder {
            product_name: "Laptop",
            price: 1200.00,
            user: 0,
        },
        FixtureOrder {
            product_name: "Mouse",
            price: 25.50,
            user: 0,
        },
        FixtureOrder {
            product_name: "Monitor",
            price: 300.00,
            user: 1,
        },
        FixtureOrder {
            product_name: "Keyboard",
            price: 50.00,
            user: 2,
        },
    ]
}

/// The extra user carrying the oversized email value (full variant, opt-in).
pub const STRESS_USER_NAME: &str = "Eve";
pub const STRESS_USER_SURNAME: &str = "Stress";

/// Build the oversized text value for the unique email column.
///
/// The original fixture deliberately pushed a multi-hundred-megabyte string
/// through the unique index; the size is a parameter here so tests can use a
/// small one.
pub fn oversized_email(mib: usize) -> String {
    let target = mib * 1024 * 1024;
    let mut value = String::with_capacity(target + 32);
    value.push_str("stress@");
    value.push_str(&"x".repeat(target.saturating_sub(value.len())));
    value.push_str(".example.com");
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        assert_eq!(users().len(), 3);
        assert_eq!(orders().len(), 4);

        // Every order references a valid user index
        for order in orders() {
            assert!(order.user < users().len());
        }
    }

    #[test]
    fn test_fixture_emails_unique() {
        let mut emails: Vec<&str> = users().iter().map(|u| u.email).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), users().len());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(users()[0].full_name(), "Alice Smith");
        assert_eq!(users()[1].full_name(), "Bob Jones");
        assert_eq!(users()[2].full_name(), "Charlie Day");
    }

    #[test]
    fn test_oversized_email_size_and_shape() {
        let email = oversized_email(1);
        assert!(email.len() >= 1024 * 1024);
        assert!(email.starts_with("stress@"));
        assert!(email.ends_with(".example.com"));
    }
}
