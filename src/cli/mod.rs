//! CLI commands for dbseed.

use crate::core::{report, FixtureRepository, Variant};
use crate::db::Schema;
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// dbseed — SQLite fixture loader
#[derive(Parser)]
#[command(name = "dbseed")]
#[command(about = "Seed a SQLite database file with fixture data and verify it", long_about = None)]
struct Cli {
    /// Path to the database file
    #[arg(long, global = true, default_value = "test.db")]
    db: PathBuf,

    /// Schema variant: 'basic' (surrogate user ids) or 'full' (composite key + history)
    #[arg(long, global = true, default_value = "full")]
    variant: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema, insert the fixture rows, and print the verification report
    Seed {
        /// Also insert the stress user whose unique email column holds a value of this many MiB
        #[arg(long, value_name = "MIB")]
        oversized_mib: Option<usize>,

        /// Print the verification report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the verification join between orders and users and print the report
    Verify {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the current contents of the fixture tables
    Show,

    /// Delete a user and report what the cascade removed.
    ///
    /// The basic variant takes a single integer id; the full variant takes
    /// a name and a surname.
    Remove {
        /// User key parts
        #[arg(required = true)]
        key: Vec<String>,
    },
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let variant = Variant::parse(&cli.variant)?;

    match cli.command {
        Commands::Seed {
            oversized_mib,
            json,
        } => cmd_seed(&cli.db, variant, oversized_mib, json),
        Commands::Verify { json } => cmd_verify(&cli.db, variant, json),
        Commands::Show => cmd_show(&cli.db, variant),
        Commands::Remove { key } => cmd_remove(&cli.db, variant, &key),
    }
}

fn open_seeded(db: &Path, variant: Variant) -> Result<FixtureRepository> {
    let mut repo = FixtureRepository::open(db, variant)?;
    if !Schema::is_initialized(repo.conn()) {
        return Err(Error::NotInitialized);
    }
    Ok(repo)
}

fn cmd_seed(db: &Path, variant: Variant, oversized_mib: Option<usize>, json: bool) -> Result<()> {
    let mut repo = FixtureRepository::open(db, variant)?;
    println!("Database '{}' connection established.", db.display());

    let summary = repo.seed(oversized_mib)?;
    println!("Tables created for variant '{variant}'.");
    match variant {
        Variant::Basic => println!(
            "Records inserted: {} users, {} orders.",
            summary.users, summary.orders
        ),
        Variant::Full => println!(
            "Records inserted: {} users, {} orders, {} history rows.",
            summary.users, summary.orders, summary.history
        ),
    }

    println!();
    println!("--- Verifying Data (Join Query) ---");
    print_report(&mut repo, json)
}

fn cmd_verify(db: &Path, variant: Variant, json: bool) -> Result<()> {
    let mut repo = open_seeded(db, variant)?;
    print_report(&mut repo, json)
}

fn print_report(repo: &mut FixtureRepository, json: bool) -> Result<()> {
    let rows = report::fetch(repo)?;

    if json {
        println!("{}", report::to_json(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!("{}", row.render());
    }
    Ok(())
}

fn cmd_show(db: &Path, variant: Variant) -> Result<()> {
    let mut repo = open_seeded(db, variant)?;

    println!("Users:");
    for user in repo.users()? {
        let email = user.email.as_deref().unwrap_or("(no email)");
        match user.id {
            Some(id) => println!("  [#{}] {} <{}>", id, user.display_name(), trim_email(email)),
            None => println!("  - {} <{}>", user.display_name(), trim_email(email)),
        }
    }

    println!("Orders:");
    for order in repo.orders()? {
        let owner = match (&order.user_name, &order.user_surname, order.user_id) {
            (Some(name), Some(surname), _) => format!("{name} {surname}"),
            (_, _, Some(id)) => format!("user #{id}"),
            _ => "(no user)".to_string(),
        };
        let price = match order.price {
            Some(p) => format!("${p:.2}"),
            None => "-".to_string(),
        };
        println!(
            "  [#{}] {} {} ({})",
            order.order_id, order.product_name, price, owner
        );
    }

    if variant == Variant::Full {
        println!("History:");
        for entry in repo.history()? {
            println!(
                "  [#{}] order #{} at {}",
                entry.id,
                entry.order_id,
                format_datetime(&entry.created_at)
            );
        }
    }

    Ok(())
}

fn cmd_remove(db: &Path, variant: Variant, key: &[String]) -> Result<()> {
    let mut repo = open_seeded(db, variant)?;

    let (label, removed) = match variant {
        Variant::Basic => {
            let id: i64 = match key {
                [id] => id
                    .parse()
                    .map_err(|_| Error::BadUserKey(variant.as_str(), variant.user_key_desc()))?,
                _ => return Err(Error::BadUserKey(variant.as_str(), variant.user_key_desc())),
            };
            (format!("#{id}"), repo.delete_user_by_id(id)?)
        }
        Variant::Full => match key {
            [name, surname] => (
                format!("{name} {surname}"),
                repo.delete_user_by_name(name, surname)?,
            ),
            _ => return Err(Error::BadUserKey(variant.as_str(), variant.user_key_desc())),
        },
    };

    match variant {
        Variant::Basic => println!(
            "Removed user {label}: {} order(s) cascaded.",
            removed.orders
        ),
        Variant::Full => println!(
            "Removed user {label}: {} order(s) and {} history row(s) cascaded.",
            removed.orders, removed.history
        ),
    }
    Ok(())
}

/// Display at most the first 40 characters of an email; the stress row's
/// value is hundreds of megabytes.
fn trim_email(email: &str) -> String {
    if email.len() <= 40 {
        return email.to_string();
    }
    let head: String = email.chars().take(37).collect();
    format!("{head}...")
}

fn format_datetime(dt: &str) -> String {
    match chrono::NaiveDateTime::parse_from_str(dt, "%Y-%m-%dT%H:%M:%S") {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => dt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_email_short() {
        assert_eq!(trim_email("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_trim_email_long() {
        let long = "x".repeat(100);
        let trimmed = trim_email(&long);
        assert_eq!(trimmed.len(), 40);
        assert!(trimmed.ends_with("..."));
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2026-08-06T09:30:00"),
            "2026-08-06 09:30:00"
        );
        // Unparseable values pass through untouched
        assert_eq!(format_datetime("not-a-date"), "not-a-date");
    }
}
