//! dbseed - SQLite fixture loader
//!
//! Seeds a local database file with fixture data and verifies it with one
//! join query.

fn main() {
    // Database-layer failures are reported on stdout but deliberately not
    // fatal: the file keeps whatever state was committed and the process
    // exits normally.
    if let Err(e) = dbseed::cli::run() {
        println!("Error: {}", e);
    }
}
