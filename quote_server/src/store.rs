//! SQLite store holding the user table.
//!
//! The lookup path never reads it; the server only insists that a store exists before
//! it starts serving. Initialization is all-or-nothing: the schema and the seed row go
//! in one transaction, and a failed run leaves no file behind.
use std::fs;
use std::path::Path;

use log::{info, warn};
use quote_common::{QuoteError, Result};
use rusqlite::Connection;

const SETUP_STATEMENTS: [&str; 2] = [
    "CREATE TABLE user (user_id INTEGER PRIMARY KEY NOT NULL, username TEXT UNIQUE, password TEXT, active INTEGER NOT NULL, email TEXT);",
    "INSERT INTO user (user_id, username, password, active, email) VALUES (1, 'admin', '', 1, '');",
];

fn db_err(err: rusqlite::Error) -> QuoteError {
    QuoteError::Store(err.to_string())
}

/// Create a new store file at `path` with the user table and the `admin` row.
///
/// Refuses to touch a file that already exists.
pub fn init_store(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(QuoteError::StoreExists(path.display().to_string()));
    }

    let result = Connection::open(path).map_err(db_err).and_then(|mut conn| {
        let tx = conn.transaction().map_err(db_err)?;
        for statement in SETUP_STATEMENTS {
            tx.execute(statement, []).map_err(db_err)?;
        }
        tx.commit().map_err(db_err)
    });

    match result {
        Ok(()) => {
            info!("Initialized store {}", path.display());
            Ok(())
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(path) {
                warn!("Could not remove partial store {}: {}", path.display(), rm);
            }
            Err(e)
        }
    }
}

/// Open an existing store file.
pub fn open_store(path: &Path) -> Result<Connection> {
    if !path.is_file() {
        return Err(QuoteError::StoreMissing(path.display().to_string()));
    }
    Connection::open(path).map_err(db_err)
}

/// Number of rows in the user table.
pub fn user_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))
        .map_err(db_err)
}
