//! Sets up the application's SQLite database.

use rusqlite::{Connection, functions::FunctionFlags};

use crate::transaction::create_transaction_table;

/// Create the tables for the domain models if they do not exist yet, and
/// register the SQL functions the stores use.
///
/// # Errors
/// Returns an error if a table cannot be created or a function cannot be registered.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    register_functions(connection)?;
    create_transaction_table(connection)?;

    Ok(())
}

/// Adds `fold_case(text)`, which lower-cases text with full Unicode case
/// mapping. SQLite's own `lower` and `LIKE` only fold ASCII letters.
fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: Option<String> = context.get(0)?;

            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}
