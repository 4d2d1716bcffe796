//! SQL DDL for initializing the item and store tables.

/// SQLite schema with:
/// - `Id` INTEGER PRIMARY KEY AUTOINCREMENT on both tables, so ids are never reused
/// - every other column nullable
/// - no foreign keys between `Items` and `Tokos`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS Items (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NULL,
    Price REAL NULL
);

CREATE TABLE IF NOT EXISTS Tokos (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Nama TEXT NULL,
    Alamat TEXT NULL
);
"#;
