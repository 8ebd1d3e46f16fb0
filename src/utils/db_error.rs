//! Classification of PostgreSQL constraint violations.

/// Unique constraint on `url_mappings.short_code`.
pub const SHORT_CODE_KEY: &str = "url_mappings_short_code_key";

/// Unique constraint on `url_mappings.original_url`.
pub const ORIGINAL_URL_KEY: &str = "url_mappings_original_url_key";

/// Returns the name of the violated unique constraint, if `e` is one.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<&str> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    db_err.constraint()
}

pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}
