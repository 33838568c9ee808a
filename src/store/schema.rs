/// Every persisted value lives in one row of this table, addressed by a fixed key.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS slots (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
