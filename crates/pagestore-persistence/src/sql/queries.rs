//! Statement text for both tables
//!
//! Every statement here is prepared against the schema when a
//! [`SqlDatabase`](super::SqlDatabase) opens, so a typo in a column or
//! table name fails at startup instead of on first use.

pub(crate) mod routes {
    pub const SELECT_ONE: &str =
        "SELECT path, name, block_ids, created_at, updated_at FROM routes WHERE path = ?";
    pub const SELECT_ALL: &str =
        "SELECT path, name, block_ids, created_at, updated_at FROM routes ORDER BY path";
    pub const SELECT_CREATED_AT: &str = "SELECT created_at FROM routes WHERE path = ?";
    pub const INSERT: &str = r#"
INSERT INTO routes (path, name, block_ids, created_at, updated_at)
VALUES (?, ?, ?, ?, ?)
"#;
    pub const UPDATE: &str = r#"
UPDATE routes SET name = ?, block_ids = ?, created_at = ?, updated_at = ?
WHERE path = ?
"#;
    pub const DELETE: &str = "DELETE FROM routes WHERE path = ?";
}

pub(crate) mod content {
    pub const SELECT_ONE: &str =
        "SELECT path, blocks, created_at, updated_at FROM page_content WHERE path = ?";
    pub const SELECT_ALL: &str =
        "SELECT path, blocks, created_at, updated_at FROM page_content ORDER BY path";
    pub const SELECT_CREATED_AT: &str = "SELECT created_at FROM page_content WHERE path = ?";
    pub const INSERT: &str = r#"
INSERT INTO page_content (path, blocks, created_at, updated_at)
VALUES (?, ?, ?, ?)
"#;
    pub const UPDATE: &str = r#"
UPDATE page_content SET blocks = ?, created_at = ?, updated_at = ?
WHERE path = ?
"#;
    pub const DELETE: &str = "DELETE FROM page_content WHERE path = ?";
}

pub(crate) const ALL: &[&str] = &[
    routes::SELECT_ONE,
    routes::SELECT_ALL,
    routes::SELECT_CREATED_AT,
    routes::INSERT,
    routes::UPDATE,
    routes::DELETE,
    content::SELECT_ONE,
    content::SELECT_ALL,
    content::SELECT_CREATED_AT,
    content::INSERT,
    content::UPDATE,
    content::DELETE,
];
