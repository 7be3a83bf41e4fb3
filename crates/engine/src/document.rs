//! Document fields exchanged with the index engine

/// Full-text field, analyzed, not stored
pub const FIELD_CONTENT: &str = "content";
/// Source file path, stored verbatim
pub const FIELD_PATH: &str = "path";
/// Source file name, stored verbatim
pub const FIELD_NAME: &str = "name";
/// External document id derived from the file name, stored
pub const FIELD_DOC_ID: &str = "docid";

/// One indexable unit: everything the indexer submits for a corpus file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFields {
    /// Id parsed from the file name
    pub external_doc_id: u32,
    /// Path of the file as listed from the corpus root
    pub path: String,
    /// File name
    pub name: String,
    /// Full text content
    pub content: String,
}

/// Stored fields read back for a search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFields {
    /// Id parsed from the file name at index time
    pub external_doc_id: u32,
    /// Path of the indexed file
    pub path: String,
    /// File name of the indexed file
    pub name: String,
}
