/// Course index build errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("no usable courses: {rows} rows read, {skipped} skipped")]
    EmptyCatalog { rows: usize, skipped: usize },

    #[error("row {row} rejected: {reason}")]
    RowRejected { row: usize, reason: String },

    #[error("catalog {path} unreadable: {message}")]
    CatalogUnreadable { path: String, message: String },
}
