use super::show::Show;

#[derive(Debug, thiserror::Error)]
pub(crate) enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("a show named '{0}' already exists")]
    DuplicateShow(String),

    #[error("no show named '{0}'")]
    UnknownShow(String),
}

/// Persistence the interactive flow depends on. Shows are keyed by name.
pub(crate) trait WatchStore {
    /// All shows in insertion order, soft-deleted ones included.
    fn list_shows(&self) -> Result<Vec<Show>, StoreError>;
    fn create_show(&self, show: &Show) -> Result<(), StoreError>;
    fn soft_delete_show(&self, name: &str) -> Result<(), StoreError>;
    fn restore_show(&self, name: &str) -> Result<(), StoreError>;
    fn is_watched(&self, name: &str, number: u32) -> Result<bool, StoreError>;
    /// Re-marking an already watched episode is a no-op.
    fn mark_watched(&self, name: &str, number: u32) -> Result<(), StoreError>;
}
