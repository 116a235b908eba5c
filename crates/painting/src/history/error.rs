//! Error types for snapshot history

/// Failures from a surface's snapshot codec
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot encode failed: {0}")]
    Encode(String),
    #[error("Snapshot decode failed: {0}")]
    Decode(String),
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Recoverable history failures; none of these leave the stack inconsistent
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History used before a surface was attached")]
    NotInitialized,
    #[error("Already at the oldest snapshot")]
    NoOlderState,
    #[error("Already at the newest snapshot")]
    NoNewerState,
    #[error("Snapshot capture produced no data")]
    EncodeFailure,
    #[error("Failed to restore snapshot: {0}")]
    Restore(#[from] SnapshotError),
}
