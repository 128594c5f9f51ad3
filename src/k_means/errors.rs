use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

/// An error when building a session with invalid parameters
#[derive(Error, Debug)]
pub enum SessionParamsError {
    #[error("tolerance must be greater than 0")]
    Tolerance,
    #[error("generation bounds must be positive and finite")]
    Bounds,
}

/// An error returned by a session operation.
///
/// Operations fail atomically: on error the session state is exactly what it
/// was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The operation needs a dataset and none has been generated yet
    #[error("no dataset has been generated yet")]
    NoDataset,
    /// k is zero or exceeds the number of available points
    #[error("cannot place {requested} centroids among {available} points")]
    InsufficientData { requested: usize, available: usize },
    /// `step`/`converge` called before the centroid list is complete
    #[error("centroids are not initialized")]
    NotInitialized,
    /// The manual point coincides exactly with an already collected centroid.
    /// Not fatal: the caller is informed and the click is ignored.
    #[error("({x}, {y}) duplicates an already collected centroid")]
    DuplicateManualPoint { x: f64, y: f64 },
    /// A manual centroid was supplied while manual collection was not active
    #[error("manual centroid collection is not active")]
    ManualNotActive,
}
