mod algorithm;
mod errors;
mod hyperparams;
mod init;
mod session;

pub use algorithm::{compute_centroids, compute_memberships, max_centroid_shift};
pub use errors::{Result, SessionError, SessionParamsError};
pub use hyperparams::{SessionParams, SessionValidParams};
pub use init::InitMethod;
pub use session::{ClusteringSession, Convergence, ManualProgress, Snapshot};
