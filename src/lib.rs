//! `kmeans-lab` is an interactive laboratory for the K-Means clustering
//! algorithm on 2-D point sets.
//!
//! Instead of a one-shot `fit`, the crate exposes a stateful
//! [`ClusteringSession`] that a user interface can drive click by click:
//! generate a random dataset, seed the centroids with one of several
//! initialization strategies (including placing them by hand), then either
//! single-step the algorithm and watch the centroids move, or run it to
//! convergence in one call.
//!
//! ## The moving parts
//!
//! * [`Point`] and [`generate_points`] — the raw 2-D observations, stored
//!   internally as `ndarray` matrices of shape `(n, 2)`.
//! * [`InitMethod`] — centroid seeding: uniform [`Random`](InitMethod::Random)
//!   sampling, deterministic [`FarthestFirst`](InitMethod::FarthestFirst)
//!   spreading, or standard [`KMeansPlusPlus`](InitMethod::KMeansPlusPlus)
//!   weighted seeding.
//! * [`compute_memberships`] and [`compute_centroids`] — the pure assignment
//!   and update steps of Lloyd's algorithm.
//! * [`ClusteringSession`] — the state machine tying it all together, with
//!   [`step`](ClusteringSession::step) and
//!   [`converge`](ClusteringSession::converge) operations and a consistent
//!   [`Snapshot`] of `{centroids, clusters}` after every mutation.
//!
//! ## Example
//!
//! ```
//! use kmeans_lab::{ClusteringSession, InitMethod};
//! use ndarray_rand::rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//!
//! // A seeded generator makes the whole run reproducible.
//! let rng = Xoshiro256Plus::seed_from_u64(42);
//! let mut session = ClusteringSession::params_with_rng(rng)
//!     .tolerance(1e-3)
//!     .check()
//!     .unwrap();
//!
//! session.generate(200);
//! session.initialize(InitMethod::KMeansPlusPlus, 3).unwrap();
//!
//! // Watch a single iteration...
//! let snapshot = session.step().unwrap();
//! assert_eq!(snapshot.centroids.len(), 3);
//!
//! // ...or let it run to a fixed point.
//! let outcome = session.converge(100).unwrap();
//! assert!(outcome.converged);
//! ```
mod dataset;
mod k_means;

pub use dataset::*;
pub use k_means::*;
