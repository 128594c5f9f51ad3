use ndarray::{Array1, Array2, ArrayView2};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::algorithm::{compute_centroids, compute_memberships, max_centroid_shift};
use super::errors::{Result, SessionError};
use super::hyperparams::{SessionParams, SessionValidParams};
use super::init::InitMethod;
use crate::dataset::{self, Point};

/// One consistent view of the clustering state: the centroid list together
/// with the partition it was produced from in the same transition.
///
/// After [`ClusteringSession::step`], `clusters` holds the assignment the
/// update step averaged over and `centroids` the recomputed positions, so a
/// renderer never pairs centroids from one iteration with an assignment from
/// another.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Centroid positions; the row index is the cluster label
    pub centroids: Vec<Point>,
    /// `clusters[label]` lists the points assigned to that centroid, in
    /// dataset order. Empty until the first assignment exists.
    pub clusters: Vec<Vec<Point>>,
}

/// Outcome of [`ClusteringSession::converge`].
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Convergence {
    pub centroids: Vec<Point>,
    pub clusters: Vec<Vec<Point>>,
    /// Total iterations performed by the session so far
    pub iterations: u64,
    /// Whether every centroid's squared movement dropped below the tolerance
    /// before the iteration cap was reached
    pub converged: bool,
}

/// Progress report from manual centroid collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManualProgress {
    /// More centroids are needed before the session can step
    Collecting { collected: usize, remaining: usize },
    /// All `k` centroids are placed; the session is ready
    Complete,
}

/// Where the session currently stands. Invalid call combinations are rejected
/// by matching on this, not by ad hoc flags.
#[derive(Clone, Debug, PartialEq)]
enum Phase {
    /// No centroids yet
    Idle,
    /// Manual mode: accumulating user-placed centroids until `k` are collected
    Collecting { k: usize, picked: Vec<Point> },
    /// Full centroid list; memberships appear after the first step
    Ready {
        centroids: Array2<f64>,
        memberships: Option<Array1<usize>>,
    },
}

/// A stateful K-Means engine for one interactively explored dataset.
///
/// The session owns the current point set, the centroid list and the latest
/// cluster assignment, and advances them through [`step`](Self::step) and
/// [`converge`](Self::converge). Centroids are seeded either with an
/// automatic [`InitMethod`] or point by point in manual mode
/// ([`begin_manual`](Self::begin_manual) /
/// [`add_manual_centroid`](Self::add_manual_centroid)).
///
/// Every mutating call either commits completely or fails with the prior
/// state untouched, and no call suspends internally. The session performs no
/// locking of its own: it models a single logical session, so concurrent
/// callers must serialize access externally (the type is `Send`, a
/// `Mutex<ClusteringSession<_>>` at the boundary is enough).
pub struct ClusteringSession<R: Rng = Xoshiro256Plus> {
    points: Array2<f64>,
    phase: Phase,
    iteration: u64,
    params: SessionValidParams,
    rng: R,
}

impl ClusteringSession<Xoshiro256Plus> {
    /// A session with default parameters and an entropy-seeded generator.
    pub fn new() -> Self {
        ClusteringSession::from_parts(
            SessionValidParams::default(),
            Xoshiro256Plus::from_entropy(),
        )
    }

    /// Configure a session with the builder pattern.
    pub fn params() -> SessionParams<Xoshiro256Plus> {
        SessionParams::new(Xoshiro256Plus::from_entropy())
    }
}

impl Default for ClusteringSession<Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ClusteringSession<R> {
    /// Configure a session around a caller-supplied random generator, so a
    /// fixed seed reproduces dataset generation and centroid seeding exactly.
    pub fn params_with_rng(rng: R) -> SessionParams<R> {
        SessionParams::new(rng)
    }

    pub(crate) fn from_parts(params: SessionValidParams, rng: R) -> Self {
        ClusteringSession {
            points: Array2::zeros((0, 2)),
            phase: Phase::Idle,
            iteration: 0,
            params,
            rng,
        }
    }

    /// Replace the dataset with `n` fresh uniform points from the configured
    /// bounds. Clears centroids, assignment, manual progress and the
    /// iteration counter. `n = 0` is allowed and yields an empty dataset.
    pub fn generate(&mut self, n: usize) -> Vec<Point> {
        self.points = dataset::generate_points(n, self.params.bounds(), &mut self.rng);
        self.phase = Phase::Idle;
        self.iteration = 0;
        dataset::to_points(self.points.view())
    }

    /// Replace the dataset with caller-supplied points instead of random
    /// ones. Same clearing semantics as [`generate`](Self::generate).
    pub fn load_points(&mut self, points: &[Point]) {
        self.points = dataset::from_points(points);
        self.phase = Phase::Idle;
        self.iteration = 0;
    }

    /// Seed the centroid list with an automatic strategy.
    ///
    /// Recomputes from scratch on every call and clears any prior assignment.
    /// Fails with [`SessionError::NoDataset`] when no dataset exists and with
    /// [`SessionError::InsufficientData`] when `k` is zero or exceeds the
    /// number of points.
    pub fn initialize(&mut self, method: InitMethod, k: usize) -> Result<Vec<Point>> {
        self.check_k(k)?;
        let centroids = method.run(k, &self.points.view(), &mut self.rng);
        let placed = dataset::to_points(centroids.view());
        self.phase = Phase::Ready {
            centroids,
            memberships: None,
        };
        self.iteration = 0;
        Ok(placed)
    }

    /// Enter manual mode with an empty collected list. Subsequent
    /// [`add_manual_centroid`](Self::add_manual_centroid) calls fill the
    /// centroid list up to `k`. Preconditions are the same as for
    /// [`initialize`](Self::initialize).
    pub fn begin_manual(&mut self, k: usize) -> Result<()> {
        self.check_k(k)?;
        self.phase = Phase::Collecting {
            k,
            picked: Vec::with_capacity(k),
        };
        self.iteration = 0;
        Ok(())
    }

    /// Record one user-placed centroid.
    ///
    /// A point whose coordinates exactly match an already collected centroid
    /// is rejected with [`SessionError::DuplicateManualPoint`] and the
    /// collected list stays as it was. Once the `k`-th centroid lands the
    /// session becomes ready and [`ManualProgress::Complete`] is returned.
    pub fn add_manual_centroid(&mut self, point: Point) -> Result<ManualProgress> {
        let (k, picked) = match &mut self.phase {
            Phase::Collecting { k, picked } => (*k, picked),
            _ => return Err(SessionError::ManualNotActive),
        };
        if picked.contains(&point) {
            return Err(SessionError::DuplicateManualPoint {
                x: point.x,
                y: point.y,
            });
        }
        picked.push(point);

        if picked.len() == k {
            let centroids = dataset::from_points(picked);
            self.phase = Phase::Ready {
                centroids,
                memberships: None,
            };
            Ok(ManualProgress::Complete)
        } else {
            Ok(ManualProgress::Collecting {
                collected: picked.len(),
                remaining: k - picked.len(),
            })
        }
    }

    /// Run one K-Means iteration: assign every point to its nearest centroid,
    /// then move each centroid to the mean of its cluster (an empty cluster
    /// keeps its position).
    ///
    /// Returns the snapshot of the resulting state. Fails with
    /// [`SessionError::NotInitialized`] while the centroid list is absent or
    /// still being collected.
    pub fn step(&mut self) -> Result<Snapshot> {
        self.run_step()?;
        self.snapshot().ok_or(SessionError::NotInitialized)
    }

    /// Repeat the step logic until every centroid's squared movement in one
    /// iteration drops below the tolerance, or `max_iterations` have been
    /// performed. `max_iterations <= 0` performs no iterations and reports
    /// `converged = false`.
    pub fn converge(&mut self, max_iterations: i64) -> Result<Convergence> {
        if !self.is_ready() {
            return Err(SessionError::NotInitialized);
        }
        let mut converged = false;
        for _ in 0..max_iterations.max(0) {
            let shift = self.run_step()?;
            if shift < self.params.tolerance() {
                converged = true;
                break;
            }
        }
        let Snapshot {
            centroids,
            clusters,
        } = self.snapshot().ok_or(SessionError::NotInitialized)?;
        Ok(Convergence {
            centroids,
            clusters,
            iterations: self.iteration,
            converged,
        })
    }

    /// Drop centroids, assignment, manual progress and the iteration counter.
    /// The dataset is preserved.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.iteration = 0;
    }

    /// The current `{centroids, clusters}` pair, or `None` while no complete
    /// centroid list exists.
    pub fn snapshot(&self) -> Option<Snapshot> {
        match &self.phase {
            Phase::Ready {
                centroids,
                memberships,
            } => Some(Snapshot {
                centroids: dataset::to_points(centroids.view()),
                clusters: match memberships {
                    Some(memberships) => group_clusters(&self.points, centroids, memberships),
                    None => Vec::new(),
                },
            }),
            _ => None,
        }
    }

    /// The current dataset as boundary points, in generation order.
    pub fn points(&self) -> Vec<Point> {
        dataset::to_points(self.points.view())
    }

    /// The current dataset as an `(n, 2)` view.
    pub fn observations(&self) -> ArrayView2<f64> {
        self.points.view()
    }

    /// The current centroid matrix, if a complete centroid list exists.
    pub fn centroids(&self) -> Option<ArrayView2<f64>> {
        match &self.phase {
            Phase::Ready { centroids, .. } => Some(centroids.view()),
            _ => None,
        }
    }

    /// The latest memberships (index-aligned with the dataset), if a step has
    /// run since initialization.
    pub fn memberships(&self) -> Option<&Array1<usize>> {
        match &self.phase {
            Phase::Ready { memberships, .. } => memberships.as_ref(),
            _ => None,
        }
    }

    /// Centroids collected so far in manual mode.
    pub fn manual_collected(&self) -> Option<&[Point]> {
        match &self.phase {
            Phase::Collecting { picked, .. } => Some(picked),
            _ => None,
        }
    }

    /// Iterations performed since the last (re)initialization.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Whether a complete centroid list exists, i.e. `step`/`converge` may run.
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready { .. })
    }

    fn check_k(&self, k: usize) -> Result<()> {
        let available = self.points.nrows();
        if available == 0 {
            return Err(SessionError::NoDataset);
        }
        if k < 1 || k > available {
            return Err(SessionError::InsufficientData {
                requested: k,
                available,
            });
        }
        Ok(())
    }

    /// One assignment + update pass; returns the largest squared centroid
    /// movement it caused.
    fn run_step(&mut self) -> Result<f64> {
        let (centroids, memberships) = match &mut self.phase {
            Phase::Ready {
                centroids,
                memberships,
            } => (centroids, memberships),
            _ => return Err(SessionError::NotInitialized),
        };
        let assignment = compute_memberships(centroids, &self.points);
        let updated = compute_centroids(centroids, &self.points, &assignment);
        let shift = max_centroid_shift(centroids, &updated);
        *centroids = updated;
        *memberships = Some(assignment);
        self.iteration += 1;
        Ok(shift)
    }
}

/// Group the flat memberships into per-cluster point lists, preserving
/// dataset order within each cluster.
fn group_clusters(
    points: &Array2<f64>,
    centroids: &Array2<f64>,
    memberships: &Array1<usize>,
) -> Vec<Vec<Point>> {
    let mut clusters = vec![Vec::new(); centroids.nrows()];
    for (point, &label) in points.rows().into_iter().zip(memberships) {
        clusters[label].push(Point::new(point[0], point[1]));
    }
    clusters
}
