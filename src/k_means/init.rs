use ndarray::{s, Array1, Array2, ArrayView2, Axis};
use ndarray_rand::rand;
use ndarray_rand::rand::distributions::{Distribution, WeightedIndex};
use ndarray_rand::rand::Rng;

use super::algorithm::update_min_dists;

/// Strategy used to seed the initial centroid list.
///
/// Every strategy picks its centroids among the dataset points and produces
/// exactly `k` of them. The randomized strategies draw from the session's
/// injected random generator, so a fixed seed reproduces the exact selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitMethod {
    /// `k` distinct dataset points, sampled uniformly without replacement.
    Random,
    /// A random first pick, then repeatedly the point whose minimum distance
    /// to the already chosen centroids is maximal (ties to the lowest dataset
    /// index). Greedily maximizes spread and is deterministic given the first
    /// pick.
    FarthestFirst,
    /// Standard K-Means++ seeding: a random first pick, then each subsequent
    /// centroid sampled with probability proportional to its squared distance
    /// to the nearest already chosen centroid.
    KMeansPlusPlus,
}

impl InitMethod {
    pub(crate) fn run(
        &self,
        k: usize,
        observations: &ArrayView2<f64>,
        rng: &mut impl Rng,
    ) -> Array2<f64> {
        match self {
            Self::Random => random_init(k, observations, rng),
            Self::FarthestFirst => farthest_first(k, observations, rng),
            Self::KMeansPlusPlus => k_means_pp(k, observations, rng),
        }
    }
}

fn random_init(k: usize, observations: &ArrayView2<f64>, rng: &mut impl Rng) -> Array2<f64> {
    let indices = rand::seq::index::sample(rng, observations.nrows(), k).into_vec();
    observations.select(Axis(0), &indices)
}

fn farthest_first(k: usize, observations: &ArrayView2<f64>, rng: &mut impl Rng) -> Array2<f64> {
    let (n_samples, n_features) = observations.dim();
    let mut centroids = Array2::zeros((k, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&observations.row(first));

    let mut dists = Array1::zeros(n_samples);
    for c_cnt in 1..k {
        update_min_dists(&centroids.slice(s![0..c_cnt, ..]), observations, &mut dists);
        // Strict comparison keeps the lowest dataset index on ties.
        let mut farthest = 0;
        for (index, &dist) in dists.iter().enumerate() {
            if dist > dists[farthest] {
                farthest = index;
            }
        }
        centroids.row_mut(c_cnt).assign(&observations.row(farthest));
    }
    centroids
}

fn k_means_pp(k: usize, observations: &ArrayView2<f64>, rng: &mut impl Rng) -> Array2<f64> {
    let (n_samples, n_features) = observations.dim();
    let mut centroids = Array2::zeros((k, n_features));
    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&observations.row(first));

    let mut dists = Array1::zeros(n_samples);
    for c_cnt in 1..k {
        update_min_dists(&centroids.slice(s![0..c_cnt, ..]), observations, &mut dists);
        // The min-distances are already squared, so they are the K-Means++
        // weights as-is. All-zero weights mean every remaining point
        // coincides with a chosen centroid; any pick is then as good as
        // another.
        let centroid_idx = match WeightedIndex::new(dists.iter()) {
            Ok(weights) => weights.sample(rng),
            Err(_) => 0,
        };
        centroids
            .row_mut(c_cnt)
            .assign(&observations.row(centroid_idx));
    }
    centroids
}
