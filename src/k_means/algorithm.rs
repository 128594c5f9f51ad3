//! The two pure halves of a Lloyd iteration: the assignment step
//! ([`compute_memberships`]) and the update step ([`compute_centroids`]).
//!
//! Both are plain functions of their inputs so that repeated calls with
//! identical arguments produce identical output.

use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2, Zip};

/// Squared Euclidean distance between two coordinate rows.
pub(crate) fn sq_dist(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(ai, bi)| (ai - bi) * (ai - bi))
        .sum()
}

/// Given a matrix of centroids with shape `(n_centroids, n_features)` and an
/// observation, return the index of the closest centroid and the squared
/// distance to it. Ties go to the lowest centroid index.
pub(crate) fn closest_centroid(
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    // (n_features,)
    observation: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> (usize, f64) {
    let (mut closest_index, mut minimum_distance) = (0, f64::INFINITY);
    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = sq_dist(centroid, observation.view());
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

/// Assignment step: compute, for each observation, the index of the nearest
/// centroid under squared Euclidean distance.
///
/// The returned memberships are index-aligned with `observations`, so every
/// observation lands in exactly one cluster. An empty centroid list yields an
/// empty membership vector.
pub fn compute_memberships(
    centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> Array1<usize> {
    if centroids.nrows() == 0 {
        return Array1::zeros(0);
    }
    let mut memberships = Array1::zeros(observations.nrows());
    Zip::from(observations.axis_iter(Axis(0)))
        .and(&mut memberships)
        .for_each(|observation, membership| {
            *membership = closest_centroid(centroids, &observation).0
        });
    memberships
}

/// Updates `dists` with the squared distance of each observation from its
/// closest centroid.
pub(crate) fn update_min_dists(
    centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    dists: &mut Array1<f64>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(dists)
        .for_each(|observation, dist| *dist = closest_centroid(centroids, &observation).1);
}

/// Update step: recompute each centroid as the coordinate-wise mean of its
/// assigned observations.
///
/// A cluster with no assigned observations keeps its previous centroid
/// unchanged, so the centroid count never shrinks between iterations. Such a
/// centroid stays inert until an observation later becomes closer to it than
/// to any other centroid.
pub fn compute_centroids(
    // (n_clusters, n_features)
    old_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    // (n_observations,)
    memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
) -> Array2<f64> {
    let n_clusters = old_centroids.nrows();
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut sums: Array2<f64> = Array2::zeros(old_centroids.raw_dim());

    Zip::from(observations.rows())
        .and(memberships)
        .for_each(|observation, &membership| {
            let mut sum = sums.row_mut(membership);
            sum += &observation;
            counts[membership] += 1;
        });

    let mut centroids = old_centroids.to_owned();
    Zip::from(centroids.rows_mut())
        .and(sums.rows())
        .and(&counts)
        .for_each(|mut centroid, sum, &count| {
            if count > 0 {
                centroid.assign(&sum.mapv(|total| total / count as f64));
            }
        });
    centroids
}

/// Largest per-centroid squared movement between two centroid sets of equal
/// shape. Convergence is declared once this drops below the tolerance.
pub fn max_centroid_shift(
    old_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    new_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
) -> f64 {
    Zip::from(old_centroids.rows())
        .and(new_centroids.rows())
        .fold(0.0, |largest, old, new| f64::max(largest, sq_dist(old, new)))
}
