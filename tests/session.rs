use approx::assert_abs_diff_eq;
use kmeans_lab::{ClusteringSession, InitMethod, Point, SessionError};
use ndarray::array;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn session() -> ClusteringSession<Xoshiro256Plus> {
    ClusteringSession::params_with_rng(Xoshiro256Plus::seed_from_u64(42))
        .check()
        .unwrap()
}

fn two_bars() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 2.0),
    ]
}

/// The worked two-cluster example: four points, centroids seeded by hand at
/// (0,0) and (10,0).
#[test]
fn two_bar_dataset_converges_in_two_iterations() {
    let mut session = session();
    session.load_points(&two_bars());
    session.begin_manual(2).unwrap();
    session.add_manual_centroid(Point::new(0.0, 0.0)).unwrap();
    session.add_manual_centroid(Point::new(10.0, 0.0)).unwrap();

    // First iteration splits the bars and moves both centroids to their
    // vertical midpoints.
    let snapshot = session.step().unwrap();
    assert_eq!(
        snapshot.centroids,
        vec![Point::new(0.0, 1.0), Point::new(10.0, 1.0)]
    );
    assert_eq!(
        snapshot.clusters,
        vec![
            vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0)],
            vec![Point::new(10.0, 0.0), Point::new(10.0, 2.0)],
        ]
    );

    // A second iteration changes nothing.
    let again = session.step().unwrap();
    assert_eq!(again, snapshot);

    // From a fresh manual seed, converge detects the fixed point on its
    // second iteration.
    session.begin_manual(2).unwrap();
    session.add_manual_centroid(Point::new(0.0, 0.0)).unwrap();
    session.add_manual_centroid(Point::new(10.0, 0.0)).unwrap();
    let outcome = session.converge(10).unwrap();
    assert!(outcome.converged);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(
        outcome.centroids,
        vec![Point::new(0.0, 1.0), Point::new(10.0, 1.0)]
    );
}

#[test]
fn every_point_lands_in_exactly_one_cluster() {
    let mut session = session();
    let points = session.generate(200);
    session.initialize(InitMethod::KMeansPlusPlus, 5).unwrap();
    let snapshot = session.step().unwrap();

    let total: usize = snapshot.clusters.iter().map(Vec::len).sum();
    assert_eq!(total, points.len());

    // Cluster order respects dataset order, so flattening by membership and
    // comparing multisets reduces to checking each point is found once.
    let mut remaining = points.clone();
    for cluster in &snapshot.clusters {
        for point in cluster {
            let position = remaining
                .iter()
                .position(|candidate| candidate == point)
                .expect("assigned point is not part of the dataset");
            remaining.swap_remove(position);
        }
    }
    assert!(remaining.is_empty());
}

#[test]
fn converged_sessions_are_stable_under_further_steps() {
    let mut session = ClusteringSession::params_with_rng(Xoshiro256Plus::seed_from_u64(7))
        .tolerance(1e-6)
        .check()
        .unwrap();
    session.generate(300);
    session.initialize(InitMethod::KMeansPlusPlus, 4).unwrap();

    let outcome = session.converge(300).unwrap();
    assert!(outcome.converged);

    let before = session.centroids().unwrap().to_owned();
    session.step().unwrap();
    let after = session.centroids().unwrap().to_owned();
    assert!(kmeans_lab::max_centroid_shift(&before, &after) < 1e-6);
}

#[test]
fn insufficient_data_is_reported_before_any_mutation() {
    let mut session = session();
    session.generate(3);
    session.initialize(InitMethod::Random, 3).unwrap();

    assert_eq!(
        session.initialize(InitMethod::Random, 5),
        Err(SessionError::InsufficientData {
            requested: 5,
            available: 3
        })
    );
    // The previous centroid list survives the failed call.
    assert_eq!(session.centroids().unwrap().nrows(), 3);
}

#[test]
fn duplicate_manual_point_is_signaled_and_ignored() {
    let mut session = session();
    session.generate(10);
    session.begin_manual(3).unwrap();
    session.add_manual_centroid(Point::new(5.0, 5.0)).unwrap();

    assert!(matches!(
        session.add_manual_centroid(Point::new(5.0, 5.0)),
        Err(SessionError::DuplicateManualPoint { .. })
    ));
    assert_eq!(session.manual_collected().unwrap().len(), 1);
}

#[test]
fn pure_steps_are_reusable_outside_the_session() {
    // The assignment and update halves are plain functions; drive one Lloyd
    // iteration by hand and compare with the session.
    let observations = array![[0., 0.], [0., 2.], [10., 0.], [10., 2.]];
    let centroids = array![[0., 0.], [10., 0.]];

    let memberships = kmeans_lab::compute_memberships(&centroids, &observations);
    assert_eq!(memberships, ndarray::array![0, 0, 1, 1]);

    let updated = kmeans_lab::compute_centroids(&centroids, &observations, &memberships);
    assert_abs_diff_eq!(updated, array![[0., 1.], [10., 1.]]);
}

#[test]
fn a_session_can_be_shared_behind_a_mutex() {
    // The engine serializes nothing internally; this is the documented way to
    // share it between callers.
    let session = std::sync::Mutex::new(session());
    {
        let mut guard = session.lock().unwrap();
        guard.generate(50);
        guard.initialize(InitMethod::FarthestFirst, 3).unwrap();
    }
    let outcome = session.lock().unwrap().converge(100).unwrap();
    assert_eq!(outcome.centroids.len(), 3);
}
