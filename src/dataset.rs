use ndarray::{Array2, ArrayView2};
use rand::Rng;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A single 2-D observation.
///
/// Coordinates are plot-relative scalars; the engine only assumes they are
/// finite. `Point` is the exchange type at the API boundary, while the
/// session stores observations as rows of an `(n, 2)` matrix.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from(coords: [f64; 2]) -> Self {
        Point::new(coords[0], coords[1])
    }
}

/// Draw `n` points uniformly at random from the half-open rectangle
/// `[0, width) x [0, height)`.
///
/// Returns a matrix of shape `(n, 2)`; `n = 0` yields an empty matrix.
/// Points are not required to be distinct.
pub fn generate_points(n: usize, (width, height): (f64, f64), rng: &mut impl Rng) -> Array2<f64> {
    let mut points = Array2::zeros((n, 2));
    for mut point in points.rows_mut() {
        point[0] = rng.gen::<f64>() * width;
        point[1] = rng.gen::<f64>() * height;
    }
    points
}

/// Convert the rows of an `(m, 2)` matrix into boundary [`Point`]s,
/// preserving row order.
pub fn to_points(rows: ArrayView2<f64>) -> Vec<Point> {
    rows.rows()
        .into_iter()
        .map(|row| Point::new(row[0], row[1]))
        .collect()
}

/// Stack boundary [`Point`]s back into an `(m, 2)` matrix.
pub fn from_points(points: &[Point]) -> Array2<f64> {
    let mut rows = Array2::zeros((points.len(), 2));
    for (index, point) in points.iter().enumerate() {
        rows[[index, 0]] = point.x;
        rows[[index, 1]] = point.y;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn generated_points_stay_in_bounds() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let points = generate_points(500, (500.0, 250.0), &mut rng);

        assert_eq!(points.dim(), (500, 2));
        for point in points.rows() {
            assert!((0.0..500.0).contains(&point[0]));
            assert!((0.0..250.0).contains(&point[1]));
        }
    }

    #[test]
    fn zero_points_is_an_empty_matrix() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let points = generate_points(0, (500.0, 500.0), &mut rng);
        assert_eq!(points.dim(), (0, 2));
    }

    #[test]
    fn generation_is_reproducible_for_a_fixed_seed() {
        let mut rng1 = Xoshiro256Plus::seed_from_u64(7);
        let mut rng2 = Xoshiro256Plus::seed_from_u64(7);
        assert_eq!(
            generate_points(50, (100.0, 100.0), &mut rng1),
            generate_points(50, (100.0, 100.0), &mut rng2),
        );
    }

    #[test]
    fn point_conversions_roundtrip() {
        let rows = array![[1.0, 2.0], [3.5, -4.0]];
        let points = to_points(rows.view());
        assert_eq!(points, vec![Point::new(1.0, 2.0), Point::new(3.5, -4.0)]);
        assert_eq!(from_points(&points), rows);
    }
}
