use ndarray_rand::rand::Rng;

use super::errors::SessionParamsError;
use super::session::ClusteringSession;

/// The set of validated parameters a [`ClusteringSession`] runs with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionValidParams {
    /// Convergence is declared once every centroid's squared movement in one
    /// iteration is below `tolerance`.
    tolerance: f64,
    /// Half-open generation rectangle `[0, width) x [0, height)` for random
    /// datasets.
    bounds: (f64, f64),
}

impl SessionValidParams {
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }
}

impl Default for SessionValidParams {
    fn default() -> Self {
        SessionValidParams {
            tolerance: 1e-2,
            bounds: (500.0, 500.0),
        }
    }
}

/// A helper struct to configure a [`ClusteringSession`] with the builder
/// pattern.
///
/// Defaults are provided if optional parameters are not specified:
/// * `tolerance = 1e-2`
/// * `bounds = (500.0, 500.0)`
#[derive(Clone, Debug, PartialEq)]
pub struct SessionParams<R: Rng>(SessionValidParams, R);

impl<R: Rng> SessionParams<R> {
    pub(crate) fn new(rng: R) -> Self {
        SessionParams(SessionValidParams::default(), rng)
    }

    /// Change the convergence tolerance (largest allowed squared centroid
    /// movement per iteration)
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the rectangle random datasets are drawn from
    pub fn bounds(mut self, width: f64, height: f64) -> Self {
        self.0.bounds = (width, height);
        self
    }

    /// Validate the parameters and build the session.
    pub fn check(self) -> Result<ClusteringSession<R>, SessionParamsError> {
        let SessionParams(params, rng) = self;
        if !params.tolerance.is_finite() || params.tolerance <= 0.0 {
            Err(SessionParamsError::Tolerance)
        } else if !(params.bounds.0.is_finite() && params.bounds.0 > 0.0)
            || !(params.bounds.1.is_finite() && params.bounds.1 > 0.0)
        {
            Err(SessionParamsError::Bounds)
        } else {
            Ok(ClusteringSession::from_parts(params, rng))
        }
    }
}
