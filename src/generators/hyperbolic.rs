use std::f64::consts::{PI, TAU};

use rand::Rng;
use tracing::{debug, info, instrument};

use super::isolated_vertices;
use crate::{
    error::{Error, Result},
    graph::{Graph, VertexId},
};

/// Parameters of the random hyperbolic graph model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HyperbolicParams {
    n: VertexId,
    /// Radial dispersion; controls the power-law exponent `2a + 1`.
    a: f64,
    /// Average-degree control, sets the disk radius `2 ln(n / c)`.
    c: f64,
}

impl HyperbolicParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] unless `n >= 1`, `a > 1/2` and `0 < c < n`.
    pub fn new(n: VertexId, a: f64, c: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::invalid_parameters("n must be at least 1"));
        }
        if !(a.is_finite() && a > 0.5) {
            return Err(Error::invalid_parameters(format!("a ({a}) must exceed 1/2")));
        }
        if !(c > 0.0 && c < f64::from(n)) {
            return Err(Error::invalid_parameters(format!(
                "c ({c}) must lie strictly between 0 and n ({n})"
            )));
        }

        Ok(Self { n, a, c })
    }

    pub fn n(&self) -> VertexId {
        self.n
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    /// Radius of the disk the vertices are scattered over.
    pub fn radius(&self) -> f64 {
        2.0 * (f64::from(self.n) / self.c).ln()
    }

    /// Closed-form average degree the model converges to for large `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use complexnets::generators::HyperbolicParams;
    ///
    /// // With a = 1 the prefactor is (2 / pi) * 2^2.
    /// let params = HyperbolicParams::new(1_000, 1.0, 2.0).unwrap();
    /// let expected = 8.0 / std::f64::consts::PI * 2.0;
    /// assert!((params.expected_average_degree() - expected).abs() < 1e-9);
    /// ```
    pub fn expected_average_degree(&self) -> f64 {
        let xi = self.a / (self.a - 0.5);
        2.0 / PI * xi * xi * f64::from(self.n) * (-self.radius() / 2.0).exp()
    }
}

/// A point of the hyperbolic disk in polar coordinates.
#[derive(Clone, Copy, Debug)]
struct Polar {
    radius: f64,
    angle: f64,
}

impl Polar {
    /// `cosh` of the hyperbolic distance between two points.
    fn cosh_distance(&self, other: &Polar) -> f64 {
        let delta = PI - (PI - (self.angle - other.angle).abs()).abs();
        self.radius.cosh() * other.radius.cosh()
            - self.radius.sinh() * other.radius.sinh() * delta.cos()
    }
}

/// Above this `a R` the radial quantile is taken in log space, `cosh(a R)` overflows past ~710.
const LOG_SPACE_FROM: f64 = 32.0;

/// Inverse of the radial CDF `(cosh(a r) - 1) / (cosh(a R) - 1)` at `u` in `[0, 1]`.
fn radial_quantile(u: f64, a: f64, radius: f64) -> f64 {
    let x = a * radius;
    if x < LOG_SPACE_FROM {
        return (1.0 + u * (x.cosh() - 1.0)).acosh() / a;
    }

    // cosh(a r) = 1 - u + u cosh(x), written as e^x (u / 2 + (1 - u) e^-x) up to e^-2x.
    let log_cosh = x + (0.5 * u + (1.0 - u) * (-x).exp()).ln();
    // acosh(y) = ln y + ln(1 + sqrt(1 - 1 / y^2))
    let r = log_cosh + (1.0 + (1.0 - (-2.0 * log_cosh).exp()).max(0.0).sqrt()).ln();

    (r / a).clamp(0.0, radius)
}

/// Scatters `n` points over a hyperbolic disk of radius `R` and links every pair closer than
/// `R`. Radii follow the density `a sinh(a r) / (cosh(a R) - 1)`, angles are uniform.
#[instrument(level = "debug", skip(rng))]
pub fn hyperbolic<R: Rng + ?Sized>(params: &HyperbolicParams, rng: &mut R) -> Result<Graph> {
    let radius = params.radius();
    info!(
        radius,
        expected_average_degree = params.expected_average_degree(),
        "generating hyperbolic graph"
    );

    let points: Vec<Polar> = (0..params.n)
        .map(|_| {
            let u: f64 = rng.gen();
            Polar {
                radius: radial_quantile(u, params.a, radius),
                angle: rng.gen_range(0.0..TAU),
            }
        })
        .collect();

    let mut graph = isolated_vertices(params.n);
    let threshold = radius.cosh();

    for (i, p) in points.iter().enumerate() {
        for (j, q) in points.iter().enumerate().skip(i + 1) {
            if p.cosh_distance(q) < threshold {
                graph.insert_edge(i as VertexId + 1, j as VertexId + 1)?;
            }
        }
    }

    debug!(edges = graph.edge_count(), "generated hyperbolic graph");

    Ok(graph)
}
