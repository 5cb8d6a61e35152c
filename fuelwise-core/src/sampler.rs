//! Thinning a dense route polyline to evenly spaced waypoints.

use geo::Coord;

/// Waypoints sampled from a borrowed polyline.
///
/// [`SampledRoute::iter`] may be called any number of times; each call
/// walks the same points from the start.
#[derive(Debug, Clone, Copy)]
pub struct SampledRoute<'a> {
    polyline: &'a [Coord<f64>],
    step: usize,
}

impl<'a> SampledRoute<'a> {
    /// Iterate over the sampled points in travel order.
    pub fn iter(&self) -> impl Iterator<Item = Coord<f64>> + use<'a> {
        self.polyline.iter().copied().step_by(self.step)
    }

    /// Number of sampled points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.polyline.len().div_ceil(self.step)
    }

    /// Whether no points were sampled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }
}

/// Sample `polyline` roughly every `interval_miles`.
///
/// The route splits into `floor(total / interval)` segments and every
/// `max(1, len / segments)`th point is kept, starting with the first. When
/// the route is shorter than one interval only the first and last points are
/// kept.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fuelwise_core::sample;
///
/// let polyline: Vec<_> = (0..10).map(|i| Coord { x: f64::from(i), y: 0.0 }).collect();
/// let sampled = sample(&polyline, 250.0, 50.0);
/// let xs: Vec<f64> = sampled.iter().map(|c| c.x).collect();
/// assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::integer_division,
    reason = "segment count is the floor of a non-negative ratio"
)]
#[must_use]
pub fn sample(
    polyline: &[Coord<f64>],
    total_distance_miles: f64,
    interval_miles: f64,
) -> SampledRoute<'_> {
    debug_assert!(
        interval_miles > 0.0,
        "sample interval must be positive, got {interval_miles}"
    );
    let segments = (total_distance_miles / interval_miles).floor() as usize;
    let step = if segments == 0 {
        // A stride of `len - 1` visits exactly the first and last points.
        polyline.len().saturating_sub(1)
    } else {
        polyline.len() / segments
    };
    SampledRoute {
        polyline,
        step: step.max(1),
    }
}
