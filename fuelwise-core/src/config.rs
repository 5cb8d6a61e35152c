//! Tunables for the optimization engine.

use std::time::Duration;

use crate::{DEFAULT_DISTANCE_TTL, InvalidInputError};

/// Vehicle characteristics used for a single optimization.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleProfile {
    /// Maximum distance on a full tank, in miles.
    pub range_miles: f64,
    /// Fuel economy in miles per gallon.
    pub mpg: f64,
}

impl VehicleProfile {
    /// Build a profile without validation; [`VehicleProfile::validate`] runs
    /// inside the optimizer.
    #[must_use]
    pub const fn new(range_miles: f64, mpg: f64) -> Self {
        Self { range_miles, mpg }
    }

    /// Check that range and economy are finite and positive.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NonPositiveMpg`] or
    /// [`InvalidInputError::NonPositiveRange`].
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if !(self.mpg.is_finite() && self.mpg > 0.0) {
            return Err(InvalidInputError::NonPositiveMpg { value: self.mpg });
        }
        if !(self.range_miles.is_finite() && self.range_miles > 0.0) {
            return Err(InvalidInputError::NonPositiveRange {
                value: self.range_miles,
            });
        }
        Ok(())
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self::new(
            OptimizerConfig::DEFAULT_RANGE_MILES,
            OptimizerConfig::DEFAULT_MPG,
        )
    }
}

/// Injectable engine configuration.
///
/// # Examples
/// ```
/// use fuelwise_core::OptimizerConfig;
///
/// let config = OptimizerConfig {
///     sample_interval_miles: 25.0,
///     ..OptimizerConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.search_radius_miles(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Range used by [`TripPlanner`](crate::TripPlanner) when no vehicle is given.
    pub vehicle_range_miles: f64,
    /// Economy used by [`TripPlanner`](crate::TripPlanner) when no vehicle is given.
    pub vehicle_mpg: f64,
    /// Degrees of padding around the route extent for the candidate query.
    pub bounding_box_margin_degrees: f64,
    /// Target spacing between sampled route points.
    pub sample_interval_miles: f64,
    /// Fraction of range below which a station search starts.
    pub low_fuel_threshold_fraction: f64,
    /// Fraction of range bounding the distance from a point to a candidate.
    pub search_radius_fraction: f64,
    /// Dollars of score per mile of detour.
    pub deviation_weight: f64,
    /// Lifetime of memoised distances.
    pub distance_cache_ttl: Duration,
}

impl OptimizerConfig {
    /// Default vehicle range in miles.
    pub const DEFAULT_RANGE_MILES: f64 = 500.0;
    /// Default vehicle economy in miles per gallon.
    pub const DEFAULT_MPG: f64 = 10.0;

    /// Default vehicle derived from this configuration.
    #[must_use]
    pub const fn vehicle(&self) -> VehicleProfile {
        VehicleProfile::new(self.vehicle_range_miles, self.vehicle_mpg)
    }

    /// Search radius in miles for the default vehicle.
    #[expect(clippy::float_arithmetic, reason = "fraction of range")]
    #[must_use]
    pub fn search_radius_miles(&self) -> f64 {
        self.search_radius_fraction * self.vehicle_range_miles
    }

    /// Reject values that are not finite and positive.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::InvalidConfig`] naming the first offending
    /// field. `deviation_weight` may be zero.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let positive = [
            ("vehicle_range_miles", self.vehicle_range_miles),
            ("vehicle_mpg", self.vehicle_mpg),
            ("bounding_box_margin_degrees", self.bounding_box_margin_degrees),
            ("sample_interval_miles", self.sample_interval_miles),
            ("low_fuel_threshold_fraction", self.low_fuel_threshold_fraction),
            ("search_radius_fraction", self.search_radius_fraction),
        ];
        if let Some((field, value)) = positive
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(InvalidInputError::InvalidConfig { field, value });
        }
        if !(self.deviation_weight.is_finite() && self.deviation_weight >= 0.0) {
            return Err(InvalidInputError::InvalidConfig {
                field: "deviation_weight",
                value: self.deviation_weight,
            });
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            vehicle_range_miles: Self::DEFAULT_RANGE_MILES,
            vehicle_mpg: Self::DEFAULT_MPG,
            bounding_box_margin_degrees: 0.5,
            sample_interval_miles: 50.0,
            low_fuel_threshold_fraction: 0.25,
            search_radius_fraction: 0.2,
            deviation_weight: 0.1,
            distance_cache_ttl: DEFAULT_DISTANCE_TTL,
        }
    }
}
