//! Output types returned by the optimizer.

use std::collections::BTreeSet;

use geo::Coord;

use crate::FuelStation;

/// A committed refuelling stop.
///
/// Holds copies of the station's display fields; no references back into the
/// station store survive the optimization call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelStop {
    /// OPIS identifier of the chosen station.
    pub station_id: u64,
    /// Station display name.
    pub name: String,
    /// Station city.
    pub city: String,
    /// Station state code.
    pub state: String,
    /// Retail price in dollars per gallon.
    pub price_per_gallon: f64,
    /// Station position.
    pub location: Coord<f64>,
    /// Progress along the route when the stop was chosen.
    pub distance_from_start_miles: f64,
    /// Fuel burnt since the previous stop, rounded to two decimals.
    pub gallons_needed: f64,
    /// `gallons_needed * price_per_gallon`, rounded to two decimals.
    pub cost_at_stop: f64,
}

impl FuelStop {
    /// Build a stop for `station`, copying its display fields.
    #[must_use]
    pub fn at_station(
        station: &FuelStation,
        distance_from_start_miles: f64,
        gallons_needed: f64,
        cost_at_stop: f64,
    ) -> Self {
        Self {
            station_id: station.id(),
            name: station.name().to_owned(),
            city: station.city().to_owned(),
            state: station.state().to_owned(),
            price_per_gallon: station.price_per_gallon(),
            location: station.location(),
            distance_from_start_miles,
            gallons_needed,
            cost_at_stop,
        }
    }
}

/// Trip-level result of an optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripPlan {
    /// Route polyline, passed through unchanged.
    ///
    /// Serialised as a GeoJSON `LineString` of `[longitude, latitude]` pairs.
    #[cfg_attr(feature = "serde", serde(rename = "route_geometry", with = "line_string"))]
    pub geometry: Vec<Coord<f64>>,
    /// Total driving distance in miles.
    pub total_distance_miles: f64,
    /// Sum of `cost_at_stop` over all stops, rounded to two decimals.
    ///
    /// Only fuel bought at selected stops is counted, not a full-tank cost.
    pub total_fuel_cost: f64,
    /// Fuel burnt over the whole trip: `total_distance_miles / mpg`.
    pub estimated_gallons: f64,
    /// Ordered refuelling stops.
    pub fuel_stops: Vec<FuelStop>,
    /// Number of stops.
    pub stops_count: usize,
    /// Low-fuel searches that found no station within the search radius.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skipped_refuels: usize,
}

/// Summary of a station catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogStats {
    /// Number of stations.
    pub total_stations: usize,
    /// Number of distinct state codes.
    pub states_covered: usize,
    /// Lowest price, when the catalog is not empty.
    pub cheapest_price: Option<f64>,
    /// Highest price, when the catalog is not empty.
    pub highest_price: Option<f64>,
}

impl CatalogStats {
    /// Summarise `stations`.
    ///
    /// # Examples
    /// ```
    /// use fuelwise_core::CatalogStats;
    ///
    /// let stats = CatalogStats::from_stations(&[]);
    /// assert_eq!(stats.total_stations, 0);
    /// assert!(stats.cheapest_price.is_none());
    /// ```
    #[must_use]
    pub fn from_stations(stations: &[FuelStation]) -> Self {
        let states: BTreeSet<&str> = stations.iter().map(FuelStation::state).collect();
        let prices = stations.iter().map(FuelStation::price_per_gallon);
        Self {
            total_stations: stations.len(),
            states_covered: states.len(),
            cheapest_price: prices.clone().min_by(f64::total_cmp),
            highest_price: prices.max_by(f64::total_cmp),
        }
    }
}

#[cfg(feature = "serde")]
mod line_string {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    const GEOJSON_TYPE: &str = "LineString";

    #[derive(Serialize, Deserialize)]
    struct LineString {
        #[serde(rename = "type")]
        kind: String,
        coordinates: Vec<[f64; 2]>,
    }

    pub(super) fn serialize<S>(coords: &[Coord<f64>], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        LineString {
            kind: GEOJSON_TYPE.to_owned(),
            coordinates: coords.iter().map(|c| [c.x, c.y]).collect(),
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Coord<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let line = LineString::deserialize(deserializer)?;
        if line.kind != GEOJSON_TYPE {
            return Err(D::Error::custom(format!(
                "expected GeoJSON {GEOJSON_TYPE}, found {}",
                line.kind
            )));
        }
        Ok(line
            .coordinates
            .into_iter()
            .map(|[x, y]| Coord { x, y })
            .collect())
    }
}
