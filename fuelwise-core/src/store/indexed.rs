//! In-memory station store backed by an R\*-tree.

use std::fmt;

use geo::Rect;
use rstar::{AABB, RTree};

use crate::FuelStation;

use super::{StationStore, StoreError, sort_by_price};

/// Station store answering range queries from an [`RTree`].
///
/// Queries are infallible; the tree is built once from an immutable snapshot.
pub struct IndexedStationStore {
    index: RTree<FuelStation>,
}

impl fmt::Debug for IndexedStationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedStationStore")
            .field("entries", &self.index.size())
            .finish_non_exhaustive()
    }
}

impl IndexedStationStore {
    /// Bulk-load `stations` into a new index.
    #[must_use]
    pub fn new<I>(stations: I) -> Self
    where
        I: IntoIterator<Item = FuelStation>,
    {
        Self {
            index: RTree::bulk_load(stations.into_iter().collect()),
        }
    }

    /// Number of indexed stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.size()
    }

    /// Whether the index holds no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }
}

impl Default for IndexedStationStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<FuelStation> for IndexedStationStore {
    fn from_iter<T: IntoIterator<Item = FuelStation>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl StationStore for IndexedStationStore {
    fn stations_in_bbox(&self, bbox: &Rect<f64>) -> Result<Vec<FuelStation>, StoreError> {
        let envelope =
            AABB::from_corners([bbox.min().x, bbox.min().y], [bbox.max().x, bbox.max().y]);
        let mut stations: Vec<_> = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .cloned()
            .collect();
        sort_by_price(&mut stations);
        Ok(stations)
    }

    fn all_stations(&self) -> Result<Vec<FuelStation>, StoreError> {
        let mut stations: Vec<_> = self.index.iter().cloned().collect();
        sort_by_price(&mut stations);
        Ok(stations)
    }
}
