use std::collections::{HashSet, VecDeque};

use crate::geometry::PointCollection;
use crate::layers::LayerStore;

/// One unit of pending work: a ZIP code and its full point cloud.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub zipcode: String,
    pub points: PointCollection,
}

/// Pull-based cursor over the ZIP codes of one region that have boundary
/// points but no stored polygon yet.
///
/// The cursor drains a local buffer and issues one bounded store query per
/// refill. Exclusions added mid-walk affect subsequent batches but never
/// un-yield an item already returned; the first empty batch ends the walk
/// permanently. Scoped to a single pass — a new pass gets a new walker.
pub struct ZipWalker {
    geocode: String,
    batch_size: usize,
    exclude: HashSet<String>,
    buffer: VecDeque<WorkItem>,
    exhausted: bool,
}

impl ZipWalker {
    /// Creates a cursor over the region's pending ZIP codes.
    #[must_use]
    pub fn new(geocode: impl Into<String>, batch_size: usize) -> Self {
        Self {
            geocode: geocode.into(),
            batch_size: batch_size.max(1),
            exclude: HashSet::new(),
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Marks a ZIP code as attempted: later batches will not offer it again.
    pub fn exclude(&mut self, zipcode: impl Into<String>) {
        self.exclude.insert(zipcode.into());
    }

    /// Returns the next pending work item, fetching one bounded batch from
    /// the store when the local buffer runs dry.
    pub fn next_item(&mut self, store: &LayerStore) -> Option<WorkItem> {
        if self.buffer.is_empty() && !self.exhausted {
            let batch = store.pending_point_clouds(&self.geocode, &self.exclude, self.batch_size);
            if batch.is_empty() {
                self.exhausted = true;
            }
            self.buffer.extend(
                batch
                    .into_iter()
                    .map(|(zipcode, points)| WorkItem { zipcode, points }),
            );
        }
        self.buffer.pop_front()
    }

    /// Whether the walk has hit an empty batch.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
