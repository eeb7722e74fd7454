//! Heap configuration.

/// Tunables for allocation and collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapConfig {
    /// Cells examined by a default-sized sweep.
    pub sweep_batch: usize,
    /// Bounded sweeps stop once the ring holds this many cells or fewer.
    pub low_water: usize,
    /// Bucket count allocated on a hash's first insertion. Never grows.
    pub hash_buckets: usize,
    /// Slab capacity reserved up front.
    pub initial_slots: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        Self {
            sweep_batch: 1024,
            low_water: 256,
            hash_buckets: 31,
            initial_slots: 1024,
        }
    }
}
