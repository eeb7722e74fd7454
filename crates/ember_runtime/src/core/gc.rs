//! Deferred, batched collection over the heap's ring.
//!
//! Collection is caller-driven: nothing is reclaimed until `sweep` visits a
//! cell whose reference count is zero. Reclaiming a container releases its
//! children one hop; the children are swept on their own turn.

use super::heap::Heap;

/// How much of the ring a sweep examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepBudget {
    /// The configured batch size.
    Default,
    /// Up to this many live cells.
    Batch(usize),
    /// Every slot once, ignoring the low-water mark.
    Full,
}

impl From<i64> for SweepBudget {
    fn from(n: i64) -> Self {
        match n {
            0 => SweepBudget::Default,
            n if n < 0 => SweepBudget::Full,
            n => SweepBudget::Batch(n as usize),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub examined: usize,
    pub freed: usize,
    pub live: usize,
}

impl Heap {
    /// Examine cells from the cursor and reclaim those with no references.
    pub fn sweep(&mut self, budget: impl Into<SweepBudget>) -> SweepStats {
        let (limit, full) = match budget.into() {
            SweepBudget::Default => (self.config.sweep_batch, false),
            SweepBudget::Batch(n) => (n, false),
            SweepBudget::Full => (usize::MAX, true),
        };
        let mut stats = SweepStats::default();
        let total = self.slots.len();
        let mut visited = 0;

        while visited < total && stats.examined < limit {
            if !full && self.live <= self.config.low_water {
                break;
            }
            if self.cursor >= total {
                self.cursor = 0;
            }
            let index = self.cursor;
            self.cursor += 1;
            visited += 1;

            let Some(cell) = &self.slots[index].cell else {
                continue;
            };
            stats.examined += 1;
            if cell.refs == 0 {
                self.reclaim(index);
                stats.freed += 1;
            }
        }

        self.alloc_count = 0;
        stats.live = self.live;
        tracing::debug!(
            examined = stats.examined,
            freed = stats.freed,
            live = stats.live,
            full,
            "sweep"
        );
        stats
    }

    fn reclaim(&mut self, index: usize) {
        let Some(cell) = self.free_slot(index) else {
            return;
        };
        for child in cell.payload.children() {
            self.release(*child);
        }
    }

    /// True once a batch worth of cells was allocated since the last sweep.
    #[inline]
    pub fn should_sweep(&self) -> bool {
        self.alloc_count >= self.config.sweep_batch && self.live > self.config.low_water
    }

    pub fn set_sweep_batch(&mut self, batch: usize) {
        self.config.sweep_batch = batch;
    }

    pub fn set_low_water(&mut self, low_water: usize) {
        self.config.low_water = low_water;
    }
}
