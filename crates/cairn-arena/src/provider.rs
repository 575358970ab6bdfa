//! Memory providers: where an arena's backing region comes from.
//!
//! A provider hands out one zeroed, fixed-size region per arena and takes it
//! back when the arena is destroyed. Failure to supply memory is reported as
//! `None`, never as an abort, so arena creation can surface it as an error.

/// Source of fixed-size, zero-initialised byte regions.
pub trait MemoryProvider {
    /// Acquire exactly `size` zeroed bytes, or `None` if the request cannot
    /// be satisfied.
    fn acquire(&mut self, size: usize) -> Option<Box<[u8]>>;

    /// Give a region back. Returns whether the provider accepted it.
    fn release(&mut self, region: Box<[u8]>) -> bool;
}

/// Global-heap provider.
///
/// Uses fallible reservation so that an out-of-memory condition comes back
/// as `None` instead of aborting the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProvider;

impl MemoryProvider for SystemProvider {
    fn acquire(&mut self, size: usize) -> Option<Box<[u8]>> {
        let mut data = Vec::new();
        data.try_reserve_exact(size).ok()?;
        data.resize(size, 0);
        Some(data.into_boxed_slice())
    }

    fn release(&mut self, region: Box<[u8]>) -> bool {
        drop(region);
        true
    }
}

/// Provider with a hard byte budget across all outstanding regions.
///
/// Requests that would push the outstanding total past `limit` fail.
#[derive(Clone, Debug)]
pub struct BudgetProvider {
    inner: SystemProvider,
    limit: usize,
    outstanding: usize,
}

impl BudgetProvider {
    /// Create a provider that never has more than `limit` bytes handed out.
    pub fn new(limit: usize) -> Self {
        Self {
            inner: SystemProvider,
            limit,
            outstanding: 0,
        }
    }

    /// The configured budget in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently handed out and not yet released.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl MemoryProvider for BudgetProvider {
    fn acquire(&mut self, size: usize) -> Option<Box<[u8]>> {
        let total = self.outstanding.checked_add(size)?;
        if total > self.limit {
            return None;
        }
        let region = self.inner.acquire(size)?;
        self.outstanding = total;
        Some(region)
    }

    fn release(&mut self, region: Box<[u8]>) -> bool {
        // A region larger than everything outstanding was not issued here.
        if region.len() > self.outstanding {
            return false;
        }
        self.outstanding -= region.len();
        self.inner.release(region)
    }
}
