//! Per-instance counters.
//!
//! Recording is split from reading: instances bump a private
//! [`MetricsCounters`] and callers only ever see a [`RerandomMetrics`]
//! snapshot. Counters are observational and never influence results.

/// Point-in-time copy of an instance's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RerandomMetrics {
    /// Keyed calls answered from the registry.
    pub hits: u64,
    /// Keyed calls that generated and stored a new value.
    pub misses: u64,
    /// Calls with an absent or falsy key; never stored.
    pub unkeyed: u64,
    /// Registry resets.
    pub resets: u64,
    /// Generators rejected on validation.
    pub rejected_generators: u64,
}

impl RerandomMetrics {
    /// Fraction of keyed calls served from the registry, or `0.0` when no
    /// keyed call has been made.
    pub fn hit_rate(&self) -> f64 {
        let keyed = self.hits + self.misses;
        if keyed == 0 {
            0.0
        } else {
            self.hits as f64 / keyed as f64
        }
    }

    /// Total number of values produced by the generator through calls
    /// (validation draws excluded).
    pub fn generated(&self) -> u64 {
        self.misses + self.unkeyed
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct MetricsCounters {
    hits: u64,
    misses: u64,
    unkeyed: u64,
    resets: u64,
    rejected_generators: u64,
}

impl MetricsCounters {
    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub(crate) fn record_unkeyed(&mut self) {
        self.unkeyed += 1;
    }

    #[inline]
    pub(crate) fn record_reset(&mut self) {
        self.resets += 1;
    }

    #[inline]
    pub(crate) fn record_rejected_generator(&mut self) {
        self.rejected_generators += 1;
    }

    pub(crate) fn snapshot(&self) -> RerandomMetrics {
        RerandomMetrics {
            hits: self.hits,
            misses: self.misses,
            unkeyed: self.unkeyed,
            resets: self.resets,
            rejected_generators: self.rejected_generators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_empty_is_zero() {
        assert_eq!(RerandomMetrics::default().hit_rate(), 0.0);
    }

    #[test]
    fn snapshot_reflects_records() {
        let mut c = MetricsCounters::default();
        c.record_hit();
        c.record_hit();
        c.record_hit();
        c.record_miss();
        c.record_unkeyed();
        c.record_reset();
        c.record_rejected_generator();

        let m = c.snapshot();
        assert_eq!(m.hits, 3);
        assert_eq!(m.misses, 1);
        assert_eq!(m.unkeyed, 1);
        assert_eq!(m.resets, 1);
        assert_eq!(m.rejected_generators, 1);
        assert_eq!(m.hit_rate(), 0.75);
        assert_eq!(m.generated(), 2);
    }
}
