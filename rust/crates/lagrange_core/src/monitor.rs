//! Profile monitoring
//!
//! A reduction of one block publishes log2 length estimates of its reduced
//! vectors into a larger profile owned by whoever drives the blocks.

/// Receiver of per-block profile updates
pub trait Monitor {
    /// Publish `profile[start..end]` to global indices
    /// `global_offset + start .. global_offset + end`.
    fn profile_update(&mut self, profile: &[f64], global_offset: usize, start: usize, end: usize);

    /// Number of global profile entries, if bounded
    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Monitor that keeps the global profile in memory
#[derive(Debug, Clone, Default)]
pub struct ProfileMonitor {
    profile: Vec<f64>,
    updates: usize,
}

impl ProfileMonitor {
    /// Create a monitor for a basis of `n` vectors; entries start as NaN
    pub fn new(n: usize) -> Self {
        Self {
            profile: vec![f64::NAN; n],
            updates: 0,
        }
    }

    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    /// How many updates have been published
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl Monitor for ProfileMonitor {
    fn profile_update(&mut self, profile: &[f64], global_offset: usize, start: usize, end: usize) {
        for i in start..end {
            self.profile[global_offset + i] = profile[i];
        }
        self.updates += 1;
        log::trace!(
            "profile[{}..{}] <- {:?}",
            global_offset + start,
            global_offset + end,
            &profile[start..end]
        );
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.profile.len())
    }
}

/// Monitor that drops every update
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMonitor;

impl Monitor for NullMonitor {
    fn profile_update(&mut self, _profile: &[f64], _global_offset: usize, _start: usize, _end: usize) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_window() {
        let mut mon = ProfileMonitor::new(7);
        let local = [9.0, 9.0, 1.5, 2.5];

        mon.profile_update(&local, 3, 2, 4);

        assert_eq!(mon.updates(), 1);
        assert_eq!(mon.profile()[5], 1.5);
        assert_eq!(mon.profile()[6], 2.5);
        assert!(mon.profile()[..5].iter().all(|x| x.is_nan()));
        assert_eq!(mon.capacity(), Some(7));
    }

    #[test]
    #[should_panic]
    fn test_profile_update_out_of_range() {
        let mut mon = ProfileMonitor::new(2);
        mon.profile_update(&[1.0, 2.0], 1, 0, 2);
    }
}
