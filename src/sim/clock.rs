/// A simulation clock that counts ticks up to a fixed bound.
///
/// # Examples
///
/// ```
/// use truck_charge_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(2);
/// assert_eq!(clock.tick(), Some(0));
/// assert_eq!(clock.tick(), Some(1));
/// assert_eq!(clock.tick(), None);
/// assert_eq!(clock.elapsed(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Ticks started so far
    elapsed: u64,
    /// Maximum number of ticks
    limit: u64,
}

impl Clock {
    /// Creates a clock that hands out at most `limit` ticks.
    pub fn new(limit: u64) -> Self {
        Self { elapsed: 0, limit }
    }

    /// Starts the next tick.
    ///
    /// # Returns
    ///
    /// * `Some(tick)` - Index of the tick just started (from 0)
    /// * `None` - If the bound has been reached
    pub fn tick(&mut self) -> Option<u64> {
        if self.elapsed < self.limit {
            let tick = self.elapsed;
            self.elapsed += 1;
            Some(tick)
        } else {
            None
        }
    }

    /// Number of ticks started so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Returns `true` once no further tick can start.
    pub fn is_exhausted(&self) -> bool {
        self.elapsed >= self.limit
    }

    /// Elapsed simulated time in hours.
    pub fn elapsed_hours(&self, tick_hours: f64) -> f64 {
        self.elapsed as f64 * tick_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock() {
        let clock = Clock::new(5);
        assert_eq!(clock.elapsed, 0);
        assert_eq!(clock.limit, 5);
        assert!(!clock.is_exhausted());
    }

    #[test]
    fn test_tick() {
        let mut clock = Clock::new(2);
        assert_eq!(clock.tick(), Some(0));
        assert_eq!(clock.tick(), Some(1));
        assert!(clock.is_exhausted());
        assert_eq!(clock.tick(), None);
        assert_eq!(clock.elapsed(), 2);
    }

    #[test]
    fn test_elapsed_hours() {
        let mut clock = Clock::new(120);
        for _ in 0..90 {
            clock.tick();
        }
        assert!((clock.elapsed_hours(1.0 / 60.0) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_clock() {
        let mut clock = Clock::new(0);
        assert!(clock.is_exhausted());
        assert_eq!(clock.tick(), None);
    }
}
