//! Dual-rate tick scheduler.
//!
//! Two independent accumulators over one free-running 32-bit counter. Each
//! advances its own timestamp by exactly one period when it fires, so loop
//! jitter never accumulates into drift. All comparisons use wrapping
//! subtraction and survive counter rollover.

/// One periodic timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator {
    period: u32,
    last: u32,
}

impl Accumulator {
    /// First fire is one period after `start`
    pub fn new(period: u32, start: u32) -> Self {
        Self {
            period: period.max(1),
            last: start,
        }
    }

    /// Fire at most once per call when a full period has elapsed.
    pub fn fire(&mut self, now: u32) -> bool {
        if now.wrapping_sub(self.last) >= self.period {
            self.last = self.last.wrapping_add(self.period);
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Change the period; the phase (last fire time) is kept.
    pub fn set_period(&mut self, period: u32) {
        self.period = period.max(1);
    }

    pub fn last(&self) -> u32 {
        self.last
    }
}

/// Which ticks fired on one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ticks {
    pub control: bool,
    pub gravity: bool,
}

/// The control and gravity accumulators together
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    control: Accumulator,
    gravity: Accumulator,
}

impl TickScheduler {
    pub fn new(control_period: u32, gravity_period: u32, start: u32) -> Self {
        Self {
            control: Accumulator::new(control_period, start),
            gravity: Accumulator::new(gravity_period, start),
        }
    }

    pub fn poll(&mut self, now: u32) -> Ticks {
        Ticks {
            control: self.control.fire(now),
            gravity: self.gravity.fire(now),
        }
    }

    pub fn set_gravity_period(&mut self, period: u32) {
        self.gravity.set_period(period);
    }

    pub fn gravity_period(&self) -> u32 {
        self.gravity.period()
    }

    pub fn control_period(&self) -> u32 {
        self.control.period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut acc = Accumulator::new(10, 0);
        assert!(!acc.fire(9));
        assert!(acc.fire(10));
        assert!(!acc.fire(15));
        assert!(acc.fire(20));
    }

    #[test]
    fn test_advances_by_period_not_to_now() {
        let mut acc = Accumulator::new(10, 0);
        // Late poll: fires, but the next deadline stays on the 10-tick grid.
        assert!(acc.fire(17));
        assert_eq!(acc.last(), 10);
        assert!(acc.fire(20));
        assert!(!acc.fire(29));
    }

    #[test]
    fn test_catches_up_one_fire_per_poll() {
        let mut acc = Accumulator::new(10, 0);
        let fired = (0..5).filter(|_| acc.fire(35)).count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_wraparound() {
        let start = u32::MAX - 4;
        let mut acc = Accumulator::new(10, start);
        assert!(!acc.fire(start.wrapping_add(9)));
        assert!(acc.fire(start.wrapping_add(10)));
        assert_eq!(acc.last(), 5);
    }

    #[test]
    fn test_scheduler_independent_rates() {
        let mut sched = TickScheduler::new(5, 50, 0);
        let mut control = 0;
        let mut gravity = 0;
        for now in 0..=100 {
            let ticks = sched.poll(now);
            control += ticks.control as u32;
            gravity += ticks.gravity as u32;
        }
        assert_eq!(control, 20);
        assert_eq!(gravity, 2);
    }

    #[test]
    fn test_set_gravity_period_keeps_phase() {
        let mut sched = TickScheduler::new(5, 50, 0);
        assert!(sched.poll(50).gravity);
        sched.set_gravity_period(20);
        assert!(!sched.poll(69).gravity);
        assert!(sched.poll(70).gravity);
        assert_eq!(sched.gravity_period(), 20);
    }
}
