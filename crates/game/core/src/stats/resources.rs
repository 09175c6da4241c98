//! Resource pools (HP, SP).
//!
//! A meter stores its current value together with the maximum it was built
//! against. Every mutation clamps into `[0, max]`, so callers never need to
//! re-check bounds after damage, heal, drain or a periodic tick.

/// Current/maximum pair for HP or SP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    /// Builds a meter, clamping `current` into range.
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    #[inline]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub const fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current);
        self.current -= dealt;
        dealt
    }

    /// Restores up to `amount`, returning how much was actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max - self.current);
        self.current += restored;
        restored
    }

    /// Spends exactly `amount`, or nothing if the pool is short.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Changes the maximum, clamping the current value down if needed.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    pub fn set_current(&mut self, current: u32) {
        self.current = current.min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_and_heal_report_applied_amounts() {
        let mut hp = ResourceMeter::new(10, 30);
        assert_eq!(hp.damage(25), 10);
        assert!(hp.is_empty());
        assert_eq!(hp.heal(50), 30);
        assert!(hp.is_full());
    }

    #[test]
    fn spending_more_than_available_changes_nothing() {
        let mut sp = ResourceMeter::new(2, 10);
        assert!(!sp.try_spend(3));
        assert_eq!(sp.current(), 2);
        assert!(sp.try_spend(2));
        assert_eq!(sp.current(), 0);
    }

    #[test]
    fn shrinking_max_clamps_current() {
        let mut hp = ResourceMeter::full(30);
        hp.set_max(12);
        assert_eq!(hp.current(), 12);
    }
}
