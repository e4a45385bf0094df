//! Attack combo counter.
//!
//! An [`AttackCombo`] counts consecutive chained attacks. Each continuation
//! re-arms a window of ticks; if the window lapses before the next swing the
//! owner resets the combo back to the opening attack.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ATTACKS: u32 = 3;
pub const DEFAULT_WINDOW: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackCombo {
    attack: u32,
    window: i32,
    max_window: i32,
    max_attacks: u32,
}

impl Default for AttackCombo {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTACKS, DEFAULT_WINDOW)
    }
}

impl AttackCombo {
    pub fn new(max_attacks: u32, max_window: i32) -> Self {
        Self {
            attack: 0,
            window: max_window,
            max_window,
            max_attacks,
        }
    }

    /// Index of the next attack in the chain, starting at 0.
    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn window(&self) -> i32 {
        self.window
    }

    pub fn max_attacks(&self) -> u32 {
        self.max_attacks
    }

    /// True once a continuation has happened in the current window.
    pub fn is_started(&self) -> bool {
        self.attack > 0
    }

    /// Count the window down. Returns true once it has run out.
    pub fn tick(&mut self) -> bool {
        if self.window > 0 {
            self.window -= 1;
        }
        self.window == 0
    }

    pub fn can_chain(&self) -> bool {
        self.attack + 1 < self.max_attacks
    }

    pub fn advance(&mut self) {
        self.attack += 1;
        self.window = self.max_window;
    }

    pub fn reset(&mut self) {
        self.attack = 0;
    }

    /// Continue the chain when possible, otherwise start over.
    pub fn chain_or_reset(&mut self) {
        if self.can_chain() {
            self.advance();
        } else {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_combo_is_not_started() {
        let combo = AttackCombo::new(3, 15);
        assert_eq!(combo.attack(), 0);
        assert!(!combo.is_started());
        assert!(combo.can_chain());
    }

    #[test]
    fn test_window_lapses_on_last_tick() {
        let mut combo = AttackCombo::new(3, 15);
        for _ in 0..14 {
            assert!(!combo.tick());
        }
        assert!(combo.tick());
        // stays expired
        assert!(combo.tick());
        assert_eq!(combo.window(), 0);
    }

    #[test]
    fn test_advance_rearms_window() {
        let mut combo = AttackCombo::new(3, 15);
        for _ in 0..10 {
            combo.tick();
        }
        combo.advance();
        assert_eq!(combo.attack(), 1);
        assert_eq!(combo.window(), 15);
        assert!(combo.is_started());
    }

    #[test]
    fn test_chain_is_bounded_by_max_attacks() {
        let mut combo = AttackCombo::new(3, 15);
        combo.chain_or_reset();
        combo.chain_or_reset();
        assert_eq!(combo.attack(), 2);
        assert!(!combo.can_chain());
        combo.chain_or_reset();
        assert_eq!(combo.attack(), 0);
    }

    #[test]
    fn test_reset_only_clears_attack() {
        let mut combo = AttackCombo::new(3, 15);
        combo.advance();
        combo.tick();
        combo.reset();
        assert_eq!(combo.attack(), 0);
        assert_eq!(combo.window(), 14);
    }
}
