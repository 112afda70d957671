//! Player currency and lives.

use rampart_core::state::EconomyView;

/// Currency and lives of the defending player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Economy {
    pub currency: u32,
    pub lives: u32,
}

impl Economy {
    pub fn new(currency: u32, lives: u32) -> Self {
        Self { currency, lives }
    }

    pub fn earn(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    /// Deduct `cost` if affordable. Returns false (and leaves the balance
    /// untouched) otherwise.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        match self.currency.checked_sub(cost) {
            Some(rest) => {
                self.currency = rest;
                true
            }
            None => false,
        }
    }

    /// Remove lives, never going below zero. Returns true once none remain.
    pub fn lose_lives(&mut self, count: u32) -> bool {
        self.lives = self.lives.saturating_sub(count);
        self.lives == 0
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            currency: self.currency,
            lives: self.lives,
        }
    }
}
