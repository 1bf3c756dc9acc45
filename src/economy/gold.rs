use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Money
//
// Credits are unconditional. Spends either apply in full or not at all: the
// boolean result is the only success signal callers get, and the balance is
// never clamped.
// ─────────────────────────────────────────────────────────────────────────────

impl EconomyLedger {
    /// Unconditional credit.
    pub fn add_money(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.money = self.money.saturating_add(amount);
        self.outbox.push(LedgerEvent::MoneyChanged {
            balance: self.money,
            delta: amount as i64,
        });
        debug!("[Economy] +{}. New balance: {}", amount, self.money);
    }

    /// Debit `amount` if the balance covers it. Returns false and leaves the
    /// ledger untouched otherwise.
    pub fn spend_money(&mut self, amount: u32) -> bool {
        if self.money < amount {
            debug!(
                "[Economy] Declined spend of {} (balance {})",
                amount, self.money
            );
            return false;
        }
        if amount > 0 {
            self.money -= amount;
            self.outbox.push(LedgerEvent::MoneyChanged {
                balance: self.money,
                delta: -(amount as i64),
            });
            debug!("[Economy] -{}. Remaining: {}", amount, self.money);
        }
        true
    }

    /// Take the ledger changes recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.outbox)
    }
}

/// Format a money amount as a display string (e.g. "$1,234").
pub fn format_money(amount: u32) -> String {
    let s = amount.to_string();
    let mut result = String::from("$");
    let digits: Vec<char> = s.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result
}
