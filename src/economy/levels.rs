use bevy::prelude::*;
use crate::shared::*;

/// Next level threshold: previous threshold × 1.2, rounded to the nearest
/// integer. Integer arithmetic keeps it exact (×1.2 never lands on .5).
pub fn next_threshold(threshold: u32) -> u32 {
    ((threshold as u64 * 12 + 5) / 10).min(u32::MAX as u64) as u32
}

/// Threshold that applies while sitting at `level`.
pub fn threshold_for_level(level: u32) -> u32 {
    let mut threshold = BASE_EXPERIENCE_THRESHOLD;
    for _ in 1..level.max(1) {
        threshold = next_threshold(threshold);
    }
    threshold
}

impl EconomyLedger {
    /// Credit experience, rolling any overflow into as many level-ups as it
    /// covers. Afterwards `experience < experience_to_next_level` holds.
    pub fn add_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level += 1;
            self.experience_to_next_level = next_threshold(self.experience_to_next_level);
            self.outbox.push(LedgerEvent::LevelUp { level: self.level });
            info!("[Economy] Level up! New level: {}", self.level);
        }
    }

    /// Restore the level invariant after fields were written directly
    /// (snapshot restore). Does not record level-up events.
    pub fn settle_levels(&mut self) {
        self.level = self.level.max(1);
        if self.experience_to_next_level == 0 {
            self.experience_to_next_level = threshold_for_level(self.level);
        }
        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level += 1;
            self.experience_to_next_level = next_threshold(self.experience_to_next_level);
        }
    }
}
