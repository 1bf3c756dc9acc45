//! Economy domain — money, experience and leveling.
//!
//! The ledger is a leaf: it depends on nothing but `crate::shared`. Other
//! domains receive `&mut EconomyLedger` and call into it; the ledger records
//! what changed in its outbox and `publish_ledger_events` moves that into
//! the notification queue.

use bevy::prelude::*;
use crate::shared::*;

pub mod gold;
pub mod levels;

pub use gold::format_money;
pub use levels::{next_threshold, threshold_for_level};

/// Move recorded ledger changes into the notification queue, in order.
pub fn publish_ledger_events(ledger: &mut EconomyLedger, notifications: &mut NotificationQueue) {
    for event in ledger.take_events() {
        notifications.push(match event {
            LedgerEvent::MoneyChanged { balance, delta } => {
                Notification::MoneyChanged { balance, delta }
            }
            LedgerEvent::LevelUp { level } => Notification::LevelUp { level },
        });
    }
}

fn publish_ledger_events_system(
    mut ledger: ResMut<EconomyLedger>,
    mut notifications: ResMut<NotificationQueue>,
) {
    // Avoid tripping change detection on frames where nothing happened.
    if ledger.outbox.is_empty() {
        return;
    }
    publish_ledger_events(&mut ledger, &mut notifications);
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

/// Systems the economy domain contributes to the frame, in order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishLedgerSet;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EconomyLedger>()
            .init_resource::<NotificationQueue>()
            .add_systems(
                Update,
                publish_ledger_events_system.in_set(PublishLedgerSet),
            );

        info!("[Economy] EconomyPlugin registered.");
    }
}
