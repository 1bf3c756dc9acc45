//! Animals domain — per-animal welfare and production state machines.
//!
//! Hunger, happiness and production advance every fixed step; feeding,
//! collecting, petting and purchasing are player actions routed here by the
//! orchestrator. All state lives in the `AnimalRegistry` resource.

use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Sub-modules
// ─────────────────────────────────────────────────────────────────────────────
mod feeding;
mod interaction;
mod lifecycle;
mod products;
mod spawning;

pub use feeding::*;
pub use interaction::*;
pub use lifecycle::*;
pub use products::*;
pub use spawning::*;

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct AnimalsPlugin;

impl Plugin for AnimalsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimalRegistry>();

        info!("[Animals] AnimalsPlugin registered.");
    }
}
