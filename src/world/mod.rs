//! World domain — resource nodes placed around the farm.
//!
//! Responsible for:
//! - Registering trees and rocks at map load
//! - Chopping and mining, with regrowth/respawn timers advanced by the
//!   orchestrator's fixed step

use bevy::prelude::*;

use crate::shared::*;

pub mod objects;

pub use objects::{chop, mine, node_yield, recovery_seconds, tick_nodes};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResourceNodes>();

        info!("[World] WorldPlugin registered.");
    }
}

/// Place a fresh, harvestable node and return its id.
pub fn add_node(nodes: &mut ResourceNodes, kind: NodeKind, pos: TilePos) -> NodeId {
    let id = NodeId(nodes.next_id);
    nodes.next_id += 1;
    nodes.nodes.insert(
        id,
        ResourceNode {
            id,
            kind,
            pos,
            depleted: false,
            regrowth_seconds: 0.0,
        },
    );
    id
}
