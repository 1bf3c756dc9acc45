//! Choppable trees and mineable rocks.
//!
//! A harvested node is depleted until its timer passes the regrowth (tree)
//! or respawn (rock) time. Like crops and animal products, the node's money
//! value is returned for the caller to deposit; experience is credited here.

use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

/// Money and experience a node yields.
pub fn node_yield(kind: NodeKind) -> (u32, u32) {
    match kind {
        NodeKind::Tree => (TREE_MONEY, TREE_EXPERIENCE),
        NodeKind::Rock => (ROCK_MONEY, ROCK_EXPERIENCE),
    }
}

/// Seconds a depleted node stays depleted.
pub fn recovery_seconds(kind: NodeKind) -> f32 {
    match kind {
        NodeKind::Tree => TREE_REGROWTH_SECONDS,
        NodeKind::Rock => ROCK_RESPAWN_SECONDS,
    }
}

fn harvest_node(
    nodes: &mut ResourceNodes,
    ledger: &mut EconomyLedger,
    id: NodeId,
    expected: NodeKind,
) -> Result<u32, FarmError> {
    let Some(node) = nodes.nodes.get_mut(&id) else {
        return Err(FarmError::NodeUnavailable { id });
    };
    if node.kind != expected || node.depleted {
        return Err(FarmError::NodeUnavailable { id });
    }

    let (money, experience) = node_yield(node.kind);
    node.depleted = true;
    node.regrowth_seconds = 0.0;
    ledger.add_experience(experience);
    debug!("[World] {:?} {} harvested at {}", node.kind, id, node.pos);
    Ok(money)
}

pub fn chop(
    nodes: &mut ResourceNodes,
    ledger: &mut EconomyLedger,
    id: NodeId,
) -> Result<u32, FarmError> {
    harvest_node(nodes, ledger, id, NodeKind::Tree)
}

pub fn mine(
    nodes: &mut ResourceNodes,
    ledger: &mut EconomyLedger,
    id: NodeId,
) -> Result<u32, FarmError> {
    harvest_node(nodes, ledger, id, NodeKind::Rock)
}

/// Advance regrowth timers. Returns the nodes that became available again.
pub fn tick_nodes(nodes: &mut ResourceNodes, delta_seconds: f32) -> Vec<NodeId> {
    let mut restored = Vec::new();
    for node in nodes.nodes.values_mut().filter(|n| n.depleted) {
        node.regrowth_seconds += delta_seconds.max(0.0);
        if node.regrowth_seconds >= recovery_seconds(node.kind) {
            node.depleted = false;
            node.regrowth_seconds = 0.0;
            restored.push(node.id);
        }
    }
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::add_node;

    #[test]
    fn test_chop_tree() {
        let mut nodes = ResourceNodes::default();
        let tree = add_node(&mut nodes, NodeKind::Tree, TilePos::new(4, 4));
        let mut ledger = EconomyLedger::with_money(0);

        assert_eq!(chop(&mut nodes, &mut ledger, tree), Ok(TREE_MONEY));
        assert_eq!(ledger.experience, TREE_EXPERIENCE);
        assert!(nodes.nodes[&tree].depleted);

        assert_eq!(
            chop(&mut nodes, &mut ledger, tree),
            Err(FarmError::NodeUnavailable { id: tree })
        );
        assert_eq!(ledger.experience, TREE_EXPERIENCE);
    }

    #[test]
    fn test_mine_requires_rock() {
        let mut nodes = ResourceNodes::default();
        let tree = add_node(&mut nodes, NodeKind::Tree, TilePos::new(0, 0));
        let rock = add_node(&mut nodes, NodeKind::Rock, TilePos::new(1, 0));
        let mut ledger = EconomyLedger::with_money(0);

        assert!(mine(&mut nodes, &mut ledger, tree).is_err());
        assert!(!nodes.nodes[&tree].depleted);
        assert_eq!(mine(&mut nodes, &mut ledger, rock), Ok(ROCK_MONEY));
    }

    #[test]
    fn test_nodes_recover_after_their_timer() {
        let mut nodes = ResourceNodes::default();
        let tree = add_node(&mut nodes, NodeKind::Tree, TilePos::new(0, 0));
        let rock = add_node(&mut nodes, NodeKind::Rock, TilePos::new(1, 0));
        let mut ledger = EconomyLedger::with_money(0);
        chop(&mut nodes, &mut ledger, tree).unwrap();
        mine(&mut nodes, &mut ledger, rock).unwrap();

        assert!(tick_nodes(&mut nodes, 299.0).is_empty());
        assert_eq!(tick_nodes(&mut nodes, 1.0), vec![tree]);
        assert!(tick_nodes(&mut nodes, 299.0).is_empty());
        assert_eq!(tick_nodes(&mut nodes, 1.0), vec![rock]);
        assert!(nodes.nodes.values().all(|n| !n.depleted));
    }
}
