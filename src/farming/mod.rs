//! Farming domain — soil tilling, watering, planting, crop growth, harvest.
//!
//! Communicates with other domains exclusively through crate::shared
//! resources. Every operation here is a plain function over `FarmState`; the
//! orchestrator in `crate::sim` decides when they run.

use bevy::prelude::*;
use crate::shared::*;

mod crops;
mod harvest;
mod soil;

pub use crops::{
    advance_all_tiles, advance_one_day, greenhouse_planted, plant, settle_tile, stage_for_ratio,
};
pub use harvest::{harvest, harvest_all_ready};
pub use soil::{till, water};

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmState>();

        info!("[Farming] FarmingPlugin registered.");
    }
}

/// Lay out a `width` × `height` block of fresh tiles starting at `origin`.
/// Existing tiles in the block are left untouched. Returns how many were
/// created.
pub fn create_plot(
    farm_state: &mut FarmState,
    origin: TilePos,
    width: u32,
    height: u32,
    greenhouse: bool,
) -> usize {
    let mut created = 0;
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            let pos = TilePos::new(origin.x + dx, origin.y + dy);
            farm_state.tiles.entry(pos).or_insert_with(|| {
                created += 1;
                FarmTile {
                    greenhouse,
                    ..Default::default()
                }
            });
        }
    }
    created
}
