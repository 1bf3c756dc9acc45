//! Harvesting ripe crops.
//!
//! Both functions credit experience and return the income; depositing the
//! income is left to the caller so batch harvests produce a single credit.

use bevy::prelude::*;
use crate::shared::*;

/// Sell value of a ripe crop, including the care bonus when the crop's last
/// growth tick was watered or the ripe crop was watered since.
fn harvest_value(tile: &FarmTile, def: &CropDef) -> u32 {
    let cared_for = tile.watered
        || tile
            .crop
            .as_ref()
            .is_some_and(|c| c.was_watered_this_cycle);
    if cared_for {
        (def.sell_price as f32 * CARE_BONUS_MULTIPLIER).round() as u32
    } else {
        def.sell_price
    }
}

fn ripe_def<'a>(tile: &FarmTile, catalog: &'a CropCatalog) -> Option<&'a CropDef> {
    let crop = tile.crop.as_ref()?;
    if crop.stage != GrowthStage::ReadyToHarvest {
        return None;
    }
    catalog.get(crop.kind)
}

/// Harvest the crop on `pos`. Returns 0 and touches nothing unless the crop
/// is ready. On success the tile is reset to untilled and empty.
pub fn harvest(
    farm_state: &mut FarmState,
    catalog: &CropCatalog,
    ledger: &mut EconomyLedger,
    pos: TilePos,
) -> u32 {
    let Some(tile) = farm_state.tiles.get_mut(&pos) else {
        return 0;
    };
    let Some(def) = ripe_def(tile, catalog) else {
        return 0;
    };

    let income = harvest_value(tile, def);
    let experience = def.experience;
    info!("[Farming] Harvested {} at {} for {}", def.name, pos, income);

    let greenhouse = tile.greenhouse;
    *tile = FarmTile {
        greenhouse,
        ..Default::default()
    };
    ledger.add_experience(experience);
    income
}

/// Harvest every ripe tile at once. Totals are computed before any tile is
/// reset, and experience is credited in a single call.
pub fn harvest_all_ready(
    farm_state: &mut FarmState,
    catalog: &CropCatalog,
    ledger: &mut EconomyLedger,
) -> u32 {
    let mut ripe = Vec::new();
    let mut total_income = 0u32;
    let mut total_experience = 0u32;
    for (pos, tile) in &farm_state.tiles {
        if let Some(def) = ripe_def(tile, catalog) {
            ripe.push(*pos);
            total_income = total_income.saturating_add(harvest_value(tile, def));
            total_experience = total_experience.saturating_add(def.experience);
        }
    }

    if ripe.is_empty() {
        return 0;
    }

    for pos in &ripe {
        if let Some(tile) = farm_state.tiles.get_mut(pos) {
            let greenhouse = tile.greenhouse;
            *tile = FarmTile {
                greenhouse,
                ..Default::default()
            };
        }
    }
    ledger.add_experience(total_experience);
    info!(
        "[Farming] Harvested {} ripe tiles for {}",
        ripe.len(),
        total_income
    );
    total_income
}
