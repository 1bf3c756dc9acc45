//! Planting and daily crop growth.

use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Number of greenhouse tiles currently holding a crop.
pub fn greenhouse_planted(farm_state: &FarmState) -> u32 {
    farm_state
        .tiles
        .values()
        .filter(|t| t.greenhouse && t.crop.is_some())
        .count() as u32
}

/// Plant `kind` on a tilled, empty tile, paying the seed price.
///
/// Checks run in order: tile state, greenhouse capacity, funds. A declined
/// plant leaves both the tile and the ledger untouched.
pub fn plant(
    farm_state: &mut FarmState,
    catalog: &CropCatalog,
    ledger: &mut EconomyLedger,
    pos: TilePos,
    kind: CropKind,
) -> Result<(), FarmError> {
    let Some(def) = catalog.get(kind) else {
        warn!("[Farming] No catalog entry for {:?}", kind);
        return Err(FarmError::UnknownCatalogEntry {
            name: format!("{:?}", kind),
        });
    };

    let greenhouse_used = greenhouse_planted(farm_state);
    let capacity = farm_state.greenhouse_capacity;
    let Some(tile) = farm_state.tiles.get_mut(&pos) else {
        return Err(FarmError::InvalidTileState { pos });
    };
    if !tile.tilled || tile.crop.is_some() {
        return Err(FarmError::InvalidTileState { pos });
    }
    if tile.greenhouse && greenhouse_used >= capacity {
        return Err(FarmError::CapacityExceeded { capacity });
    }
    if !ledger.spend_money(def.seed_price) {
        return Err(FarmError::InsufficientFunds {
            needed: def.seed_price,
            available: ledger.money,
        });
    }

    tile.crop = Some(CropInstance::new(kind));
    ledger.add_experience(PLANT_EXPERIENCE);
    debug!("[Farming] Planted {} at {}", def.name, pos);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Growth
// ─────────────────────────────────────────────────────────────────────────────

/// Stage implied by accumulated growth over required growth.
pub fn stage_for_ratio(ratio: f32) -> GrowthStage {
    if ratio >= 1.0 {
        GrowthStage::ReadyToHarvest
    } else if ratio >= 0.75 {
        GrowthStage::Mature
    } else if ratio >= 0.5 {
        GrowthStage::Growing
    } else if ratio >= 0.25 {
        GrowthStage::Sprout
    } else {
        GrowthStage::Seed
    }
}

/// One day of growth for a single tile. Returns true if the crop grew.
///
/// The watered flag is consumed here: it adds the bonus unit, is copied to
/// the crop as `was_watered_this_cycle`, then cleared. Ripe crops are left
/// completely alone.
pub fn advance_one_day(tile: &mut FarmTile, catalog: &CropCatalog, multiplier: f32) -> bool {
    let watered = tile.watered;
    let Some(crop) = tile.crop.as_mut() else {
        return false;
    };
    if crop.stage == GrowthStage::ReadyToHarvest {
        return false;
    }
    let Some(def) = catalog.get(crop.kind) else {
        return false;
    };

    let base = if watered { 1.0 + WATER_BONUS_UNITS } else { 1.0 };
    crop.growth_units += base * multiplier.max(0.0);
    crop.was_watered_this_cycle = watered;
    tile.watered = false;

    let required = def.growth_days.max(1) as f32;
    crop.stage = stage_for_ratio(crop.growth_units / required);
    true
}

/// Bring a restored tile back in line with the growth rules: the stage is
/// recomputed from accumulated growth, and a tile holding a crop is tilled.
pub fn settle_tile(tile: &mut FarmTile, catalog: &CropCatalog) {
    let Some(crop) = tile.crop.as_mut() else {
        return;
    };
    tile.tilled = true;
    crop.growth_units = crop.growth_units.max(0.0);
    if let Some(def) = catalog.get(crop.kind) {
        crop.stage = stage_for_ratio(crop.growth_units / def.growth_days.max(1) as f32);
    }
}

/// Run the new-day growth tick over every tile. Greenhouse tiles use the
/// farm's greenhouse multiplier, the rest use the weather's.
pub fn advance_all_tiles(
    farm_state: &mut FarmState,
    catalog: &CropCatalog,
    weather_multiplier: f32,
) -> usize {
    let greenhouse_multiplier = farm_state.greenhouse_growth_multiplier;
    let mut grown = 0;
    for tile in farm_state.tiles.values_mut() {
        let multiplier = if tile.greenhouse {
            greenhouse_multiplier
        } else {
            weather_multiplier
        };
        if advance_one_day(tile, catalog, multiplier) {
            grown += 1;
        }
    }
    if grown > 0 {
        debug!(
            "[Farming] {} crops grew (weather multiplier {})",
            grown, weather_multiplier
        );
    }
    grown
}
