//! Tilling and watering.

use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Hoe — till an empty tile
// ─────────────────────────────────────────────────────────────────────────────

/// Till an untilled, empty tile. Anything else is declined and the tile is
/// left as it was.
pub fn till(farm_state: &mut FarmState, pos: TilePos) -> Result<(), FarmError> {
    let Some(tile) = farm_state.tiles.get_mut(&pos) else {
        return Err(FarmError::InvalidTileState { pos });
    };
    if tile.tilled || tile.crop.is_some() {
        return Err(FarmError::InvalidTileState { pos });
    }

    tile.tilled = true;
    debug!("[Farming] Tilled {}", pos);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Watering can — water a live crop
// ─────────────────────────────────────────────────────────────────────────────

/// Water the crop on `pos`. The flag persists until the next growth tick
/// consumes it. Declined when there is no crop or it is already watered.
pub fn water(
    farm_state: &mut FarmState,
    ledger: &mut EconomyLedger,
    pos: TilePos,
) -> Result<(), FarmError> {
    let Some(tile) = farm_state.tiles.get_mut(&pos) else {
        return Err(FarmError::InvalidTileState { pos });
    };
    if tile.crop.is_none() || tile.watered {
        return Err(FarmError::InvalidTileState { pos });
    }

    tile.watered = true;
    ledger.add_experience(WATER_EXPERIENCE);
    debug!("[Farming] Watered {}", pos);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm_with(pos: TilePos, tile: FarmTile) -> FarmState {
        let mut farm = FarmState::default();
        farm.tiles.insert(pos, tile);
        farm
    }

    #[test]
    fn test_till_untilled_tile() {
        let pos = TilePos::new(0, 0);
        let mut farm = farm_with(pos, FarmTile::default());
        assert!(till(&mut farm, pos).is_ok());
        assert!(farm.tiles[&pos].tilled);
    }

    #[test]
    fn test_till_twice_is_declined() {
        let pos = TilePos::new(0, 0);
        let mut farm = farm_with(pos, FarmTile::default());
        till(&mut farm, pos).unwrap();
        assert_eq!(till(&mut farm, pos), Err(FarmError::InvalidTileState { pos }));
        assert!(farm.tiles[&pos].tilled);
    }

    #[test]
    fn test_till_missing_tile() {
        let mut farm = FarmState::default();
        let pos = TilePos::new(9, 9);
        assert!(till(&mut farm, pos).is_err());
        assert!(farm.tiles.is_empty(), "declined till must not create a tile");
    }

    #[test]
    fn test_water_requires_crop() {
        let pos = TilePos::new(1, 1);
        let mut farm = farm_with(
            pos,
            FarmTile {
                tilled: true,
                ..Default::default()
            },
        );
        let mut ledger = EconomyLedger::with_money(0);
        assert!(water(&mut farm, &mut ledger, pos).is_err());
        assert!(!farm.tiles[&pos].watered);
        assert_eq!(ledger.experience, 0);
    }

    #[test]
    fn test_water_live_crop_once() {
        let pos = TilePos::new(1, 1);
        let mut farm = farm_with(
            pos,
            FarmTile {
                tilled: true,
                crop: Some(CropInstance::new(CropKind::Corn)),
                ..Default::default()
            },
        );
        let mut ledger = EconomyLedger::with_money(0);
        assert!(water(&mut farm, &mut ledger, pos).is_ok());
        assert!(farm.tiles[&pos].watered);
        assert_eq!(ledger.experience, WATER_EXPERIENCE);

        assert!(water(&mut farm, &mut ledger, pos).is_err());
        assert_eq!(ledger.experience, WATER_EXPERIENCE, "no XP for re-watering");
    }
}
