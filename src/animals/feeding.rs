use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Feeding
//
// Feeding costs the animal's feed price. A fed animal is full again, gets a
// happiness and health boost, and the farmer earns a small experience reward.
// ─────────────────────────────────────────────────────────────────────────────

fn apply_feeding(animal: &mut AnimalInstance, def: &AnimalDef) {
    animal.hunger = 0.0;
    animal.seconds_since_fed = 0.0;
    animal.happiness = (animal.happiness + FEED_HAPPINESS).min(MAX_HAPPINESS);
    animal.health = (animal.health + FEED_HEALTH).min(def.max_health);
}

/// Feed one animal. Declined without any change when the id is unknown or
/// the ledger cannot cover the feed cost.
pub fn feed(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    ledger: &mut EconomyLedger,
    id: AnimalId,
) -> Result<(), FarmError> {
    let Some(animal) = registry.animals.get_mut(&id) else {
        return Err(FarmError::InvalidAnimalState { id });
    };
    let Some(def) = catalog.get(animal.kind) else {
        return Err(FarmError::InvalidAnimalState { id });
    };
    if !ledger.spend_money(def.feed_cost) {
        return Err(FarmError::InsufficientFunds {
            needed: def.feed_cost,
            available: ledger.money,
        });
    }

    apply_feeding(animal, def);
    ledger.add_experience(FEED_EXPERIENCE);
    debug!("[Animals] Fed {} ({})", id, def.name);
    Ok(())
}

/// Feed every animal whose hunger is above the feeding threshold, as one
/// transaction: the combined cost is paid up front or nobody is fed.
/// Returns how many animals were fed.
pub fn feed_all_hungry(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    ledger: &mut EconomyLedger,
) -> Result<u32, FarmError> {
    let mut eligible = Vec::new();
    let mut total_cost = 0u32;
    for animal in registry.animals.values() {
        if animal.hunger <= FEED_ELIGIBLE_HUNGER {
            continue;
        }
        if let Some(def) = catalog.get(animal.kind) {
            eligible.push(animal.id);
            total_cost = total_cost.saturating_add(def.feed_cost);
        }
    }

    if eligible.is_empty() {
        return Ok(0);
    }
    if !ledger.spend_money(total_cost) {
        info!(
            "[Animals] Not enough money to feed {} animals ({} needed)",
            eligible.len(),
            total_cost
        );
        return Err(FarmError::InsufficientFunds {
            needed: total_cost,
            available: ledger.money,
        });
    }

    for id in &eligible {
        let Some(animal) = registry.animals.get_mut(id) else {
            continue;
        };
        if let Some(def) = catalog.get(animal.kind) {
            apply_feeding(animal, def);
        }
    }
    let fed = eligible.len() as u32;
    ledger.add_experience(FEED_EXPERIENCE * fed);
    info!("[Animals] Fed {} hungry animals for {}", fed, total_cost);
    Ok(fed)
}
