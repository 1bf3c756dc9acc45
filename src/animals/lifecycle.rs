use bevy::prelude::*;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Per-tick animal update
//
// Runs every fixed step, independent of day rollover:
//   1. Hunger rises with time since the last feeding.
//   2. State is derived from hunger, health, night and the product flag.
//   3. Happiness drifts one step according to that state.
//   4. Production accrues unless the animal is sick, hungry or already holding
//      a product.
// ─────────────────────────────────────────────────────────────────────────────

/// Priority order, first match wins.
pub fn derive_state(animal: &AnimalInstance, is_night: bool) -> AnimalState {
    if animal.hunger > HUNGRY_THRESHOLD {
        AnimalState::Hungry
    } else if animal.health < SICK_HEALTH_THRESHOLD {
        AnimalState::Sick
    } else if is_night {
        AnimalState::Sleeping
    } else if animal.has_product {
        AnimalState::Producing
    } else {
        AnimalState::Happy
    }
}

/// Hunger implied by time since the last feeding, on the 0..=100 scale.
pub fn hunger_after(seconds_since_fed: f32) -> f32 {
    (seconds_since_fed / HUNGER_FULL_SECONDS * MAX_HUNGER).clamp(0.0, MAX_HUNGER)
}

/// Bring a restored animal back in line with its definition. `hunger` wins
/// over the feeding timer when the two disagree; health and happiness are
/// capped.
pub fn settle_animal(animal: &mut AnimalInstance, def: Option<&AnimalDef>) {
    const TIMER_TOLERANCE: f32 = 1e-3;

    animal.hunger = animal.hunger.clamp(0.0, MAX_HUNGER);
    if (hunger_after(animal.seconds_since_fed) - animal.hunger).abs() > TIMER_TOLERANCE {
        animal.seconds_since_fed = animal.hunger / MAX_HUNGER * HUNGER_FULL_SECONDS;
    }
    animal.happiness = animal.happiness.min(MAX_HAPPINESS);
    animal.production_progress = animal.production_progress.max(0.0);
    if let Some(def) = def {
        animal.health = animal.health.min(def.max_health);
    }
}

/// Advance one animal by `delta_seconds`. Returns true when a product became
/// ready during this tick.
pub fn tick_animal(
    animal: &mut AnimalInstance,
    def: &AnimalDef,
    delta_seconds: f32,
    is_night: bool,
) -> bool {
    let delta = delta_seconds.max(0.0);

    animal.seconds_since_fed = (animal.seconds_since_fed + delta).min(HUNGER_FULL_SECONDS);
    animal.hunger = hunger_after(animal.seconds_since_fed);

    let state = derive_state(animal, is_night);
    match state {
        AnimalState::Hungry => animal.happiness = animal.happiness.saturating_sub(1),
        AnimalState::Sick => animal.happiness = animal.happiness.saturating_sub(2),
        _ => animal.happiness = (animal.happiness + 1).min(MAX_HAPPINESS),
    }

    let can_produce =
        !matches!(state, AnimalState::Sick | AnimalState::Hungry) && !animal.has_product;
    if can_produce {
        animal.production_progress += delta;
        if animal.production_progress >= def.production_seconds() {
            animal.has_product = true;
            animal.production_progress = 0.0;
            return true;
        }
    }
    false
}

/// Tick every animal in the registry. Returns the ids whose product became
/// ready during this tick.
pub fn tick_animals(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    delta_seconds: f32,
    is_night: bool,
) -> Vec<AnimalId> {
    let mut produced = Vec::new();
    for animal in registry.animals.values_mut() {
        let Some(def) = catalog.get(animal.kind) else {
            continue;
        };
        if tick_animal(animal, def, delta_seconds, is_night) {
            debug!("[Animals] {} has {} ready", animal.id, def.product_name);
            produced.push(animal.id);
        }
    }
    produced
}
