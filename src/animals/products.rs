use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Product collection
//
// Collecting clears `has_product`, credits the kind's experience and returns
// the income: the kind's daily income, +20% (rounded) when the animal is very
// happy. The caller deposits the income.
// ─────────────────────────────────────────────────────────────────────────────

fn product_value(animal: &AnimalInstance, def: &AnimalDef) -> u32 {
    if animal.happiness > HAPPY_BONUS_THRESHOLD {
        (def.daily_income as f32 * CARE_BONUS_MULTIPLIER).round() as u32
    } else {
        def.daily_income
    }
}

/// Collect the product of one animal. Returns 0 if it has nothing ready.
pub fn collect_product(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    ledger: &mut EconomyLedger,
    id: AnimalId,
) -> Result<u32, FarmError> {
    let Some(animal) = registry.animals.get_mut(&id) else {
        return Err(FarmError::InvalidAnimalState { id });
    };
    if !animal.has_product {
        return Ok(0);
    }
    let Some(def) = catalog.get(animal.kind) else {
        return Err(FarmError::InvalidAnimalState { id });
    };

    let income = product_value(animal, def);
    animal.has_product = false;
    ledger.add_experience(def.experience);
    info!("[Animals] Collected {} from {} worth {}", def.product_name, id, income);
    Ok(income)
}

/// Collect every ready product. Income and experience are totalled before
/// any flag is cleared.
pub fn collect_all_products(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    ledger: &mut EconomyLedger,
) -> u32 {
    let mut ready = Vec::new();
    let mut total_income = 0u32;
    let mut total_experience = 0u32;
    for animal in registry.animals.values() {
        if !animal.has_product {
            continue;
        }
        if let Some(def) = catalog.get(animal.kind) {
            ready.push(animal.id);
            total_income = total_income.saturating_add(product_value(animal, def));
            total_experience = total_experience.saturating_add(def.experience);
        }
    }
    if ready.is_empty() {
        return 0;
    }

    for id in &ready {
        if let Some(animal) = registry.animals.get_mut(id) {
            animal.has_product = false;
        }
    }
    ledger.add_experience(total_experience);
    info!(
        "[Animals] Collected {} products worth {}",
        ready.len(),
        total_income
    );
    total_income
}

/// Sum of daily income over every animal currently holding a product.
/// Flags are left alone; collection is a separate action.
pub fn daily_income(registry: &AnimalRegistry, catalog: &AnimalCatalog) -> u32 {
    registry
        .animals
        .values()
        .filter(|a| a.has_product)
        .filter_map(|a| catalog.get(a.kind))
        .fold(0u32, |sum, def| sum.saturating_add(def.daily_income))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (AnimalRegistry, AnimalCatalog) {
        let catalog = AnimalCatalog::standard();
        let mut registry = AnimalRegistry::default();
        for (n, kind) in [AnimalKind::Cow, AnimalKind::Goat, AnimalKind::Duck]
            .into_iter()
            .enumerate()
        {
            let id = AnimalId(n as u32 + 1);
            let def = catalog.get(kind).unwrap();
            registry
                .animals
                .insert(id, AnimalInstance::new(id, def, TilePos::new(n as i32, 0)));
        }
        (registry, catalog)
    }

    #[test]
    fn test_collect_without_product_returns_zero() {
        let (mut registry, catalog) = setup();
        let mut ledger = EconomyLedger::with_money(0);
        assert_eq!(collect_product(&mut registry, &catalog, &mut ledger, AnimalId(1)), Ok(0));
        assert_eq!(ledger.experience, 0);
    }

    #[test]
    fn test_collect_happy_bonus() {
        let (mut registry, catalog) = setup();
        let goat = registry.animals.get_mut(&AnimalId(2)).unwrap();
        goat.has_product = true;
        goat.happiness = 81;
        let mut ledger = EconomyLedger::with_money(0);

        // 28 × 1.2 = 33.6 → 34
        assert_eq!(collect_product(&mut registry, &catalog, &mut ledger, AnimalId(2)), Ok(34));
        assert!(!registry.animals[&AnimalId(2)].has_product);
        assert_eq!(ledger.experience, 12);
    }

    #[test]
    fn test_collect_no_bonus_at_eighty() {
        let (mut registry, catalog) = setup();
        let cow = registry.animals.get_mut(&AnimalId(1)).unwrap();
        cow.has_product = true;
        cow.happiness = 80;
        let mut ledger = EconomyLedger::with_money(0);
        assert_eq!(collect_product(&mut registry, &catalog, &mut ledger, AnimalId(1)), Ok(40));
    }

    #[test]
    fn test_collect_unknown_animal() {
        let (mut registry, catalog) = setup();
        let mut ledger = EconomyLedger::with_money(0);
        assert!(collect_product(&mut registry, &catalog, &mut ledger, AnimalId(99)).is_err());
    }

    #[test]
    fn test_collect_all_and_daily_income() {
        let (mut registry, catalog) = setup();
        for id in [AnimalId(1), AnimalId(3)] {
            let animal = registry.animals.get_mut(&id).unwrap();
            animal.has_product = true;
            animal.happiness = 50;
        }
        assert_eq!(daily_income(&registry, &catalog), 40 + 12);
        assert!(registry.animals[&AnimalId(1)].has_product, "daily income leaves flags");

        let mut ledger = EconomyLedger::with_money(0);
        assert_eq!(collect_all_products(&mut registry, &catalog, &mut ledger), 52);
        assert_eq!(ledger.experience, 20 + 6);
        assert!(registry.animals.values().all(|a| !a.has_product));
        assert_eq!(daily_income(&registry, &catalog), 0);
    }
}
