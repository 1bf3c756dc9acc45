use crate::shared::*;

/// Populate the AnimalCatalog with every animal definition.
pub fn populate_animals(catalog: &mut AnimalCatalog) {
    let animals = [
        // (kind, name, purchase, daily income, feed cost, product, hours, xp, max health)
        (AnimalKind::Chicken, "Chicken", 50, 15, 5, "Egg", 4.0, 8, 80),
        (AnimalKind::Cow, "Cow", 200, 40, 15, "Milk", 8.0, 20, 150),
        (AnimalKind::Pig, "Pig", 100, 25, 10, "Truffle", 12.0, 15, 120),
        (AnimalKind::Sheep, "Sheep", 150, 30, 12, "Wool", 24.0, 18, 100),
        (AnimalKind::Goat, "Goat", 120, 28, 8, "Goat Milk", 6.0, 12, 90),
        (AnimalKind::Duck, "Duck", 40, 12, 4, "Duck Egg", 5.0, 6, 70),
    ];

    for (kind, name, purchase_price, daily_income, feed_cost, product, hours, experience, max_health) in
        animals
    {
        catalog.animals.insert(
            kind,
            AnimalDef {
                kind,
                name: name.into(),
                purchase_price,
                daily_income,
                feed_cost,
                product_name: product.into(),
                production_hours: hours,
                experience,
                max_health,
            },
        );
    }
}

impl AnimalCatalog {
    /// The full built-in catalog.
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        populate_animals(&mut catalog);
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_definition() {
        let catalog = AnimalCatalog::standard();
        for kind in AnimalKind::ALL {
            let def = catalog.get(kind).expect("missing animal");
            assert_eq!(def.kind, kind);
            assert!(def.max_health >= SICK_HEALTH_THRESHOLD, "{} starts sick", def.name);
            assert!(def.production_seconds() > 0.0);
        }
    }

    #[test]
    fn test_cow_values() {
        let cow = AnimalCatalog::standard().get(AnimalKind::Cow).cloned().unwrap();
        assert_eq!(cow.product_name, "Milk");
        assert_eq!(cow.production_seconds(), 8.0 * 3600.0);
        assert_eq!((cow.purchase_price, cow.daily_income, cow.feed_cost), (200, 40, 15));
    }
}
