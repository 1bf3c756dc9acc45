use crate::shared::*;

/// Populate the CropCatalog with every crop definition.
///
/// Growth days are whole days of unwatered growth at a 1.0 weather multiplier.
/// Experience is credited on harvest.
pub fn populate_crops(catalog: &mut CropCatalog) {
    let crops = [
        // (kind, name, growth days, sell price, seed price, experience)
        (CropKind::Wheat, "Wheat", 3, 25, 10, 15),
        (CropKind::Corn, "Corn", 5, 40, 15, 25),
        (CropKind::Tomato, "Tomato", 4, 35, 12, 20),
        (CropKind::Carrot, "Carrot", 3, 20, 8, 12),
        (CropKind::Potato, "Potato", 4, 30, 10, 18),
        (CropKind::Strawberry, "Strawberry", 6, 50, 20, 30),
        (CropKind::Pumpkin, "Pumpkin", 7, 60, 25, 35),
        (CropKind::Lettuce, "Lettuce", 2, 15, 5, 10),
    ];

    for (kind, name, growth_days, sell_price, seed_price, experience) in crops {
        catalog.crops.insert(
            kind,
            CropDef {
                kind,
                name: name.into(),
                growth_days,
                sell_price,
                seed_price,
                experience,
            },
        );
    }
}

impl CropCatalog {
    /// The full built-in catalog.
    pub fn standard() -> Self {
        let mut catalog = Self::default();
        populate_crops(&mut catalog);
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_definition() {
        let catalog = CropCatalog::standard();
        for kind in CropKind::ALL {
            let def = catalog.get(kind).expect("missing crop");
            assert_eq!(def.kind, kind);
            assert!(def.growth_days > 0);
            assert!(def.sell_price > def.seed_price, "{} should be profitable", def.name);
        }
    }

    #[test]
    fn test_wheat_values() {
        let catalog = CropCatalog::standard();
        let wheat = catalog.get(CropKind::Wheat).unwrap();
        assert_eq!(
            (wheat.growth_days, wheat.sell_price, wheat.seed_price, wheat.experience),
            (3, 25, 10, 15)
        );
    }
}
