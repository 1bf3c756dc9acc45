use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

// ─────────────────────────────────────────────────────────────────────────────
// Animal purchase
//
// Barn capacity is checked before any money moves. A new animal starts at
// full health, full happiness and zero hunger.
// ─────────────────────────────────────────────────────────────────────────────

impl AnimalInstance {
    pub fn new(id: AnimalId, def: &AnimalDef, position: TilePos) -> Self {
        Self {
            id,
            kind: def.kind,
            position,
            health: def.max_health,
            happiness: MAX_HAPPINESS,
            hunger: 0.0,
            seconds_since_fed: 0.0,
            production_progress: 0.0,
            has_product: false,
        }
    }
}

impl AnimalRegistry {
    pub fn is_full(&self) -> bool {
        self.animals.len() as u32 >= self.capacity
    }

    /// Hand out the next unused id.
    pub fn allocate_id(&mut self) -> AnimalId {
        while self.animals.contains_key(&AnimalId(self.next_id)) {
            self.next_id += 1;
        }
        let id = AnimalId(self.next_id);
        self.next_id += 1;
        id
    }
}

pub fn purchase_animal(
    registry: &mut AnimalRegistry,
    catalog: &AnimalCatalog,
    ledger: &mut EconomyLedger,
    kind: AnimalKind,
    position: TilePos,
) -> Result<AnimalId, FarmError> {
    if registry.is_full() {
        return Err(FarmError::CapacityExceeded {
            capacity: registry.capacity,
        });
    }
    let Some(def) = catalog.get(kind) else {
        warn!("[Animals] No catalog entry for {:?}", kind);
        return Err(FarmError::UnknownCatalogEntry {
            name: format!("{:?}", kind),
        });
    };
    if !ledger.spend_money(def.purchase_price) {
        return Err(FarmError::InsufficientFunds {
            needed: def.purchase_price,
            available: ledger.money,
        });
    }

    let id = registry.allocate_id();
    registry
        .animals
        .insert(id, AnimalInstance::new(id, def, position));
    info!("[Animals] Bought a {} ({}) at {}", def.name, id, position);
    Ok(id)
}
