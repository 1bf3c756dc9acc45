use bevy::prelude::*;
use crate::error::FarmError;
use crate::shared::*;

/// Pet an animal: a happiness boost and a little experience, nothing else.
pub fn pet(
    registry: &mut AnimalRegistry,
    ledger: &mut EconomyLedger,
    id: AnimalId,
) -> Result<(), FarmError> {
    let Some(animal) = registry.animals.get_mut(&id) else {
        return Err(FarmError::InvalidAnimalState { id });
    };
    animal.happiness = (animal.happiness + PET_HAPPINESS).min(MAX_HAPPINESS);
    ledger.add_experience(PET_EXPERIENCE);
    debug!("[Animals] Petted {} (happiness {})", id, animal.happiness);
    Ok(())
}
