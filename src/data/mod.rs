//! Data layer — populates the catalogs at startup and loads `SimConfig`.
//!
//! The catalogs are hard-coded game-design data defined in submodules. No
//! other domain seeds these resources; everything reads them once the
//! Startup schedule has run.

mod animals;
mod config;
mod crops;

pub use animals::populate_animals;
pub use crops::populate_crops;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CropCatalog>()
            .init_resource::<AnimalCatalog>()
            .add_systems(Startup, load_all_data);
    }
}

/// Fill every catalog that is still empty. A host that inserted its own
/// catalog before startup keeps it.
fn load_all_data(mut crop_catalog: ResMut<CropCatalog>, mut animal_catalog: ResMut<AnimalCatalog>) {
    info!("[Data] Populating catalogs…");

    if crop_catalog.crops.is_empty() {
        populate_crops(&mut crop_catalog);
    }
    info!("  Crops loaded: {}", crop_catalog.crops.len());

    if animal_catalog.animals.is_empty() {
        populate_animals(&mut animal_catalog);
    }
    info!("  Animals loaded: {}", animal_catalog.animals.len());
}
