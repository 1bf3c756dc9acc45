//! Simulation orchestrator — ties the domains together.
//!
//! Responsible for:
//! - Turning frame time into fixed simulated steps (scaled by `SimSpeed`)
//! - Running each step over every domain in a fixed order
//! - Routing `FarmActionEvent`s to the engine that owns them
//! - Forwarding day and weather changes as Bevy events
//!
//! Nothing ticks and no action is applied while `SimState::Paused`.

mod actions;
mod context;

pub use context::{drain_fixed_steps, FarmSim, SimContext, StepReport};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::animals::AnimalsPlugin;
use crate::calendar::CalendarPlugin;
use crate::data::DataPlugin;
use crate::economy::{EconomyPlugin, PublishLedgerSet};
use crate::farming::FarmingPlugin;
use crate::save::{read_game_state, SavePlugin};
use crate::shared::*;
use crate::world::WorldPlugin;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Actions,
    Tick,
}

/// Everything the core needs, configured from one `SimConfig`.
#[derive(Default)]
pub struct FarmSimPlugin {
    pub config: SimConfig,
}

impl FarmSimPlugin {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }
}

impl Plugin for FarmSimPlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                warn!("[Sim] {}; falling back to defaults", err);
                SimConfig::default()
            }
        };

        // Configured resources go in first; the domain plugins only
        // init what is still missing.
        let seeded = FarmSim::new(&config);
        app.insert_resource(seeded.clock)
            .insert_resource(seeded.weather)
            .insert_resource(seeded.rng)
            .insert_resource(seeded.ledger)
            .insert_resource(seeded.farm)
            .insert_resource(seeded.animals)
            .insert_resource(seeded.speed)
            .insert_resource(seeded.fixed)
            .insert_resource(config.clone());

        app.init_state::<SimState>()
            .add_event::<FarmActionEvent>()
            .add_plugins((
                DataPlugin,
                EconomyPlugin,
                CalendarPlugin,
                FarmingPlugin,
                AnimalsPlugin,
                WorldPlugin,
                SavePlugin,
            ))
            .configure_sets(
                Update,
                (SimSet::Actions, SimSet::Tick)
                    .chain()
                    .before(PublishLedgerSet),
            )
            .add_systems(
                Update,
                (
                    handle_farm_actions.in_set(SimSet::Actions),
                    advance_simulation.in_set(SimSet::Tick),
                )
                    .run_if(in_state(SimState::Running)),
            );

        info!(
            "[Sim] FarmSimPlugin registered (day {}s, step {}s, x{})",
            config.day_length_seconds, config.step_seconds, config.time_scale
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Every simulation resource a system needs to build a [`SimContext`].
#[derive(SystemParam)]
pub struct SimResources<'w> {
    clock: ResMut<'w, DayNightClock>,
    weather: ResMut<'w, WeatherState>,
    rng: ResMut<'w, WeatherRng>,
    ledger: ResMut<'w, EconomyLedger>,
    farm: ResMut<'w, FarmState>,
    crops: Res<'w, CropCatalog>,
    animals: ResMut<'w, AnimalRegistry>,
    animal_catalog: Res<'w, AnimalCatalog>,
    nodes: ResMut<'w, ResourceNodes>,
    notifications: ResMut<'w, NotificationQueue>,
}

impl SimResources<'_> {
    pub fn context(&mut self) -> SimContext<'_> {
        SimContext {
            clock: &mut self.clock,
            weather: &mut self.weather,
            rng: &mut self.rng.0,
            ledger: &mut self.ledger,
            farm: &mut self.farm,
            crops: &self.crops,
            animals: &mut self.animals,
            animal_catalog: &self.animal_catalog,
            nodes: &mut self.nodes,
            notifications: &mut self.notifications,
        }
    }

    /// Snapshot without marking any resource as changed.
    pub fn read_game_state(&self) -> GameSnapshot {
        read_game_state(
            &self.ledger,
            &self.clock,
            &self.weather,
            &self.farm,
            &self.animals,
            &self.nodes,
        )
    }
}

fn handle_farm_actions(mut actions: EventReader<FarmActionEvent>, mut sim: SimResources) {
    if actions.is_empty() {
        return;
    }
    let mut ctx = sim.context();
    for event in actions.read() {
        if let Err(err) = ctx.apply_action(event.action) {
            info!("[Sim] Declined {:?}: {}", event.action, err);
        }
    }
}

fn advance_simulation(
    time: Res<Time>,
    speed: Res<SimSpeed>,
    mut fixed: ResMut<FixedStep>,
    mut sim: SimResources,
    mut new_day_writer: EventWriter<NewDayEvent>,
    mut weather_writer: EventWriter<WeatherChangedEvent>,
) {
    let steps = drain_fixed_steps(&mut fixed, time.delta_secs() * speed.time_scale);
    if steps == 0 {
        return;
    }
    let step_seconds = fixed.step_seconds;

    let mut ctx = sim.context();
    for _ in 0..steps {
        let report = ctx.step(step_seconds);
        for day in report.new_days {
            new_day_writer.send(NewDayEvent { day });
        }
        if let Some(kind) = report.weather_changed {
            weather_writer.send(WeatherChangedEvent { kind });
        }
    }
}
