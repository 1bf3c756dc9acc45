//! The simulation state as one borrowed view, and the fixed-step tick.

use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::animals::{daily_income, tick_animals};
use crate::economy::publish_ledger_events;
use crate::farming::advance_all_tiles;
use crate::shared::*;
use crate::world::tick_nodes;

/// Mutable view over every piece of simulation state.
///
/// Built fresh from ECS resources each frame, or from a [`FarmSim`] by a host
/// that drives the core without Bevy's scheduler.
pub struct SimContext<'a> {
    pub clock: &'a mut DayNightClock,
    pub weather: &'a mut WeatherState,
    pub rng: &'a mut StdRng,
    pub ledger: &'a mut EconomyLedger,
    pub farm: &'a mut FarmState,
    pub crops: &'a CropCatalog,
    pub animals: &'a mut AnimalRegistry,
    pub animal_catalog: &'a AnimalCatalog,
    pub nodes: &'a mut ResourceNodes,
    pub notifications: &'a mut NotificationQueue,
}

/// What happened during one or more steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub new_days: Vec<u32>,
    /// Last weather change, if any.
    pub weather_changed: Option<WeatherKind>,
    pub products_ready: Vec<AnimalId>,
    pub nodes_restored: Vec<NodeId>,
}

impl StepReport {
    pub fn merge(&mut self, other: StepReport) {
        self.new_days.extend(other.new_days);
        if other.weather_changed.is_some() {
            self.weather_changed = other.weather_changed;
        }
        self.products_ready.extend(other.products_ready);
        self.nodes_restored.extend(other.nodes_restored);
    }
}

impl SimContext<'_> {
    /// Advance everything by one fixed step of `delta_seconds`.
    ///
    /// Order: weather, clock, new-day work (crop growth and animal daily
    /// income, once per day crossed), per-tick animal update, node timers,
    /// then the ledger's changes are published.
    pub fn step(&mut self, delta_seconds: f32) -> StepReport {
        let mut report = StepReport::default();

        if let Some(kind) = self.weather.tick(delta_seconds, &mut *self.rng) {
            info!("[Sim] Weather changed to {:?}", kind);
            self.notifications.push(Notification::WeatherChanged { kind });
            report.weather_changed = Some(kind);
        }

        for day in self.clock.advance(delta_seconds) {
            self.notifications.push(Notification::NewDay { day });
            advance_all_tiles(self.farm, self.crops, self.weather.growth_multiplier());
            let income = daily_income(self.animals, self.animal_catalog);
            if income > 0 {
                info!("[Sim] Day {}: animal income {}", day, income);
                self.ledger.add_money(income);
            }
            report.new_days.push(day);
        }

        report.products_ready =
            tick_animals(self.animals, self.animal_catalog, delta_seconds, self.clock.is_night);
        report.nodes_restored = tick_nodes(self.nodes, delta_seconds);

        publish_ledger_events(self.ledger, self.notifications);
        report
    }
}

/// Move whole steps out of the accumulator. Returns how many steps to run.
pub fn drain_fixed_steps(fixed: &mut FixedStep, scaled_delta: f32) -> u32 {
    if fixed.step_seconds <= 0.0 {
        return 0;
    }
    if scaled_delta > 0.0 {
        fixed.accumulator += scaled_delta;
    }
    let mut steps = 0;
    while fixed.accumulator >= fixed.step_seconds {
        fixed.accumulator -= fixed.step_seconds;
        steps += 1;
    }
    steps
}

// ─────────────────────────────────────────────────────────────────────────────
// Owned simulation for hosts without an ECS
// ─────────────────────────────────────────────────────────────────────────────

/// All simulation state in one owned value, created at simulation start and
/// dropped at simulation end.
#[derive(Debug, Clone)]
pub struct FarmSim {
    pub clock: DayNightClock,
    pub weather: WeatherState,
    pub rng: WeatherRng,
    pub ledger: EconomyLedger,
    pub farm: FarmState,
    pub crops: CropCatalog,
    pub animals: AnimalRegistry,
    pub animal_catalog: AnimalCatalog,
    pub nodes: ResourceNodes,
    pub notifications: NotificationQueue,
    pub speed: SimSpeed,
    pub fixed: FixedStep,
    pub paused: bool,
}

impl FarmSim {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            clock: DayNightClock::new(config.day_length_seconds, config.night_threshold),
            weather: WeatherState {
                change_interval_seconds: config.weather_change_interval_seconds,
                ..Default::default()
            },
            rng: config
                .weather_seed
                .map(WeatherRng::seeded)
                .unwrap_or_else(WeatherRng::from_entropy),
            ledger: EconomyLedger::with_money(config.starting_money),
            farm: FarmState {
                greenhouse_capacity: config.greenhouse_capacity,
                greenhouse_growth_multiplier: config.greenhouse_growth_multiplier,
                ..Default::default()
            },
            crops: CropCatalog::standard(),
            animals: AnimalRegistry {
                capacity: config.barn_capacity,
                ..Default::default()
            },
            animal_catalog: AnimalCatalog::standard(),
            nodes: ResourceNodes::default(),
            notifications: NotificationQueue::default(),
            speed: SimSpeed {
                time_scale: config.time_scale,
            },
            fixed: FixedStep {
                accumulator: 0.0,
                step_seconds: config.step_seconds,
            },
            paused: false,
        }
    }

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

    /// Feed real elapsed time in; runs as many fixed steps as the scaled time
    /// covers. Nothing advances while paused.
    pub fn advance(&mut self, real_seconds: f32) -> StepReport {
        let mut report = StepReport::default();
        if self.paused {
            return report;
        }
        let steps = drain_fixed_steps(&mut self.fixed, real_seconds * self.speed.time_scale);
        let step_seconds = self.fixed.step_seconds;
        let mut ctx = self.context();
        for _ in 0..steps {
            report.merge(ctx.step(step_seconds));
        }
        report
    }
}

impl Default for FarmSim {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}
