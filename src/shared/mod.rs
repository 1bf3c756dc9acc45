//! Shared resources, events, states, and catalog types for the farm simulation.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly; the orchestrator in
//! `crate::sim` is the only place that stitches domains together.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// SIMULATION STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum SimState {
    #[default]
    Running,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════

/// Grid position of a farm tile (also used for pens and resource nodes).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AnimalId(pub u32);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animal#{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR — day/night clock and weather
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherKind {
    #[default]
    Sunny,
    Rainy,
    Stormy,
    Snowy,
    Cloudy,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 5] = [
        WeatherKind::Sunny,
        WeatherKind::Rainy,
        WeatherKind::Stormy,
        WeatherKind::Snowy,
        WeatherKind::Cloudy,
    ];
}

/// Continuous time-of-day plus the day counter.
///
/// `elapsed_seconds` is the accumulator inside the current day; it always
/// stays below `day_length_seconds` after [`DayNightClock::advance`].
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct DayNightClock {
    pub day: u32,
    pub elapsed_seconds: f32,
    pub day_length_seconds: f32,
    pub night_threshold: f32,
    pub is_night: bool,
}

impl Default for DayNightClock {
    fn default() -> Self {
        Self {
            day: 1,
            elapsed_seconds: 0.0,
            day_length_seconds: DEFAULT_DAY_LENGTH_SECONDS,
            night_threshold: NIGHT_THRESHOLD,
            is_night: false,
        }
    }
}

impl DayNightClock {
    pub fn new(day_length_seconds: f32, night_threshold: f32) -> Self {
        Self {
            day_length_seconds,
            night_threshold,
            ..Self::default()
        }
    }

    /// Fraction of the current day that has elapsed, in `[0, 1)`.
    pub fn time_of_day_fraction(&self) -> f32 {
        if self.day_length_seconds > 0.0 {
            self.elapsed_seconds / self.day_length_seconds
        } else {
            0.0
        }
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: WeatherKind,
    pub seconds_since_change: f32,
    pub change_interval_seconds: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            current: WeatherKind::Sunny,
            seconds_since_change: 0.0,
            change_interval_seconds: DEFAULT_WEATHER_INTERVAL_SECONDS,
        }
    }
}

/// Seeded RNG used for weather sampling. Kept as a resource so a fixed seed
/// reproduces the same weather sequence.
#[derive(Resource, Debug, Clone)]
pub struct WeatherRng(pub StdRng);

impl WeatherRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for WeatherRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ECONOMY
// ═══════════════════════════════════════════════════════════════════════

/// Something the ledger did that the presentation layer may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    MoneyChanged { balance: u32, delta: i64 },
    LevelUp { level: u32 },
}

/// Money, experience and level. Exactly one per running simulation.
///
/// Mutations go through the methods in `crate::economy`; each call is applied
/// as a whole before it returns.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct EconomyLedger {
    pub money: u32,
    pub experience: u32,
    pub level: u32,
    pub experience_to_next_level: u32,
    /// Changes not yet published to the notification queue.
    #[serde(skip)]
    pub(crate) outbox: Vec<LedgerEvent>,
}

impl Default for EconomyLedger {
    fn default() -> Self {
        Self::with_money(STARTING_MONEY)
    }
}

impl EconomyLedger {
    pub fn with_money(money: u32) -> Self {
        Self {
            money,
            experience: 0,
            level: 1,
            experience_to_next_level: BASE_EXPERIENCE_THRESHOLD,
            outbox: Vec::new(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CropKind {
    Wheat,
    Corn,
    Tomato,
    Carrot,
    Potato,
    Strawberry,
    Pumpkin,
    Lettuce,
}

impl CropKind {
    pub const ALL: [CropKind; 8] = [
        CropKind::Wheat,
        CropKind::Corn,
        CropKind::Tomato,
        CropKind::Carrot,
        CropKind::Potato,
        CropKind::Strawberry,
        CropKind::Pumpkin,
        CropKind::Lettuce,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum GrowthStage {
    #[default]
    Seed,
    Sprout,
    Growing,
    Mature,
    ReadyToHarvest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropDef {
    pub kind: CropKind,
    pub name: String,
    pub growth_days: u32,
    pub sell_price: u32,
    pub seed_price: u32,
    pub experience: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropCatalog {
    pub crops: HashMap<CropKind, CropDef>,
}

impl CropCatalog {
    pub fn get(&self, kind: CropKind) -> Option<&CropDef> {
        self.crops.get(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropInstance {
    pub kind: CropKind,
    pub stage: GrowthStage,
    pub growth_units: f32,
    /// Whether the growth tick that produced the current stage consumed a
    /// watering. Drives the harvest care bonus.
    pub was_watered_this_cycle: bool,
}

impl CropInstance {
    pub fn new(kind: CropKind) -> Self {
        Self {
            kind,
            stage: GrowthStage::Seed,
            growth_units: 0.0,
            was_watered_this_cycle: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmTile {
    pub tilled: bool,
    pub watered: bool,
    #[serde(default)]
    pub greenhouse: bool,
    pub crop: Option<CropInstance>,
}

impl FarmTile {
    pub fn greenhouse() -> Self {
        Self {
            greenhouse: true,
            ..Self::default()
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct FarmState {
    /// Every tile created at map load. Key = grid position.
    pub tiles: HashMap<TilePos, FarmTile>,
    pub greenhouse_capacity: u32,
    pub greenhouse_growth_multiplier: f32,
}

impl Default for FarmState {
    fn default() -> Self {
        Self {
            tiles: HashMap::new(),
            greenhouse_capacity: DEFAULT_GREENHOUSE_CAPACITY,
            greenhouse_growth_multiplier: GREENHOUSE_GROWTH_MULTIPLIER,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ANIMALS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimalKind {
    Chicken,
    Cow,
    Pig,
    Sheep,
    Goat,
    Duck,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 6] = [
        AnimalKind::Chicken,
        AnimalKind::Cow,
        AnimalKind::Pig,
        AnimalKind::Sheep,
        AnimalKind::Goat,
        AnimalKind::Duck,
    ];
}

/// Derived each tick from hunger, health, night and product flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalState {
    Happy,
    Hungry,
    Sick,
    Sleeping,
    Producing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalDef {
    pub kind: AnimalKind,
    pub name: String,
    pub purchase_price: u32,
    pub daily_income: u32,
    pub feed_cost: u32,
    pub product_name: String,
    pub production_hours: f32,
    pub experience: u32,
    pub max_health: u32,
}

impl AnimalDef {
    pub fn production_seconds(&self) -> f32 {
        self.production_hours * 3600.0
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct AnimalCatalog {
    pub animals: HashMap<AnimalKind, AnimalDef>,
}

impl AnimalCatalog {
    pub fn get(&self, kind: AnimalKind) -> Option<&AnimalDef> {
        self.animals.get(&kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalInstance {
    pub id: AnimalId,
    pub kind: AnimalKind,
    pub position: TilePos,
    pub health: u32,
    pub happiness: u32,
    /// 0 = full, 100 = starving. Recomputed from `seconds_since_fed` each tick.
    pub hunger: f32,
    #[serde(default)]
    pub seconds_since_fed: f32,
    pub production_progress: f32,
    pub has_product: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct AnimalRegistry {
    pub animals: BTreeMap<AnimalId, AnimalInstance>,
    pub next_id: u32,
    /// Barn capacity.
    pub capacity: u32,
}

impl Default for AnimalRegistry {
    fn default() -> Self {
        Self {
            animals: BTreeMap::new(),
            next_id: 1,
            capacity: DEFAULT_BARN_CAPACITY,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD — choppable / mineable resource nodes
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Tree,
    Rock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub pos: TilePos,
    pub depleted: bool,
    /// Seconds since the node was depleted.
    pub regrowth_seconds: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct ResourceNodes {
    pub nodes: BTreeMap<NodeId, ResourceNode>,
    pub next_id: u32,
}

impl Default for ResourceNodes {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 1,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ACTIONS — discrete player intents routed by the orchestrator
// ═══════════════════════════════════════════════════════════════════════

/// The world entity an `Interact` action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Tile(TilePos),
    Animal(AnimalId),
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FarmAction {
    Till(TilePos),
    Water(TilePos),
    Plant(TilePos, CropKind),
    Harvest(TilePos),
    HarvestAllReady,
    Feed(AnimalId),
    FeedAllHungry,
    Collect(AnimalId),
    CollectAll,
    Pet(AnimalId),
    PurchaseAnimal(AnimalKind, TilePos),
    Chop(NodeId),
    Mine(NodeId),
    Interact(EntityKind),
}

/// What an accepted action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Done,
    Earned(u32),
    Spent(u32),
    Purchased(AnimalId),
    Nothing,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Sent by the input/UI collaborator; handled once per frame by the orchestrator.
#[derive(Event, Debug, Clone)]
pub struct FarmActionEvent {
    pub action: FarmAction,
}

/// Sent once per simulated day boundary crossed.
#[derive(Event, Debug, Clone)]
pub struct NewDayEvent {
    pub day: u32,
}

#[derive(Event, Debug, Clone)]
pub struct WeatherChangedEvent {
    pub kind: WeatherKind,
}

/// Restore the whole simulation from a snapshot.
#[derive(Event, Debug, Clone)]
pub struct ApplyGameStateEvent {
    pub snapshot: GameSnapshot,
}

/// Hand the current snapshot to the installed save sink.
#[derive(Event, Debug, Clone)]
pub struct SnapshotRequestEvent;

// ═══════════════════════════════════════════════════════════════════════
// NOTIFICATIONS — outbound channel drained by the presentation layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    NewDay { day: u32 },
    WeatherChanged { kind: WeatherKind },
    LevelUp { level: u32 },
    MoneyChanged { balance: u32, delta: i64 },
    Notify { message: String },
}

#[derive(Resource, Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.pending.push(Notification::Notify {
            message: message.into(),
        });
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG & TIMING
// ═══════════════════════════════════════════════════════════════════════

/// Tunables for a simulation run. Loadable from RON, see `crate::data`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub day_length_seconds: f32,
    pub night_threshold: f32,
    pub weather_change_interval_seconds: f32,
    pub step_seconds: f32,
    pub starting_money: u32,
    pub barn_capacity: u32,
    pub greenhouse_capacity: u32,
    pub greenhouse_growth_multiplier: f32,
    pub time_scale: f32,
    pub weather_seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            day_length_seconds: DEFAULT_DAY_LENGTH_SECONDS,
            night_threshold: NIGHT_THRESHOLD,
            weather_change_interval_seconds: DEFAULT_WEATHER_INTERVAL_SECONDS,
            step_seconds: DEFAULT_STEP_SECONDS,
            starting_money: STARTING_MONEY,
            barn_capacity: DEFAULT_BARN_CAPACITY,
            greenhouse_capacity: DEFAULT_GREENHOUSE_CAPACITY,
            greenhouse_growth_multiplier: GREENHOUSE_GROWTH_MULTIPLIER,
            time_scale: 1.0,
            weather_seed: None,
        }
    }
}

/// Real-time → simulated-time scale (2.0 = speed boost).
#[derive(Resource, Debug, Clone, Copy)]
pub struct SimSpeed {
    pub time_scale: f32,
}

impl Default for SimSpeed {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

/// Accumulates scaled frame time and releases it in whole fixed steps.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FixedStep {
    pub accumulator: f32,
    pub step_seconds: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            step_seconds: DEFAULT_STEP_SECONDS,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PERSISTENCE BOUNDARY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub pos: TilePos,
    pub tile: FarmTile,
}

/// Everything needed to rebuild the core. The wire format belongs to the
/// save collaborator; this is only the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub level: u32,
    pub experience: u32,
    #[serde(default)]
    pub experience_to_next_level: Option<u32>,
    pub money: u32,
    pub day: u32,
    #[serde(default)]
    pub time_of_day_seconds: f32,
    #[serde(default)]
    pub weather: WeatherKind,
    pub tiles: Vec<TileSnapshot>,
    pub animals: Vec<AnimalInstance>,
    #[serde(default)]
    pub nodes: Vec<ResourceNode>,
    #[serde(default)]
    pub next_animal_id: Option<u32>,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const DEFAULT_DAY_LENGTH_SECONDS: f32 = 300.0;
pub const NIGHT_THRESHOLD: f32 = 0.75;
pub const DEFAULT_WEATHER_INTERVAL_SECONDS: f32 = 300.0;
pub const DEFAULT_STEP_SECONDS: f32 = 1.0;

pub const STARTING_MONEY: u32 = 100;
pub const BASE_EXPERIENCE_THRESHOLD: u32 = 100;

pub const DEFAULT_BARN_CAPACITY: u32 = 10;
pub const DEFAULT_GREENHOUSE_CAPACITY: u32 = 20;
pub const GREENHOUSE_GROWTH_MULTIPLIER: f32 = 2.0;

// Crops
pub const WATER_BONUS_UNITS: f32 = 0.5;
pub const CARE_BONUS_MULTIPLIER: f32 = 1.2;
pub const WATER_EXPERIENCE: u32 = 3;
pub const PLANT_EXPERIENCE: u32 = 10;

// Animals
pub const MAX_HUNGER: f32 = 100.0;
pub const MAX_HAPPINESS: u32 = 100;
/// Unfed animals go from 0 to 100 hunger over five simulated hours.
pub const HUNGER_FULL_SECONDS: f32 = 5.0 * 3600.0;
pub const HUNGRY_THRESHOLD: f32 = 80.0;
pub const FEED_ELIGIBLE_HUNGER: f32 = 50.0;
pub const SICK_HEALTH_THRESHOLD: u32 = 30;
pub const HAPPY_BONUS_THRESHOLD: u32 = 80;
pub const FEED_HAPPINESS: u32 = 20;
pub const FEED_HEALTH: u32 = 10;
pub const FEED_EXPERIENCE: u32 = 5;
pub const PET_HAPPINESS: u32 = 10;
pub const PET_EXPERIENCE: u32 = 2;

// Resource nodes
pub const TREE_MONEY: u32 = 20;
pub const TREE_EXPERIENCE: u32 = 15;
pub const TREE_REGROWTH_SECONDS: f32 = 300.0;
pub const ROCK_MONEY: u32 = 15;
pub const ROCK_EXPERIENCE: u32 = 12;
pub const ROCK_RESPAWN_SECONDS: f32 = 600.0;
