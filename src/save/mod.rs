//! Persistence boundary.
//!
//! The core never writes files or talks to a backend. It can be read into a
//! `GameSnapshot` and rebuilt from one; handing snapshots to storage is the
//! job of a host-installed [`GameStateSink`], which is called without waiting
//! for any result. A JSON codec is provided for hosts that want one.

use bevy::prelude::*;

use crate::animals::settle_animal;
use crate::error::SnapshotError;
use crate::farming::settle_tile;
use crate::shared::*;
use crate::sim::{FarmSim, SimContext, SimResources, SimSet};

// ═══════════════════════════════════════════════════════════════════════
// SINK
// ═══════════════════════════════════════════════════════════════════════

/// Receives snapshots on autosave and on request. Implementations must not
/// block; queue the work and return.
pub trait GameStateSink: Send + Sync + 'static {
    fn submit(&self, snapshot: GameSnapshot);
}

impl<F> GameStateSink for F
where
    F: Fn(GameSnapshot) + Send + Sync + 'static,
{
    fn submit(&self, snapshot: GameSnapshot) {
        self(snapshot)
    }
}

/// The installed sink, if any. Without one, autosaves are skipped.
#[derive(Resource, Default)]
pub struct SaveSink(pub Option<Box<dyn GameStateSink>>);

impl SaveSink {
    pub fn new(sink: impl GameStateSink) -> Self {
        Self(Some(Box::new(sink)))
    }

    fn submit(&self, snapshot: GameSnapshot) -> bool {
        match &self.0 {
            Some(sink) => {
                sink.submit(snapshot);
                true
            }
            None => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SaveSink>()
            .add_event::<SnapshotRequestEvent>()
            .add_event::<ApplyGameStateEvent>()
            .add_systems(
                Update,
                (handle_apply_game_state, autosave_on_new_day, handle_snapshot_request)
                    .chain()
                    .after(SimSet::Tick),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// READ / APPLY
// ═══════════════════════════════════════════════════════════════════════

/// Capture everything needed to rebuild the core. Tiles and animals come out
/// in a stable order.
pub fn read_game_state(
    ledger: &EconomyLedger,
    clock: &DayNightClock,
    weather: &WeatherState,
    farm: &FarmState,
    animals: &AnimalRegistry,
    nodes: &ResourceNodes,
) -> GameSnapshot {
    let mut tiles: Vec<TileSnapshot> = farm
        .tiles
        .iter()
        .map(|(pos, tile)| TileSnapshot {
            pos: *pos,
            tile: tile.clone(),
        })
        .collect();
    tiles.sort_by_key(|t| t.pos);

    GameSnapshot {
        level: ledger.level,
        experience: ledger.experience,
        experience_to_next_level: Some(ledger.experience_to_next_level),
        money: ledger.money,
        day: clock.day,
        time_of_day_seconds: clock.time_of_day_seconds(),
        weather: weather.current,
        tiles,
        animals: animals.animals.values().cloned().collect(),
        nodes: nodes.nodes.values().cloned().collect(),
        next_animal_id: Some(animals.next_id),
    }
}

impl SimContext<'_> {
    /// Replace the core's state with `snapshot`.
    ///
    /// The snapshot's `hunger` is authoritative over the feeding timer, crop
    /// stages are recomputed from accumulated growth, health and happiness
    /// are capped, a missing level threshold is recomputed from the level,
    /// and surplus experience is rolled into levels without emitting
    /// level-up notifications.
    pub fn apply_game_state(&mut self, snapshot: &GameSnapshot) {
        let ledger = &mut *self.ledger;
        ledger.money = snapshot.money;
        ledger.level = snapshot.level;
        ledger.experience = snapshot.experience;
        ledger.experience_to_next_level = snapshot.experience_to_next_level.unwrap_or(0);
        ledger.settle_levels();
        ledger.take_events();

        self.clock.set(snapshot.day, snapshot.time_of_day_seconds);

        self.weather.current = snapshot.weather;
        self.weather.seconds_since_change = 0.0;

        let crops = self.crops;
        self.farm.tiles = snapshot
            .tiles
            .iter()
            .map(|t| {
                let mut tile = t.tile.clone();
                settle_tile(&mut tile, crops);
                (t.pos, tile)
            })
            .collect();

        let catalog = self.animal_catalog;
        let animals = &mut *self.animals;
        animals.animals = snapshot
            .animals
            .iter()
            .cloned()
            .map(|mut animal| {
                let def = catalog.get(animal.kind);
                settle_animal(&mut animal, def);
                (animal.id, animal)
            })
            .collect();
        let next_free = animals.animals.keys().map(|id| id.0 + 1).max().unwrap_or(1);
        animals.next_id = snapshot.next_animal_id.unwrap_or(1).max(next_free);

        let nodes = &mut *self.nodes;
        nodes.nodes = snapshot
            .nodes
            .iter()
            .map(|n| (n.id, n.clone()))
            .collect();
        nodes.next_id = nodes.nodes.keys().map(|id| id.0 + 1).max().unwrap_or(1);

        info!(
            "[Save] Restored day {} with {} tiles, {} animals, money {}",
            self.clock.day,
            self.farm.tiles.len(),
            animals.animals.len(),
            self.ledger.money
        );
    }
}

impl FarmSim {
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

    pub fn apply_game_state(&mut self, snapshot: &GameSnapshot) {
        self.context().apply_game_state(snapshot);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// JSON CODEC
// ═══════════════════════════════════════════════════════════════════════

pub fn encode_snapshot(snapshot: &GameSnapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn decode_snapshot(json: &str) -> Result<GameSnapshot, SnapshotError> {
    Ok(serde_json::from_str(json)?)
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Hand one snapshot to the sink per frame in which a day started.
fn autosave_on_new_day(
    mut new_days: EventReader<NewDayEvent>,
    sink: Res<SaveSink>,
    sim: SimResources,
) {
    let Some(last) = new_days.read().last() else {
        return;
    };
    if sink.submit(sim.read_game_state()) {
        info!("[Save] Autosaved at the start of day {}", last.day);
    } else {
        debug!("[Save] No save sink installed; skipping autosave for day {}", last.day);
    }
}

fn handle_snapshot_request(
    mut requests: EventReader<SnapshotRequestEvent>,
    sink: Res<SaveSink>,
    sim: SimResources,
) {
    if requests.read().count() == 0 {
        return;
    }
    if !sink.submit(sim.read_game_state()) {
        warn!("[Save] Snapshot requested but no save sink is installed");
    }
}

fn handle_apply_game_state(
    mut events: EventReader<ApplyGameStateEvent>,
    mut sim: SimResources,
    mut fixed: ResMut<FixedStep>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    sim.context().apply_game_state(&event.snapshot);
    fixed.accumulator = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::add_node;

    fn populated_sim() -> FarmSim {
        let mut sim = FarmSim::new(&SimConfig {
            starting_money: 500,
            weather_seed: Some(8),
            ..Default::default()
        });
        sim.farm.tiles.insert(
            TilePos::new(0, 0),
            FarmTile {
                tilled: true,
                watered: true,
                crop: Some(CropInstance::new(CropKind::Tomato)),
                ..Default::default()
            },
        );
        sim.farm.tiles.insert(TilePos::new(1, 0), FarmTile::greenhouse());
        crate::animals::purchase_animal(
            &mut sim.animals,
            &sim.animal_catalog,
            &mut sim.ledger,
            AnimalKind::Goat,
            TilePos::new(4, 4),
        )
        .unwrap();
        add_node(&mut sim.nodes, NodeKind::Rock, TilePos::new(9, 9));
        sim.ledger.add_experience(150);
        sim.clock.advance(400.0);
        sim
    }

    #[test]
    fn test_read_then_apply_restores_state() {
        let source = populated_sim();
        let snapshot = source.read_game_state();
        assert_eq!(snapshot.day, 2);
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.tiles.len(), 2);
        assert_eq!(snapshot.tiles[0].pos, TilePos::new(0, 0));

        let mut target = FarmSim::default();
        target.apply_game_state(&snapshot);
        assert_eq!(target.read_game_state(), snapshot);
        assert_eq!(target.ledger.money, source.ledger.money);
        assert_eq!(target.clock.elapsed_seconds, source.clock.elapsed_seconds);
    }

    #[test]
    fn test_apply_recomputes_missing_threshold_silently() {
        let mut snapshot = populated_sim().read_game_state();
        snapshot.level = 3;
        snapshot.experience = 150;
        snapshot.experience_to_next_level = None;

        let mut sim = FarmSim::default();
        sim.apply_game_state(&snapshot);
        assert_eq!(sim.ledger.level, 4);
        assert_eq!(sim.ledger.experience, 6);
        assert_eq!(sim.ledger.experience_to_next_level, 173);
        assert!(sim.ledger.take_events().is_empty());
    }

    #[test]
    fn test_apply_derives_feeding_timer_from_hunger() {
        let mut snapshot = populated_sim().read_game_state();
        snapshot.animals[0].hunger = 50.0;
        snapshot.animals[0].seconds_since_fed = 0.0;

        let mut sim = FarmSim::default();
        sim.apply_game_state(&snapshot);
        let goat = sim.animals.animals.values().next().unwrap();
        assert_eq!(goat.seconds_since_fed, HUNGER_FULL_SECONDS / 2.0);
    }

    #[test]
    fn test_edited_hunger_survives_the_next_tick() {
        let mut source = populated_sim();
        for _ in 0..60 {
            source.context().step(1.0);
        }
        let mut snapshot = source.read_game_state();
        snapshot.animals[0].hunger = 90.0;

        let mut sim = FarmSim::default();
        sim.apply_game_state(&snapshot);
        sim.context().step(1.0);
        let goat = sim.animals.animals.values().next().unwrap();
        assert!(goat.hunger >= 90.0, "hunger dropped to {}", goat.hunger);
    }

    #[test]
    fn test_apply_restores_animal_and_crop_invariants() {
        let mut snapshot = populated_sim().read_game_state();
        snapshot.animals[0].health = 9_999;
        snapshot.tiles[0].tile.crop = Some(CropInstance {
            kind: CropKind::Pumpkin,
            stage: GrowthStage::ReadyToHarvest,
            growth_units: 0.0,
            was_watered_this_cycle: false,
        });

        let mut sim = FarmSim::default();
        sim.apply_game_state(&snapshot);
        let goat = sim.animals.animals.values().next().unwrap();
        let max_health = sim.animal_catalog.get(AnimalKind::Goat).unwrap().max_health;
        assert_eq!(goat.health, max_health);

        let pos = TilePos::new(0, 0);
        assert_eq!(
            sim.farm.tiles[&pos].crop.as_ref().unwrap().stage,
            GrowthStage::Seed
        );
        let mut ctx = sim.context();
        assert_eq!(
            ctx.apply_action(FarmAction::Harvest(pos)),
            Ok(ActionOutcome::Nothing),
            "a crop with no growth cannot be harvested"
        );
    }

    #[test]
    fn test_new_ids_do_not_collide_after_restore() {
        let mut snapshot = populated_sim().read_game_state();
        snapshot.next_animal_id = None;

        let mut sim = FarmSim::default();
        sim.apply_game_state(&snapshot);
        assert_eq!(sim.animals.allocate_id(), AnimalId(2));
        assert_eq!(add_node(&mut sim.nodes, NodeKind::Tree, TilePos::new(0, 9)), NodeId(2));
    }

    #[test]
    fn test_json_codec() {
        let snapshot = populated_sim().read_game_state();
        let json = encode_snapshot(&snapshot).unwrap();
        assert_eq!(decode_snapshot(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_decode_minimal_snapshot() {
        let json = r#"{ "level": 1, "experience": 10, "money": 42, "day": 3,
                        "tiles": [], "animals": [] }"#;
        let snapshot = decode_snapshot(json).unwrap();
        assert_eq!(snapshot.money, 42);
        assert_eq!(snapshot.weather, WeatherKind::Sunny);
        assert!(snapshot.nodes.is_empty());
        assert_eq!(snapshot.experience_to_next_level, None);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_snapshot("{"), Err(SnapshotError::Codec(_))));
    }
}
