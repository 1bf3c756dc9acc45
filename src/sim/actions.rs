//! Player action dispatch.
//!
//! Every action is routed to the engine that owns it. Engines that produce
//! income return it; it is deposited here in a single credit so batch
//! actions show up as one money change.

use bevy::prelude::*;

use crate::animals::{collect_all_products, collect_product, feed, feed_all_hungry, pet, purchase_animal};
use crate::economy::{format_money, publish_ledger_events};
use crate::error::FarmError;
use crate::farming::{harvest, harvest_all_ready, plant, till, water};
use crate::shared::*;
use crate::world::{chop, mine};

use super::context::SimContext;

fn earned(ledger: &mut EconomyLedger, income: u32) -> ActionOutcome {
    if income == 0 {
        return ActionOutcome::Nothing;
    }
    ledger.add_money(income);
    ActionOutcome::Earned(income)
}

impl SimContext<'_> {
    /// Apply one player action. A declined action leaves the simulation
    /// untouched apart from a user-facing notification.
    pub fn apply_action(&mut self, action: FarmAction) -> Result<ActionOutcome, FarmError> {
        let result = self.dispatch(action);
        match &result {
            Ok(outcome) => debug!("[Sim] {:?} -> {:?}", action, outcome),
            Err(err) => {
                debug!("[Sim] {:?} declined: {}", action, err);
                self.notifications.notify(err.to_string());
            }
        }
        publish_ledger_events(self.ledger, self.notifications);
        result
    }

    fn dispatch(&mut self, action: FarmAction) -> Result<ActionOutcome, FarmError> {
        match action {
            FarmAction::Till(pos) => till(self.farm, pos).map(|_| ActionOutcome::Done),
            FarmAction::Water(pos) => water(self.farm, self.ledger, pos).map(|_| ActionOutcome::Done),
            FarmAction::Plant(pos, kind) => {
                plant(self.farm, self.crops, self.ledger, pos, kind)?;
                let price = self.crops.get(kind).map_or(0, |d| d.seed_price);
                Ok(ActionOutcome::Spent(price))
            }
            FarmAction::Harvest(pos) => self.harvest_tile(pos),
            FarmAction::HarvestAllReady => {
                let income = harvest_all_ready(self.farm, self.crops, self.ledger);
                Ok(earned(self.ledger, income))
            }
            FarmAction::Feed(id) => self.feed_one(id),
            FarmAction::FeedAllHungry => {
                let before = self.ledger.money;
                let fed = feed_all_hungry(self.animals, self.animal_catalog, self.ledger)?;
                if fed == 0 {
                    return Ok(ActionOutcome::Nothing);
                }
                let cost = before - self.ledger.money;
                self.notifications
                    .notify(format!("Fed {} hungry animals for {}", fed, format_money(cost)));
                Ok(ActionOutcome::Spent(cost))
            }
            FarmAction::Collect(id) => {
                let income = collect_product(self.animals, self.animal_catalog, self.ledger, id)?;
                Ok(earned(self.ledger, income))
            }
            FarmAction::CollectAll => {
                let income = collect_all_products(self.animals, self.animal_catalog, self.ledger);
                Ok(earned(self.ledger, income))
            }
            FarmAction::Pet(id) => pet(self.animals, self.ledger, id).map(|_| ActionOutcome::Done),
            FarmAction::PurchaseAnimal(kind, pos) => {
                let id = purchase_animal(self.animals, self.animal_catalog, self.ledger, kind, pos)?;
                if let Some(def) = self.animal_catalog.get(kind) {
                    self.notifications.notify(format!(
                        "Bought a {} for {}",
                        def.name,
                        format_money(def.purchase_price)
                    ));
                }
                Ok(ActionOutcome::Purchased(id))
            }
            FarmAction::Chop(id) => {
                let income = chop(self.nodes, self.ledger, id)?;
                Ok(earned(self.ledger, income))
            }
            FarmAction::Mine(id) => {
                let income = mine(self.nodes, self.ledger, id)?;
                Ok(earned(self.ledger, income))
            }
            FarmAction::Interact(target) => self.interact(target),
        }
    }

    fn harvest_tile(&mut self, pos: TilePos) -> Result<ActionOutcome, FarmError> {
        if !self.farm.tiles.contains_key(&pos) {
            return Err(FarmError::InvalidTileState { pos });
        }
        let income = harvest(self.farm, self.crops, self.ledger, pos);
        Ok(earned(self.ledger, income))
    }

    fn feed_one(&mut self, id: AnimalId) -> Result<ActionOutcome, FarmError> {
        feed(self.animals, self.animal_catalog, self.ledger, id)?;
        let cost = self
            .animals
            .animals
            .get(&id)
            .and_then(|a| self.animal_catalog.get(a.kind))
            .map_or(0, |d| d.feed_cost);
        self.notifications
            .notify(format!("Fed {} for {}", id, format_money(cost)));
        Ok(ActionOutcome::Spent(cost))
    }

    /// Tagged dispatch for a generic "use" on a world entity.
    ///
    /// - tile: harvest if ripe, otherwise nothing
    /// - animal: collect a ready product, else feed if hungry, else pet
    /// - node: chop a tree or mine a rock
    pub fn interact(&mut self, target: EntityKind) -> Result<ActionOutcome, FarmError> {
        match target {
            EntityKind::Tile(pos) => self.harvest_tile(pos),
            EntityKind::Animal(id) => {
                let Some(animal) = self.animals.animals.get(&id) else {
                    return Err(FarmError::InvalidAnimalState { id });
                };
                let (has_product, hunger) = (animal.has_product, animal.hunger);
                if has_product {
                    let income = collect_product(self.animals, self.animal_catalog, self.ledger, id)?;
                    Ok(earned(self.ledger, income))
                } else if hunger > FEED_ELIGIBLE_HUNGER {
                    self.feed_one(id)
                } else {
                    pet(self.animals, self.ledger, id)?;
                    Ok(ActionOutcome::Done)
                }
            }
            EntityKind::Node(id) => {
                let Some(kind) = self.nodes.nodes.get(&id).map(|n| n.kind) else {
                    return Err(FarmError::NodeUnavailable { id });
                };
                let income = match kind {
                    NodeKind::Tree => chop(self.nodes, self.ledger, id)?,
                    NodeKind::Rock => mine(self.nodes, self.ledger, id)?,
                };
                Ok(earned(self.ledger, income))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FarmSim;
    use crate::world::add_node;

    fn sim_with_tile(pos: TilePos, money: u32) -> FarmSim {
        let mut sim = FarmSim::new(&SimConfig {
            starting_money: money,
            weather_seed: Some(1),
            ..Default::default()
        });
        sim.farm.tiles.insert(pos, FarmTile::default());
        sim
    }

    #[test]
    fn test_declined_action_notifies() {
        let pos = TilePos::new(0, 0);
        let mut sim = sim_with_tile(pos, 0);
        let result = sim.context().apply_action(FarmAction::Plant(pos, CropKind::Wheat));
        assert_eq!(result, Err(FarmError::InvalidTileState { pos }));
        assert!(matches!(
            sim.notifications.drain().as_slice(),
            [Notification::Notify { .. }]
        ));
    }

    #[test]
    fn test_harvest_missing_tile_is_invalid() {
        let mut sim = sim_with_tile(TilePos::new(0, 0), 0);
        let pos = TilePos::new(8, 8);
        assert_eq!(
            sim.context().apply_action(FarmAction::Harvest(pos)),
            Err(FarmError::InvalidTileState { pos })
        );
    }

    #[test]
    fn test_harvest_unripe_is_nothing() {
        let pos = TilePos::new(0, 0);
        let mut sim = sim_with_tile(pos, 10);
        let mut ctx = sim.context();
        ctx.apply_action(FarmAction::Till(pos)).unwrap();
        ctx.apply_action(FarmAction::Plant(pos, CropKind::Wheat)).unwrap();
        assert_eq!(ctx.apply_action(FarmAction::Harvest(pos)), Ok(ActionOutcome::Nothing));
    }

    #[test]
    fn test_interact_with_animal_prefers_collect_then_feed_then_pet() {
        let mut sim = sim_with_tile(TilePos::new(0, 0), 100);
        let mut ctx = sim.context();
        let Ok(ActionOutcome::Purchased(id)) =
            ctx.apply_action(FarmAction::PurchaseAnimal(AnimalKind::Chicken, TilePos::new(2, 2)))
        else {
            panic!("purchase failed");
        };
        assert_eq!(ctx.ledger.money, 50);

        // Content animal: pet.
        assert_eq!(ctx.interact(EntityKind::Animal(id)), Ok(ActionOutcome::Done));
        assert_eq!(ctx.ledger.money, 50);

        // Hungry animal: feed.
        ctx.animals.animals.get_mut(&id).unwrap().hunger = 60.0;
        assert_eq!(ctx.interact(EntityKind::Animal(id)), Ok(ActionOutcome::Spent(5)));
        assert_eq!(ctx.animals.animals[&id].hunger, 0.0);

        // Product ready (and hungry again): collect wins.
        let chicken = ctx.animals.animals.get_mut(&id).unwrap();
        chicken.has_product = true;
        chicken.hunger = 60.0;
        chicken.happiness = 50;
        assert_eq!(ctx.interact(EntityKind::Animal(id)), Ok(ActionOutcome::Earned(15)));
        assert_eq!(ctx.ledger.money, 45 + 15);
    }

    #[test]
    fn test_interact_with_nodes() {
        let mut sim = sim_with_tile(TilePos::new(0, 0), 0);
        let tree = add_node(&mut sim.nodes, NodeKind::Tree, TilePos::new(5, 5));
        let rock = add_node(&mut sim.nodes, NodeKind::Rock, TilePos::new(6, 5));
        let mut ctx = sim.context();

        assert_eq!(ctx.interact(EntityKind::Node(tree)), Ok(ActionOutcome::Earned(TREE_MONEY)));
        assert_eq!(ctx.interact(EntityKind::Node(rock)), Ok(ActionOutcome::Earned(ROCK_MONEY)));
        assert_eq!(
            ctx.interact(EntityKind::Node(tree)),
            Err(FarmError::NodeUnavailable { id: tree })
        );
        assert_eq!(
            ctx.interact(EntityKind::Node(NodeId(99))),
            Err(FarmError::NodeUnavailable { id: NodeId(99) })
        );
        assert_eq!(ctx.ledger.money, TREE_MONEY + ROCK_MONEY);
    }

    #[test]
    fn test_harvest_all_credits_once() {
        let mut sim = sim_with_tile(TilePos::new(0, 0), 0);
        for x in 0..3 {
            sim.farm.tiles.insert(
                TilePos::new(x, 1),
                FarmTile {
                    tilled: true,
                    crop: Some(CropInstance {
                        kind: CropKind::Carrot,
                        stage: GrowthStage::ReadyToHarvest,
                        growth_units: 3.0,
                        was_watered_this_cycle: false,
                    }),
                    ..Default::default()
                },
            );
        }
        let outcome = sim.context().apply_action(FarmAction::HarvestAllReady);
        assert_eq!(outcome, Ok(ActionOutcome::Earned(60)));
        let money_changes = sim
            .notifications
            .iter()
            .filter(|n| matches!(n, Notification::MoneyChanged { .. }))
            .count();
        assert_eq!(money_changes, 1);
    }

    #[test]
    fn test_purchase_and_batch_feed_notify_amounts() {
        let mut sim = sim_with_tile(TilePos::new(0, 0), 1_500);
        let mut ctx = sim.context();
        for kind in [AnimalKind::Cow, AnimalKind::Sheep] {
            ctx.apply_action(FarmAction::PurchaseAnimal(kind, TilePos::new(1, 1)))
                .unwrap();
        }
        for animal in ctx.animals.animals.values_mut() {
            animal.hunger = 70.0;
        }
        assert_eq!(
            ctx.apply_action(FarmAction::FeedAllHungry),
            Ok(ActionOutcome::Spent(27))
        );
        assert_eq!(ctx.ledger.money, 1_500 - 200 - 150 - 27);

        let messages: Vec<String> = sim
            .notifications
            .drain()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Notify { message } => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(
            messages,
            vec![
                "Bought a Cow for $200".to_string(),
                "Bought a Sheep for $150".to_string(),
                "Fed 2 hungry animals for $27".to_string(),
            ]
        );
    }
}
