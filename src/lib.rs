//! Farmstead — a headless farm economy simulation core.
//!
//! Crops, animals, weather and a day/night clock, advanced on a fixed
//! simulated step and exposed as Bevy plugins. Add [`sim::FarmSimPlugin`]
//! (together with `MinimalPlugins` and `StatesPlugin`, or a host's own
//! equivalents) to an `App`; send `FarmActionEvent`s in and drain the
//! `NotificationQueue` resource once per frame.
//!
//! Hosts that don't run a Bevy schedule can own a [`sim::FarmSim`] and call
//! `advance`/`context().apply_action(..)` directly.

pub mod shared;
pub mod error;
pub mod calendar;
pub mod farming;
pub mod animals;
pub mod world;
pub mod economy;
pub mod save;
pub mod data;
pub mod sim;
