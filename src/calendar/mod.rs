//! Calendar domain — the heartbeat of the farm.
//!
//! Responsible for:
//! - Advancing the continuous day/night clock and counting days
//! - Rolling weather on a fixed interval (see `weather`)
//!
//! Neither the clock nor the weather reads `Time` directly. The orchestrator
//! in `crate::sim` feeds them fixed simulated steps, so everything here is a
//! plain state advance that tests can drive with literal deltas.

pub mod weather;

use bevy::prelude::*;

use crate::shared::*;

pub use weather::{growth_multiplier, roll_weather};

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayNightClock>()
            .init_resource::<WeatherState>()
            .init_resource::<WeatherRng>()
            .add_event::<NewDayEvent>()
            .add_event::<WeatherChangedEvent>()
            .add_systems(Update, log_new_days);

        info!("[Calendar] CalendarPlugin registered.");
    }
}

// ─── Clock ────────────────────────────────────────────────────────────────────

impl DayNightClock {
    /// Advance the clock by `delta_seconds` of simulated time.
    ///
    /// Returns the number of every day that started during this call, in
    /// order. A delta spanning several day lengths yields several entries.
    pub fn advance(&mut self, delta_seconds: f32) -> Vec<u32> {
        let mut new_days = Vec::new();
        if delta_seconds > 0.0 {
            self.elapsed_seconds += delta_seconds;
        }

        // A non-positive day length would never let the accumulator drain.
        if self.day_length_seconds > 0.0 {
            while self.elapsed_seconds >= self.day_length_seconds {
                self.elapsed_seconds -= self.day_length_seconds;
                self.day += 1;
                new_days.push(self.day);
            }
        }

        self.is_night = self.time_of_day_fraction() > self.night_threshold;
        new_days
    }

    /// Seconds into the current day, for snapshots.
    pub fn time_of_day_seconds(&self) -> f32 {
        self.elapsed_seconds
    }

    /// Jump to a given day and time-of-day (snapshot restore).
    pub fn set(&mut self, day: u32, time_of_day_seconds: f32) {
        self.day = day.max(1);
        self.elapsed_seconds = if self.day_length_seconds > 0.0 {
            time_of_day_seconds.clamp(0.0, self.day_length_seconds) % self.day_length_seconds
        } else {
            0.0
        };
        self.is_night = self.time_of_day_fraction() > self.night_threshold;
    }
}

fn log_new_days(mut events: EventReader<NewDayEvent>, weather: Res<WeatherState>) {
    for event in events.read() {
        info!(
            "[Calendar] Day {} begins. Weather: {:?}",
            event.day, weather.current
        );
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
