//! Weather controller: interval-based uniform resampling and the crop growth
//! multiplier each kind implies.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Growth-unit scale for crops grown outdoors under `kind`.
pub fn growth_multiplier(kind: WeatherKind) -> f32 {
    match kind {
        WeatherKind::Rainy => 1.5,
        WeatherKind::Snowy => 0.5,
        WeatherKind::Sunny | WeatherKind::Stormy | WeatherKind::Cloudy => 1.0,
    }
}

/// Uniform pick among all five kinds. The result may equal the current
/// weather; repeats are not excluded.
pub fn roll_weather<R: Rng + ?Sized>(rng: &mut R) -> WeatherKind {
    WeatherKind::ALL[rng.gen_range(0..WeatherKind::ALL.len())]
}

impl WeatherState {
    pub fn growth_multiplier(&self) -> f32 {
        growth_multiplier(self.current)
    }

    /// Advance the change timer. Each full interval resamples the weather.
    /// Returns the new kind only if the final sample differs from what was
    /// current before the call.
    pub fn tick<R: Rng + ?Sized>(&mut self, delta_seconds: f32, rng: &mut R) -> Option<WeatherKind> {
        if delta_seconds > 0.0 {
            self.seconds_since_change += delta_seconds;
        }
        if self.change_interval_seconds <= 0.0 {
            return None;
        }

        let before = self.current;
        while self.seconds_since_change >= self.change_interval_seconds {
            self.seconds_since_change -= self.change_interval_seconds;
            self.current = roll_weather(rng);
            debug!("[Calendar] Weather resampled: {:?}", self.current);
        }

        (self.current != before).then_some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_growth_multiplier_all_kinds() {
        for kind in WeatherKind::ALL {
            let expected = match kind {
                WeatherKind::Rainy => 1.5,
                WeatherKind::Snowy => 0.5,
                _ => 1.0,
            };
            assert_eq!(growth_multiplier(kind), expected, "{:?}", kind);
        }
    }

    #[test]
    fn test_roll_weather_distribution() {
        // Loose bounds: uniform over five kinds ≈ 2000 each.
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0u32; 5];
        for _ in 0..10_000 {
            let kind = roll_weather(&mut rng);
            let idx = WeatherKind::ALL.iter().position(|k| *k == kind).unwrap();
            counts[idx] += 1;
        }
        for (kind, count) in WeatherKind::ALL.iter().zip(counts) {
            assert!(count > 1500 && count < 2500, "{:?} rolled {} times", kind, count);
        }
    }

    #[test]
    fn test_roll_weather_can_repeat() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut prev = roll_weather(&mut rng);
        let mut repeats = 0;
        for _ in 0..1000 {
            let next = roll_weather(&mut rng);
            if next == prev {
                repeats += 1;
            }
            prev = next;
        }
        assert!(repeats > 0, "uniform sampling must allow repeats");
    }

    #[test]
    fn test_tick_before_interval_keeps_weather() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut weather = WeatherState::default();
        assert_eq!(weather.tick(299.0, &mut rng), None);
        assert_eq!(weather.current, WeatherKind::Sunny);
        assert!((weather.seconds_since_change - 299.0).abs() < 1e-4);
    }

    #[test]
    fn test_tick_resets_timer_at_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut weather = WeatherState::default();
        weather.tick(310.0, &mut rng);
        assert!((weather.seconds_since_change - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_tick_reports_only_real_changes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut weather = WeatherState {
            change_interval_seconds: 1.0,
            ..Default::default()
        };
        for _ in 0..200 {
            let before = weather.current;
            match weather.tick(1.0, &mut rng) {
                Some(kind) => {
                    assert_ne!(kind, before);
                    assert_eq!(kind, weather.current);
                }
                None => assert_eq!(weather.current, before),
            }
        }
    }

    #[test]
    fn test_seeded_sequences_match() {
        let mut a = WeatherRng::seeded(99);
        let mut b = WeatherRng::seeded(99);
        let seq_a: Vec<_> = (0..20).map(|_| roll_weather(&mut a.0)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| roll_weather(&mut b.0)).collect();
        assert_eq!(seq_a, seq_b);
    }
}
