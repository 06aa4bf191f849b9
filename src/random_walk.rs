//! A stand-in for the sensor board: the box wanders around on its own.

use crate::telemetry_record::{TelemetryRecord, Value};
use crate::telemetry_source::TelemetrySource;

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Produces `Xval`, `Yval`, `Zval` records on a fixed period.
///
/// X and Y take a random step of up to `step` in either direction each
/// period, and are never pulled back, so the box can drift off the canvas.
/// Z is drawn fresh every period from `-depth..=depth`.
#[derive(Debug)]
pub struct RandomWalk {
    rng: StdRng,
    x: i64,
    y: i64,
    step: i64,
    depth: i64,
    period: Duration,
    last_step: Option<Instant>,
    running: bool,
}

/// Builds a [`RandomWalk`].
#[derive(Debug, Clone)]
pub struct RandomWalkBuilder {
    seed: Option<u64>,
    step: i64,
    depth: i64,
    period: Duration,
}

impl Default for RandomWalkBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            step: 20,
            depth: 10,
            period: Duration::from_millis(500),
        }
    }
}

impl RandomWalkBuilder {
    /// Makes the walk repeatable.
    pub fn seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Largest X/Y move per period.
    pub fn step(self, step: u32) -> Self {
        Self {
            step: step as i64,
            ..self
        }
    }

    /// Largest Z magnitude.
    pub fn depth(self, depth: u32) -> Self {
        Self {
            depth: depth as i64,
            ..self
        }
    }

    /// Time between moves.
    pub fn period(self, period: Duration) -> Self {
        Self { period, ..self }
    }

    pub fn build(self) -> RandomWalk {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomWalk {
            rng,
            x: 0,
            y: 0,
            step: self.step,
            depth: self.depth,
            period: self.period,
            last_step: None,
            running: true,
        }
    }
}

impl RandomWalk {
    pub fn builder() -> RandomWalkBuilder {
        RandomWalkBuilder::default()
    }

    /// Moves once and reports the new position.
    pub fn step(&mut self) -> TelemetryRecord {
        self.x += self.rng.gen_range(-self.step..=self.step);
        self.y += self.rng.gen_range(-self.step..=self.step);
        let z = self.rng.gen_range(-self.depth..=self.depth);

        [
            ("Xval", Value::Integer(self.x)),
            ("Yval", Value::Integer(self.y)),
            ("Zval", Value::Integer(z)),
        ]
        .into_iter()
        .collect()
    }

    /// Moves if a full period has passed since the last move at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<TelemetryRecord> {
        if !self.running {
            return None;
        }
        let due = self
            .last_step
            .map_or(true, |last| now.duration_since(last) >= self.period);
        if !due {
            return None;
        }
        self.last_step = Some(now);
        Some(self.step())
    }
}

impl TelemetrySource for RandomWalk {
    fn next_record(&mut self) -> Option<TelemetryRecord> {
        self.poll(Instant::now())
    }

    fn is_active(&self) -> bool {
        self.running
    }

    fn status(&self) -> Option<&str> {
        Some(if self.running {
            "Demo mode: random walk"
        } else {
            "Demo stopped"
        })
    }

    fn reconnect(&mut self) -> bool {
        self.running = true;
        true
    }

    fn stop(&mut self) {
        if self.running {
            info!("Random walk stopped at ({}, {})", self.x, self.y);
        }
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(record: &TelemetryRecord) -> (i64, i64, i64) {
        let get = |name: &str| match record.get(name) {
            Some(Value::Integer(v)) => v,
            other => panic!("{} should be an integer, got {:?}", name, other),
        };
        (get("Xval"), get("Yval"), get("Zval"))
    }

    #[test]
    fn steps_stay_in_range() {
        let mut walk = RandomWalk::builder().seed(1).build();
        let mut last = (0, 0);
        for _ in 0..1000 {
            let (x, y, z) = coords(&walk.step());
            assert!((x - last.0).abs() <= 20);
            assert!((y - last.1).abs() <= 20);
            assert!((-10..=10).contains(&z));
            last = (x, y);
        }
    }

    #[test]
    fn same_seed_same_walk() {
        let mut a = RandomWalk::builder().seed(42).step(5).depth(3).build();
        let mut b = RandomWalk::builder().seed(42).step(5).depth(3).build();
        for _ in 0..50 {
            assert_eq!(a.step(), b.step());
        }
    }

    #[test]
    fn moves_once_per_period() {
        let mut walk = RandomWalk::builder()
            .seed(7)
            .period(Duration::from_millis(500))
            .build();
        let start = Instant::now();

        assert!(walk.poll(start).is_some());
        assert!(walk.poll(start + Duration::from_millis(499)).is_none());
        assert!(walk.poll(start + Duration::from_millis(500)).is_some());
    }

    #[test]
    fn stopped_walk_is_quiet() {
        let mut walk = RandomWalk::builder().seed(3).build();
        walk.stop();
        assert!(!walk.is_active());
        assert!(walk.poll(Instant::now()).is_none());
    }

    #[test]
    fn records_feed_the_projection() {
        use crate::display_sink::BoxProjection;

        let mut walk = RandomWalk::builder().seed(9).build();
        let record = walk.step();
        let (x, y, z) = coords(&record);

        let mut projection = BoxProjection::default();
        projection.apply(&record);
        let glyph = projection.glyph();
        assert_eq!(glyph.x, 200.0 + x as f64);
        assert_eq!(glyph.y, 200.0 - y as f64);
        assert_eq!(glyph.size, 50.0 - z as f64);
    }
}
