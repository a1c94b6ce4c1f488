//! Random instance generator.
//!
//! Generates random but always feasible instances: every guest is paired
//! with a distinct room and requests a type no higher than that room's,
//! so the identity pairing proves a complete assignment exists.
//!
//! All distribution parameters live in an explicit [`GeneratorConfig`].

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Guest, Hotel, Instance, Room};

/// Distribution parameters for [`generate`].
///
/// Ranges are inclusive `(min, max)` pairs. Missing JSON fields fall back
/// to [`GeneratorConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of rooms.
    pub rooms: usize,
    /// Number of guests; at most `rooms`.
    pub guests: usize,
    /// Number of housekeepers.
    pub crew_size: u32,
    /// Room types are drawn from `1..=max_type`.
    pub max_type: u32,
    /// Room release time range.
    pub release_range: (i64, i64),
    /// Cleaning duration range.
    pub process_range: (i64, i64),
    /// Guest arrival time range.
    pub arrival_range: (i64, i64),
    /// Share of each weight drawn uniformly instead of from room quality.
    pub weight_noise: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rooms: 20,
            guests: 15,
            crew_size: 3,
            max_type: 3,
            release_range: (0, 8),
            process_range: (1, 4),
            arrival_range: (0, 16),
            weight_noise: 0.2,
        }
    }
}

impl GeneratorConfig {
    /// Small hotel, one housekeeper.
    pub fn small() -> Self {
        Self {
            rooms: 6,
            guests: 4,
            crew_size: 1,
            max_type: 2,
            ..Self::default()
        }
    }

    /// Large hotel with a tight room supply.
    pub fn large() -> Self {
        Self {
            rooms: 200,
            guests: 190,
            crew_size: 12,
            max_type: 5,
            release_range: (0, 40),
            process_range: (1, 6),
            arrival_range: (0, 60),
            weight_noise: 0.3,
        }
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_rooms(mut self, rooms: usize) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn with_guests(mut self, guests: usize) -> Self {
        self.guests = guests;
        self
    }

    pub fn with_crew_size(mut self, crew_size: u32) -> Self {
        self.crew_size = crew_size;
        self
    }

    pub fn with_max_type(mut self, max_type: u32) -> Self {
        self.max_type = max_type;
        self
    }

    pub fn with_release_range(mut self, min: i64, max: i64) -> Self {
        self.release_range = (min, max);
        self
    }

    pub fn with_process_range(mut self, min: i64, max: i64) -> Self {
        self.process_range = (min, max);
        self
    }

    pub fn with_arrival_range(mut self, min: i64, max: i64) -> Self {
        self.arrival_range = (min, max);
        self
    }

    pub fn with_weight_noise(mut self, noise: f64) -> Self {
        self.weight_noise = noise;
        self
    }

    /// Checks that the parameters describe at least one valid instance.
    pub fn validate(&self) -> Result<()> {
        if self.rooms == 0 {
            return Err(Error::invalid("rooms", "must be at least 1"));
        }
        if self.guests == 0 || self.guests > self.rooms {
            return Err(Error::invalid(
                "guests",
                format!("must be in 1..={}, got {}", self.rooms, self.guests),
            ));
        }
        if u32::try_from(self.rooms).is_err() {
            return Err(Error::invalid("rooms", "too many rooms"));
        }
        if self.crew_size == 0 {
            return Err(Error::invalid("crew_size", "must be at least 1"));
        }
        if self.max_type == 0 {
            return Err(Error::invalid("max_type", "must be at least 1"));
        }
        check_range("release_range", self.release_range, 0)?;
        check_range("process_range", self.process_range, 1)?;
        check_range("arrival_range", self.arrival_range, 0)?;
        if !(0.0..=1.0).contains(&self.weight_noise) {
            return Err(Error::invalid(
                "weight_noise",
                format!("must be in [0, 1], got {}", self.weight_noise),
            ));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, (min, max): (i64, i64), floor: i64) -> Result<()> {
    if min < floor || min > max {
        return Err(Error::invalid(
            field,
            format!("expected {floor} <= min <= max, got ({min}, {max})"),
        ));
    }
    Ok(())
}

/// Draws one instance from `config`.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Instance> {
    config.validate()?;

    let mut rooms = Vec::with_capacity(config.rooms);
    for number in 1..=config.rooms as u32 {
        let room = Room::new(
            number,
            rng.random_range(1..=config.max_type),
            rng.random_range(config.release_range.0..=config.release_range.1),
            rng.random_range(config.process_range.0..=config.process_range.1),
        )?
        .with_quality(rng.random::<f64>())?;
        rooms.push(room);
    }

    // Each guest shadows a distinct room.
    let mut shadow: Vec<usize> = (0..rooms.len()).collect();
    shadow.shuffle(rng);

    let mut guests = Vec::with_capacity(config.guests);
    for (i, &ri) in shadow.iter().take(config.guests).enumerate() {
        guests.push(Guest::new(
            i as u32 + 1,
            rng.random_range(1..=rooms[ri].room_type()),
            rng.random_range(config.arrival_range.0..=config.arrival_range.1),
        )?);
    }

    let mut weights = Vec::new();
    for guest in &guests {
        for room in rooms.iter().filter(|r| r.serves(guest.guest_type())) {
            let noise = rng.random::<f64>();
            let w = (1.0 - config.weight_noise) * room.quality() + config.weight_noise * noise;
            weights.push((guest.id(), room.number(), w.clamp(0.0, 1.0)));
        }
    }

    let hotel = Hotel::builder(config.crew_size).with_rooms(rooms)?.build()?;
    let mut builder = Instance::builder(hotel).with_guests(guests)?;
    for (guest, room, w) in weights {
        builder.set_weight(guest, room, w)?;
    }
    let instance = builder.build()?;

    debug!(
        rooms = instance.rooms().len(),
        guests = instance.guests().len(),
        slack = instance.max_feasible_type_request(),
        "generated instance"
    );
    Ok(instance)
}

/// Seeded generator producing a reproducible stream of instances.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: SmallRng,
}

impl InstanceGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Draws the next instance.
    pub fn generate(&mut self) -> Result<Instance> {
        generate(&self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
        assert!(GeneratorConfig::small().validate().is_ok());
        assert!(GeneratorConfig::large().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let base = GeneratorConfig::default();
        let bad = [
            base.clone().with_rooms(0),
            base.clone().with_rooms(5).with_guests(6),
            base.clone().with_crew_size(0),
            base.clone().with_max_type(0),
            base.clone().with_process_range(0, 3),
            base.clone().with_release_range(5, 2),
            base.clone().with_arrival_range(-1, 2),
            base.with_weight_noise(1.5),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidArgument { .. })),
                "{config:?}"
            );
        }
    }

    #[test]
    fn test_from_json_partial() {
        let config = GeneratorConfig::from_json(r#"{"rooms": 8, "guests": 8, "crew_size": 2}"#)
            .unwrap();
        assert_eq!(config.rooms, 8);
        assert_eq!(config.guests, 8);
        assert_eq!(config.crew_size, 2);
        assert_eq!(config.max_type, GeneratorConfig::default().max_type);

        assert!(GeneratorConfig::from_json(r#"{"rooms": 2, "guests": 3}"#).is_err());
        assert!(matches!(
            GeneratorConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_generated_instances_feasible() {
        let mut generator = InstanceGenerator::new(GeneratorConfig::default(), 42).unwrap();
        for _ in 0..50 {
            let inst = generator.generate().unwrap();
            assert_eq!(inst.rooms().len(), 20);
            assert_eq!(inst.guests().len(), 15);
            assert_eq!(inst.crew_size(), 3);
            assert!(inst.is_feasible());
            assert!(inst.max_feasible_type_request() >= 0);

            for guest in inst.guests() {
                for room in inst.rooms() {
                    let w = inst.weight(guest.id(), room.number());
                    assert!((0.0..=1.0).contains(&w));
                    if !room.serves(guest.guest_type()) {
                        assert_eq!(w, 0.0);
                    }
                }
            }
            for room in inst.rooms() {
                assert!((0..=8).contains(&room.release()));
                assert!((1..=4).contains(&room.process()));
            }
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let config = GeneratorConfig::small();
        let a = InstanceGenerator::new(config.clone(), 9).unwrap().generate().unwrap();
        let b = InstanceGenerator::new(config, 9).unwrap().generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_rooms_taken() {
        let config = GeneratorConfig::default().with_rooms(10).with_guests(10);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..20 {
            let inst = generate(&config, &mut rng).unwrap();
            assert!(inst.is_feasible());
        }
    }
}
