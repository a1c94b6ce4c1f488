//! Room model.
//!
//! A room has a numeric type tier: a room of type `t` serves any guest
//! requesting type `t` or lower. Rooms become cleanable at their release
//! time (the previous guest's checkout) and take `process` time units to
//! clean.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A hotel room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomFields")]
pub struct Room {
    number: u32,
    room_type: u32,
    quality: f64,
    release: i64,
    process: i64,
}

impl Room {
    /// Creates a room with quality `0.0`.
    ///
    /// # Errors
    /// `number` and `room_type` must be at least 1, `release` non-negative
    /// and `process` at least 1.
    pub fn new(number: u32, room_type: u32, release: i64, process: i64) -> Result<Self> {
        if number < 1 {
            return Err(Error::invalid("room number", "must be at least 1"));
        }
        if room_type < 1 {
            return Err(Error::invalid(
                "room type",
                format!("room {number}: must be at least 1"),
            ));
        }
        if release < 0 {
            return Err(Error::invalid(
                "release",
                format!("room {number}: {release} is negative"),
            ));
        }
        if process < 1 {
            return Err(Error::invalid(
                "process",
                format!("room {number}: {process} is below 1"),
            ));
        }
        Ok(Self {
            number,
            room_type,
            quality: 0.0,
            release,
            process,
        })
    }

    /// Sets the quality score.
    ///
    /// # Errors
    /// `quality` must lie in `[0, 1]`.
    pub fn with_quality(mut self, quality: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&quality) {
            return Err(Error::invalid(
                "quality",
                format!("room {}: {quality} is outside [0, 1]", self.number),
            ));
        }
        self.quality = quality;
        Ok(self)
    }

    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[inline]
    pub fn room_type(&self) -> u32 {
        self.room_type
    }

    #[inline]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Earliest time after which cleaning may start.
    #[inline]
    pub fn release(&self) -> i64 {
        self.release
    }

    /// Cleaning duration.
    #[inline]
    pub fn process(&self) -> i64 {
        self.process
    }

    /// Last time unit of a cleaning that starts at `start`.
    #[inline]
    pub fn completion_from(&self, start: i64) -> i64 {
        start + self.process - 1
    }

    /// Whether this room can serve a request for `requested_type`.
    #[inline]
    pub fn serves(&self, requested_type: u32) -> bool {
        self.room_type >= requested_type
    }
}

#[derive(Deserialize)]
struct RoomFields {
    number: u32,
    room_type: u32,
    #[serde(default)]
    quality: f64,
    release: i64,
    process: i64,
}

impl TryFrom<RoomFields> for Room {
    type Error = Error;

    fn try_from(f: RoomFields) -> Result<Self> {
        Room::new(f.number, f.room_type, f.release, f.process)?.with_quality(f.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_new() {
        let r = Room::new(101, 2, 5, 3).unwrap().with_quality(0.75).unwrap();
        assert_eq!(r.number(), 101);
        assert_eq!(r.room_type(), 2);
        assert_eq!(r.release(), 5);
        assert_eq!(r.process(), 3);
        assert!((r.quality() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_room_bounds() {
        assert!(Room::new(0, 1, 0, 1).is_err());
        assert!(Room::new(1, 0, 0, 1).is_err());
        assert!(Room::new(1, 1, -1, 1).is_err());
        assert!(Room::new(1, 1, 0, 0).is_err());
        assert!(Room::new(1, 1, 0, 1).unwrap().with_quality(1.5).is_err());
        assert!(Room::new(1, 1, 0, 1).unwrap().with_quality(-0.1).is_err());
    }

    #[test]
    fn test_default_quality() {
        let r = Room::new(1, 1, 0, 1).unwrap();
        assert_eq!(r.quality(), 0.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Room =
            serde_json::from_str(r#"{"number":3,"room_type":2,"release":0,"process":2}"#).unwrap();
        assert_eq!(ok.number(), 3);
        assert_eq!(ok.quality(), 0.0);

        let bad = serde_json::from_str::<Room>(
            r#"{"number":3,"room_type":2,"quality":2.0,"release":0,"process":2}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_completion_and_serves() {
        let r = Room::new(1, 3, 0, 4).unwrap();
        assert_eq!(r.completion_from(1), 4);
        assert!(r.serves(1));
        assert!(r.serves(3));
        assert!(!r.serves(4));
    }
}
