//! Batch validation of raw instance data.
//!
//! The builders stop at the first problem. [`validate_input`] instead
//! collects every problem in one pass, which is what loaders want when
//! reporting a bad data set. Detects:
//! - Duplicate room numbers and guest ids
//! - Weights referencing unknown guests or rooms, or outside `[0, 1]`
//! - Empty room or guest lists, empty crew
//!
//! Feasibility is not checked: an over-booked instance is valid data, and
//! [`Instance::is_feasible`](crate::models::Instance::is_feasible) reports it.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Guest, Room};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same identifier.
    DuplicateId,
    /// A weight references a guest or room that doesn't exist.
    UnknownReference,
    /// A value lies outside its allowed range.
    OutOfRange,
    /// A required collection is empty.
    Empty,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates the data of one instance.
///
/// `weights` holds `(guest, room, weight)` triples. Rooms and guests are
/// individually valid by construction, so only cross-entity checks run.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    rooms: &[Room],
    guests: &[Guest],
    weights: &[(u32, u32, f64)],
    crew_size: u32,
) -> ValidationResult {
    let mut errors = Vec::new();

    if crew_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::Empty,
            "Crew size must be at least 1",
        ));
    }
    if rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::Empty,
            "Hotel has no rooms",
        ));
    }
    if guests.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::Empty,
            "Instance has no guests",
        ));
    }

    let mut room_numbers = HashSet::new();
    for room in rooms {
        if !room_numbers.insert(room.number()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room number: {}", room.number()),
            ));
        }
    }

    let mut guest_ids = HashSet::new();
    for guest in guests {
        if !guest_ids.insert(guest.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate guest ID: {}", guest.id()),
            ));
        }
    }

    for &(guest, room, weight) in weights {
        if !guest_ids.contains(&guest) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Weight references unknown guest {guest}"),
            ));
        }
        if !room_numbers.contains(&room) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownReference,
                format!("Weight references unknown room {room}"),
            ));
        }
        if !(0.0..=1.0).contains(&weight) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("Weight of guest {guest} for room {room} is {weight}, expected [0, 1]"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms(data: &[(u32, u32)]) -> Vec<Room> {
        data.iter()
            .map(|&(n, t)| Room::new(n, t, 0, 1).unwrap())
            .collect()
    }

    fn guests(data: &[(u32, u32)]) -> Vec<Guest> {
        data.iter()
            .map(|&(id, t)| Guest::new(id, t, 0).unwrap())
            .collect()
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let result = validate_input(
            &rooms(&[(1, 1), (2, 2)]),
            &guests(&[(1, 2), (2, 1)]),
            &[(1, 2, 0.5), (2, 1, 1.0)],
            1,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let result = validate_input(
            &rooms(&[(1, 1), (1, 2), (2, 2)]),
            &guests(&[(4, 1), (4, 1)]),
            &[],
            1,
        );
        let kinds = kinds(result);
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == ValidationErrorKind::DuplicateId)
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_collections() {
        let kinds = kinds(validate_input(&[], &[], &[], 0));
        assert_eq!(kinds, vec![ValidationErrorKind::Empty; 3]);
    }

    #[test]
    fn test_bad_weights_collected() {
        let errors = validate_input(
            &rooms(&[(1, 1)]),
            &guests(&[(1, 1)]),
            &[(9, 1, 0.5), (1, 8, 0.5), (1, 1, 1.5)],
            2,
        )
        .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownReference);
        assert!(errors[0].message.contains("guest 9"));
        assert!(errors[1].message.contains("room 8"));
        assert_eq!(errors[2].kind, ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn test_short_supply_is_valid_data() {
        // Two type-2 requests, one room of type >= 2.
        let result = validate_input(
            &rooms(&[(1, 1), (2, 3)]),
            &guests(&[(1, 2), (2, 2)]),
            &[],
            1,
        );
        assert!(result.is_ok());
    }
}
