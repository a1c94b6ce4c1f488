//! Greedy room-assignment strategies.
//!
//! All strategies visit guests by ascending arrival (ties keep guest-id
//! order) and give each guest a room of their current minimum feasible
//! type ([`Assignment::min_type`]), escalating to the next type tier when
//! a tier is exhausted. They differ only in which room of that tier is
//! taken.
//!
//! | Strategy | Room choice within the tier |
//! |----------|----------------------------|
//! | Linear | Lowest room number |
//! | BestFirst | Highest quality |
//! | WorstFirst | Lowest quality |
//! | Lexicographic | Highest guest-specific weight |

use std::sync::Arc;

use tracing::{debug, trace};

use super::{require_feasible, AssignmentHeuristic};
use crate::error::{Error, Result};
use crate::models::{Assignment, Guest, Instance, Room};

/// Cheapest compatible room, ignoring satisfaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl AssignmentHeuristic for Linear {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn assign(&self, instance: &Arc<Instance>) -> Result<Assignment> {
        require_feasible(instance, self.name())?;
        let mut rooms: Vec<&Room> = instance.rooms().iter().collect();
        rooms.sort_by_key(|r| r.room_type());
        assign_in_room_order(instance, &rooms, self.name())
    }

    fn description(&self) -> &'static str {
        "Lowest-numbered room of the minimum feasible type"
    }
}

/// Best-quality room of the minimum feasible type.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFirst;

impl AssignmentHeuristic for BestFirst {
    fn name(&self) -> &'static str {
        "BestFirst"
    }

    fn assign(&self, instance: &Arc<Instance>) -> Result<Assignment> {
        require_feasible(instance, self.name())?;
        let mut rooms: Vec<&Room> = instance.rooms().iter().collect();
        rooms.sort_by(|a, b| b.quality().total_cmp(&a.quality()));
        assign_in_room_order(instance, &rooms, self.name())
    }

    fn description(&self) -> &'static str {
        "Highest-quality room of the minimum feasible type"
    }
}

/// Worst-quality room of the minimum feasible type.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstFirst;

impl AssignmentHeuristic for WorstFirst {
    fn name(&self) -> &'static str {
        "WorstFirst"
    }

    fn assign(&self, instance: &Arc<Instance>) -> Result<Assignment> {
        require_feasible(instance, self.name())?;
        let mut rooms: Vec<&Room> = instance.rooms().iter().collect();
        rooms.sort_by(|a, b| a.quality().total_cmp(&b.quality()));
        assign_in_room_order(instance, &rooms, self.name())
    }

    fn description(&self) -> &'static str {
        "Lowest-quality room of the minimum feasible type"
    }
}

/// Highest-satisfaction room, searched tier by tier from the requested type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lexicographic;

impl AssignmentHeuristic for Lexicographic {
    fn name(&self) -> &'static str {
        "Lexicographic"
    }

    fn assign(&self, instance: &Arc<Instance>) -> Result<Assignment> {
        require_feasible(instance, self.name())?;
        debug!(heuristic = self.name(), guests = instance.guests().len(), "assigning rooms");

        let mut assignment = Assignment::new(Arc::clone(instance));
        let max_type = instance.max_type();

        for guest in guests_by_arrival(instance) {
            let mut rooms: Vec<&Room> = instance.rooms().iter().collect();
            rooms.sort_by(|a, b| {
                instance
                    .weight(guest.id(), b.number())
                    .total_cmp(&instance.weight(guest.id(), a.number()))
            });

            let mut tier = guest.guest_type();
            let room = loop {
                if tier > max_type {
                    return Err(Error::Infeasible);
                }
                let open = rooms
                    .iter()
                    .find(|r| r.room_type() == tier && assignment.is_room_open(r.number()));
                match open {
                    Some(r) => break r.number(),
                    None => tier += 1,
                }
            };

            assignment.assign(guest.id(), room)?;
            trace!(guest = guest.id(), room, "assigned");
        }

        log_result(self.name(), &assignment);
        Ok(assignment)
    }

    fn description(&self) -> &'static str {
        "Highest-weight room of the lowest open tier"
    }
}

/// Guests sorted by arrival; stable, so ties keep id order.
fn guests_by_arrival(instance: &Instance) -> Vec<&Guest> {
    let mut guests: Vec<&Guest> = instance.guests().iter().collect();
    guests.sort_by_key(|g| g.arrival());
    guests
}

/// Gives each guest the first open room in `rooms` whose type equals the
/// guest's minimum feasible type.
fn assign_in_room_order(
    instance: &Arc<Instance>,
    rooms: &[&Room],
    heuristic: &'static str,
) -> Result<Assignment> {
    debug!(heuristic, guests = instance.guests().len(), "assigning rooms");
    let mut assignment = Assignment::new(Arc::clone(instance));

    for guest in guests_by_arrival(instance) {
        let target = assignment.min_type(guest.id()).ok_or(Error::Infeasible)?;
        let room = rooms
            .iter()
            .find(|r| r.room_type() == target && assignment.is_room_open(r.number()))
            .map(|r| r.number())
            .ok_or(Error::Infeasible)?;

        assignment.assign(guest.id(), room)?;
        trace!(guest = guest.id(), room, target, "assigned");
    }

    log_result(heuristic, &assignment);
    Ok(assignment)
}

fn log_result(heuristic: &'static str, assignment: &Assignment) {
    let satisfaction = assignment.satisfaction();
    let upgrades = assignment.upgrades();
    debug!(
        heuristic,
        assigned = assignment.assigned_count(),
        satisfaction = satisfaction.sum,
        upgrades = upgrades.sum,
        "assignment complete"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::assignment_heuristics;
    use crate::models::Hotel;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Rooms `(number, type, quality)`, guests `(id, type, arrival)`.
    fn instance(
        rooms: &[(u32, u32, f64)],
        guests: &[(u32, u32, i64)],
        weights: &[(u32, u32, f64)],
    ) -> Arc<Instance> {
        let hotel = Hotel::builder(1)
            .with_rooms(
                rooms
                    .iter()
                    .map(|&(n, t, q)| Room::new(n, t, 0, 1).unwrap().with_quality(q).unwrap()),
            )
            .unwrap()
            .build()
            .unwrap();
        let mut builder = Instance::builder(hotel)
            .with_guests(
                guests
                    .iter()
                    .map(|&(id, t, a)| Guest::new(id, t, a).unwrap()),
            )
            .unwrap();
        for &(g, r, w) in weights {
            builder.set_weight(g, r, w).unwrap();
        }
        Arc::new(builder.build().unwrap())
    }

    #[test]
    fn test_linear_takes_cheapest_room() {
        let inst = instance(
            &[(1, 3, 0.9), (2, 1, 0.1), (3, 2, 0.5), (4, 1, 0.7)],
            &[(1, 1, 5), (2, 1, 1), (3, 1, 3)],
            &[],
        );
        let a = Linear.assign(&inst).unwrap();
        // Arrival order: guest 2, guest 3, guest 1.
        assert_eq!(a.room_of(2), Some(2));
        assert_eq!(a.room_of(3), Some(4));
        // Type 1 exhausted: forced upgrade to type 2.
        assert_eq!(a.room_of(1), Some(3));
        assert!((a.upgrades().sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_and_worst_first() {
        let inst = instance(
            &[(1, 1, 0.2), (2, 1, 0.9), (3, 1, 0.5), (4, 2, 1.0)],
            &[(1, 1, 0), (2, 1, 1)],
            &[],
        );
        let best = BestFirst.assign(&inst).unwrap();
        assert_eq!(best.room_of(1), Some(2));
        assert_eq!(best.room_of(2), Some(3));

        let worst = WorstFirst.assign(&inst).unwrap();
        assert_eq!(worst.room_of(1), Some(1));
        assert_eq!(worst.room_of(2), Some(3));
    }

    #[test]
    fn test_lexicographic_prefers_weight_within_tier() {
        let inst = instance(
            &[(1, 1, 0.0), (2, 1, 0.0), (3, 2, 0.0)],
            &[(1, 1, 0), (2, 1, 1), (3, 1, 2)],
            &[(1, 2, 0.8), (1, 3, 1.0), (2, 1, 0.3), (2, 3, 0.9)],
        );
        let a = Lexicographic.assign(&inst).unwrap();
        // Guest 1 stays in tier 1 even though room 3 weighs more.
        assert_eq!(a.room_of(1), Some(2));
        assert_eq!(a.room_of(2), Some(1));
        // Tier 1 exhausted, guest 3 escalates.
        assert_eq!(a.room_of(3), Some(3));
        assert!((a.satisfaction().sum - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_input_not_mutated_and_deterministic() {
        let inst = instance(
            &[(1, 1, 0.3), (2, 2, 0.6), (3, 2, 0.6)],
            &[(1, 1, 0), (2, 2, 0)],
            &[(1, 3, 0.5)],
        );
        let copy = (*inst).clone();
        for h in assignment_heuristics() {
            let first = h.assign(&inst).unwrap().matching();
            let second = h.assign(&inst).unwrap().matching();
            assert_eq!(first, second, "{}", h.name());
        }
        assert_eq!(*inst, copy);
    }

    #[test]
    fn test_random_feasible_instances_fully_assigned() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..200 {
            let n_rooms = rng.random_range(1..=10u32);
            let rooms: Vec<(u32, u32, f64)> = (1..=n_rooms)
                .map(|n| (n, rng.random_range(1..=4), rng.random_range(0.0..=1.0)))
                .collect();
            // Each guest requests at most the type of a distinct room.
            let n_guests = rng.random_range(1..=n_rooms);
            let guests: Vec<(u32, u32, i64)> = (1..=n_guests)
                .map(|id| {
                    let cap = rooms[(id - 1) as usize].1;
                    (id, rng.random_range(1..=cap), rng.random_range(0..20))
                })
                .collect();
            let weights: Vec<(u32, u32, f64)> = guests
                .iter()
                .flat_map(|&(g, _, _)| rooms.iter().map(move |&(r, _, _)| (g, r)))
                .map(|(g, r)| (g, r, rng.random_range(0.0..=1.0)))
                .collect();
            let inst = instance(&rooms, &guests, &weights);
            assert!(inst.is_feasible());

            for h in assignment_heuristics() {
                let a = h.assign(&inst).unwrap();
                assert!(a.is_complete(), "{} left guests unassigned", h.name());
                assert!(a.satisfaction().approx_eq(&a.recompute_satisfaction(), 1e-9));
                assert!(a.upgrades().approx_eq(&a.recompute_upgrades(), 1e-9));
            }
        }
    }
}
