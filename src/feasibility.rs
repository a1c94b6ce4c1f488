//! Feasibility oracle for type-threshold room requests.
//!
//! A guest requesting type `t` can use any room of type `>= t`, so the
//! compatible room sets are nested. By Hall's theorem a complete
//! assignment exists iff, for every tier `t`, the rooms of type `>= t`
//! are at least as many as the requests of type `>= t`. A tier where the
//! two counts are equal has no slack: one more request at that tier or
//! above would break feasibility.
//!
//! Both functions take the per-type frequency maps and run one linear
//! pass over tiers `1..=max_type`.

use std::collections::BTreeMap;

/// Whether the rooms described by `rooms` can serve every request in `requests`.
pub fn is_feasible(rooms: &BTreeMap<u32, usize>, requests: &BTreeMap<u32, usize>) -> bool {
    max_feasible_type_request(rooms, requests) >= 0
}

/// Largest type `t*` such that one more guest requesting any type up to
/// `t*` could still be served.
///
/// Returns `-1` when the current requests are already infeasible and `0`
/// when no further guest fits.
pub fn max_feasible_type_request(
    rooms: &BTreeMap<u32, usize>,
    requests: &BTreeMap<u32, usize>,
) -> i64 {
    let max_type = rooms
        .keys()
        .chain(requests.keys())
        .copied()
        .max()
        .unwrap_or(0);

    // Counts of type >= tier, starting at tier 1.
    let mut available: usize = rooms.values().sum();
    let mut demanded: usize = requests.values().sum();
    let mut tightest: Option<u32> = None;

    for tier in 1..=max_type {
        if available < demanded {
            return -1;
        }
        if available == demanded && tightest.is_none() {
            tightest = Some(tier);
        }
        available -= rooms.get(&tier).copied().unwrap_or(0);
        demanded -= requests.get(&tier).copied().unwrap_or(0);
    }

    match tightest {
        Some(tier) => i64::from(tier) - 1,
        None => i64::from(max_type),
    }
}
