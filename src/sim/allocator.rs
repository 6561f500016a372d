//! Greedy slot filling from the waiting pool.

use std::cmp::Ordering;

use super::group::ChargingGroup;
use super::scoring::{can_dock, score};
use super::truck::{Truck, TruckId};

/// Fills every free slot with the best-scoring compatible waiting truck.
///
/// Groups are visited in slice order. Clean-only groups are skipped when
/// `clean_available` is `false`. Within a group, candidates are ranked by
/// [`score`] (descending, ties keep their waiting-pool order) and assigned
/// until the group is full or no compatible truck remains. Assigned handles
/// move from `waiting` into the group's docked set.
///
/// Returns the number of trucks docked by this call.
///
/// # Panics
///
/// Panics if a handle in `waiting` is not an index into `fleet`.
pub fn fill_groups(
    groups: &mut [ChargingGroup],
    fleet: &[Truck],
    waiting: &mut Vec<TruckId>,
    clean_available: bool,
) -> usize {
    let mut assigned = 0;

    for group in groups.iter_mut() {
        if group.is_clean_only() && !clean_available {
            continue;
        }
        let free = group.free_slots();
        if free == 0 || waiting.is_empty() {
            continue;
        }

        let mut ranked: Vec<(usize, f64)> = waiting
            .iter()
            .enumerate()
            .map(|(pos, id)| (pos, score(&fleet[id.index()], group)))
            .collect();
        // stable: equal scores keep waiting order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let picked: Vec<usize> = ranked
            .into_iter()
            .filter(|&(pos, _)| can_dock(&fleet[waiting[pos].index()], group))
            .take(free)
            .map(|(pos, _)| pos)
            .collect();

        for &pos in &picked {
            group.dock(waiting[pos]);
        }
        assigned += picked.len();

        let mut pos = 0;
        waiting.retain(|_| {
            let keep = !picked.contains(&pos);
            pos += 1;
            keep
        });
    }

    assigned
}
