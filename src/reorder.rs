//! Reorder Engine
//!
//! In-container operations over a dense, position-sorted container.
//! All three keep the container dense.

use crate::position::{index_of, is_dense, sort_by_position, Positioned};

/// Positions held by the two children before a swap.
/// These are the values the durable swap is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub position_a: i32,
    pub position_b: i32,
}

/// Exchange the positions of two children (a transposition).
///
/// Returns `None` when either child is absent or both are the same child;
/// the container is left untouched in that case.
pub fn swap<T: Positioned>(items: &mut Vec<T>, a: u32, b: u32) -> Option<SwapOutcome> {
    if a == b {
        return None;
    }
    let ia = index_of(items, a)?;
    let ib = index_of(items, b)?;

    let position_a = items[ia].position();
    let position_b = items[ib].position();
    items[ia].set_position(position_b);
    items[ib].set_position(position_a);
    sort_by_position(items);

    debug_assert!(is_dense(items), "swap broke container density");
    Some(SwapOutcome {
        position_a,
        position_b,
    })
}

/// Remove a child and pull every later sibling up by one.
pub fn remove<T: Positioned>(items: &mut Vec<T>, key: u32) -> Option<T> {
    let index = index_of(items, key)?;
    let removed = items.remove(index);
    let gap = removed.position();
    for item in items.iter_mut() {
        if item.position() > gap {
            item.set_position(item.position() - 1);
        }
    }

    debug_assert!(is_dense(items), "remove broke container density");
    Some(removed)
}

/// Splice a child in at `index`, clamped to `0..=len`.
/// Siblings at or after the index shift down by one. Returns the landing position.
pub fn insert_at<T: Positioned>(items: &mut Vec<T>, mut item: T, index: i32) -> i32 {
    let index = index.clamp(0, items.len() as i32);
    for sibling in items.iter_mut() {
        if sibling.position() >= index {
            sibling.set_position(sibling.position() + 1);
        }
    }
    item.set_position(index);
    items.push(item);
    sort_by_position(items);

    debug_assert!(is_dense(items), "insert broke container density");
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use pretty_assertions::assert_eq;

    fn make_tasks(ids: &[u32]) -> Vec<Task> {
        ids.iter()
            .enumerate()
            .map(|(position, &id)| Task {
                id,
                list_id: 1,
                name: format!("Task {}", id),
                completed: false,
                position: position as i32,
            })
            .collect()
    }

    fn order(tasks: &[Task]) -> Vec<(u32, i32)> {
        tasks.iter().map(|t| (t.id, t.position)).collect()
    }

    #[test]
    fn test_swap_is_a_transposition() {
        // A,B,C,D with A dropped onto C gives C,B,A,D (not a shift)
        let mut tasks = make_tasks(&[1, 2, 3, 4]);
        let outcome = swap(&mut tasks, 1, 3).unwrap();

        assert_eq!(outcome, SwapOutcome { position_a: 0, position_b: 2 });
        assert_eq!(order(&tasks), vec![(3, 0), (2, 1), (1, 2), (4, 3)]);
    }

    #[test]
    fn test_swap_twice_restores_order() {
        let mut tasks = make_tasks(&[1, 2, 3]);
        swap(&mut tasks, 2, 3).unwrap();
        swap(&mut tasks, 2, 3).unwrap();
        assert_eq!(tasks, make_tasks(&[1, 2, 3]));
    }

    #[test]
    fn test_swap_rejects_self_and_missing() {
        let mut tasks = make_tasks(&[1, 2]);
        assert_eq!(swap(&mut tasks, 1, 1), None);
        assert_eq!(swap(&mut tasks, 1, 42), None);
        assert_eq!(tasks, make_tasks(&[1, 2]));
    }

    #[test]
    fn test_remove_compacts() {
        let mut tasks = make_tasks(&[1, 2, 3, 4]);
        let removed = remove(&mut tasks, 2).unwrap();

        assert_eq!(removed.id, 2);
        assert_eq!(order(&tasks), vec![(1, 0), (3, 1), (4, 2)]);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut tasks = make_tasks(&[1]);
        assert!(remove(&mut tasks, 9).is_none());
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_insert_shifts_later_siblings() {
        let mut tasks = make_tasks(&[1, 2, 3]);
        let incoming = make_tasks(&[9]).remove(0);
        let landed = insert_at(&mut tasks, incoming, 1);

        assert_eq!(landed, 1);
        assert_eq!(order(&tasks), vec![(1, 0), (9, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut tasks = make_tasks(&[1, 2]);
        let landed = insert_at(&mut tasks, make_tasks(&[7]).remove(0), 99);
        assert_eq!(landed, 2);

        let landed = insert_at(&mut tasks, make_tasks(&[8]).remove(0), -3);
        assert_eq!(landed, 0);
        assert_eq!(order(&tasks), vec![(8, 0), (1, 1), (2, 2), (7, 3)]);
    }

    #[test]
    fn test_insert_into_empty() {
        let mut tasks: Vec<Task> = Vec::new();
        assert_eq!(insert_at(&mut tasks, make_tasks(&[5]).remove(0), 3), 0);
        assert_eq!(order(&tasks), vec![(5, 0)]);
    }
}
