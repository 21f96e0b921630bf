//! Position Utilities
//!
//! Every container (the lists of a board, the tasks of a list) keeps its
//! children densely numbered `0..n`. Display order is ascending position.

use crate::models::{Task, TaskList};

/// An element that occupies a slot in a positioned container.
pub trait Positioned {
    fn key(&self) -> u32;
    fn position(&self) -> i32;
    fn set_position(&mut self, position: i32);
}

impl Positioned for TaskList {
    fn key(&self) -> u32 {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

impl Positioned for Task {
    fn key(&self) -> u32 {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// Sort children by position (stable, so equal positions keep arrival order)
pub fn sort_by_position<T: Positioned>(items: &mut [T]) {
    items.sort_by_key(|i| i.position());
}

/// True when the positions are exactly `0..len` in display order.
pub fn is_dense<T: Positioned>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.position() == index as i32)
}

/// Renumber children `0..len` keeping their current relative order.
pub fn renumber<T: Positioned>(items: &mut [T]) {
    sort_by_position(items);
    for (index, item) in items.iter_mut().enumerate() {
        item.set_position(index as i32);
    }
}

/// Position an appended child receives.
pub fn next_position<T: Positioned>(items: &[T]) -> i32 {
    items
        .iter()
        .map(|i| i.position())
        .max()
        .map(|max| max + 1)
        .unwrap_or(0)
}

pub fn index_of<T: Positioned>(items: &[T], key: u32) -> Option<usize> {
    items.iter().position(|i| i.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: u32, position: i32) -> Task {
        Task {
            id,
            list_id: 1,
            name: format!("Task {}", id),
            completed: false,
            position,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_sort_by_position() {
        let mut tasks = vec![make_task(1, 2), make_task(2, 0), make_task(3, 1)];
        sort_by_position(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 3, 1]);
        assert!(is_dense(&tasks));
    }

    #[test]
    fn test_is_dense_detects_gaps_and_duplicates() {
        assert!(is_dense::<Task>(&[]));
        assert!(!is_dense(&[make_task(1, 0), make_task(2, 2)]));
        assert!(!is_dense(&[make_task(1, 0), make_task(2, 0)]));
        assert!(!is_dense(&[make_task(1, 1)]));
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut tasks = vec![make_task(1, 7), make_task(2, 3), make_task(3, 10)];
        renumber(&mut tasks);
        assert_eq!(ids(&tasks), vec![2, 1, 3]);
        assert!(is_dense(&tasks));
    }

    #[test]
    fn test_next_position() {
        assert_eq!(next_position::<Task>(&[]), 0);
        assert_eq!(next_position(&[make_task(1, 0), make_task(2, 1)]), 2);
    }

    #[test]
    fn test_index_of() {
        let tasks = vec![make_task(4, 0), make_task(9, 1)];
        assert_eq!(index_of(&tasks, 9), Some(1));
        assert_eq!(index_of(&tasks, 5), None);
    }
}
