//! Drag-to-Reorder Mathematics
//!
//! Everything here is a pure function of the geometry captured once at
//! gesture start. The gesture layer feeds pointer samples in and applies the
//! results; no live DOM measurement happens after capture, so the engine
//! never feeds back on its own shift animation.

use crate::entity::Entity;

/// Visual offset for a non-dragged row while a drag is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shift {
    #[default]
    None,
    /// Move up by one item height (dragged item passed below this row)
    Up,
    /// Move down by one item height (dragged item passed above this row)
    Down,
}

/// Immutable geometry of one list captured at gesture start: item ids and
/// the vertical midpoints they occupied at that instant.
#[derive(Debug, Clone)]
pub struct DragSession {
    ids: Vec<String>,
    midpoints: Vec<f64>,
    start: usize,
}

impl DragSession {
    /// Capture a session. Returns `None` when the start index is out of
    /// bounds; midpoints are expected in display order.
    pub fn capture(items: Vec<(String, f64)>, start: usize) -> Option<Self> {
        if start >= items.len() {
            return None;
        }
        let (ids, midpoints) = items.into_iter().unzip();
        Some(Self {
            ids,
            midpoints,
            start,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn start_index(&self) -> usize {
        self.start
    }

    pub fn dragged_id(&self) -> &str {
        &self.ids[self.start]
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    /// Average vertical distance between captured row midpoints; the shift
    /// animation moves rows by exactly this much.
    pub fn row_pitch(&self) -> f64 {
        if self.midpoints.len() < 2 {
            return 0.0;
        }
        (self.midpoints[self.midpoints.len() - 1] - self.midpoints[0])
            / (self.midpoints.len() - 1) as f64
    }

    /// Index of the row whose captured midpoint the pointer most recently
    /// crossed, scanning outward from the start index.
    pub fn drop_index(&self, pointer_y: f64) -> usize {
        let mut index = self.start;
        while index > 0 && pointer_y < self.midpoints[index - 1] {
            index -= 1;
        }
        while index + 1 < self.midpoints.len() && pointer_y > self.midpoints[index + 1] {
            index += 1;
        }
        index
    }

    /// Shift for the row at `index` given the current drop index: rows
    /// strictly between start and drop move one slot toward the vacated
    /// position (drop inclusive, start exclusive).
    pub fn shift_for(&self, index: usize, drop_index: usize) -> Shift {
        if index == self.start {
            return Shift::None;
        }
        if self.start < drop_index && index > self.start && index <= drop_index {
            Shift::Up
        } else if drop_index < self.start && index >= drop_index && index < self.start {
            Shift::Down
        } else {
            Shift::None
        }
    }
}

/// Commit a reorder by index: remove at `from`, reinsert so the moved item
/// lands exactly at `to` while everything else keeps its relative order.
/// Out-of-range indices and `from == to` leave the list untouched.
pub fn commit_reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Commit a reorder by identity against the unfiltered backing list: the
/// dragged entity takes the position the target occupied, which preserves
/// the adjacency the user saw even when the drag happened in a filtered
/// view. Returns whether the list changed.
pub fn reorder_by_id<T: Entity>(items: &mut Vec<T>, dragged: &T::Id, target: &T::Id) -> bool {
    let from = match items.iter().position(|item| item.id() == *dragged) {
        Some(index) => index,
        None => return false,
    };
    let to = match items.iter().position(|item| item.id() == *target) {
        Some(index) => index,
        None => return false,
    };
    if from == to {
        return false;
    }
    commit_reorder(items, from, to);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;

    fn session() -> DragSession {
        // Five 40px rows: midpoints 20, 60, 100, 140, 180; dragging "c".
        DragSession::capture(
            vec![
                ("a".into(), 20.0),
                ("b".into(), 60.0),
                ("c".into(), 100.0),
                ("d".into(), 140.0),
                ("e".into(), 180.0),
            ],
            2,
        )
        .unwrap()
    }

    fn tasks(ids: &[&str]) -> Vec<Task> {
        ids.iter().map(|id| Task::new(id.to_string(), format!("Task {}", id))).collect()
    }

    fn ids(tasks: &[Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_drop_index_tracks_crossed_midpoints() {
        let s = session();
        assert_eq!(s.drop_index(100.0), 2);
        assert_eq!(s.drop_index(130.0), 2);
        assert_eq!(s.drop_index(150.0), 3);
        assert_eq!(s.drop_index(500.0), 4);
        assert_eq!(s.drop_index(61.0), 2);
        assert_eq!(s.drop_index(55.0), 1);
        assert_eq!(s.drop_index(19.0), 0);
        assert_eq!(s.drop_index(-10.0), 0);
    }

    #[test]
    fn test_shifts_cover_drop_inclusive_start_exclusive() {
        let s = session();
        // Dragging down to index 4: rows 3 and 4 make room upward.
        assert_eq!(s.shift_for(0, 4), Shift::None);
        assert_eq!(s.shift_for(1, 4), Shift::None);
        assert_eq!(s.shift_for(2, 4), Shift::None);
        assert_eq!(s.shift_for(3, 4), Shift::Up);
        assert_eq!(s.shift_for(4, 4), Shift::Up);
        // Dragging up to index 0: rows 0 and 1 make room downward.
        assert_eq!(s.shift_for(0, 0), Shift::Down);
        assert_eq!(s.shift_for(1, 0), Shift::Down);
        assert_eq!(s.shift_for(3, 0), Shift::None);
        // No movement, no shift.
        assert_eq!(s.shift_for(1, 2), Shift::None);
    }

    #[test]
    fn test_commit_places_dragged_at_drop_index() {
        for from in 0..5 {
            for to in 0..5 {
                let mut list = tasks(&["a", "b", "c", "d", "e"]);
                let moved = list[from].id.clone();
                let expect_rest: Vec<String> =
                    ids(&list).into_iter().filter(|id| *id != moved).collect();
                commit_reorder(&mut list, from, to);

                assert_eq!(list[to].id, moved, "from={} to={}", from, to);
                let rest: Vec<String> =
                    ids(&list).into_iter().filter(|id| *id != moved).collect();
                assert_eq!(rest, expect_rest, "relative order broken from={} to={}", from, to);
            }
        }
    }

    #[test]
    fn test_commit_to_last_index_boundary() {
        let mut list = tasks(&["a", "b", "c"]);
        commit_reorder(&mut list, 0, 2);
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_commit_out_of_range_is_a_noop() {
        let mut list = tasks(&["a", "b", "c"]);
        commit_reorder(&mut list, 7, 1);
        commit_reorder(&mut list, 1, 9);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_filtered_drop_maps_back_to_full_list() {
        // Full list a..f; the filtered view shows [b, d, f]. Dragging f to
        // b's slot in the filtered view must land f at b's position in the
        // full list, adjacent to b.
        let mut full = tasks(&["a", "b", "c", "d", "e", "f"]);
        let changed = reorder_by_id(&mut full, &"f".to_string(), &"b".to_string());
        assert!(changed);
        assert_eq!(ids(&full), vec!["a", "f", "b", "c", "d", "e"]);

        // And dragging down: b to f's current position.
        let mut full = tasks(&["a", "b", "c", "d", "e", "f"]);
        reorder_by_id(&mut full, &"b".to_string(), &"f".to_string());
        assert_eq!(ids(&full), vec!["a", "c", "d", "e", "f", "b"]);
    }

    #[test]
    fn test_reorder_by_id_with_unknown_id_is_a_noop() {
        let mut full = tasks(&["a", "b"]);
        assert!(!reorder_by_id(&mut full, &"zz".to_string(), &"a".to_string()));
        assert!(!reorder_by_id(&mut full, &"a".to_string(), &"a".to_string()));
        assert_eq!(ids(&full), vec!["a", "b"]);
    }
}
