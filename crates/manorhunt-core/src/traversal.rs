//! Deterministic depth-first tour used to schedule pet movement.
//!
//! The walk uses an explicit stack, not recursion: at each step it moves to
//! the smallest-id unvisited neighbor of the current room, and on a dead
//! end it pops the stack and records the new stack top in the path *again*.
//! The returned path therefore contains every room entered, backtrack
//! re-entries included — a recursive pre-order visit would silently drop
//! those and change where the pet lands.

use crate::entities::{Room, RoomId};

/// Depth-first path over the room graph starting at `start`.
///
/// Pure function of the static adjacency; recomputing for the same start
/// always yields the same path. The path always begins with `start`.
pub fn dfs_path(rooms: &[Room], start: RoomId) -> Vec<RoomId> {
    let mut path = vec![start];
    let mut route = vec![start];
    let mut current = start;
    while !route.is_empty() {
        let next = rooms[current]
            .neighbors
            .iter()
            .copied()
            .filter(|id| !path.contains(id))
            .min();
        match next {
            Some(id) => {
                route.push(id);
                path.push(id);
                current = id;
            }
            None => {
                route.pop();
                if let Some(&top) = route.last() {
                    path.push(top);
                    current = top;
                }
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    // build rooms with hand-wired adjacency; rectangles are irrelevant here
    fn make_rooms(adjacency: &[&[RoomId]]) -> Vec<Room> {
        adjacency
            .iter()
            .enumerate()
            .map(|(id, neighbors)| {
                let rect = Rect::new(0, 10 * id as i32, 4, 10 * id as i32 + 4).unwrap();
                let mut room = Room::new(id, format!("Room {}", id), rect);
                room.neighbors = neighbors.to_vec();
                room
            })
            .collect()
    }

    #[test]
    fn test_backtracking_reenters_rooms_in_path() {
        // 0 - 1, 0 - 2, 2 - 3
        let rooms = make_rooms(&[&[1, 2], &[0], &[0, 3], &[2]]);
        assert_eq!(dfs_path(&rooms, 0), vec![0, 1, 0, 2, 3, 2, 0]);
    }

    #[test]
    fn test_smallest_id_neighbor_is_taken_first() {
        // star centered on 3
        let rooms = make_rooms(&[&[3], &[3], &[3], &[2, 0, 1]]);
        assert_eq!(dfs_path(&rooms, 3), vec![3, 0, 3, 1, 3, 2, 3]);
    }

    #[test]
    fn test_restart_from_another_room() {
        let rooms = make_rooms(&[&[1, 2], &[0], &[0, 3], &[2]]);
        assert_eq!(dfs_path(&rooms, 3), vec![3, 2, 0, 1, 0, 2, 3]);
    }

    #[test]
    fn test_isolated_start_yields_singleton_path() {
        let rooms = make_rooms(&[&[], &[2], &[1]]);
        assert_eq!(dfs_path(&rooms, 0), vec![0]);
    }

    #[test]
    fn test_unreachable_rooms_are_skipped() {
        // 3 is an island
        let rooms = make_rooms(&[&[1], &[0, 2], &[1], &[]]);
        let path = dfs_path(&rooms, 0);
        assert!(!path.contains(&3));
        assert_eq!(path, vec![0, 1, 2, 1, 0]);
    }
}
