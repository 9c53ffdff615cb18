//! The line-of-sight rule gating combat.
//!
//! A player is "seen" when any outside observer could witness an action in
//! their current room. The precedence is load-bearing and fixed:
//!
//! 1. another player in the same room → seen;
//! 2. the pet co-located with the (now known to be lone) player → hidden,
//!    unconditionally, even with crowded neighbors;
//! 3. any player in any neighboring room → seen;
//! 4. otherwise hidden.
//!
//! Neighbors are taken from the player's own room, per the directed
//! adjacency of [`geometry`](crate::geometry).

use crate::entities::{Pet, Player, Room};

/// Whether an action by `player` in its current room would be witnessed.
pub fn can_be_seen(rooms: &[Room], pet: &Pet, player: &Player) -> bool {
    let room = &rooms[player.current_room];
    if room.players.len() > 1 {
        return true;
    }
    if pet.current_room == player.current_room {
        return false;
    }
    room.neighbors
        .iter()
        .any(|&n| !rooms[n].players.is_empty())
}
