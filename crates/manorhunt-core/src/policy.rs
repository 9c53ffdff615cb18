//! Decision policy for computer-controlled players.
//!
//! The eligibility check comes first and is deterministic: a computer
//! player that could land a blow right now always tries to. Only when no
//! attack is possible does the policy fall back to a random draw, with a
//! single redraw if `Pick` lands in an itemless room.

use rand::Rng;

use crate::entities::{PlayerId, RoomId};
use crate::error::WorldError;
use crate::world::World;

/// What a computer player chooses to do with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Attack,
    Poke,
    Look,
    Move,
    Pick,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Attack => "attack",
            Action::Poke => "poke",
            Action::Look => "look",
            Action::Move => "move",
            Action::Pick => "pick",
        }
    }
}

/// Fallback actions, drawn uniformly when no attack is possible. `Pick`
/// sits last so the itemless-room redraw is a draw over the first two.
const FALLBACK: [Action; 3] = [Action::Look, Action::Move, Action::Pick];

/// Decide the action for a computer player's turn.
///
/// If the target is co-located and nobody would see it, attack with an
/// item when the bag has one, else poke. Otherwise draw from
/// [Look, Move, Pick], redrawing once from [Look, Move] when `Pick`
/// comes up in a room with no items.
pub fn decide(
    world: &World,
    player_id: PlayerId,
    rng: &mut impl Rng,
) -> Result<Action, WorldError> {
    let player = world.player(player_id)?;
    if !world.can_be_seen(player_id)? && world.target().current_room == player.current_room {
        if player.items().is_empty() {
            return Ok(Action::Poke);
        }
        return Ok(Action::Attack);
    }
    let mut action = FALLBACK[rng.gen_range(0..FALLBACK.len())];
    if action == Action::Pick && world.find_room_by_player(player_id)?.items.is_empty() {
        action = FALLBACK[rng.gen_range(0..FALLBACK.len() - 1)];
    }
    Ok(action)
}

/// Pick a uniformly-random neighbor of the player's current room as a
/// `Move` destination. `None` when the room has no neighbors.
pub fn random_destination(
    world: &World,
    player_id: PlayerId,
    rng: &mut impl Rng,
) -> Result<Option<RoomId>, WorldError> {
    let room = world.find_room_by_player(player_id)?;
    if room.neighbors.is_empty() {
        return Ok(None);
    }
    Ok(Some(room.neighbors[rng.gen_range(0..room.neighbors.len())]))
}
