//! Concrete entity types: items, players, the target, the pet, and rooms.
//!
//! All entities live in arenas owned by the [`World`](crate::world::World)
//! and address each other through dense ids — a room holds the ids of the
//! players standing in it, a player holds the id of the room it stands in.
//! Mutators are small and invariant-preserving; cross-entity rules live in
//! the world operations.

use serde::{Deserialize, Serialize};

use crate::error::WorldError;
use crate::geometry::Rect;

/// Index into the world's room arena; equal to declaration order.
pub type RoomId = usize;

/// Index into the world's player arena; ids are dense and sequential.
pub type PlayerId = usize;

/// A weapon lying in a room or carried in a player's bag.
///
/// Items migrate between room and bag collections and are only ever
/// destroyed by being used in an attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Damage dealt when used in an attack; never negative.
    pub power: i32,
}

impl Item {
    pub fn new(name: impl Into<String>, power: i32) -> Self {
        Self {
            name: name.into(),
            power,
        }
    }
}

/// Who drives a player's decisions each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Human,
    Computer,
}

/// A hunter roaming the mansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub control: Control,
    pub bag_capacity: usize,
    pub current_room: RoomId,
    /// Carried items, kept sorted by descending power (stable on ties).
    items: Vec<Item>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        control: Control,
        bag_capacity: usize,
        current_room: RoomId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            control,
            bag_capacity,
            current_room,
            items: Vec::new(),
        }
    }

    pub fn is_human(&self) -> bool {
        self.control == Control::Human
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Put an item in the bag, keeping the descending-power order.
    /// Rejects the pick when the bag is already at capacity.
    pub fn pick_item(&mut self, item: Item) -> Result<(), WorldError> {
        if self.items.len() == self.bag_capacity {
            return Err(WorldError::Rule(
                "Player cannot carry more items".to_string(),
            ));
        }
        self.items.push(item);
        // stable sort: equal powers stay in pick order
        self.items.sort_by(|a, b| b.power.cmp(&a.power));
        Ok(())
    }

    /// Remove and return the item at `index` in the sorted bag.
    pub fn take_item(&mut self, index: usize) -> Result<Item, WorldError> {
        if index >= self.items.len() {
            return Err(WorldError::InvalidArgument(format!(
                "item index {} out of range for bag of {}",
                index,
                self.items.len()
            )));
        }
        Ok(self.items.remove(index))
    }
}

/// The character being hunted. Walks a fixed cyclic tour of the rooms in
/// declaration order, independent of adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub health: i32,
    pub current_room: RoomId,
    rooms: usize,
}

impl Target {
    pub fn new(name: impl Into<String>, health: i32, rooms: usize) -> Self {
        Self {
            name: name.into(),
            health,
            current_room: 0,
            rooms,
        }
    }

    /// Advance one step on the cyclic tour.
    pub fn advance(&mut self) {
        self.current_room = (self.current_room + 1) % self.rooms;
    }

    /// Subtract damage. Health is allowed to go to zero or below.
    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }
}

/// The target's pet. Can be placed in any room (no adjacency constraint);
/// its presence masks a lone player in the same room from observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub name: String,
    pub current_room: RoomId,
}

impl Pet {
    /// Pets start in room 0, like the target.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_room: 0,
        }
    }

    pub fn move_to(&mut self, room: RoomId) {
        self.current_room = room;
    }
}

/// A room of the mansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub rect: Rect,
    /// Items on the floor, in placement order.
    pub items: Vec<Item>,
    /// Players standing here, in arrival order. Never holds duplicates.
    pub players: Vec<PlayerId>,
    /// Computed once at load from the wall-sharing rule; immutable after.
    pub neighbors: Vec<RoomId>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>, rect: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            rect,
            items: Vec::new(),
            players: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    pub fn add_player(&mut self, player: PlayerId) {
        debug_assert!(!self.players.contains(&player));
        self.players.push(player);
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.players.retain(|&p| p != player);
    }

    /// Remove and return the item at `index` in placement order.
    pub fn take_item(&mut self, index: usize) -> Result<Item, WorldError> {
        if index >= self.items.len() {
            return Err(WorldError::InvalidArgument(format!(
                "item index {} out of range for room {}",
                index, self.id
            )));
        }
        Ok(self.items.remove(index))
    }
}
