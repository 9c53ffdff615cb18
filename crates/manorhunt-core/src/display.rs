//! Presentation-string conveniences layered over the world state.
//!
//! Exact wording is a front-end concern; what matters is that every
//! decision these reports surface (who is where, what the pet hides,
//! whether the target is co-located) matches the resolvers.

use crate::entities::{Item, PlayerId, Room};
use crate::error::WorldError;
use crate::world::World;

fn item_list(items: &[Item]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}: {}(damage:{})", i, item.name, item.power))
        .collect::<Vec<_>>()
        .join(", ")
}

impl World {
    fn player_names(&self, room: &Room) -> String {
        room.players
            .iter()
            .map(|&id| self.players[id].name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// What the player sees from their room: its contents, each neighbor's
    /// contents (unless the pet is sitting there and blocks the view), and
    /// whether the target is here.
    pub fn look_around(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let player = self.player(player_id)?;
        let room = &self.rooms[player.current_room];
        let mut out = String::new();

        out.push_str(&format!("{} is looking around.\n", player.name));
        out.push_str(&format!("Location: {}\n", room.name));
        if room.items.is_empty() {
            out.push_str(&format!("Items in {}: No items in room.\n", room.name));
        } else {
            out.push_str(&format!("Items in {}: {}\n", room.name, item_list(&room.items)));
        }
        out.push_str(&format!(
            "Players in {}: {}\n",
            room.name,
            self.player_names(room)
        ));
        if self.pet.current_room == room.id {
            out.push_str(&format!("{} is in the {}\n", self.pet.name, room.name));
        }

        out.push_str("Neighboring rooms:\n");
        for (i, &neighbor_id) in room.neighbors.iter().enumerate() {
            let neighbor = &self.rooms[neighbor_id];
            out.push_str(&format!("{}: {}\n", i, neighbor.name));
            if self.pet.current_room == neighbor_id {
                // the pet hides a neighboring room's contents entirely
                out.push_str(&format!("  {} is in the {}\n", self.pet.name, neighbor.name));
                out.push_str(&format!(
                    "  The pet blocks the view into {}\n",
                    neighbor.name
                ));
                continue;
            }
            if neighbor.items.is_empty() {
                out.push_str(&format!(
                    "  Items in {}: No items in room.\n",
                    neighbor.name
                ));
            } else {
                out.push_str(&format!(
                    "  Items in {}: {}\n",
                    neighbor.name,
                    item_list(&neighbor.items)
                ));
            }
            if neighbor.players.is_empty() {
                out.push_str(&format!(
                    "  Players in {}: No players in the room.\n",
                    neighbor.name
                ));
            } else {
                out.push_str(&format!(
                    "  Players in {}: {}\n",
                    neighbor.name,
                    self.player_names(neighbor)
                ));
            }
        }

        if self.target.current_room == room.id {
            out.push_str("Target is in the same room with player.\n");
        } else {
            out.push_str("Target is not in the same room with player.\n");
        }
        Ok(out)
    }

    /// Name, position, and bag contents of a player.
    pub fn display_player_info(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let player = self.player(player_id)?;
        let room = &self.rooms[player.current_room];
        let mut out = String::new();
        out.push_str(&format!("Player name: {}\n", player.name));
        out.push_str(&format!("Player's position: {}\n", room.name));
        if player.items().is_empty() {
            out.push_str("Items carried: This player has no item.\n");
        } else {
            out.push_str(&format!("Items carried: {}\n", item_list(player.items())));
        }
        Ok(out)
    }

    /// Summary of the player's current room; notes the pet when present.
    pub fn display_room_info(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let player = self.player(player_id)?;
        let room = &self.rooms[player.current_room];
        let mut out = String::new();
        out.push_str(&format!("Room's name: {}\n", room.name));
        let neighbor_names = room
            .neighbors
            .iter()
            .enumerate()
            .map(|(i, &id)| format!("{}: {}", i, self.rooms[id].name))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Neighbors: {}\n", neighbor_names));
        if room.items.is_empty() {
            out.push_str("Items in room: There are no items in this room.\n");
        } else {
            out.push_str(&format!("Items in room: {}\n", item_list(&room.items)));
        }
        if room.players.is_empty() {
            out.push_str("Players in room: There are no players in this room.\n");
        } else {
            out.push_str(&format!("Players in room: {}\n", self.player_names(room)));
        }
        if self.pet.current_room == room.id {
            out.push_str(&format!("{} is in the {}\n", self.pet.name, room.name));
        }
        Ok(out)
    }

    /// Turn header plus the player and room reports.
    pub fn display_game_state(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let mut out = String::new();
        out.push_str(&format!("Turn no.{}\n", self.clock.turn()));
        out.push_str("===================\n");
        out.push_str("Player's information:\n");
        out.push_str(&self.display_player_info(player_id)?);
        out.push_str("===================\n");
        out.push_str("Room's information:\n");
        out.push_str(&self.display_room_info(player_id)?);
        out.push_str("===================\n");
        Ok(out)
    }

    /// Numbered pick list of the player's bag.
    pub fn display_items_in_bag(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let player = self.player(player_id)?;
        let mut out = String::from("Pick an item to make an attempt on the target's life:\n");
        for (i, item) in player.items().iter().enumerate() {
            out.push_str(&format!("{}: {}\n", i, item.name));
        }
        Ok(out)
    }

    /// Numbered pick list of the player's current room.
    pub fn display_items_in_room(&self, player_id: PlayerId) -> Result<String, WorldError> {
        let room = self.find_room_by_player(player_id)?;
        let mut out = String::from("Pick an item by its number:\n");
        for (i, item) in room.items.iter().enumerate() {
            out.push_str(&format!("{}: {}\n", i, item.name));
        }
        if room.items.is_empty() {
            out.push_str("No items in current room.\n");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use crate::entities::Control;
    use crate::world::{ItemSpec, PetSpec, RoomSpec, TargetSpec, World, WorldDescription};

    fn room_spec(name: &str, tr: i32, tc: i32, br: i32, bc: i32) -> RoomSpec {
        RoomSpec {
            name: name.to_string(),
            top_row: tr,
            top_col: tc,
            bottom_row: br,
            bottom_col: bc,
        }
    }

    // Foyer - Parlor - Library in a row
    fn make_world() -> World {
        let desc = WorldDescription {
            rows: 10,
            cols: 12,
            target: TargetSpec {
                name: "Lord Ambrose".to_string(),
                health: 10,
            },
            pet: PetSpec {
                name: "Whiskers".to_string(),
            },
            rooms: vec![
                room_spec("Foyer", 0, 0, 4, 4),
                room_spec("Parlor", 0, 4, 4, 8),
                room_spec("Library", 0, 8, 4, 12),
            ],
            items: vec![ItemSpec {
                room: 1,
                power: 2,
                name: "Letter Opener".to_string(),
            }],
        };
        let mut world = World::load(&desc, 30).unwrap();
        world.add_player("Bob", 0, Control::Human, 3, 0).unwrap();
        world.add_player("John", 1, Control::Computer, 3, 1).unwrap();
        world
    }

    #[test]
    fn test_look_around_reports_neighbor_contents() {
        let world = make_world();
        let report = world.look_around(0).unwrap();
        assert!(report.contains("Bob is looking around."));
        assert!(report.contains("Location: Foyer"));
        assert!(report.contains("Players in Parlor: John"));
        assert!(report.contains("Letter Opener(damage:2)"));
        assert!(report.contains("Target is in the same room with player."));
    }

    #[test]
    fn test_look_around_pet_blocks_neighbor_view() {
        let mut world = make_world();
        world.move_pet(1).unwrap();
        let report = world.look_around(0).unwrap();
        assert!(report.contains("The pet blocks the view into Parlor"));
        // the blocked room's contents stay hidden
        assert!(!report.contains("Players in Parlor: John"));
        assert!(!report.contains("Letter Opener"));
    }

    #[test]
    fn test_look_around_notes_pet_in_own_room() {
        let world = make_world();
        // pet starts in room 0 with Bob
        let report = world.look_around(0).unwrap();
        assert!(report.contains("Whiskers is in the Foyer"));
    }

    #[test]
    fn test_target_colocation_line_tracks_the_tour() {
        let mut world = make_world();
        world.move_target();
        let report = world.look_around(0).unwrap();
        assert!(report.contains("Target is not in the same room with player."));
    }

    #[test]
    fn test_player_info_lists_sorted_bag() {
        let mut world = make_world();
        world.move_player(0, 1).unwrap();
        world.pick_item(0, 0).unwrap();
        let report = world.display_player_info(0).unwrap();
        assert!(report.contains("Player name: Bob"));
        assert!(report.contains("Player's position: Parlor"));
        assert!(report.contains("Letter Opener(damage:2)"));
    }

    #[test]
    fn test_room_info_mentions_pet_when_present() {
        let world = make_world();
        let report = world.display_room_info(0).unwrap();
        assert!(report.contains("Room's name: Foyer"));
        assert!(report.contains("Neighbors: 0: Parlor"));
        assert!(report.contains("Whiskers is in the Foyer"));
    }

    #[test]
    fn test_game_state_includes_turn_number() {
        let mut world = make_world();
        world.advance_turn();
        let report = world.display_game_state(0).unwrap();
        assert!(report.contains("Turn no.2"));
        assert!(report.contains("Player's information:"));
        assert!(report.contains("Room's information:"));
    }

    #[test]
    fn test_item_pick_lists() {
        let world = make_world();
        let bag = world.display_items_in_bag(0).unwrap();
        assert!(bag.contains("Pick an item"));
        let room = world.display_items_in_room(1).unwrap();
        assert!(room.contains("0: Letter Opener"));
        let empty = world.display_items_in_room(0).unwrap();
        assert!(empty.contains("No items in current room."));
    }
}
