//! Core engine for a turn-based mansion pursuit game.
//!
//! A target character walks a fixed cyclic tour through a graph of
//! rectangular rooms while players try to attack it without being
//! observed; the target's pet can be steered around to mask a lone
//! player from view. This crate is the world simulation only: no
//! rendering, no input handling, no text-format parsing. It consumes an
//! already-structured world description and exposes a synchronous,
//! single-threaded operation surface for a controller to drive.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geometry`] | Room rectangles, overlap rejection, wall-sharing neighbor rule |
//! | [`entities`] | Concrete entity types: rooms, players, items, target, pet |
//! | [`visibility`] | The line-of-sight rule gating combat |
//! | [`combat`] | Attack and poke resolution with unconditional item use |
//! | [`traversal`] | Deterministic depth-first tour for pet scheduling |
//! | [`turn`] | Turn counter, rotation, end-of-game condition |
//! | [`policy`] | Computer-player decision function |
//! | [`world`] | World arenas, description loading, operation surface |
//! | [`display`] | Presentation-string reports over world state |
//! | [`error`] | Error taxonomy (load / invalid argument / rule) |

pub mod combat;
pub mod display;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod policy;
pub mod traversal;
pub mod turn;
pub mod visibility;
pub mod world;

pub use combat::AttackOutcome;
pub use entities::{Control, Item, Pet, Player, PlayerId, Room, RoomId, Target};
pub use error::WorldError;
pub use policy::Action;
pub use world::{World, WorldDescription};
