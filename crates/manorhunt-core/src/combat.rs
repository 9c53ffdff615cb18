//! Attack resolution against the target.
//!
//! Both attack forms share the same gate, checked in a fixed order:
//! co-location with the target first, then the visibility rule. An item
//! used in an attack leaves the attacker's bag on every path, failed
//! attempts included — discarding the evidence is part of the game's
//! rules, not an implementation accident.

use std::fmt;

use crate::entities::PlayerId;
use crate::error::WorldError;
use crate::visibility;
use crate::world::World;

/// How an attack attempt resolved. `Display` renders the human-readable
/// report; callers branch on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The target was in another room. Any item used is gone regardless.
    TargetElsewhere,
    /// Somebody watched the attempt. Any item used is gone regardless.
    Witnessed,
    /// The blow landed: `damage` was subtracted, `remaining` is the
    /// target's health afterwards (zero or negative means dead).
    Landed {
        attacker: String,
        /// Name of the item used, or `None` for a bare-handed poke.
        weapon: Option<String>,
        damage: i32,
        remaining: i32,
    },
}

impl AttackOutcome {
    /// True when the attack reduced the target's health.
    pub fn landed(&self) -> bool {
        matches!(self, AttackOutcome::Landed { .. })
    }
}

impl fmt::Display for AttackOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackOutcome::TargetElsewhere => {
                write!(f, "Attack fails. Target is not in the same room")
            }
            AttackOutcome::Witnessed => write!(f, "Attack fails. Player is seen by others"),
            AttackOutcome::Landed {
                attacker,
                weapon: Some(weapon),
                remaining,
                ..
            } => write!(
                f,
                "{} attacks target with {}\nTarget remaining health: {}",
                attacker, weapon, remaining
            ),
            AttackOutcome::Landed {
                attacker,
                weapon: None,
                remaining,
                ..
            } => write!(
                f,
                "{} pokes target in the eye\nTarget remaining health: {}",
                attacker, remaining
            ),
        }
    }
}

impl World {
    /// Attack the target with the item at `item_index` in the player's
    /// bag. The index must be valid; past that point the item is consumed
    /// no matter how the attempt resolves.
    pub fn attack_with_item(
        &mut self,
        player_id: PlayerId,
        item_index: usize,
    ) -> Result<AttackOutcome, WorldError> {
        self.check_player_id(player_id)?;
        let item = self.players[player_id].take_item(item_index)?;
        if self.players[player_id].current_room != self.target.current_room {
            log::warn!("attack by player {} failed: target elsewhere", player_id);
            return Ok(AttackOutcome::TargetElsewhere);
        }
        if visibility::can_be_seen(&self.rooms, &self.pet, &self.players[player_id]) {
            log::warn!("attack by player {} failed: witnessed", player_id);
            return Ok(AttackOutcome::Witnessed);
        }
        self.target.take_damage(item.power);
        log::info!(
            "player {} hit the target with {} for {}, {} hp left",
            player_id,
            item.name,
            item.power,
            self.target.health
        );
        Ok(AttackOutcome::Landed {
            attacker: self.players[player_id].name.clone(),
            weapon: Some(item.name),
            damage: item.power,
            remaining: self.target.health,
        })
    }

    /// Attack with no item: a poke for a fixed 1 damage, under the same
    /// co-location and visibility gates.
    pub fn poke_target(&mut self, player_id: PlayerId) -> Result<AttackOutcome, WorldError> {
        self.check_player_id(player_id)?;
        if self.players[player_id].current_room != self.target.current_room {
            log::warn!("poke by player {} failed: target elsewhere", player_id);
            return Ok(AttackOutcome::TargetElsewhere);
        }
        if visibility::can_be_seen(&self.rooms, &self.pet, &self.players[player_id]) {
            log::warn!("poke by player {} failed: witnessed", player_id);
            return Ok(AttackOutcome::Witnessed);
        }
        self.target.take_damage(1);
        log::info!(
            "player {} poked the target, {} hp left",
            player_id,
            self.target.health
        );
        Ok(AttackOutcome::Landed {
            attacker: self.players[player_id].name.clone(),
            weapon: None,
            damage: 1,
            remaining: self.target.health,
        })
    }
}
