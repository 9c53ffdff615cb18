//! Error taxonomy for world construction and gameplay operations.
//!
//! Three tiers: `Load` failures abort world construction, `InvalidArgument`
//! rejects an operation with no state change, and `Rule` reports a
//! well-formed request that the game rules refuse (a normal gameplay
//! outcome, not a crash).

use std::error::Error;
use std::fmt;

/// Error returned by [`World`](crate::world::World) construction and
/// operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The world description is malformed: bad geometry, overlapping or
    /// duplicate rooms, out-of-range placements, empty names.
    Load(String),
    /// An id, index, or turn number outside its valid range.
    InvalidArgument(String),
    /// A rule rejection: moving to a non-neighbor, picking from an empty
    /// room, stuffing a full bag, walking the pet from an isolated room.
    Rule(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::Load(msg) => write!(f, "world load failed: {}", msg),
            WorldError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            WorldError::Rule(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for WorldError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_message() {
        let err = WorldError::Load("rooms overlap".to_string());
        assert!(err.to_string().contains("rooms overlap"));

        let err = WorldError::InvalidArgument("player id 7".to_string());
        assert!(err.to_string().contains("player id 7"));
    }

    #[test]
    fn test_rule_errors_print_bare() {
        let err = WorldError::Rule("Room selected is not a neighbor".to_string());
        assert_eq!(err.to_string(), "Room selected is not a neighbor");
    }
}
