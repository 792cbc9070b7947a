//! Packed match descriptor decoding.
//!
//! A match is described on the wire by a single little-endian 32-bit value.
//! `MatchKey` wraps that value and exposes the decoded fields:
//!
//! - byte 0, bit 0: game type
//! - byte 0, bit 1: public type
//! - byte 0, bit 2: join auth
//! - byte 0, bits 4-7: rule selector ([`RuleId`])
//! - byte 1: map id
//! - byte 2: capacity code (table-mapped to a player limit)
//! - byte 3, bit 1: observer slots enabled
//!
//! Decoding is a pure function with no failure modes: an unmapped capacity
//! code yields a player limit of 0, which is a valid degenerate
//! configuration, not an error. Conversion to and from the raw integer is
//! explicit (`from_raw`/`raw`) - there are no implicit coercions.

use serde::{Deserialize, Serialize};

/// Rule selector decoded from the match descriptor.
///
/// Identifies which game mode governs a match. Only the low 4 bits are
/// meaningful on the wire; modes register themselves under their `RuleId`
/// in a [`RuleRegistry`](crate::rules::RuleRegistry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub u8);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule({})", self.0)
    }
}

/// Total slots in a room; observer slots are whatever the player limit
/// leaves unused.
const ROOM_SLOTS: u32 = 12;

/// Immutable view over a packed 32-bit match descriptor.
///
/// ## Example
///
/// ```
/// use match_rules::core::MatchKey;
///
/// // capacity code 6 -> 8 players, observers enabled
/// let key = MatchKey::from_raw(u32::from_le_bytes([0x00, 3, 6, 0b10]));
///
/// assert_eq!(key.map(), 3);
/// assert_eq!(key.player_limit(), 8);
/// assert_eq!(key.spectator_limit(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey(u32);

impl MatchKey {
    /// Wrap a raw descriptor value.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw descriptor value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn byte(self, index: usize) -> u8 {
        self.0.to_le_bytes()[index]
    }

    /// Game type flag (byte 0, bit 0).
    #[must_use]
    pub const fn game_type(self) -> u8 {
        self.byte(0) & 1
    }

    /// Public type flag (byte 0, bit 1).
    #[must_use]
    pub const fn public_type(self) -> u8 {
        (self.byte(0) >> 1) & 1
    }

    /// Join auth flag (byte 0, bit 2).
    #[must_use]
    pub const fn join_auth(self) -> u8 {
        (self.byte(0) >> 2) & 1
    }

    /// Rule selector (byte 0, bits 4-7).
    #[must_use]
    pub const fn rule(self) -> RuleId {
        RuleId::new(self.byte(0) >> 4)
    }

    /// Map id (byte 1).
    #[must_use]
    pub const fn map(self) -> u8 {
        self.byte(1)
    }

    /// Whether observer slots are enabled (byte 3, bit 1).
    #[must_use]
    pub const fn is_observe_enabled(self) -> bool {
        (self.byte(3) >> 1) & 1 != 0
    }

    /// Player limit mapped from the capacity code (byte 2).
    ///
    /// Unmapped codes yield 0: a degenerate but valid configuration that
    /// downstream roster sizing must handle without faulting.
    #[must_use]
    pub const fn player_limit(self) -> u32 {
        match self.byte(2) {
            8 => 12,
            7 => 10,
            6 => 8,
            5 => 6,
            3 => 4,
            _ => 0,
        }
    }

    /// Observer slots: the room capacity left over by the player limit,
    /// or 0 when observing is disabled.
    #[must_use]
    pub const fn spectator_limit(self) -> u32 {
        if self.is_observe_enabled() {
            ROOM_SLOTS - self.player_limit()
        } else {
            0
        }
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MatchKey({:#010x})", self.0)
    }
}
