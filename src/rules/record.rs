//! Per-player scoring records.
//!
//! Every mode accumulates scores into a record that serializes to a fixed,
//! declared little-endian field order: the base fields below come first,
//! then the mode's own fields in their declared order. The order is a
//! contract in its own right, not an artifact of who calls whom.

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::core::AccountId;

/// Scoring fields shared by every mode.
///
/// ## Wire layout (little-endian)
///
/// | offset | field        | type |
/// |--------|--------------|------|
/// | 0      | account id   | u64  |
/// | 8      | total score  | u32  |
/// | 12     | kills        | i32  |
/// | 16     | kill assists | i32  |
/// | 20     | deaths       | i32  |
/// | 24     | suicides     | i32  |
///
/// With `is_result` set, two result-only fields follow:
///
/// | offset | field    | type |
/// |--------|----------|------|
/// | 28     | exp gain | u32  |
/// | 32     | pen gain | u32  |
///
/// Mode fields start at offset 28 (36 for results).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBase {
    /// Owning account.
    pub account_id: AccountId,
    /// Kills credited this match.
    pub kills: i32,
    /// Kill assists credited this match.
    pub kill_assists: i32,
    /// Deaths this match.
    pub deaths: i32,
    /// Self-inflicted deaths this match.
    pub suicides: i32,
    /// Experience awarded at match end. Result-only on the wire.
    pub exp_gain: u32,
    /// Currency awarded at match end. Result-only on the wire.
    pub pen_gain: u32,
}

impl RecordBase {
    /// Serialized base size without result fields.
    pub const SIZE: usize = 28;
    /// Serialized base size with result fields.
    pub const RESULT_SIZE: usize = 36;

    /// Create a zeroed base record for an account.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            kills: 0,
            kill_assists: 0,
            deaths: 0,
            suicides: 0,
            exp_gain: 0,
            pen_gain: 0,
        }
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::new(self.account_id);
    }

    /// Write the base fields in declared order.
    ///
    /// The total score is derived by the owning mode and passed in; it is
    /// never stored here.
    pub fn serialize(&self, buf: &mut BytesMut, total_score: u32, is_result: bool) {
        buf.put_u64_le(self.account_id.raw());
        buf.put_u32_le(total_score);
        buf.put_i32_le(self.kills);
        buf.put_i32_le(self.kill_assists);
        buf.put_i32_le(self.deaths);
        buf.put_i32_le(self.suicides);
        if is_result {
            buf.put_u32_le(self.exp_gain);
            buf.put_u32_le(self.pen_gain);
        }
    }
}

/// Per-player, per-mode scoring accumulator.
///
/// `total_score` is always derived from the current counters, never cached.
/// `reset` establishes the canonical starting values for a fresh match;
/// modes may start counters at nonzero weighting constants.
pub trait ScoreRecord {
    /// The shared base counters.
    fn base(&self) -> &RecordBase;

    /// Mutable access to the shared base counters.
    fn base_mut(&mut self) -> &mut RecordBase;

    /// Mode-specific weighted total, recomputed on every access.
    fn total_score(&self) -> u32;

    /// Restore the canonical starting values for a fresh match.
    fn reset(&mut self);

    /// Write base fields, then mode fields, in declared order.
    ///
    /// `is_result` gates the base record's result-only fields.
    fn serialize(&self, buf: &mut BytesMut, is_result: bool);

    /// Owning account.
    fn account_id(&self) -> AccountId {
        self.base().account_id
    }
}
