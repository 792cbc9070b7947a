//! Captain mode scoring record.

use bytes::{BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::core::AccountId;
use crate::rules::{RecordBase, ScoreRecord};

/// Per-player captain-mode accumulator.
///
/// A fresh record starts from the canonical weights; [`reset`](ScoreRecord::reset)
/// restores them. The total is always derived:
///
/// `kill_points * 2 + kill_point_assists + captain_kills * 5 + heal_point_assists`
///
/// ## Wire layout
///
/// Base fields first (see [`RecordBase`]), then, as little-endian `i32`s:
/// kill points, kill point assists, heal point assists, four reserved
/// words, captain kills, domination, deaths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptainRecord {
    base: RecordBase,
    /// Points from ordinary kills.
    pub kill_points: i32,
    /// Points from kill assists.
    pub kill_point_assists: i32,
    /// Points from heal assists.
    pub heal_point_assists: i32,
    /// Reserved wire slots between the assist and captain counters.
    reserved: [i32; 4],
    /// Captains eliminated.
    pub captain_kills: i32,
    /// Domination counter.
    pub domination: i32,
    /// Deaths in this mode.
    pub deaths: i32,
}

impl CaptainRecord {
    /// Number of mode-specific wire fields.
    const MODE_FIELDS: usize = 10;

    /// Serialized size without result fields.
    pub const SIZE: usize = RecordBase::SIZE + Self::MODE_FIELDS * 4;
    /// Serialized size with result fields.
    pub const RESULT_SIZE: usize = RecordBase::RESULT_SIZE + Self::MODE_FIELDS * 4;

    /// Create a record carrying the canonical starting weights.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        let mut record = Self {
            base: RecordBase::new(account_id),
            kill_points: 0,
            kill_point_assists: 0,
            heal_point_assists: 0,
            reserved: [0; 4],
            captain_kills: 0,
            domination: 0,
            deaths: 0,
        };
        record.reset();
        record
    }
}

impl ScoreRecord for CaptainRecord {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn total_score(&self) -> u32 {
        let total = self.kill_points * 2
            + self.kill_point_assists
            + self.captain_kills * 5
            + self.heal_point_assists;
        total.max(0) as u32
    }

    fn reset(&mut self) {
        self.base.reset();
        self.kill_points = 10;
        self.kill_point_assists = 5;
        self.heal_point_assists = 1;
        self.reserved = [0; 4];
        self.captain_kills = 2;
        self.domination = 0;
        self.deaths = 0;
    }

    fn serialize(&self, buf: &mut BytesMut, is_result: bool) {
        self.base.serialize(buf, self.total_score(), is_result);

        buf.put_i32_le(self.kill_points);
        buf.put_i32_le(self.kill_point_assists);
        buf.put_i32_le(self.heal_point_assists);
        for word in self.reserved {
            buf.put_i32_le(word);
        }
        buf.put_i32_le(self.captain_kills);
        buf.put_i32_le(self.domination);
        buf.put_i32_le(self.deaths);
    }
}
