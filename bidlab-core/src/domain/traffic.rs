//! Traffic records — the per-slot bid opportunities.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of discrete time slots in one budget period (48 half-hour slots).
pub const TOTAL_SLOTS: usize = 48;

/// One bid opportunity observed in a time slot.
///
/// `p_value` is the estimated conversion probability of the impression;
/// `least_winning_cost` is the minimum price that would have won the
/// corresponding auction in the observed market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub time_slot: u32,
    pub p_value: f64,
    pub least_winning_cost: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TrafficError {
    #[error("time slot {slot} out of range (0..{TOTAL_SLOTS})")]
    SlotOutOfRange { slot: u32 },
}

/// Read-only collection of traffic records, grouped by time slot.
///
/// Grouping happens once at construction so the simulation loop reads each
/// slot's records as a contiguous slice without re-scanning raw rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSource {
    slots: Vec<Vec<TrafficRecord>>,
}

impl TrafficSource {
    /// Group raw records by slot index. Slot indices are validated here,
    /// before the simulation starts; the hot loop does not re-check them.
    pub fn from_records(records: Vec<TrafficRecord>) -> Result<Self, TrafficError> {
        let mut slots: Vec<Vec<TrafficRecord>> = vec![Vec::new(); TOTAL_SLOTS];
        for record in records {
            let slot = record.time_slot as usize;
            if slot >= TOTAL_SLOTS {
                return Err(TrafficError::SlotOutOfRange {
                    slot: record.time_slot,
                });
            }
            slots[slot].push(record);
        }
        Ok(Self { slots })
    }

    /// Records for one slot. Empty slice for slots with no traffic.
    pub fn records_for_slot(&self, slot: usize) -> &[TrafficRecord] {
        &self.slots[slot]
    }

    /// Total record count across all slots.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }
}
