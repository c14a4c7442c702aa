//! Per-facility stay records keyed by vehicle.
//!
//! Each vehicle maps to its stays in insertion order. At most one stay per
//! vehicle is open, and when one is open it is the last in the list, since
//! a new stay can only be opened once the previous one is closed.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{Amount, Date, LedgerError, LedgerResult, Timestamp, VehicleId};

/// One vehicle's entry, and once it has left, its exit and fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayRecord {
    vehicle: VehicleId,
    entry:   Timestamp,
    exit:    Option<Timestamp>,
    fee:     Option<Amount>,
}

impl StayRecord {
    fn open(vehicle: VehicleId, entry: Timestamp) -> Self {
        Self {
            vehicle,
            entry,
            exit: None,
            fee: None,
        }
    }

    pub const fn vehicle(&self) -> &VehicleId {
        &self.vehicle
    }

    pub const fn entry(&self) -> Timestamp {
        self.entry
    }

    pub const fn exit(&self) -> Option<Timestamp> {
        self.exit
    }

    pub const fn fee(&self) -> Option<Amount> {
        self.fee
    }

    /// Still inside: no exit recorded yet
    pub const fn is_open(&self) -> bool {
        self.exit.is_none()
    }
}

/// A completed stay that ended on the requested day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCharge {
    pub vehicle: VehicleId,
    pub exit:    Timestamp,
    pub fee:     Amount,
}

/// Total fees of the stays that ended on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date:  Date,
    pub total: Amount,
}

/// Restartable iterator over one vehicle's stays, oldest first
pub type History<'a> = std::slice::Iter<'a, StayRecord>;

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: HashMap<VehicleId, Vec<StayRecord>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the table for `capacity` distinct vehicles
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Appends an open stay for `vehicle`.
    ///
    /// # Errors
    /// Returns `LedgerError::DuplicateOpenStay` if the vehicle is already inside.
    pub fn open_stay(&mut self, vehicle: &VehicleId, entry: Timestamp) -> LedgerResult<()> {
        if self.open_stay_of(vehicle).is_some() {
            return Err(LedgerError::DuplicateOpenStay(vehicle.clone()));
        }
        self.records
            .entry(vehicle.clone())
            .or_default()
            .push(StayRecord::open(vehicle.clone(), entry));
        Ok(())
    }

    /// Completes the vehicle's open stay with its exit time and fee.
    ///
    /// # Errors
    /// Returns `LedgerError::NoOpenStay` if the vehicle has no open stay.
    pub fn close_stay(
        &mut self,
        vehicle: &VehicleId,
        exit: Timestamp,
        fee: Amount,
    ) -> LedgerResult<&StayRecord> {
        let record = self
            .records
            .get_mut(vehicle)
            .and_then(|stays| stays.last_mut())
            .filter(|record| record.is_open())
            .ok_or_else(|| LedgerError::NoOpenStay(vehicle.clone()))?;

        record.exit = Some(exit);
        record.fee = Some(fee);
        Ok(record)
    }

    pub fn open_stay_of(&self, vehicle: &VehicleId) -> Option<&StayRecord> {
        self.records
            .get(vehicle)
            .and_then(|stays| stays.last())
            .filter(|record| record.is_open())
    }

    /// Stays of `vehicle` in insertion order; empty for an unknown vehicle
    pub fn history(&self, vehicle: &VehicleId) -> History<'_> {
        self.records
            .get(vehicle)
            .map_or(&[][..], Vec::as_slice)
            .iter()
    }

    fn completed(&self) -> impl Iterator<Item = (&StayRecord, Timestamp, Amount)> {
        self.records
            .values()
            .flatten()
            .filter_map(|record| Some((record, record.exit?, record.fee?)))
    }

    /// Completed stays whose exit falls on `date`, ordered by exit time then vehicle
    pub fn completed_on(&self, date: Date) -> Vec<DailyCharge> {
        let mut charges: Vec<DailyCharge> = self
            .completed()
            .filter(|(_, exit, _)| exit.date() == date)
            .map(|(record, exit, fee)| DailyCharge {
                vehicle: record.vehicle.clone(),
                exit,
                fee,
            })
            .collect();
        charges.sort_by(|a, b| a.exit.cmp(&b.exit).then_with(|| a.vehicle.cmp(&b.vehicle)));
        charges
    }

    /// Fees of all completed stays summed per exit day, oldest day first
    pub fn revenue_by_day(&self) -> Vec<DailyRevenue> {
        let mut totals: BTreeMap<Date, Amount> = BTreeMap::new();
        for (_, exit, fee) in self.completed() {
            let total = totals.entry(exit.date()).or_default();
            *total = *total + fee;
        }
        totals
            .into_iter()
            .map(|(date, total)| DailyRevenue { date, total })
            .collect()
    }

    /// Distinct vehicles with at least one stay
    pub fn vehicle_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
