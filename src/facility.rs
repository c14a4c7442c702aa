use serde::{Deserialize, Serialize};

use crate::{
    Amount, Date, LedgerConfig, LedgerError, LedgerResult, RateSchedule, Timestamp, VehicleId,
    billing::compute_fee,
    prelude::*,
    store::{DailyCharge, DailyRevenue, History, RecordStore, StayRecord},
};

/// Registry-assigned facility number, increasing in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize, Deserialize)]
pub struct FacilityId(u32);

/// A parking lot: capacity, prices, and the stays recorded in it.
///
/// Events must arrive in time order. `last_seen` holds a copy of the latest
/// accepted event time, and any entry or exit before it is rejected.
#[derive(Debug, Clone)]
pub struct Facility {
    id:        FacilityId,
    name:      String,
    capacity:  u32,
    available: u32,
    schedule:  RateSchedule,
    store:     RecordStore,
    last_seen: Option<Timestamp>,
}

impl Facility {
    /// # Errors
    /// Returns `LedgerError::InvalidCapacity` if `capacity` is zero.
    pub fn new(
        id: FacilityId,
        name: impl Into<String>,
        capacity: u32,
        schedule: RateSchedule,
        config: &LedgerConfig,
    ) -> LedgerResult<Self> {
        if capacity == 0 {
            return Err(LedgerError::InvalidCapacity(capacity));
        }
        Ok(Self {
            id,
            name: name.into(),
            capacity,
            available: capacity,
            schedule,
            store: RecordStore::with_capacity(config.store_capacity),
            last_seen: None,
        })
    }

    pub const fn id(&self) -> FacilityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    pub const fn available_spots(&self) -> u32 {
        self.available
    }

    pub const fn occupied(&self) -> u32 {
        self.capacity - self.available
    }

    pub const fn is_full(&self) -> bool {
        self.available == 0
    }

    pub const fn schedule(&self) -> &RateSchedule {
        &self.schedule
    }

    pub const fn last_seen(&self) -> Option<Timestamp> {
        self.last_seen
    }

    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn has_open_stay(&self, vehicle: &VehicleId) -> bool {
        self.store.open_stay_of(vehicle).is_some()
    }

    fn check_order(&self, at: Timestamp) -> LedgerResult<()> {
        match self.last_seen {
            Some(last_seen) if !at.is_after_or_equal(&last_seen) => {
                Err(LedgerError::OutOfOrderEvent { at, last_seen })
            }
            _ => Ok(()),
        }
    }

    /// Lets a vehicle in and returns the spots left.
    ///
    /// # Errors
    /// `Full`, `DuplicateOpenStay` or `OutOfOrderEvent`, checked in that
    /// order. Nothing changes on error.
    pub fn record_entry(&mut self, vehicle: &VehicleId, at: Timestamp) -> LedgerResult<u32> {
        self.try_entry(vehicle, at).inspect_err(LedgerError::log)
    }

    fn try_entry(&mut self, vehicle: &VehicleId, at: Timestamp) -> LedgerResult<u32> {
        if self.is_full() {
            return Err(LedgerError::Full(self.name.clone()));
        }
        if self.has_open_stay(vehicle) {
            return Err(LedgerError::DuplicateOpenStay(vehicle.clone()));
        }
        self.check_order(at)?;

        self.store.open_stay(vehicle, at)?;
        self.available -= 1;
        self.last_seen = Some(at);

        tracing::debug!(
            facility = %self.name,
            %vehicle,
            %at,
            available = self.available,
            "Vehicle entered"
        );
        Ok(self.available)
    }

    /// Lets a vehicle out, bills the stay and returns the completed record.
    ///
    /// # Errors
    /// `NoOpenStay` or `OutOfOrderEvent`, checked in that order. Nothing
    /// changes on error.
    pub fn record_exit(&mut self, vehicle: &VehicleId, at: Timestamp) -> LedgerResult<StayRecord> {
        self.try_exit(vehicle, at).inspect_err(LedgerError::log)
    }

    fn try_exit(&mut self, vehicle: &VehicleId, at: Timestamp) -> LedgerResult<StayRecord> {
        let entry = self
            .store
            .open_stay_of(vehicle)
            .map(StayRecord::entry)
            .ok_or_else(|| LedgerError::NoOpenStay(vehicle.clone()))?;
        self.check_order(at)?;
        let fee = compute_fee(&self.schedule, &entry, &at)?;

        let record = self.store.close_stay(vehicle, at, fee)?.clone();
        self.available += 1;
        self.last_seen = Some(at);

        tracing::debug!(
            facility = %self.name,
            %vehicle,
            %at,
            %fee,
            available = self.available,
            "Vehicle left"
        );
        Ok(record)
    }

    pub fn history(&self, vehicle: &VehicleId) -> History<'_> {
        self.store.history(vehicle)
    }

    pub fn completed_on(&self, date: Date) -> Vec<DailyCharge> {
        self.store.completed_on(date)
    }

    pub fn revenue_by_day(&self) -> Vec<DailyRevenue> {
        self.store.revenue_by_day()
    }

    /// Sum of all fees billed so far
    pub fn total_revenue(&self) -> Amount {
        self.revenue_by_day().into_iter().map(|day| day.total).sum()
    }
}
