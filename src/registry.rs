//! The set of registered facilities.
//!
//! Owns every `Facility` and with it every record store. Removing a
//! facility drops its records in the same step; later queries by its name
//! fail with `UnknownFacility`.

use serde::Serialize;

use crate::{
    Date, Facility, FacilityId, LedgerConfig, LedgerError, LedgerResult, RateSchedule, Timestamp,
    VehicleId,
    store::{DailyCharge, DailyRevenue, History, StayRecord},
};

/// One stay of a vehicle, tagged with the facility it happened in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry<'a> {
    pub facility: &'a str,
    pub stay:     &'a StayRecord,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    config:     LedgerConfig,
    facilities: Vec<Facility>,
    next_id:    u32,
}

impl Registry {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            facilities: Vec::new(),
            next_id: 0,
        }
    }

    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Registers a new facility.
    ///
    /// # Errors
    /// `FacilityExists`, `TooManyFacilities` or `InvalidCapacity`, checked
    /// in that order.
    pub fn create(
        &mut self,
        name: &str,
        capacity: u32,
        schedule: RateSchedule,
    ) -> LedgerResult<&Facility> {
        self.try_create(name, capacity, schedule)
            .inspect_err(LedgerError::log)
    }

    fn try_create(&mut self, name: &str, capacity: u32, schedule: RateSchedule) -> LedgerResult<&Facility> {
        if self.find(name).is_some() {
            return Err(LedgerError::FacilityExists(name.to_owned()));
        }
        if self.facilities.len() >= self.config.max_facilities {
            return Err(LedgerError::TooManyFacilities(self.config.max_facilities));
        }

        let id = FacilityId::from(self.next_id);
        let facility = Facility::new(id, name, capacity, schedule, &self.config)?;
        self.next_id += 1;

        tracing::info!(%id, facility = name, capacity, "Facility created");
        let index = self.facilities.len();
        self.facilities.push(facility);
        Ok(&self.facilities[index])
    }

    pub fn find(&self, name: &str) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.name() == name)
    }

    fn get(&self, name: &str) -> LedgerResult<&Facility> {
        self.find(name)
            .ok_or_else(|| LedgerError::UnknownFacility(name.to_owned()))
    }

    fn get_mut(&mut self, name: &str) -> LedgerResult<&mut Facility> {
        self.facilities
            .iter_mut()
            .find(|f| f.name() == name)
            .ok_or_else(|| LedgerError::UnknownFacility(name.to_owned()))
    }

    /// Unregisters a facility, handing back ownership of it and its records.
    ///
    /// # Errors
    /// Returns `LedgerError::UnknownFacility` if no facility has that name.
    pub fn remove(&mut self, name: &str) -> LedgerResult<Facility> {
        let index = self
            .facilities
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| LedgerError::UnknownFacility(name.to_owned()))
            .inspect_err(LedgerError::log)?;
        let facility = self.facilities.remove(index);

        tracing::info!(
            id = %facility.id(),
            facility = name,
            records = facility.store().record_count(),
            "Facility removed"
        );
        Ok(facility)
    }

    /// Facilities in creation order
    pub fn by_id(&self) -> Vec<&Facility> {
        let mut facilities: Vec<&Facility> = self.facilities.iter().collect();
        facilities.sort_by_key(|f| f.id());
        facilities
    }

    /// Facilities in alphabetical order of name
    pub fn by_name(&self) -> Vec<&Facility> {
        let mut facilities: Vec<&Facility> = self.facilities.iter().collect();
        facilities.sort_by(|a, b| a.name().cmp(b.name()));
        facilities
    }

    /// Facility the vehicle is currently parked in, if any
    pub fn parked_in(&self, vehicle: &VehicleId) -> Option<&Facility> {
        self.facilities.iter().find(|f| f.has_open_stay(vehicle))
    }

    /// Lets a vehicle into the named facility and returns the spots left.
    ///
    /// # Errors
    /// `UnknownFacility`, `Full`, `DuplicateOpenStay` (open stay in any
    /// facility), then the facility's own ordering check.
    pub fn record_entry(&mut self, facility: &str, vehicle: &VehicleId, at: Timestamp) -> LedgerResult<u32> {
        self.check_entry(facility, vehicle)
            .inspect_err(LedgerError::log)?;
        self.get_mut(facility)?.record_entry(vehicle, at)
    }

    fn check_entry(&self, facility: &str, vehicle: &VehicleId) -> LedgerResult<()> {
        let target = self.get(facility)?;
        if target.is_full() {
            return Err(LedgerError::Full(target.name().to_owned()));
        }
        if self.parked_in(vehicle).is_some() {
            return Err(LedgerError::DuplicateOpenStay(vehicle.clone()));
        }
        Ok(())
    }

    /// Lets a vehicle out of the named facility and returns the billed stay.
    ///
    /// # Errors
    /// `UnknownFacility`, then the facility's own exit checks.
    pub fn record_exit(
        &mut self,
        facility: &str,
        vehicle: &VehicleId,
        at: Timestamp,
    ) -> LedgerResult<StayRecord> {
        self.get_mut(facility)
            .inspect_err(LedgerError::log)?
            .record_exit(vehicle, at)
    }

    /// Every stay of `vehicle`, facilities alphabetically, stays oldest first
    pub fn vehicle_history(&self, vehicle: &VehicleId) -> Vec<HistoryEntry<'_>> {
        self.by_name()
            .into_iter()
            .flat_map(|facility| {
                facility.history(vehicle).map(move |stay| HistoryEntry {
                    facility: facility.name(),
                    stay,
                })
            })
            .collect()
    }

    /// # Errors
    /// Returns `LedgerError::UnknownFacility` if no facility has that name.
    pub fn facility_history(&self, facility: &str, vehicle: &VehicleId) -> LedgerResult<History<'_>> {
        Ok(self.get(facility)?.history(vehicle))
    }

    /// # Errors
    /// Returns `LedgerError::UnknownFacility` if no facility has that name.
    pub fn revenue_by_day(&self, facility: &str) -> LedgerResult<Vec<DailyRevenue>> {
        Ok(self.get(facility)?.revenue_by_day())
    }

    /// # Errors
    /// Returns `LedgerError::UnknownFacility` if no facility has that name.
    pub fn completed_on(&self, facility: &str, date: Date) -> LedgerResult<Vec<DailyCharge>> {
        Ok(self.get(facility)?.completed_on(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cents, date, plate, schedule, ts};

    fn registry_with(names: &[&str]) -> Registry {
        let mut registry = Registry::new(LedgerConfig::default());
        for name in names {
            registry
                .create(name, 10, schedule(100, 150, 1000))
                .expect("facility is created");
        }
        registry
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let registry = registry_with(&["Saldanha", "Alameda", "Oriente"]);
        let ids: Vec<u32> = registry.by_id().iter().map(|f| f.id().into()).collect();
        assert_eq!(ids, vec![0, 1, 2]);

        let names: Vec<&str> = registry.by_name().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Alameda", "Oriente", "Saldanha"]);
    }

    #[test]
    fn test_create_rejections() {
        let mut registry = Registry::new(LedgerConfig::default().with_max_facilities(2));
        registry
            .create("Saldanha", 10, schedule(100, 150, 1000))
            .expect("facility is created");

        let err = registry
            .create("Saldanha", 10, schedule(100, 150, 1000))
            .expect_err("name already taken");
        assert_eq!(err, LedgerError::FacilityExists("Saldanha".to_owned()));

        let err = registry
            .create("Alameda", 0, schedule(100, 150, 1000))
            .expect_err("zero capacity");
        assert_eq!(err, LedgerError::InvalidCapacity(0));

        registry
            .create("Alameda", 5, schedule(100, 150, 1000))
            .expect("facility is created");
        let err = registry
            .create("Oriente", 5, schedule(100, 150, 1000))
            .expect_err("limit reached");
        assert_eq!(err, LedgerError::TooManyFacilities(2));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut registry = registry_with(&["Saldanha", "Alameda"]);
        registry.remove("Saldanha").expect("facility exists");
        let created = registry
            .create("Saldanha", 10, schedule(100, 150, 1000))
            .expect("name is free again");
        assert_eq!(created.id(), FacilityId::from(2));
    }

    #[test]
    fn test_vehicle_inside_elsewhere_cannot_enter() {
        let mut registry = registry_with(&["Saldanha", "Alameda"]);
        let car = plate("AA-00-AA");
        registry
            .record_entry("Saldanha", &car, ts(2024, 1, 1, 8, 0))
            .expect("entry is accepted");

        let err = registry
            .record_entry("Alameda", &car, ts(2024, 1, 1, 9, 0))
            .expect_err("already parked in Saldanha");
        assert_eq!(err, LedgerError::DuplicateOpenStay(car.clone()));
        assert_eq!(registry.parked_in(&car).map(Facility::name), Some("Saldanha"));
        assert_eq!(
            registry.find("Alameda").map(Facility::last_seen),
            Some(None)
        );
    }

    #[test]
    fn test_full_is_reported_before_open_stay_elsewhere() {
        let mut registry = registry_with(&["Saldanha"]);
        registry
            .create("Alameda", 1, schedule(100, 150, 1000))
            .expect("facility is created");
        let car = plate("AA-00-AA");
        registry
            .record_entry("Saldanha", &car, ts(2024, 1, 1, 8, 0))
            .expect("entry is accepted");
        registry
            .record_entry("Alameda", &plate("BB-11-BB"), ts(2024, 1, 1, 8, 30))
            .expect("entry is accepted");

        let err = registry
            .record_entry("Alameda", &car, ts(2024, 1, 1, 9, 0))
            .expect_err("Alameda is full and the car is in Saldanha");
        assert_eq!(err, LedgerError::Full("Alameda".to_owned()));
        assert_eq!(registry.parked_in(&car).map(Facility::name), Some("Saldanha"));
    }

    #[test]
    fn test_overflowing_fee_keeps_the_stay_open() {
        let mut registry = Registry::new(LedgerConfig::default());
        registry
            .create("Luxury", 1, schedule(1, 2, 9_000_000_000_000_000_000))
            .expect("facility is created");
        let car = plate("AA-00-AA");
        registry
            .record_entry("Luxury", &car, ts(2023, 1, 1, 0, 0))
            .expect("entry is accepted");

        let err = registry
            .record_exit("Luxury", &car, ts(2023, 1, 3, 0, 0))
            .expect_err("two days overflow the fee");
        assert!(matches!(err, LedgerError::FeeOverflow { .. }));

        let luxury = registry.find("Luxury").expect("facility exists");
        assert!(luxury.has_open_stay(&car));
        assert_eq!(luxury.available_spots(), 0);
        assert_eq!(luxury.last_seen(), Some(ts(2023, 1, 1, 0, 0)));
    }

    #[test]
    fn test_unknown_facility() {
        let mut registry = registry_with(&["Saldanha"]);
        let car = plate("AA-00-AA");
        let unknown = LedgerError::UnknownFacility("Nowhere".to_owned());

        assert_eq!(registry.record_entry("Nowhere", &car, ts(2024, 1, 1, 8, 0)), Err(unknown.clone()));
        assert_eq!(registry.record_exit("Nowhere", &car, ts(2024, 1, 1, 8, 0)), Err(unknown.clone()));
        assert_eq!(registry.revenue_by_day("Nowhere"), Err(unknown.clone()));
        assert_eq!(registry.remove("Nowhere").map(|f| f.id()), Err(unknown));
    }

    #[test]
    fn test_removed_facility_history_is_unknown() {
        let mut registry = registry_with(&["Saldanha", "Alameda"]);
        let car = plate("AA-00-AA");
        registry
            .record_entry("Saldanha", &car, ts(2024, 1, 1, 8, 0))
            .expect("entry is accepted");
        registry
            .record_exit("Saldanha", &car, ts(2024, 1, 1, 9, 0))
            .expect("exit is accepted");

        let removed = registry.remove("Saldanha").expect("facility exists");
        assert_eq!(removed.store().record_count(), 1);

        assert!(matches!(
            registry.facility_history("Saldanha", &car),
            Err(LedgerError::UnknownFacility(_))
        ));
        assert!(matches!(
            registry.completed_on("Saldanha", date(2024, 1, 1)),
            Err(LedgerError::UnknownFacility(_))
        ));
        assert!(registry.vehicle_history(&car).is_empty());
        assert!(registry.find("Saldanha").is_none());
    }

    #[test]
    fn test_vehicle_history_merges_alphabetically() {
        let mut registry = registry_with(&["Saldanha", "Alameda"]);
        let car = plate("AA-00-AA");

        registry
            .record_entry("Saldanha", &car, ts(2024, 1, 1, 8, 0))
            .expect("entry is accepted");
        registry
            .record_exit("Saldanha", &car, ts(2024, 1, 1, 9, 0))
            .expect("exit is accepted");
        registry
            .record_entry("Alameda", &car, ts(2024, 1, 2, 8, 0))
            .expect("entry is accepted");
        registry
            .record_exit("Alameda", &car, ts(2024, 1, 2, 8, 45))
            .expect("exit is accepted");
        registry
            .record_entry("Saldanha", &car, ts(2024, 1, 3, 8, 0))
            .expect("entry is accepted");

        let history = registry.vehicle_history(&car);
        let summary: Vec<(&str, u8, bool)> = history
            .iter()
            .map(|h| (h.facility, h.stay.entry().day(), h.stay.is_open()))
            .collect();
        assert_eq!(
            summary,
            vec![("Alameda", 2, false), ("Saldanha", 1, false), ("Saldanha", 3, true)]
        );
        assert_eq!(history[0].stay.fee(), Some(cents(300)));
    }

    #[test]
    fn test_exit_bills_with_facility_schedule() {
        let mut registry = Registry::new(LedgerConfig::default());
        registry
            .create("Cheap", 2, schedule(25, 50, 500))
            .expect("facility is created");
        let car = plate("00-AA-00");

        registry
            .record_entry("Cheap", &car, ts(2023, 3, 1, 10, 0))
            .expect("entry is accepted");
        let stay = registry
            .record_exit("Cheap", &car, ts(2023, 3, 4, 10, 10))
            .expect("exit is accepted");
        assert_eq!(stay.fee(), Some(cents(3 * 500 + 25)));
        assert_eq!(
            registry.revenue_by_day("Cheap"),
            Ok(vec![DailyRevenue {
                date:  date(2023, 3, 4),
                total: cents(1525),
            }])
        );
    }
}
