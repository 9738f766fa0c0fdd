//! Booking lifecycle orchestration.
//!
//! [`BookingService`] drives a request through expansion, conflict
//! detection and persistence:
//!
//! 1. Expand the request. Invalid input stops here; nothing is stored.
//! 2. An empty expansion is reported as [`BookingOutcome::NoOccurrences`].
//! 3. Inside one unit of work, check every occurrence for conflicts.
//! 4. Any conflict rejects the whole request with [`Error::Conflict`].
//! 5. Otherwise persist every occurrence in the same unit.
//!
//! Steps 3 to 5 share a unit of work so two overlapping requests for the
//! same room cannot both succeed.

use crate::booking::{Booking, BookingId};
use crate::config::Config;
use crate::conflict::ConflictDetector;
use crate::error::{Error, Result};
use crate::recurrence::{RecurrenceExpander, RecurrenceRequest};
use crate::store::{BookingCriteria, BookingStore};

/// The result of a create or update request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum BookingOutcome {
    /// Every occurrence was stored. Bookings carry their ids, in start order.
    Committed(Vec<Booking>),
    /// The request was valid but expanded to zero occurrences, so nothing
    /// was stored. This usually means the date range is shorter than the
    /// recurrence period.
    NoOccurrences,
}

impl BookingOutcome {
    /// Returns the stored bookings, empty for [`BookingOutcome::NoOccurrences`].
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        match self {
            Self::Committed(bookings) => bookings,
            Self::NoOccurrences => &[],
        }
    }

    /// Returns true if anything was stored.
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// Consumes the outcome, returning the stored bookings.
    #[must_use]
    pub fn into_bookings(self) -> Vec<Booking> {
        match self {
            Self::Committed(bookings) => bookings,
            Self::NoOccurrences => Vec::new(),
        }
    }
}

/// Creates, replaces, removes and queries bookings over a [`BookingStore`].
///
/// # Examples
///
/// ```
/// use roombook::{BookingService, Error, MemoryStore, RecurrenceRequest};
///
/// let mut service = BookingService::new(MemoryStore::new());
///
/// let first = RecurrenceRequest::new("R1", "alice")
///     .with_start("2024-01-01", "09:00")
///     .with_end("2024-01-01", "10:00");
/// assert!(service.create(&first).unwrap().is_committed());
///
/// let clash = RecurrenceRequest::new("R1", "bob")
///     .with_start("2024-01-01", "09:30")
///     .with_end("2024-01-01", "10:30");
/// assert!(matches!(service.create(&clash), Err(Error::Conflict { .. })));
/// ```
#[derive(Debug)]
pub struct BookingService<S> {
    store: S,
    expander: RecurrenceExpander,
}

impl<S: BookingStore> BookingService<S> {
    /// Creates a service with the default expander.
    pub fn new(store: S) -> Self {
        Self {
            store,
            expander: RecurrenceExpander::new(),
        }
    }

    /// Creates a service whose expander follows `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured default weekdays are invalid.
    pub fn from_config(store: S, config: &Config) -> Result<Self> {
        Ok(Self {
            store,
            expander: RecurrenceExpander::from_config(config)?,
        })
    }

    /// Replaces the expander.
    #[must_use]
    pub fn with_expander(mut self, expander: RecurrenceExpander) -> Self {
        self.expander = expander;
        self
    }

    /// Returns the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the expander used for requests.
    pub const fn expander(&self) -> &RecurrenceExpander {
        &self.expander
    }

    /// Consumes the service, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Expands a request without touching storage.
    ///
    /// # Errors
    ///
    /// Returns the expander's validation errors.
    pub fn expand(&self, request: &RecurrenceRequest) -> Result<Vec<Booking>> {
        self.expander.expand(request)
    }

    /// Books every occurrence of `request`, or none of them.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] / [`Error::InvalidRecurrenceType`] /
    ///   [`Error::Validation`] for a malformed request
    /// - [`Error::Conflict`] listing every overlap if any occurrence
    ///   collides with a committed booking
    /// - [`Error::StorageContention`] if the store stayed busy; the whole
    ///   request may be retried
    pub fn create(&mut self, request: &RecurrenceRequest) -> Result<BookingOutcome> {
        let occurrences = self.expander.expand(request)?;
        if occurrences.is_empty() {
            log::warn!(
                "{} request for room {} expands to no occurrences; nothing booked",
                request.recurrence_type,
                request.room_id
            );
            return Ok(BookingOutcome::NoOccurrences);
        }

        let saved = self.store.atomically(|repo| {
            let conflicts = ConflictDetector::new(repo).check_all(&occurrences, None)?;
            if !conflicts.is_empty() {
                return Err(Error::Conflict { conflicts });
            }
            repo.insert_all(&occurrences)
        });

        match &saved {
            Ok(bookings) => log::info!(
                "booked {} occurrence(s) of room {} for {}",
                bookings.len(),
                request.room_id,
                request.requester_id
            ),
            Err(Error::Conflict { conflicts }) => log::debug!(
                "rejected request for room {}: {} conflict(s)",
                request.room_id,
                conflicts.len()
            ),
            Err(_) => {}
        }

        saved.map(BookingOutcome::Committed)
    }

    /// Replaces booking `id` with the occurrences of `request`.
    ///
    /// The new occurrences are checked against every committed booking
    /// except `id` itself. The first occurrence keeps `id`; any further
    /// occurrences become new bookings. If `request` expands to nothing the
    /// stored booking is left untouched.
    ///
    /// # Errors
    ///
    /// As [`BookingService::create`], plus [`Error::NotFound`] if `id` is
    /// not stored.
    pub fn update(
        &mut self,
        id: BookingId,
        request: &RecurrenceRequest,
    ) -> Result<BookingOutcome> {
        let occurrences = self.expander.expand(request)?;
        if occurrences.is_empty() {
            log::warn!("update of booking {id} expands to no occurrences; booking left unchanged");
            return Ok(BookingOutcome::NoOccurrences);
        }

        let saved = self.store.atomically(|repo| {
            if repo.get(id)?.is_none() {
                return Err(Error::NotFound { id });
            }
            let conflicts = ConflictDetector::new(repo).check_all(&occurrences, Some(id))?;
            if !conflicts.is_empty() {
                return Err(Error::Conflict { conflicts });
            }
            repo.replace(id, &occurrences)
        })?;

        log::info!("replaced booking {id} with {} occurrence(s)", saved.len());
        Ok(BookingOutcome::Committed(saved))
    }

    /// Removes booking `id` and returns it. No conflict check is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not stored, or a storage error.
    pub fn delete(&mut self, id: BookingId) -> Result<Booking> {
        let removed = self.store.atomically(|repo| {
            let booking = repo.get(id)?.ok_or(Error::NotFound { id })?;
            repo.delete(id)?;
            Ok(booking)
        })?;
        log::info!("deleted booking {id} in room {}", removed.room_id());
        Ok(removed)
    }

    /// Fetches one booking.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        self.store.read(|repo| repo.get(id))
    }

    /// Lists bookings matching `criteria`, ordered by start then id.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list(&self, criteria: &BookingCriteria) -> Result<Vec<Booking>> {
        self.store.read(|repo| repo.list(criteria))
    }

    /// Lists every booking.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn list_all(&self) -> Result<Vec<Booking>> {
        self.list(&BookingCriteria::default())
    }

    /// Counts bookings matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn count(&self, criteria: &BookingCriteria) -> Result<usize> {
        self.store.read(|repo| repo.count(criteria))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingStatus;
    use crate::recurrence::RecurrenceType;
    use crate::store::MemoryStore;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn single(room: &str, day: u32, from: &str, to: &str) -> RecurrenceRequest {
        let date = format!("2024-01-{day:02}");
        RecurrenceRequest::new(room, "alice")
            .with_start(date.clone(), from)
            .with_end(date, to)
    }

    fn service() -> BookingService<MemoryStore> {
        BookingService::new(MemoryStore::new())
    }

    #[test]
    fn test_weekly_request_rejected_by_single_conflict() {
        let mut service = service();
        service.create(&single("R1", 1, "09:00", "10:00")).unwrap();

        let weekly = RecurrenceRequest::new("R1", "bob")
            .with_start("2024-01-01", "09:30")
            .with_end("2024-01-22", "10:30")
            .with_recurrence_type("WEEKLY");

        let occurrences = service.expand(&weekly).unwrap();
        let starts: Vec<_> = occurrences.iter().map(Booking::start_time).collect();
        assert_eq!(starts, vec![at(1, 9, 30), at(8, 9, 30), at(15, 9, 30)]);

        let err = service.create(&weekly).unwrap_err();
        let conflicts = err.conflicts().unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].occurrence.start(), at(1, 9, 30));
        assert_eq!(conflicts[0].recurrence_type, RecurrenceType::Weekly);
        assert_eq!(conflicts[0].existing.start_time(), at(1, 9, 0));

        // Jan 8 and Jan 15 were not stored either
        assert_eq!(service.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_all_or_nothing_on_last_occurrence_conflict() {
        let mut service = service();
        service.create(&single("R1", 4, "09:00", "10:00")).unwrap();

        let daily = RecurrenceRequest::new("R1", "bob")
            .with_start("2024-01-01", "09:30")
            .with_end("2024-01-05", "10:30")
            .with_recurrence_type("DAILY");
        assert!(matches!(
            service.create(&daily),
            Err(Error::Conflict { .. })
        ));
        assert_eq!(service.count(&BookingCriteria::new()).unwrap(), 1);
    }

    #[test]
    fn test_empty_expansion_is_no_op() {
        let mut service = service();
        let daily = RecurrenceRequest::new("R1", "alice")
            .with_start("2024-01-01", "09:00")
            .with_end("2024-01-01", "10:00")
            .with_recurrence_type("DAILY");

        let outcome = service.create(&daily).unwrap();
        assert_eq!(outcome, BookingOutcome::NoOccurrences);
        assert!(!outcome.is_committed());
        assert!(outcome.bookings().is_empty());
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_touching_bookings_both_succeed() {
        let mut service = service();
        service.create(&single("R1", 1, "10:00", "11:00")).unwrap();
        let outcome = service.create(&single("R1", 1, "11:00", "12:00")).unwrap();
        assert!(outcome.is_committed());
        assert_eq!(service.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_request_stores_nothing() {
        let mut service = service();
        let bad = single("R1", 1, "10:00", "11:00").with_recurrence_type("FORTNIGHTLY");
        assert!(matches!(
            service.create(&bad),
            Err(Error::InvalidRecurrenceType { .. })
        ));
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_committed_bookings_carry_ids() {
        let mut service = service();
        let daily = RecurrenceRequest::new("R1", "alice")
            .with_start("2024-01-01", "09:00")
            .with_end("2024-01-04", "10:00")
            .with_recurrence_type("DAILY")
            .with_status(BookingStatus::Confirmed);

        let saved = service.create(&daily).unwrap().into_bookings();
        assert_eq!(saved.len(), 3);
        assert!(saved.iter().all(|b| b.id().is_some()));

        let first = service.get(saved[0].id().unwrap()).unwrap().unwrap();
        assert_eq!(first.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_update_moves_booking_without_self_conflict() {
        let mut service = service();
        let id = service
            .create(&single("R1", 1, "09:00", "10:00"))
            .unwrap()
            .bookings()[0]
            .id()
            .unwrap();

        // Overlaps its own old slot only
        let outcome = service
            .update(id, &single("R1", 1, "09:30", "10:30"))
            .unwrap();
        assert_eq!(outcome.bookings()[0].id(), Some(id));
        assert_eq!(
            service.get(id).unwrap().unwrap().start_time(),
            at(1, 9, 30)
        );
        assert_eq!(service.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_rejected_on_conflict_keeps_original() {
        let mut service = service();
        let id = service
            .create(&single("R1", 1, "09:00", "10:00"))
            .unwrap()
            .bookings()[0]
            .id()
            .unwrap();
        service.create(&single("R1", 2, "09:00", "10:00")).unwrap();

        let err = service
            .update(id, &single("R1", 2, "09:30", "10:30"))
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        assert_eq!(service.get(id).unwrap().unwrap().start_time(), at(1, 9, 0));
    }

    #[test]
    fn test_update_to_recurring_adds_occurrences() {
        let mut service = service();
        let id = service
            .create(&single("R1", 1, "09:00", "10:00"))
            .unwrap()
            .bookings()[0]
            .id()
            .unwrap();

        let daily = RecurrenceRequest::new("R1", "alice")
            .with_start("2024-01-01", "09:00")
            .with_end("2024-01-03", "10:00")
            .with_recurrence_type("DAILY");
        let saved = service.update(id, &daily).unwrap().into_bookings();

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id(), Some(id));
        assert_ne!(saved[1].id(), Some(id));
        assert_eq!(service.count(&BookingCriteria::new().room("R1")).unwrap(), 2);
    }

    #[test]
    fn test_update_missing_booking() {
        let mut service = service();
        let err = service
            .update(BookingId::new(77), &single("R1", 1, "09:00", "10:00"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_delete_frees_the_slot() {
        let mut service = service();
        let id = service
            .create(&single("R1", 1, "09:00", "10:00"))
            .unwrap()
            .bookings()[0]
            .id()
            .unwrap();

        let removed = service.delete(id).unwrap();
        assert_eq!(removed.id(), Some(id));
        assert!(service.get(id).unwrap().is_none());
        assert!(matches!(service.delete(id), Err(Error::NotFound { .. })));

        assert!(service
            .create(&single("R1", 1, "09:00", "10:00"))
            .unwrap()
            .is_committed());
    }

    #[test]
    fn test_list_filters() {
        let mut service = service();
        service.create(&single("R1", 2, "09:00", "10:00")).unwrap();
        service.create(&single("R2", 1, "09:00", "10:00")).unwrap();

        let r1 = service.list(&BookingCriteria::new().room("R1")).unwrap();
        assert_eq!(r1.len(), 1);
        assert_eq!(r1[0].room_id(), "R1");

        let all = service.list_all().unwrap();
        assert_eq!(all[0].room_id(), "R2");
    }

    #[test]
    fn test_from_config_applies_defaults() {
        let config = Config {
            default_weekdays: Some(vec!["sa".into()]),
            default_status: Some(BookingStatus::Confirmed),
            ..Default::default()
        };
        let mut service = BookingService::from_config(MemoryStore::new(), &config).unwrap();
        let weekly = RecurrenceRequest::new("R1", "alice")
            .with_start("2024-01-01", "09:00")
            .with_end("2024-01-08", "10:00")
            .with_recurrence_type("WEEKLY");

        let saved = service.create(&weekly).unwrap().into_bookings();
        assert_eq!(saved[0].weekdays().codes(), vec!["sa"]);
        assert_eq!(saved[0].status(), BookingStatus::Confirmed);
    }
}
