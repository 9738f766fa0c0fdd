//! Conflict detection against committed bookings.
//!
//! A candidate occurrence conflicts with an existing booking in the same
//! room when their half-open ranges overlap. Touching endpoints are not a
//! conflict: a booking ending at 11:00 and one starting at 11:00 coexist.

use std::fmt;

use serde::Serialize;

use crate::booking::{Booking, BookingId};
use crate::error::Result;
use crate::recurrence::RecurrenceType;
use crate::store::BookingRepository;
use crate::time_range::TimeRange;

/// One candidate occurrence paired with a committed booking it overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// The occurrence that was being requested.
    pub occurrence: TimeRange,
    /// The recurrence the occurrence was expanded from.
    pub recurrence_type: RecurrenceType,
    /// The committed booking it collides with.
    pub existing: Booking,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} occurrence {} overlaps booking ",
            self.recurrence_type, self.occurrence
        )?;
        if let Some(id) = self.existing.id() {
            write!(f, "{id} ")?;
        }
        write!(
            f,
            "in room {} at {}",
            self.existing.room_id(),
            self.existing.range()
        )
    }
}

/// Checks candidate occurrences against a repository.
///
/// The detector only reads. Callers that go on to write must run it inside
/// the same unit of work as the write.
#[derive(Clone, Copy)]
pub struct ConflictDetector<'r> {
    repository: &'r dyn BookingRepository,
}

impl<'r> ConflictDetector<'r> {
    /// Creates a detector over `repository`.
    #[must_use]
    pub fn new(repository: &'r dyn BookingRepository) -> Self {
        Self { repository }
    }

    /// Returns true if any committed booking in `room_id` overlaps `range`.
    ///
    /// `room_id` is trimmed the same way stored room ids are.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository query fails.
    pub fn has_conflict(&self, room_id: &str, range: &TimeRange) -> Result<bool> {
        Ok(!self
            .repository
            .find_overlapping(room_id.trim(), range, None)?
            .is_empty())
    }

    /// Returns the committed bookings that `candidate` overlaps.
    ///
    /// `exclude` names a booking to ignore, used when a booking is being
    /// replaced and must not collide with itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository query fails.
    pub fn conflicts_for(
        &self,
        candidate: &Booking,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Conflict>> {
        let range = candidate.range();
        let existing = self
            .repository
            .find_overlapping(candidate.room_id(), &range, exclude)?;
        Ok(existing
            .into_iter()
            .map(|existing| Conflict {
                occurrence: range,
                recurrence_type: candidate.recurrence_type(),
                existing,
            })
            .collect())
    }

    /// Checks every occurrence and returns all conflicts, in occurrence
    /// order.
    ///
    /// Every occurrence is checked even after the first conflict so the
    /// caller can report them all.
    ///
    /// # Errors
    ///
    /// Returns an error if any repository query fails.
    pub fn check_all(
        &self,
        occurrences: &[Booking],
        exclude: Option<BookingId>,
    ) -> Result<Vec<Conflict>> {
        let mut conflicts = Vec::new();
        for occurrence in occurrences {
            conflicts.extend(self.conflicts_for(occurrence, exclude)?);
        }
        Ok(conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{BookingStore, MemoryStore};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn booking(room: &str, start: NaiveDateTime, end: NaiveDateTime) -> Booking {
        Booking::builder(room, "alice", TimeRange::new(start, end).unwrap())
            .build()
            .unwrap()
    }

    fn store_with(existing: &[Booking]) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.atomically(|repo| repo.insert_all(existing)).unwrap();
        store
    }

    #[test]
    fn test_contained_range_conflicts() {
        let store = store_with(&[booking("R1", at(1, 10, 30), at(1, 10, 45))]);
        let conflicts = store
            .read(|repo| {
                ConflictDetector::new(repo)
                    .conflicts_for(&booking("R1", at(1, 10, 0), at(1, 11, 0)), None)
            })
            .unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].existing.start_time(), at(1, 10, 30));
    }

    #[test]
    fn test_touching_range_does_not_conflict() {
        let store = store_with(&[booking("R1", at(1, 11, 0), at(1, 12, 0))]);
        let clash = store
            .read(|repo| {
                let r = TimeRange::new(at(1, 10, 0), at(1, 11, 0)).unwrap();
                ConflictDetector::new(repo).has_conflict("R1", &r)
            })
            .unwrap();
        assert!(!clash);
    }

    #[test]
    fn test_room_id_is_trimmed_like_stored_ids() {
        let store = store_with(&[booking("R1", at(1, 9, 0), at(1, 12, 0))]);
        let clash = store
            .read(|repo| {
                let r = TimeRange::new(at(1, 10, 0), at(1, 11, 0)).unwrap();
                ConflictDetector::new(repo).has_conflict(" R1\t", &r)
            })
            .unwrap();
        assert!(clash);
    }

    #[test]
    fn test_other_rooms_are_ignored() {
        let store = store_with(&[booking("R2", at(1, 9, 0), at(1, 12, 0))]);
        let clash = store
            .read(|repo| {
                let r = TimeRange::new(at(1, 10, 0), at(1, 11, 0)).unwrap();
                ConflictDetector::new(repo).has_conflict("R1", &r)
            })
            .unwrap();
        assert!(!clash);
    }

    #[test]
    fn test_check_all_reports_every_conflict_in_order() {
        let store = store_with(&[
            booking("R1", at(1, 9, 0), at(1, 10, 0)),
            booking("R1", at(15, 10, 0), at(15, 11, 0)),
        ]);
        let candidates = [
            booking("R1", at(1, 9, 30), at(1, 10, 30)),
            booking("R1", at(8, 9, 30), at(8, 10, 30)),
            booking("R1", at(15, 9, 30), at(15, 10, 30)),
        ];
        let conflicts = store
            .read(|repo| ConflictDetector::new(repo).check_all(&candidates, None))
            .unwrap();

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].occurrence.start(), at(1, 9, 30));
        assert_eq!(conflicts[1].occurrence.start(), at(15, 9, 30));
    }

    #[test]
    fn test_exclude_skips_booking_being_replaced() {
        let store = store_with(&[booking("R1", at(1, 9, 0), at(1, 10, 0))]);
        let conflicts = store
            .read(|repo| {
                ConflictDetector::new(repo).conflicts_for(
                    &booking("R1", at(1, 9, 0), at(1, 10, 0)),
                    Some(BookingId::new(1)),
                )
            })
            .unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_display_names_existing_booking() {
        let existing = booking("R1", at(1, 9, 0), at(1, 10, 0)).with_id(BookingId::new(3));
        let conflict = Conflict {
            occurrence: TimeRange::new(at(1, 9, 30), at(1, 10, 30)).unwrap(),
            recurrence_type: RecurrenceType::Weekly,
            existing,
        };
        assert_eq!(
            conflict.to_string(),
            "WEEKLY occurrence [2024-01-01 09:30, 2024-01-01 10:30) overlaps booking #3 \
             in room R1 at [2024-01-01 09:00, 2024-01-01 10:00)"
        );
    }
}
