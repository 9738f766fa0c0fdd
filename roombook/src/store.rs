//! Persistence seams for bookings.
//!
//! [`BookingRepository`] is the set of reads and writes the booking service
//! needs; [`BookingStore`] hands out a repository inside one exclusive unit
//! of work. Conflict checking and committing happen inside the same unit, so
//! two overlapping requests for the same room cannot both pass the check.
//!
//! Two stores ship with the crate: the SQLite-backed
//! [`Database`](crate::database::Database) and the in-process
//! [`MemoryStore`].

mod memory;

use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingId, BookingStatus};
use crate::error::{Error, Result};
use crate::time_range::TimeRange;

pub use memory::MemoryStore;

/// Read and write operations over stored bookings.
///
/// Implementations see a consistent view for the lifetime of the unit of
/// work that handed them out.
pub trait BookingRepository {
    /// Returns bookings in `room_id` whose range overlaps `range`.
    ///
    /// Overlap is half-open: `existing.start < range.end && existing.end >
    /// range.start`. A booking whose id equals `exclude` is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn find_overlapping(
        &self,
        room_id: &str,
        range: &TimeRange,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>>;

    /// Stores a new booking and returns its assigned id.
    ///
    /// Any id already on `booking` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn insert(&self, booking: &Booking) -> Result<BookingId>;

    /// Overwrites the booking stored under `id`.
    ///
    /// Returns false if there was no such booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn update(&self, id: BookingId, booking: &Booking) -> Result<bool>;

    /// Removes the booking stored under `id`.
    ///
    /// Returns false if there was no such booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn delete(&self, id: BookingId) -> Result<bool>;

    /// Fetches one booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn get(&self, id: BookingId) -> Result<Option<Booking>>;

    /// Lists bookings matching `criteria`, ordered by start time then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn list(&self, criteria: &BookingCriteria) -> Result<Vec<Booking>>;

    /// Counts bookings matching `criteria`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails.
    fn count(&self, criteria: &BookingCriteria) -> Result<usize>;

    /// Stores every occurrence and returns them with their assigned ids.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails. Atomicity comes from the
    /// enclosing unit of work.
    fn insert_all(&self, occurrences: &[Booking]) -> Result<Vec<Booking>> {
        occurrences
            .iter()
            .map(|booking| {
                let id = self.insert(booking)?;
                Ok(booking.clone().with_id(id))
            })
            .collect()
    }

    /// Replaces the booking under `id` with a new set of occurrences.
    ///
    /// The first occurrence keeps `id`; the rest are inserted as new
    /// bookings. An empty `occurrences` leaves the stored booking untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `id` is not stored, or an error if the
    /// underlying storage fails.
    fn replace(&self, id: BookingId, occurrences: &[Booking]) -> Result<Vec<Booking>> {
        let Some((first, rest)) = occurrences.split_first() else {
            return Ok(Vec::new());
        };

        if !self.update(id, first)? {
            return Err(Error::NotFound { id });
        }

        let mut saved = Vec::with_capacity(occurrences.len());
        saved.push(first.clone().with_id(id));
        saved.extend(self.insert_all(rest)?);
        Ok(saved)
    }
}

/// A source of exclusive units of work over a [`BookingRepository`].
pub trait BookingStore {
    /// Runs `f` inside one exclusive unit of work.
    ///
    /// Writes made by `f` are committed if it returns `Ok` and discarded if
    /// it returns `Err`. No other unit on the same store can interleave.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or [`Error::StorageContention`] if the
    /// unit could not be started within the store's lock wait.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>;

    /// Runs a read-only `f` against the current committed state.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or an error if storage is unavailable.
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>;
}

/// Filters for listing and counting bookings.
///
/// Empty criteria match every booking.
///
/// # Examples
///
/// ```
/// use roombook::{BookingCriteria, BookingStatus};
///
/// let criteria = BookingCriteria::new()
///     .room("R1")
///     .status(BookingStatus::Confirmed);
/// assert_eq!(criteria.room_id.as_deref(), Some("R1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCriteria {
    /// Only bookings for this room.
    pub room_id: Option<String>,
    /// Only bookings made by this requester.
    pub requester_id: Option<String>,
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
    /// Only bookings overlapping this range.
    pub window: Option<TimeRange>,
}

impl BookingCriteria {
    /// Creates criteria that match everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one room.
    #[must_use]
    pub fn room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = Some(room_id.into());
        self
    }

    /// Restricts to one requester.
    #[must_use]
    pub fn requester(mut self, requester_id: impl Into<String>) -> Self {
        self.requester_id = Some(requester_id.into());
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to bookings overlapping `window`.
    #[must_use]
    pub const fn window(mut self, window: TimeRange) -> Self {
        self.window = Some(window);
        self
    }

    /// Returns true if `booking` passes every filter.
    #[must_use]
    pub fn matches(&self, booking: &Booking) -> bool {
        self.room_id
            .as_deref()
            .map_or(true, |room| booking.room_id() == room)
            && self
                .requester_id
                .as_deref()
                .map_or(true, |requester| booking.requester_id() == requester)
            && self.status.map_or(true, |status| booking.status() == status)
            && self
                .window
                .map_or(true, |window| booking.range().overlaps(&window))
    }
}
