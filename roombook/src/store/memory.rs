//! In-process booking store.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::thread;
use std::time::{Duration, Instant};

use crate::booking::{Booking, BookingId};
use crate::error::{Error, Result};
use crate::time_range::TimeRange;

use super::{BookingCriteria, BookingRepository, BookingStore};

const DEFAULT_LOCK_WAIT: Duration = Duration::from_secs(5);
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Default)]
struct MemoryState {
    bookings: BTreeMap<BookingId, Booking>,
    last_id: i64,
}

/// A [`BookingStore`] that keeps bookings in memory.
///
/// Clones share the same state, so a clone can be handed to another thread
/// to model a second client. Each unit of work runs against a private copy
/// of the state that replaces the shared state only when the unit succeeds.
///
/// # Examples
///
/// ```
/// use roombook::{BookingService, MemoryStore, RecurrenceRequest};
///
/// let mut service = BookingService::new(MemoryStore::new());
/// let request = RecurrenceRequest::new("R1", "alice")
///     .with_start("2024-01-01", "09:00")
///     .with_end("2024-01-01", "10:00");
///
/// let outcome = service.create(&request).unwrap();
/// assert_eq!(outcome.bookings().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    lock_wait: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store with a five second lock wait.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            lock_wait: DEFAULT_LOCK_WAIT,
        }
    }

    /// Sets how long a unit of work waits for the store before giving up.
    #[must_use]
    pub fn with_lock_wait(mut self, lock_wait: Duration) -> Self {
        self.lock_wait = lock_wait;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        let deadline = Instant::now() + self.lock_wait;
        loop {
            match self.state.try_lock() {
                Ok(guard) => return Ok(guard),
                // Units never leave partial writes behind, so a poisoned
                // state is still consistent.
                Err(TryLockError::Poisoned(poisoned)) => return Ok(poisoned.into_inner()),
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(Error::StorageContention {
                            details: format!(
                                "in-memory store still locked after {}ms",
                                self.lock_wait.as_millis()
                            ),
                        });
                    }
                    thread::sleep(LOCK_POLL_INTERVAL);
                }
            }
        }
    }
}

impl BookingStore for MemoryStore {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>,
    {
        let mut guard = self.lock()?;
        let working = MemoryRepository {
            state: RefCell::new(guard.clone()),
        };
        let value = f(&working)?;
        *guard = working.state.into_inner();
        Ok(value)
    }

    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>,
    {
        let snapshot = self.lock()?.clone();
        f(&MemoryRepository {
            state: RefCell::new(snapshot),
        })
    }
}

struct MemoryRepository {
    state: RefCell<MemoryState>,
}

impl BookingRepository for MemoryRepository {
    fn find_overlapping(
        &self,
        room_id: &str,
        range: &TimeRange,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>> {
        let state = self.state.borrow();
        let mut found: Vec<Booking> = state
            .bookings
            .iter()
            .filter(|(id, _)| Some(**id) != exclude)
            .map(|(_, booking)| booking)
            .filter(|booking| booking.room_id() == room_id && booking.range().overlaps(range))
            .cloned()
            .collect();
        found.sort_by_key(|b| (b.start_time(), b.id()));
        Ok(found)
    }

    fn insert(&self, booking: &Booking) -> Result<BookingId> {
        let mut state = self.state.borrow_mut();
        state.last_id += 1;
        let id = BookingId::new(state.last_id);
        state.bookings.insert(id, booking.clone().with_id(id));
        Ok(id)
    }

    fn update(&self, id: BookingId, booking: &Booking) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        match state.bookings.get_mut(&id) {
            Some(slot) => {
                *slot = booking.clone().with_id(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: BookingId) -> Result<bool> {
        Ok(self.state.borrow_mut().bookings.remove(&id).is_some())
    }

    fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        Ok(self.state.borrow().bookings.get(&id).cloned())
    }

    fn list(&self, criteria: &BookingCriteria) -> Result<Vec<Booking>> {
        let state = self.state.borrow();
        let mut found: Vec<Booking> = state
            .bookings
            .values()
            .filter(|booking| criteria.matches(booking))
            .cloned()
            .collect();
        found.sort_by_key(|b| (b.start_time(), b.id()));
        Ok(found)
    }

    fn count(&self, criteria: &BookingCriteria) -> Result<usize> {
        let state = self.state.borrow();
        Ok(state
            .bookings
            .values()
            .filter(|booking| criteria.matches(booking))
            .count())
    }
}
