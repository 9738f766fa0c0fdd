//! Units of work over the booking database.
//!
//! Every write unit runs in a `BEGIN IMMEDIATE` transaction: `SQLite` takes
//! the database write lock when the unit starts, before the conflict check
//! reads anything, so a second writer waits (up to the busy timeout) until
//! the first has committed and then sees its rows.

use rusqlite::TransactionBehavior;

use crate::error::Result;
use crate::store::{BookingRepository, BookingStore};

use super::connection::Database;

impl BookingStore for Database {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Dropping `tx` on the error path rolls back
        let value = f(&*tx)?;

        tx.commit()?;
        Ok(value)
    }

    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&dyn BookingRepository) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&*tx)?;
        tx.commit()?;
        Ok(value)
    }
}
