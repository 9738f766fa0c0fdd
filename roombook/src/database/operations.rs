//! Booking reads and writes over an `SQLite` connection.
//!
//! [`BookingRepository`] is implemented for [`rusqlite::Connection`], so it
//! works equally on a plain connection and inside a
//! [`rusqlite::Transaction`] (which derefs to one).

use chrono::{Datelike, NaiveDateTime};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::booking::{Booking, BookingId, BookingStatus};
use crate::error::{Error, Result};
use crate::recurrence::{RecurrenceType, WeekdaySet};
use crate::store::{BookingCriteria, BookingRepository};
use crate::time_range::TimeRange;

use super::schema::{BOOKING_COLUMNS, STORABLE_YEARS, TIMESTAMP_FORMAT};

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings
    (room_id, requester_id, start_time, end_time, recurrence_type, weekdays, status)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_BOOKING: &str = r"
    UPDATE bookings
    SET room_id = ?, requester_id = ?, start_time = ?, end_time = ?,
        recurrence_type = ?, weekdays = ?, status = ?
    WHERE id = ?
";

const DELETE_BOOKING: &str = "DELETE FROM bookings WHERE id = ?";

/// Formats a timestamp for storage.
pub(super) fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

/// Helper function to deserialize a booking from a database row.
///
/// Expects row fields in [`BOOKING_COLUMNS`] order.
fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let id: i64 = row.get(0)?;
    let room_id: String = row.get(1)?;
    let requester_id: String = row.get(2)?;
    let start: String = row.get(3)?;
    let end: String = row.get(4)?;
    let recurrence_type: String = row.get(5)?;
    let weekdays: String = row.get(6)?;
    let status: String = row.get(7)?;

    let start = NaiveDateTime::parse_from_str(&start, TIMESTAMP_FORMAT)
        .map_err(|e| conversion_error(3, e))?;
    let end = NaiveDateTime::parse_from_str(&end, TIMESTAMP_FORMAT)
        .map_err(|e| conversion_error(4, e))?;
    let range = TimeRange::new(start, end).map_err(|e| conversion_error(4, e))?;
    let recurrence_type = recurrence_type
        .parse::<RecurrenceType>()
        .map_err(|e| conversion_error(5, e))?;
    let weekdays = weekdays
        .parse::<WeekdaySet>()
        .map_err(|e| conversion_error(6, e))?;
    let status = status
        .parse::<BookingStatus>()
        .map_err(|e| conversion_error(7, e))?;

    Booking::builder(room_id, requester_id, range)
        .id(BookingId::new(id))
        .recurrence_type(recurrence_type)
        .weekdays(weekdays)
        .status(status)
        .build()
        .map_err(|e| conversion_error(0, e))
}

/// Positional values for INSERT/UPDATE, in column order.
///
/// Rejects ranges whose years would not sort correctly as text.
fn booking_values(booking: &Booking) -> Result<[String; 7]> {
    for (field, time) in [("start", booking.start_time()), ("end", booking.end_time())] {
        if !STORABLE_YEARS.contains(&time.year()) {
            return Err(Error::InvalidInput {
                field: field.into(),
                message: format!("year {} is outside 0000-9999", time.year()),
            });
        }
    }

    Ok([
        booking.room_id().to_string(),
        booking.requester_id().to_string(),
        format_timestamp(booking.start_time()),
        format_timestamp(booking.end_time()),
        booking.recurrence_type().as_str().to_string(),
        booking.weekdays().to_string(),
        booking.status().as_str().to_string(),
    ])
}

/// Builds the WHERE clause and bound values for `criteria`.
fn criteria_filter(criteria: &BookingCriteria) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    if let Some(ref room) = criteria.room_id {
        clauses.push("room_id = ?");
        values.push(Value::Text(room.clone()));
    }
    if let Some(ref requester) = criteria.requester_id {
        clauses.push("requester_id = ?");
        values.push(Value::Text(requester.clone()));
    }
    if let Some(status) = criteria.status {
        clauses.push("status = ?");
        values.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(window) = criteria.window {
        clauses.push("start_time < ? AND end_time > ?");
        values.push(Value::Text(format_timestamp(window.end())));
        values.push(Value::Text(format_timestamp(window.start())));
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), values)
    }
}

impl BookingRepository for Connection {
    fn find_overlapping(
        &self,
        room_id: &str,
        range: &TimeRange,
        exclude: Option<BookingId>,
    ) -> Result<Vec<Booking>> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE room_id = ?1 AND start_time < ?2 AND end_time > ?3
               AND (?4 IS NULL OR id <> ?4)
             ORDER BY start_time, id"
        );
        let mut stmt = self.prepare_cached(&sql)?;
        let rows = stmt.query_map(
            params![
                room_id,
                format_timestamp(range.end()),
                format_timestamp(range.start()),
                exclude.map(BookingId::value),
            ],
            row_to_booking,
        )?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert(&self, booking: &Booking) -> Result<BookingId> {
        let mut stmt = self.prepare_cached(INSERT_BOOKING)?;
        stmt.execute(params_from_iter(booking_values(booking)?))?;
        Ok(BookingId::new(self.last_insert_rowid()))
    }

    fn update(&self, id: BookingId, booking: &Booking) -> Result<bool> {
        let [room, requester, start, end, recurrence, weekdays, status] =
            booking_values(booking)?;
        let rows_affected = self.execute(
            UPDATE_BOOKING,
            params![room, requester, start, end, recurrence, weekdays, status, id.value()],
        )?;
        Ok(rows_affected > 0)
    }

    fn delete(&self, id: BookingId) -> Result<bool> {
        let rows_affected = self.execute(DELETE_BOOKING, [id.value()])?;
        Ok(rows_affected > 0)
    }

    fn get(&self, id: BookingId) -> Result<Option<Booking>> {
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?");
        Ok(self
            .query_row(&sql, [id.value()], row_to_booking)
            .optional()?)
    }

    fn list(&self, criteria: &BookingCriteria) -> Result<Vec<Booking>> {
        let (filter, values) = criteria_filter(criteria);
        let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings{filter} ORDER BY start_time, id");
        let mut stmt = self.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values), row_to_booking)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn count(&self, criteria: &BookingCriteria) -> Result<usize> {
        let (filter, values) = criteria_filter(criteria);
        let sql = format!("SELECT COUNT(*) FROM bookings{filter}");
        let count: i64 = self.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
