//! Conflict Detector
//!
//! Decides whether a candidate slot overlaps an existing reservation on the
//! same table. Two slots overlap iff `new.start < existing.end` and
//! `new.end > existing.start`; slots that merely touch do not overlap.

use chrono::NaiveDateTime;
use shared::AppResult;
use shared::models::Reservation;

use crate::repository::ReservationRepository;
use crate::utils::time::slot_instant;

/// A `[start, end)` window on the naive local timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeSlot {
    /// Combine a date with start/end times of day
    ///
    /// An end at or before the start is accepted as-is.
    pub fn parse(date: &str, start: &str, end: &str) -> AppResult<Self> {
        Ok(Self {
            start: slot_instant(date, start)?,
            end: slot_instant(date, end)?,
        })
    }

    pub fn of(reservation: &Reservation) -> AppResult<Self> {
        Self::parse(
            &reservation.date,
            &reservation.slot_time_start,
            &reservation.slot_time_end,
        )
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Return the first existing reservation overlapping `candidate`
///
/// A stored reservation whose date or times do not parse is an error,
/// not a non-match.
pub fn first_overlap<'a>(
    existing: &'a [Reservation],
    candidate: &TimeSlot,
) -> AppResult<Option<&'a Reservation>> {
    for reservation in existing {
        let slot = TimeSlot::of(reservation)?;
        if candidate.overlaps(&slot) {
            return Ok(Some(reservation));
        }
    }
    Ok(None)
}

/// Checks candidates against the reservations stored for their table
#[derive(Clone)]
pub struct ConflictDetector {
    reservations: ReservationRepository,
}

impl ConflictDetector {
    pub fn new(reservations: ReservationRepository) -> Self {
        Self { reservations }
    }

    /// Find an existing reservation on `table_number` overlapping `candidate`
    pub async fn find_conflict(
        &self,
        table_number: i64,
        candidate: &TimeSlot,
    ) -> AppResult<Option<Reservation>> {
        let existing = self.reservations.find_by_table_number(table_number).await?;
        if existing.is_empty() {
            return Ok(None);
        }
        Ok(first_overlap(&existing, candidate)?.cloned())
    }
}
