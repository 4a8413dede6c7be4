//! Reservation Domain Types
//!
//! Reservation records, the status state machine, and aggregate stats.
//! Unlike users, reservations carry no uniqueness constraints: one
//! person may hold any number of them.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;

/// Reservation lifecycle status.
///
/// Transitions follow an explicit table rather than accepting any
/// value: pending → {confirmed, cancelled}, confirmed →
/// {completed, cancelled}. Completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Whether the table permits moving to `next`. A same-status write
    /// is accepted as a no-op.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(StoreError::Validation(format!(
                "unknown reservation status: {other}"
            ))),
        }
    }
}

/// Reservation record as persisted under `silverAgeReservations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    /// Opaque unique ID.
    pub id: String,
    /// Requester name.
    pub name: String,
    /// Requester contact number.
    pub phone: String,
    /// Service date, serialized `YYYY-MM-DD` (lexically sortable).
    pub reservation_date: NaiveDate,
    /// Requested service category (free text from the form).
    pub service_type: String,
    /// Free-text description of the need.
    pub demand_description: String,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ReservationRecord {
    /// Create a fresh pending reservation with a new ID.
    pub fn new(
        name: String,
        phone: String,
        reservation_date: NaiveDate,
        service_type: String,
        demand_description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
            reservation_date,
            service_type,
            demand_description,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Reservation booking form input. All fields are required; the date
/// arrives as the raw `YYYY-MM-DD` string the date picker produces.
#[derive(Debug, Clone, Deserialize)]
pub struct ReservationInput {
    pub name: String,
    pub phone: String,
    pub reservation_date: String,
    pub service_type: String,
    pub demand_description: String,
}

/// Aggregate reservation statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReservationStats {
    pub total: u64,
    pub pending: u64,
    pub confirmed: u64,
    pub completed: u64,
    pub cancelled: u64,
    /// Service type → count. BTreeMap keeps export output stable.
    pub by_service_type: BTreeMap<String, u64>,
}

impl ReservationStats {
    /// Tally a full reservation collection.
    pub fn collect(reservations: &[ReservationRecord]) -> Self {
        let mut stats = Self {
            total: reservations.len() as u64,
            ..Self::default()
        };
        for r in reservations {
            match r.status {
                ReservationStatus::Pending => stats.pending += 1,
                ReservationStatus::Confirmed => stats.confirmed += 1,
                ReservationStatus::Completed => stats.completed += 1,
                ReservationStatus::Cancelled => stats.cancelled += 1,
            }
            *stats.by_service_type.entry(r.service_type.clone()).or_insert(0) += 1;
        }
        stats
    }
}
