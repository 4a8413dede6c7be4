//! Reservation Store - Booking, Status Flow, Filters, Export
//!
//! Owns the `silverAgeReservations` collection. Reservations move
//! through the status table defined in `domain::reservation`; filters
//! and stats are linear scans of the whole collection, matching the
//! original whole-blob storage model.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use crate::domain::error::StoreError;
use crate::domain::reservation::{
    ReservationInput, ReservationRecord, ReservationStats, ReservationStatus,
};
use crate::domain::validate::{is_valid_phone, require_non_blank};
use crate::ports::storage::KeyValueStorage;

use super::{export, keys};

/// Reservation store over a key-value storage backend.
pub struct ReservationStore<S: KeyValueStorage> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage> ReservationStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    fn load(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let Some(raw) = self.storage.get(keys::RESERVATIONS)? else {
            return Ok(Vec::new());
        };
        let reservations = serde_json::from_str(&raw).map_err(|e| {
            StoreError::Storage(
                anyhow::Error::new(e).context("corrupt reservation collection"),
            )
        })?;
        Ok(reservations)
    }

    fn save(&self, reservations: &[ReservationRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(reservations)
            .map_err(|e| StoreError::Storage(anyhow::Error::new(e)))?;
        self.storage.set(keys::RESERVATIONS, &json)?;
        Ok(())
    }

    /// Create a pending reservation from form input.
    ///
    /// Validation names the first failing field; nothing is appended
    /// to the collection on failure.
    #[instrument(skip(self, input), fields(service = %input.service_type))]
    pub fn create(&self, input: &ReservationInput) -> Result<ReservationRecord, StoreError> {
        let name = require_non_blank(&input.name, "name")?;
        let phone = require_non_blank(&input.phone, "phone")?;
        if !is_valid_phone(phone) {
            return Err(StoreError::Validation("invalid phone number".into()));
        }
        let date_str = require_non_blank(&input.reservation_date, "reservationDate")?;
        let service_type = require_non_blank(&input.service_type, "serviceType")?;
        let description =
            require_non_blank(&input.demand_description, "demandDescription")?;

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            StoreError::Validation(format!(
                "reservation date must be YYYY-MM-DD, got {date_str}"
            ))
        })?;

        let record = ReservationRecord::new(
            name.to_string(),
            phone.to_string(),
            date,
            service_type.to_string(),
            description.to_string(),
        );

        let mut reservations = self.load()?;
        reservations.push(record.clone());
        self.save(&reservations)?;

        info!(reservation_id = %record.id, date = %record.reservation_date, "Reservation created");
        Ok(record)
    }

    /// Move a reservation to a new status.
    ///
    /// The status arrives as the raw string the admin UI posts; an
    /// unknown value or a transition the table forbids is a
    /// validation failure.
    #[instrument(skip(self), fields(reservation_id = %id, status))]
    pub fn update_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<ReservationRecord, StoreError> {
        let mut reservations = self.load()?;
        let Some(record) = reservations.iter_mut().find(|r| r.id == id) else {
            return Err(StoreError::NotFound {
                entity: "reservation",
                id: id.to_string(),
            });
        };

        let next: ReservationStatus = status.parse()?;
        if !record.status.can_transition_to(next) {
            return Err(StoreError::Validation(format!(
                "cannot change status from {} to {next}",
                record.status
            )));
        }

        record.status = next;
        record.updated_at = Utc::now();
        let updated = record.clone();
        self.save(&reservations)?;

        info!(reservation_id = %id, status = %next, "Reservation status updated");
        Ok(updated)
    }

    /// Remove a reservation.
    #[instrument(skip(self), fields(reservation_id = %id))]
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut reservations = self.load()?;
        let before = reservations.len();
        reservations.retain(|r| r.id != id);
        if reservations.len() == before {
            return Err(StoreError::NotFound {
                entity: "reservation",
                id: id.to_string(),
            });
        }
        self.save(&reservations)?;
        info!(reservation_id = %id, "Reservation deleted");
        Ok(())
    }

    /// All reservations, in insertion order.
    pub fn list_all(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        self.load()
    }

    /// Exact-match filter on requester name and phone.
    pub fn for_contact(
        &self,
        name: &str,
        phone: &str,
    ) -> Result<Vec<ReservationRecord>, StoreError> {
        let mut reservations = self.load()?;
        reservations.retain(|r| r.name == name && r.phone == phone);
        Ok(reservations)
    }

    /// Reservations dated today (UTC).
    pub fn today(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let today = Utc::now().date_naive();
        let mut reservations = self.load()?;
        reservations.retain(|r| r.reservation_date == today);
        Ok(reservations)
    }

    /// Non-cancelled reservations dated today or later, ascending by
    /// date.
    pub fn upcoming(&self) -> Result<Vec<ReservationRecord>, StoreError> {
        let today = Utc::now().date_naive();
        let mut reservations = self.load()?;
        reservations.retain(|r| {
            r.reservation_date >= today && r.status != ReservationStatus::Cancelled
        });
        reservations.sort_by_key(|r| r.reservation_date);
        Ok(reservations)
    }

    /// Aggregate counts over the whole collection.
    pub fn stats(&self) -> Result<ReservationStats, StoreError> {
        Ok(ReservationStats::collect(&self.load()?))
    }

    /// Render the full collection plus a stats summary as CSV.
    pub fn export_csv(&self) -> Result<String, StoreError> {
        let reservations = self.load()?;
        let stats = ReservationStats::collect(&reservations);
        Ok(export::render_reservations_csv(&reservations, &stats))
    }

    /// Reset the collection to empty.
    #[instrument(skip(self))]
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.save(&[])?;
        info!("All reservations cleared");
        Ok(())
    }
}
