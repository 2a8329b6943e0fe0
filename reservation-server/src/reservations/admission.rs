//! Admission Controller
//!
//! Orchestrates one reservation request end to end:
//!
//! ```text
//! policy ─▶ coerce table number ─▶ validate ─▶ lock table ─▶ detect ─▶ persist
//! ```
//!
//! The table lock is taken only for tables that exist and spans detect and
//! persist, so two concurrent requests for the same table cannot both pass
//! the overlap check. Requests for different tables never contend.

use dashmap::DashMap;
use shared::models::{Reservation, ReservationRequest};
use shared::util::reservation_id;
use shared::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::detector::{ConflictDetector, TimeSlot};
use super::policy::AdmissionPolicy;
use super::validator::{TableLookup, TableValidator, coerce_table_number};
use crate::auth::Caller;
use crate::repository::{DiningTableRepository, ReservationRepository};
use crate::store::StoreGateway;

pub struct AdmissionController {
    validator: TableValidator,
    detector: ConflictDetector,
    reservations: ReservationRepository,
    policy: Arc<dyn AdmissionPolicy>,
    table_locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl AdmissionController {
    pub fn new(store: Arc<dyn StoreGateway>, policy: Arc<dyn AdmissionPolicy>) -> Self {
        let reservations = ReservationRepository::new(store.clone());
        Self {
            validator: TableValidator::new(DiningTableRepository::new(store)),
            detector: ConflictDetector::new(reservations.clone()),
            reservations,
            policy,
            table_locks: DashMap::new(),
        }
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Admit a candidate reservation and return its new id
    ///
    /// Errors, in the order they are checked:
    /// - `PermissionDenied` when the policy refuses the caller
    /// - `TableNotFound` when the table number does not coerce or matches no table
    /// - `InvalidFormat` when the candidate or a stored reservation has unparsable date/times
    /// - `ReservationOverlap` when an existing reservation on the table overlaps
    /// - `StoreUnavailable` on any store failure
    ///
    /// Nothing is written unless every check passes.
    pub async fn admit(
        &self,
        caller: Option<&Caller>,
        request: ReservationRequest,
    ) -> AppResult<String> {
        if let Err(e) = self.policy.authorize(caller, &request) {
            crate::security_log!(
                "WARN",
                "reservation_denied",
                policy = self.policy.name(),
                has_caller = caller.is_some()
            );
            return Err(e);
        }

        let Some(table_number) = coerce_table_number(&request.table_number) else {
            tracing::debug!(raw = %request.table_number, "Table number did not coerce to an integer");
            return Err(AppError::table_not_found(request.table_number));
        };

        // Tables are never deleted, so a found table stays found once the lock is held
        if let TableLookup::NotFound = self.validator.lookup(table_number).await? {
            return Err(AppError::table_not_found(table_number));
        }

        let lock = self.table_lock(table_number);
        let _guard = lock.lock().await;

        let slot = TimeSlot::parse(
            &request.date,
            &request.slot_time_start,
            &request.slot_time_end,
        )?;

        if let Some(existing) = self.detector.find_conflict(table_number, &slot).await? {
            tracing::info!(
                table_number,
                date = %request.date,
                conflicting = %existing.id,
                "Reservation rejected: overlapping slot"
            );
            return Err(AppError::reservation_overlap(table_number, existing.id));
        }

        let reservation: Reservation = request.into_reservation(reservation_id(), table_number);
        self.reservations.insert(&reservation).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            table_number,
            date = %reservation.date,
            start = %reservation.slot_time_start,
            end = %reservation.slot_time_end,
            "Reservation admitted"
        );
        Ok(reservation.id)
    }

    fn table_lock(&self, table_number: i64) -> Arc<Mutex<()>> {
        self.table_locks.entry(table_number).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::policy::{CallerRequiredPolicy, OpenPolicy};
    use crate::store::{Collection, MemoryStore};
    use serde_json::{Value, json};
    use shared::ErrorCode;

    async fn store_with_table(number: i64) -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                Collection::Tables,
                json!({"id": number, "number": number, "places": 4})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .await
            .unwrap();
        store
    }

    fn request(table: Value, start: &str, end: &str) -> ReservationRequest {
        serde_json::from_value(json!({
            "tableNumber": table,
            "clientName": "Ana",
            "phoneNumber": "600000000",
            "date": "2024-06-01",
            "slotTimeStart": start,
            "slotTimeEnd": end
        }))
        .unwrap()
    }

    fn controller(store: Arc<MemoryStore>) -> AdmissionController {
        AdmissionController::new(store, Arc::new(OpenPolicy))
    }

    #[tokio::test]
    async fn test_admit_then_reject_overlap() {
        let store = store_with_table(5).await;
        let admission = controller(store.clone());

        let id = admission
            .admit(None, request(json!(5), "18:00", "19:00"))
            .await
            .unwrap();
        assert!(!id.is_empty());

        let err = admission
            .admit(None, request(json!(5), "18:30", "19:30"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationOverlap);
        assert_eq!(store.len(Collection::Reservations), 1);

        // touching windows are fine
        admission
            .admit(None, request(json!(5), "19:00", "20:00"))
            .await
            .unwrap();
        assert_eq!(store.len(Collection::Reservations), 2);
    }

    #[tokio::test]
    async fn test_string_table_number_is_stored_as_integer() {
        let store = store_with_table(5).await;
        let admission = controller(store.clone());

        let id = admission
            .admit(None, request(json!("5"), "18:00", "19:00"))
            .await
            .unwrap();
        let stored = ReservationRepository::new(store)
            .find_by_id(&id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.table_number, 5);
    }

    #[tokio::test]
    async fn test_unknown_or_uncoercible_table() {
        let store = store_with_table(5).await;
        let admission = controller(store.clone());

        for table in [json!(6), json!("abc"), Value::Null] {
            let err = admission
                .admit(None, request(table, "18:00", "19:00"))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::TableNotFound);
        }
        assert_eq!(store.len(Collection::Reservations), 0);
    }

    #[tokio::test]
    async fn test_unknown_tables_leave_no_locks_behind() {
        let store = store_with_table(5).await;
        let admission = controller(store.clone());

        for table in 100..200 {
            let err = admission
                .admit(None, request(json!(table), "18:00", "19:00"))
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::TableNotFound);
        }
        assert_eq!(admission.table_locks.len(), 0);

        admission
            .admit(None, request(json!(5), "18:00", "19:00"))
            .await
            .unwrap();
        assert_eq!(admission.table_locks.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_times_rejected_without_write() {
        let store = store_with_table(5).await;
        let admission = controller(store.clone());

        let err = admission
            .admit(None, request(json!(5), "dinner", "19:00"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert_eq!(store.len(Collection::Reservations), 0);
    }

    #[tokio::test]
    async fn test_policy_denial_stops_admission() {
        let store = store_with_table(5).await;
        let admission = AdmissionController::new(store.clone(), Arc::new(CallerRequiredPolicy));

        let err = admission
            .admit(None, request(json!(5), "18:00", "19:00"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(store.len(Collection::Reservations), 0);

        let caller = Caller {
            token: "t".into(),
        };
        admission
            .admit(Some(&caller), request(json!(5), "18:00", "19:00"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_overlapping_requests_admit_one() {
        let store = store_with_table(5).await;
        let admission = Arc::new(controller(store.clone()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let admission = admission.clone();
                tokio::spawn(async move {
                    admission
                        .admit(None, request(json!(5), "18:00", "19:00"))
                        .await
                })
            })
            .collect();

        let mut admitted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(e) => assert_eq!(e.code, ErrorCode::ReservationOverlap),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(store.len(Collection::Reservations), 1);
    }
}
