//! Reservation Repository

use shared::models::Reservation;
use std::sync::Arc;

use super::{BaseRepository, RepoResult, decode, encode};
use crate::store::{Collection, Filter, StoreGateway};

const COLLECTION: Collection = Collection::Reservations;

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(store: Arc<dyn StoreGateway>) -> Self {
        Self {
            base: BaseRepository::new(store),
        }
    }

    /// Find all reservations, ordered by date then start time
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let documents = self.base.store().scan(COLLECTION, &Filter::All).await?;
        let mut reservations = documents
            .into_iter()
            .map(|d| decode::<Reservation>(COLLECTION, d))
            .collect::<RepoResult<Vec<_>>>()?;
        reservations.sort_by(|a, b| {
            (&a.date, &a.slot_time_start, a.table_number)
                .cmp(&(&b.date, &b.slot_time_start, b.table_number))
        });
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        match self.base.store().get(COLLECTION, id).await? {
            Some(document) => Ok(Some(decode(COLLECTION, document)?)),
            None => Ok(None),
        }
    }

    /// Find all reservations for a table number
    ///
    /// Full scan with an equality filter on `tableNumber`.
    pub async fn find_by_table_number(&self, table_number: i64) -> RepoResult<Vec<Reservation>> {
        let documents = self
            .base
            .store()
            .scan(COLLECTION, &Filter::eq("tableNumber", table_number))
            .await?;
        documents
            .into_iter()
            .map(|d| decode(COLLECTION, d))
            .collect()
    }

    /// Write a reservation unconditionally
    pub async fn insert(&self, reservation: &Reservation) -> RepoResult<()> {
        self.base
            .store()
            .put(COLLECTION, encode(COLLECTION, reservation)?)
            .await?;
        Ok(())
    }
}
