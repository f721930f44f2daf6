// Storage seam for the availability API.
//
// `InMemoryStore` keeps the whole inventory behind a single read/write lock.
// Queries share the read lock; every blocked-days write holds the write lock
// across validation and insertion, so two overlapping blocks for the same
// booking and room can never both be committed.

use crate::blocking::BlockingError;
use crate::fixture::{Fixture, FixtureError};
use crate::inventory::{Inventory, InventoryError};
use crate::models::*;
use crate::query::AvailabilityQuery;
use crate::resolver;
use parking_lot::RwLock;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Blocked days rejected: {0}")]
    Blocking(#[from] BlockingError),

    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),
}

pub trait AvailabilityStore: Send + Sync + 'static {
    // Bookable units for the validated query
    fn available_units(&self, query: &AvailabilityQuery) -> Result<Vec<AvailableUnit>, StoreError>;

    // Record a new blocked interval after checking its invariants
    fn block(&self, request: NewBlockedDays) -> Result<BlockedDaysId, StoreError>;

    // Replace an existing blocked interval
    fn update_block(&self, id: BlockedDaysId, request: NewBlockedDays) -> Result<(), StoreError>;

    // Drop a blocked interval, returning what was removed
    fn unblock(&self, id: BlockedDaysId) -> Result<BlockedDays, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inventory: RwLock<Inventory>,
}

impl InMemoryStore {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: RwLock::new(inventory),
        }
    }

    pub fn from_fixture(fixture: Fixture) -> Result<Self, StoreError> {
        Ok(Self::new(fixture.into_inventory()?))
    }

    pub fn from_fixture_path(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let store = Self::from_fixture(Fixture::from_path(path)?)?;
        tracing::info!(path = %path.display(), listings = store.listing_count(), "loaded fixture");
        Ok(store)
    }

    pub fn listing_count(&self) -> usize {
        self.inventory.read().listings().count()
    }

    /// Runs `f` with a shared view of the inventory.
    pub fn with_inventory<T>(&self, f: impl FnOnce(&Inventory) -> T) -> T {
        f(&*self.inventory.read())
    }

    /// Administrative changes to listings, room types and rooms.
    pub fn with_inventory_mut<T>(&self, f: impl FnOnce(&mut Inventory) -> T) -> T {
        f(&mut *self.inventory.write())
    }
}

impl AvailabilityStore for InMemoryStore {
    fn available_units(&self, query: &AvailabilityQuery) -> Result<Vec<AvailableUnit>, StoreError> {
        let inventory = self.inventory.read();
        Ok(resolver::resolve(&inventory, query))
    }

    fn block(&self, request: NewBlockedDays) -> Result<BlockedDaysId, StoreError> {
        let mut inventory = self.inventory.write();
        match inventory.block(&request) {
            Ok(id) => {
                tracing::info!(
                    id,
                    booking_info = request.booking_info,
                    hotel_room = ?request.hotel_room,
                    start_date = %request.start_date,
                    "blocked days created"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(
                    booking_info = request.booking_info,
                    field = e.field(),
                    "blocked days rejected: {}",
                    e
                );
                Err(e.into())
            }
        }
    }

    fn update_block(&self, id: BlockedDaysId, request: NewBlockedDays) -> Result<(), StoreError> {
        let mut inventory = self.inventory.write();
        inventory.update_block(id, &request).map_err(|e| {
            tracing::warn!(id, field = e.field(), "blocked days update rejected: {}", e);
            StoreError::from(e)
        })?;
        tracing::info!(id, "blocked days updated");
        Ok(())
    }

    fn unblock(&self, id: BlockedDaysId) -> Result<BlockedDays, StoreError> {
        let removed = self.inventory.write().unblock(id)?;
        tracing::info!(id, interval = %removed, "blocked days removed");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn query(check_in: &str, check_out: &str) -> AvailabilityQuery {
        AvailabilityQuery::new(dec!(300), date(check_in), date(check_out)).unwrap()
    }

    fn store_with_apartment() -> (InMemoryStore, BookingInfoId) {
        let mut inventory = Inventory::new();
        let (_, booking_info) = inventory
            .add_apartment("Luxurious Apartment", "Ireland", "Galway", dec!(150))
            .unwrap();
        (InMemoryStore::new(inventory), booking_info)
    }

    #[test]
    fn test_block_then_query_then_unblock() {
        let (store, booking_info) = store_with_apartment();
        let id = store
            .block(NewBlockedDays::apartment(booking_info, date("2021-05-01"), date("2021-05-01")))
            .unwrap();

        assert!(store.available_units(&query("2021-05-01", "2021-05-01")).unwrap().is_empty());
        assert_eq!(store.available_units(&query("2021-05-02", "2021-05-03")).unwrap().len(), 1);

        store.unblock(id).unwrap();
        assert_eq!(store.available_units(&query("2021-05-01", "2021-05-01")).unwrap().len(), 1);
    }

    #[test]
    fn test_update_moves_the_block() {
        let (store, booking_info) = store_with_apartment();
        let id = store
            .block(NewBlockedDays::apartment(booking_info, date("2021-05-01"), date("2021-05-02")))
            .unwrap();

        store
            .update_block(
                id,
                NewBlockedDays::apartment(booking_info, date("2021-05-02"), date("2021-05-04")),
            )
            .unwrap();

        assert_eq!(store.available_units(&query("2021-05-01", "2021-05-01")).unwrap().len(), 1);
        assert!(store.available_units(&query("2021-05-04", "2021-05-06")).unwrap().is_empty());
        store.with_inventory(|inventory| {
            assert_eq!(inventory.blocked_days(id).unwrap().end_date, date("2021-05-04"));
        });
    }

    #[test]
    fn test_update_unknown_block_is_rejected() {
        let (store, booking_info) = store_with_apartment();
        let err = store
            .update_block(
                99,
                NewBlockedDays::apartment(booking_info, date("2021-05-01"), date("2021-05-02")),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Blocking(BlockingError::UnknownBlockedDays(99))
        ));
    }

    #[test]
    fn test_overlapping_block_is_rejected() {
        let (store, booking_info) = store_with_apartment();
        store
            .block(NewBlockedDays::apartment(booking_info, date("2021-05-01"), date("2021-05-05")))
            .unwrap();

        let err = store
            .block(NewBlockedDays::apartment(booking_info, date("2021-05-05"), date("2021-05-07")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Blocking(BlockingError::Overlap { .. })));
    }

    // Many threads race to block the same room for overlapping windows; the
    // write lock must let exactly one of them through.
    #[test]
    fn test_concurrent_overlapping_blocks_commit_once() {
        let mut inventory = Inventory::new();
        let hotel = inventory.add_hotel("Summit 5* hotel", "Switzerland", "Zermatt");
        let (room_type, booking_info) = inventory.add_room_type(hotel, "Double Room", dec!(300)).unwrap();
        let room = inventory.add_room(room_type, "101").unwrap();
        let store = Arc::new(InMemoryStore::new(inventory));

        let threads_count = 16;
        let mut handles = vec![];
        for i in 0..threads_count {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let start = date("2021-05-01") + chrono::Days::new(i % 3);
                let end = start + chrono::Days::new(5);
                store
                    .block(NewBlockedDays::hotel_room(booking_info, room, start, end))
                    .is_ok()
            }));
        }

        let committed = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(committed, 1);
        store.with_inventory(|inventory| assert_eq!(inventory.all_blocked_days().count(), 1));
    }

    #[test]
    fn test_administrative_changes_are_visible_to_queries() {
        let store = InMemoryStore::default();
        assert_eq!(store.listing_count(), 0);

        store
            .with_inventory_mut(|inventory| {
                inventory.add_apartment("Modern 2 Bed Apartment", "Ireland", "Cork", dec!(70))
            })
            .unwrap();

        let units = store.available_units(&query("2021-05-01", "2021-05-01")).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].city, "Cork");
    }
}
