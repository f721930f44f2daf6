// In-process tables for listings, room types, rooms, prices and blocked days.
//
// Listings, room types and rooms are created administratively through the
// `add_*` builders, which keep the ownership structure consistent. Blocked
// days go through `blocking::validate` before they are written.

use crate::blocking::{self, BlockingError};
use crate::models::*;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InventoryError {
    #[error("Unknown listing: {0}")]
    UnknownListing(ListingId),

    #[error("Listing {0} is not a hotel")]
    NotAHotel(ListingId),

    #[error("Unknown hotel room type: {0}")]
    UnknownRoomType(RoomTypeId),

    #[error("Unknown blocked days: {0}")]
    UnknownBlockedDays(BlockedDaysId),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(Decimal),
}

#[derive(Debug, Default, Clone)]
pub struct Inventory {
    listings: BTreeMap<ListingId, Listing>,
    room_types: BTreeMap<RoomTypeId, HotelRoomType>,
    rooms: BTreeMap<HotelRoomId, HotelRoom>,
    booking_infos: BTreeMap<BookingInfoId, BookingInfo>,
    blocked_days: BTreeMap<BlockedDaysId, BlockedDays>,
    by_owner: HashMap<BookingInfoOwner, BookingInfoId>,
    room_types_by_hotel: BTreeMap<ListingId, Vec<RoomTypeId>>,
    rooms_by_room_type: BTreeMap<RoomTypeId, Vec<HotelRoomId>>,
    last_id: u64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn attach_booking_info(&mut self, owner: BookingInfoOwner, price: Decimal) -> BookingInfoId {
        let id = self.next_id();
        self.booking_infos.insert(id, BookingInfo { id, owner, price });
        self.by_owner.insert(owner, id);
        id
    }

    /// Creates an apartment listing together with its price record.
    pub fn add_apartment(
        &mut self,
        title: &str,
        country: &str,
        city: &str,
        price: Decimal,
    ) -> Result<(ListingId, BookingInfoId), InventoryError> {
        check_price(price)?;

        let id = self.next_id();
        self.listings.insert(
            id,
            Listing {
                id,
                listing_type: ListingType::Apartment,
                title: title.to_string(),
                country: country.to_string(),
                city: city.to_string(),
            },
        );
        let booking_info = self.attach_booking_info(BookingInfoOwner::Apartment(id), price);

        Ok((id, booking_info))
    }

    pub fn add_hotel(&mut self, title: &str, country: &str, city: &str) -> ListingId {
        let id = self.next_id();
        self.listings.insert(
            id,
            Listing {
                id,
                listing_type: ListingType::Hotel,
                title: title.to_string(),
                country: country.to_string(),
                city: city.to_string(),
            },
        );
        id
    }

    /// Creates a room type under `hotel` together with its price record.
    pub fn add_room_type(
        &mut self,
        hotel: ListingId,
        title: &str,
        price: Decimal,
    ) -> Result<(RoomTypeId, BookingInfoId), InventoryError> {
        let listing = self
            .listings
            .get(&hotel)
            .ok_or(InventoryError::UnknownListing(hotel))?;
        if listing.listing_type != ListingType::Hotel {
            return Err(InventoryError::NotAHotel(hotel));
        }
        check_price(price)?;

        let id = self.next_id();
        self.room_types.insert(
            id,
            HotelRoomType {
                id,
                hotel,
                title: title.to_string(),
            },
        );
        self.room_types_by_hotel.entry(hotel).or_default().push(id);
        let booking_info = self.attach_booking_info(BookingInfoOwner::HotelRoomType(id), price);

        Ok((id, booking_info))
    }

    pub fn add_room(
        &mut self,
        room_type: RoomTypeId,
        room_number: &str,
    ) -> Result<HotelRoomId, InventoryError> {
        if !self.room_types.contains_key(&room_type) {
            return Err(InventoryError::UnknownRoomType(room_type));
        }

        let id = self.next_id();
        self.rooms.insert(
            id,
            HotelRoom {
                id,
                room_type,
                room_number: room_number.to_string(),
            },
        );
        self.rooms_by_room_type.entry(room_type).or_default().push(id);
        Ok(id)
    }

    /// Validates and records a new blocked interval.
    pub fn block(&mut self, request: &NewBlockedDays) -> Result<BlockedDaysId, BlockingError> {
        let valid = blocking::validate(self, request, None)?;
        let id = self.next_id();
        self.blocked_days.insert(id, valid.into_blocked_days(id));
        Ok(id)
    }

    /// Replaces an existing blocked interval. The row being replaced does not
    /// count against itself in the overlap check.
    pub fn update_block(
        &mut self,
        id: BlockedDaysId,
        request: &NewBlockedDays,
    ) -> Result<(), BlockingError> {
        if !self.blocked_days.contains_key(&id) {
            return Err(BlockingError::UnknownBlockedDays(id));
        }
        let valid = blocking::validate(self, request, Some(id))?;
        self.blocked_days.insert(id, valid.into_blocked_days(id));
        Ok(())
    }

    pub fn unblock(&mut self, id: BlockedDaysId) -> Result<BlockedDays, InventoryError> {
        self.blocked_days
            .remove(&id)
            .ok_or(InventoryError::UnknownBlockedDays(id))
    }

    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.listings.get(&id)
    }

    pub fn room_type(&self, id: RoomTypeId) -> Option<&HotelRoomType> {
        self.room_types.get(&id)
    }

    pub fn room(&self, id: HotelRoomId) -> Option<&HotelRoom> {
        self.rooms.get(&id)
    }

    pub fn booking_info(&self, id: BookingInfoId) -> Option<&BookingInfo> {
        self.booking_infos.get(&id)
    }

    pub fn booking_info_of(&self, owner: BookingInfoOwner) -> Option<&BookingInfo> {
        self.by_owner
            .get(&owner)
            .and_then(|id| self.booking_infos.get(id))
    }

    pub fn blocked_days(&self, id: BlockedDaysId) -> Option<&BlockedDays> {
        self.blocked_days.get(&id)
    }

    pub fn listings(&self) -> impl Iterator<Item = &Listing> {
        self.listings.values()
    }

    pub fn room_types(&self) -> impl Iterator<Item = &HotelRoomType> {
        self.room_types.values()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &HotelRoom> {
        self.rooms.values()
    }

    pub fn all_blocked_days(&self) -> impl Iterator<Item = &BlockedDays> {
        self.blocked_days.values()
    }

    pub fn rooms_of(&self, room_type: RoomTypeId) -> impl Iterator<Item = &HotelRoom> {
        self.rooms_by_room_type
            .get(&room_type)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.rooms.get(id))
    }

    pub fn room_types_of(&self, hotel: ListingId) -> impl Iterator<Item = &HotelRoomType> {
        self.room_types_by_hotel
            .get(&hotel)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.room_types.get(id))
    }
}

fn check_price(price: Decimal) -> Result<(), InventoryError> {
    if price <= Decimal::ZERO {
        return Err(InventoryError::NonPositivePrice(price));
    }
    Ok(())
}
