// Availability resolution: which apartments and hotels can be booked for a
// date range under a price ceiling.

use crate::inventory::Inventory;
use crate::models::*;
use crate::query::AvailabilityQuery;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

// Cheapest available room seen so far for one hotel.
#[derive(Debug, Clone, Copy)]
struct HotelCandidate {
    price: Decimal,
    room_type: RoomTypeId,
    room: HotelRoomId,
}

impl HotelCandidate {
    fn rank(&self) -> (Decimal, RoomTypeId, HotelRoomId) {
        (self.price, self.room_type, self.room)
    }
}

/// Resolves the bookable units for `query`.
///
/// Apartments are listed first, in listing order. Hotels follow, one row
/// each, carrying the price of the cheapest room type that still has an
/// unblocked room in the window; rows are ordered by that price.
pub fn resolve(inventory: &Inventory, query: &AvailabilityQuery) -> Vec<AvailableUnit> {
    let (check_in, check_out) = (query.check_in(), query.check_out());
    let max_price = query.max_price();

    let mut blocked_apartments: HashSet<ListingId> = HashSet::new();
    let mut blocked_rooms: HashSet<HotelRoomId> = HashSet::new();
    for blocked in inventory
        .all_blocked_days()
        .filter(|blocked| blocked.overlaps(check_in, check_out))
    {
        match inventory.booking_info(blocked.booking_info).map(|info| info.owner) {
            Some(BookingInfoOwner::Apartment(listing)) => {
                blocked_apartments.insert(listing);
            }
            Some(BookingInfoOwner::HotelRoomType(_)) => {
                if let Some(room) = blocked.hotel_room {
                    blocked_rooms.insert(room);
                }
            }
            None => {}
        }
    }

    let mut units: Vec<AvailableUnit> = inventory
        .listings()
        .filter(|listing| listing.listing_type == ListingType::Apartment)
        .filter(|listing| !blocked_apartments.contains(&listing.id))
        .filter_map(|listing| {
            let info = inventory.booking_info_of(BookingInfoOwner::Apartment(listing.id))?;
            (info.price <= max_price).then(|| unit(listing, info.price))
        })
        .collect();

    let mut cheapest: BTreeMap<ListingId, HotelCandidate> = BTreeMap::new();
    for room_type in inventory.room_types() {
        let Some(info) = inventory.booking_info_of(BookingInfoOwner::HotelRoomType(room_type.id))
        else {
            continue;
        };
        if info.price > max_price {
            continue;
        }

        for room in inventory
            .rooms_of(room_type.id)
            .filter(|room| !blocked_rooms.contains(&room.id))
        {
            let candidate = HotelCandidate {
                price: info.price,
                room_type: room_type.id,
                room: room.id,
            };
            cheapest
                .entry(room_type.hotel)
                .and_modify(|best| {
                    if candidate.rank() < best.rank() {
                        *best = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }

    let mut hotels: Vec<(ListingId, HotelCandidate)> = cheapest.into_iter().collect();
    hotels.sort_by_key(|(hotel, candidate)| (candidate.price, *hotel));
    units.extend(hotels.into_iter().filter_map(|(hotel, candidate)| {
        inventory
            .listing(hotel)
            .map(|listing| unit(listing, candidate.price))
    }));

    tracing::debug!(
        units = units.len(),
        blocked_apartments = blocked_apartments.len(),
        blocked_rooms = blocked_rooms.len(),
        "resolved availability"
    );
    units
}

fn unit(listing: &Listing, price: Decimal) -> AvailableUnit {
    AvailableUnit {
        listing_type: listing.listing_type,
        title: listing.title.clone(),
        country: listing.country.clone(),
        city: listing.city.clone(),
        price,
    }
}
