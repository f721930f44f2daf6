// Lodging data model: listings, hotel room types and rooms, their prices and
// the calendar of blocked days.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ListingId = u64;
pub type RoomTypeId = u64;
pub type HotelRoomId = u64;
pub type BookingInfoId = u64;
pub type BlockedDaysId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Hotel,
    Apartment,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Hotel => "hotel",
            ListingType::Apartment => "apartment",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub listing_type: ListingType,
    pub title: String,
    pub country: String,
    pub city: String,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRoomType {
    pub id: RoomTypeId,
    pub hotel: ListingId,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRoom {
    pub id: HotelRoomId,
    pub room_type: RoomTypeId,
    pub room_number: String,
}

/// Who a price record belongs to. A booking info is attached either to a
/// whole apartment listing or to one hotel room type, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum BookingInfoOwner {
    Apartment(ListingId),
    HotelRoomType(RoomTypeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    pub id: BookingInfoId,
    pub owner: BookingInfoOwner,
    pub price: Decimal,
}

/// A closed interval `[start_date, end_date]` during which a booking info
/// (and, for hotels, one specific room) cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedDays {
    pub id: BlockedDaysId,
    pub booking_info: BookingInfoId,
    pub hotel_room: Option<HotelRoomId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl BlockedDays {
    // Both intervals are closed, so touching edges count as an overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.end_date >= start && self.start_date <= end
    }
}

impl fmt::Display for BlockedDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_date, self.end_date)
    }
}

// Unvalidated write request for a blocked interval. `end_date` stays optional
// here so a missing value can be reported as a field error instead of failing
// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlockedDays {
    pub booking_info: BookingInfoId,
    #[serde(default)]
    pub hotel_room: Option<HotelRoomId>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl NewBlockedDays {
    pub fn apartment(booking_info: BookingInfoId, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            booking_info,
            hotel_room: None,
            start_date,
            end_date: Some(end_date),
        }
    }

    pub fn hotel_room(
        booking_info: BookingInfoId,
        hotel_room: HotelRoomId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            booking_info,
            hotel_room: Some(hotel_room),
            start_date,
            end_date: Some(end_date),
        }
    }
}

/// One row of the availability answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableUnit {
    pub listing_type: ListingType,
    pub title: String,
    pub country: String,
    pub city: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn block(start: &str, end: &str) -> BlockedDays {
        BlockedDays {
            id: 1,
            booking_info: 1,
            hotel_room: None,
            start_date: date(start),
            end_date: date(end),
        }
    }

    #[test]
    fn test_overlap_is_inclusive_on_both_ends() {
        let blocked = block("2021-05-02", "2021-05-04");

        assert!(blocked.overlaps(date("2021-05-04"), date("2021-05-06")));
        assert!(blocked.overlaps(date("2021-04-30"), date("2021-05-02")));
        assert!(blocked.overlaps(date("2021-05-03"), date("2021-05-03")));
        assert!(blocked.overlaps(date("2021-05-01"), date("2021-05-10")));
        assert!(!blocked.overlaps(date("2021-05-05"), date("2021-05-06")));
        assert!(!blocked.overlaps(date("2021-04-28"), date("2021-05-01")));
    }

    #[test]
    fn test_available_unit_serializes_price_as_number() {
        let unit = AvailableUnit {
            listing_type: ListingType::Apartment,
            title: "Modern 2 Bed Apartment".to_string(),
            country: "Portugal".to_string(),
            city: "Porto".to_string(),
            price: dec!(90.50),
        };

        let json = serde_json::to_value(&unit).unwrap();
        assert_eq!(json["listing_type"], "apartment");
        assert_eq!(json["price"], serde_json::json!(90.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(ListingType::Hotel.to_string(), "hotel");
        assert_eq!(block("2021-05-02", "2021-05-04").to_string(), "2021-05-02 - 2021-05-04");
    }
}
