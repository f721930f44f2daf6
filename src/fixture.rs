// Nested JSON datasets for loading listings into an inventory.
//
// A fixture mirrors how listings are entered administratively: apartments
// with a price, hotels with room types and rooms, and the blocked intervals
// hanging off each of them. Everything is funnelled through the checked
// inventory builders, so a fixture that violates an invariant is rejected.

use crate::blocking::BlockingError;
use crate::inventory::{Inventory, InventoryError};
use crate::models::*;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Invalid listing {title:?}: {source}")]
    InvalidListing {
        title: String,
        #[source]
        source: InventoryError,
    },

    #[error("Invalid blocked days on {title:?}: {source}")]
    InvalidBlockedDays {
        title: String,
        #[source]
        source: BlockingError,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    pub listings: Vec<ListingFixture>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "listing_type", rename_all = "lowercase")]
pub enum ListingFixture {
    Apartment {
        title: String,
        country: String,
        city: String,
        price: Decimal,
        #[serde(default)]
        blocked: Vec<DateRange>,
    },
    Hotel {
        title: String,
        country: String,
        city: String,
        #[serde(default)]
        room_types: Vec<RoomTypeFixture>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomTypeFixture {
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub rooms: Vec<RoomFixture>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoomFixture {
    pub room_number: String,
    #[serde(default)]
    pub blocked: Vec<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Fixture {
    pub fn from_json_str(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds an inventory holding every listing of the fixture.
    pub fn into_inventory(self) -> Result<Inventory, FixtureError> {
        let mut inventory = Inventory::new();
        for listing in self.listings {
            listing.load_into(&mut inventory)?;
        }
        Ok(inventory)
    }
}

impl ListingFixture {
    pub fn title(&self) -> &str {
        match self {
            ListingFixture::Apartment { title, .. } | ListingFixture::Hotel { title, .. } => title,
        }
    }

    fn load_into(self, inventory: &mut Inventory) -> Result<(), FixtureError> {
        match self {
            ListingFixture::Apartment {
                title,
                country,
                city,
                price,
                blocked,
            } => {
                let (_, booking_info) = inventory
                    .add_apartment(&title, &country, &city, price)
                    .map_err(|source| invalid_listing(&title, source))?;
                for range in blocked {
                    inventory
                        .block(&range.request(booking_info, None))
                        .map_err(|source| invalid_blocked_days(&title, source))?;
                }
            }
            ListingFixture::Hotel {
                title,
                country,
                city,
                room_types,
            } => {
                let hotel = inventory.add_hotel(&title, &country, &city);
                for room_type in room_types {
                    let (room_type_id, booking_info) = inventory
                        .add_room_type(hotel, &room_type.title, room_type.price)
                        .map_err(|source| invalid_listing(&title, source))?;
                    for room in room_type.rooms {
                        let room_id = inventory
                            .add_room(room_type_id, &room.room_number)
                            .map_err(|source| invalid_listing(&title, source))?;
                        for range in room.blocked {
                            inventory
                                .block(&range.request(booking_info, Some(room_id)))
                                .map_err(|source| invalid_blocked_days(&title, source))?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl DateRange {
    fn request(&self, booking_info: BookingInfoId, hotel_room: Option<HotelRoomId>) -> NewBlockedDays {
        NewBlockedDays {
            booking_info,
            hotel_room,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

fn invalid_listing(title: &str, source: InventoryError) -> FixtureError {
    FixtureError::InvalidListing {
        title: title.to_string(),
        source,
    }
}

fn invalid_blocked_days(title: &str, source: BlockingError) -> FixtureError {
    FixtureError::InvalidBlockedDays {
        title: title.to_string(),
        source,
    }
}

// Small dataset used by the binary when nothing else is configured.
pub const SAMPLE_FIXTURE_JSON: &str = r#"
{
  "listings": [
    {
      "listing_type": "apartment",
      "title": "Luxurious Apartment",
      "country": "Portugal",
      "city": "Lisbon",
      "price": 150,
      "blocked": [{ "start_date": "2021-05-01", "end_date": "2021-05-03" }]
    },
    {
      "listing_type": "apartment",
      "title": "Modern 2 Bed Apartment",
      "country": "Portugal",
      "city": "Porto",
      "price": "90.00"
    },
    {
      "listing_type": "hotel",
      "title": "Atlantic 4* hotel",
      "country": "Portugal",
      "city": "Lisbon",
      "room_types": [
        {
          "title": "Single Room",
          "price": 50,
          "rooms": [
            {
              "room_number": "101",
              "blocked": [{ "start_date": "2021-05-02", "end_date": "2021-05-02" }]
            }
          ]
        },
        {
          "title": "Double Room",
          "price": 60,
          "rooms": [
            {
              "room_number": "201",
              "blocked": [{ "start_date": "2021-05-02", "end_date": "2021-05-02" }]
            },
            { "room_number": "202" },
            { "room_number": "301" }
          ]
        },
        {
          "title": "Triple Room",
          "price": 160,
          "rooms": [{ "room_number": "302" }]
        }
      ]
    }
  ]
}
"#;
