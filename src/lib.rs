// Lodging availability API: which hotels and apartments can be booked for a
// date range under a price ceiling.

pub mod api;
pub mod blocking;
pub mod config;
pub mod fixture;
pub mod inventory;
pub mod models;
pub mod query;
pub mod resolver;
pub mod seed;
pub mod store;

// Re-export key types for convenience
pub use api::{router, ApiError, AppState, UnitsResponse};
pub use blocking::BlockingError;
pub use config::{ConfigError, DataSource, ServerConfig};
pub use fixture::{Fixture, FixtureError};
pub use inventory::{Inventory, InventoryError};
pub use models::{
    AvailableUnit, BlockedDays, BookingInfo, BookingInfoOwner, HotelRoom, HotelRoomType, Listing,
    ListingType, NewBlockedDays,
};
pub use query::{AvailabilityParams, AvailabilityQuery, ValidationErrors};
pub use resolver::resolve;
pub use store::{AvailabilityStore, InMemoryStore, StoreError};
