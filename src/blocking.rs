// Integrity checks for blocked-day writes. Runs against an inventory snapshot
// without touching any storage, so the store can call it under its write lock
// right before committing.

use crate::inventory::Inventory;
use crate::models::*;
use chrono::NaiveDate;
use thiserror::Error;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockingError {
    #[error("Unknown booking info: {0}")]
    UnknownBookingInfo(BookingInfoId),

    #[error("Unknown blocked days: {0}")]
    UnknownBlockedDays(BlockedDaysId),

    #[error("Hotel room shouldn't be selected if the selected booking is of apartment")]
    HotelRoomOnApartment,

    #[error("End Date is a required field")]
    MissingEndDate,

    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("Invalid Hotel room for selected booking info")]
    InvalidHotelRoom,

    #[error("This booking/hotel room is blocked for this period")]
    Overlap { existing: BlockedDaysId },
}

impl BlockingError {
    /// Name of the write field the error is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            BlockingError::UnknownBookingInfo(_) => "booking_info",
            BlockingError::HotelRoomOnApartment | BlockingError::InvalidHotelRoom => "hotel_room",
            BlockingError::MissingEndDate | BlockingError::EndBeforeStart { .. } => "end_date",
            BlockingError::UnknownBlockedDays(_) | BlockingError::Overlap { .. } => {
                NON_FIELD_ERRORS
            }
        }
    }
}

// A request that passed every check, with the end date resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBlock {
    pub booking_info: BookingInfoId,
    pub hotel_room: Option<HotelRoomId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ValidBlock {
    pub fn into_blocked_days(self, id: BlockedDaysId) -> BlockedDays {
        BlockedDays {
            id,
            booking_info: self.booking_info,
            hotel_room: self.hotel_room,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Checks a blocked-days write against the inventory.
///
/// `replacing` names the row being updated, if any; it is left out of the
/// overlap check. Checks run in a fixed order and the first failure wins:
/// apartment/room mismatch, missing or reversed end date, room membership,
/// then overlap with existing rows for the same booking info and room.
pub fn validate(
    inventory: &Inventory,
    request: &NewBlockedDays,
    replacing: Option<BlockedDaysId>,
) -> Result<ValidBlock, BlockingError> {
    let booking_info = inventory
        .booking_info(request.booking_info)
        .ok_or(BlockingError::UnknownBookingInfo(request.booking_info))?;

    if matches!(booking_info.owner, BookingInfoOwner::Apartment(_)) && request.hotel_room.is_some()
    {
        return Err(BlockingError::HotelRoomOnApartment);
    }

    let end_date = request.end_date.ok_or(BlockingError::MissingEndDate)?;
    if end_date < request.start_date {
        return Err(BlockingError::EndBeforeStart {
            start: request.start_date,
            end: end_date,
        });
    }

    if let BookingInfoOwner::HotelRoomType(room_type) = booking_info.owner {
        let in_room_type = request
            .hotel_room
            .and_then(|id| inventory.room(id))
            .is_some_and(|room| room.room_type == room_type);
        if !in_room_type {
            return Err(BlockingError::InvalidHotelRoom);
        }
    }

    let conflict = inventory.all_blocked_days().find(|existing| {
        Some(existing.id) != replacing
            && existing.booking_info == request.booking_info
            && existing.hotel_room == request.hotel_room
            && existing.overlaps(request.start_date, end_date)
    });
    if let Some(existing) = conflict {
        return Err(BlockingError::Overlap {
            existing: existing.id,
        });
    }

    Ok(ValidBlock {
        booking_info: request.booking_info,
        hotel_room: request.hotel_room,
        start_date: request.start_date,
        end_date,
    })
}
