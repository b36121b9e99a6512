//! Data models for equipment bookings

pub mod booking;
pub mod catalog;
pub mod enums;

// Re-export commonly used types
pub use booking::{Booking, BookingDraft, Bucket, CalendarEvent, CreateBooking, NewBooking};
pub use catalog::{Catalog, EquipmentStock};
pub use enums::Period;
