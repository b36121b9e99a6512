//! Booking models

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use super::enums::Period;
use crate::{
    config::BookingConfig,
    error::{AppError, AppResult},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field order used when reporting the first invalid field of a draft
const FIELD_ORDER: [&str; 8] = [
    "requester",
    "subject",
    "equipment_kind",
    "quantity",
    "period",
    "lesson_slot",
    "activity",
    "date",
];

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    /// Staff member who booked the equipment
    pub requester: String,
    /// Course or subject
    pub subject: String,
    /// Equipment kind, one of the catalog names
    pub equipment_kind: String,
    pub quantity: i32,
    pub period: Period,
    pub lesson_slot: i16,
    /// What the equipment is used for
    pub activity: String,
    #[sqlx(rename = "booking_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn bucket(&self) -> Bucket {
        Bucket {
            equipment_kind: self.equipment_kind.clone(),
            period: self.period,
            lesson_slot: self.lesson_slot,
            date: self.date,
        }
    }

    /// Single-day calendar entry for this booking
    pub fn calendar_event(&self) -> CalendarEvent {
        CalendarEvent {
            id: self.id,
            title: format!(
                "{} - {} ({} Lesson {})",
                self.requester, self.equipment_kind, self.period, self.lesson_slot
            ),
            start: self.date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Capacity accounting unit: bookings sharing a bucket compete for the same stock
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    pub equipment_kind: String,
    pub period: Period,
    pub lesson_slot: i16,
    pub date: NaiveDate,
}

impl Bucket {
    /// Stable text key, used to serialize writers on the same bucket
    pub fn lock_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.equipment_kind,
            i16::from(self.period),
            self.lesson_slot,
            self.date.format(DATE_FORMAT)
        )
    }
}

/// A validated booking, ready to be checked and stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub requester: String,
    pub subject: String,
    pub equipment_kind: String,
    pub quantity: i32,
    pub period: Period,
    pub lesson_slot: i16,
    pub activity: String,
    pub date: NaiveDate,
}

impl NewBooking {
    pub fn bucket(&self) -> Bucket {
        Bucket {
            equipment_kind: self.equipment_kind.clone(),
            period: self.period,
            lesson_slot: self.lesson_slot,
            date: self.date,
        }
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// Booking as submitted, every field still text (HTML form shape)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookingDraft {
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub requester: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub subject: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub equipment_kind: String,
    #[validate(custom(function = "positive_quantity"))]
    #[serde(default)]
    pub quantity: String,
    #[validate(custom(function = "known_period"))]
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub lesson_slot: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub activity: String,
    #[validate(custom(function = "iso_date"))]
    #[serde(default)]
    pub date: String,
}

/// Create booking request (JSON API)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub requester: String,
    pub subject: String,
    /// Equipment kind, one of the catalog names
    pub equipment_kind: String,
    pub quantity: i32,
    /// Morning, Afternoon or Evening
    pub period: String,
    pub lesson_slot: i32,
    pub activity: String,
    /// Booking date (YYYY-MM-DD)
    pub date: String,
}

impl From<CreateBooking> for BookingDraft {
    fn from(data: CreateBooking) -> Self {
        Self {
            requester: data.requester,
            subject: data.subject,
            equipment_kind: data.equipment_kind,
            quantity: data.quantity.to_string(),
            period: data.period,
            lesson_slot: data.lesson_slot.to_string(),
            activity: data.activity,
            date: data.date,
        }
    }
}

impl BookingDraft {
    /// Validate every field and build a typed booking.
    ///
    /// Fails with the first invalid field in form order.
    pub fn validate_with(&self, rules: &BookingConfig) -> AppResult<NewBooking> {
        let mut violations = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        };
        if let Err(msg) = lesson_slot_in_range(&self.lesson_slot, rules) {
            violations.push(("lesson_slot".to_string(), msg));
        }

        if let Some((field, msg)) = violations
            .into_iter()
            .min_by_key(|(field, _)| field_position(field))
        {
            return Err(AppError::Validation(format!("{} {}", field, msg)));
        }

        Ok(NewBooking {
            requester: self.requester.trim().to_string(),
            subject: self.subject.trim().to_string(),
            equipment_kind: self.equipment_kind.trim().to_string(),
            quantity: parse_field(&self.quantity, "quantity")?,
            period: self.period.parse().map_err(AppError::Validation)?,
            lesson_slot: lesson_slot_in_range(&self.lesson_slot, rules)
                .map_err(AppError::Validation)?,
            activity: self.activity.trim().to_string(),
            date: NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
                .map_err(|_| AppError::Validation("date is invalid".to_string()))?,
        })
    }
}

fn collect_violations(errors: &ValidationErrors) -> Vec<(String, String)> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let msg = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            (AsRef::<str>::as_ref(field).to_string(), msg)
        })
        .collect()
}

fn field_position(field: &str) -> usize {
    FIELD_ORDER
        .iter()
        .position(|f| *f == field)
        .unwrap_or(FIELD_ORDER.len())
}

fn parse_field<T: std::str::FromStr>(value: &str, field: &str) -> AppResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::Validation(format!("{} must be a whole number", field)))
}

fn lesson_slot_in_range(value: &str, rules: &BookingConfig) -> Result<i16, String> {
    let out_of_range = || {
        format!(
            "must be between {} and {}",
            rules.min_lesson_slot, rules.max_lesson_slot
        )
    };
    let slot: i64 = value
        .trim()
        .parse()
        .map_err(|_| "must be a whole number".to_string())?;
    if slot < i64::from(rules.min_lesson_slot) || slot > i64::from(rules.max_lesson_slot) {
        return Err(out_of_range());
    }
    i16::try_from(slot).map_err(|_| out_of_range())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid("blank", "must not be empty"));
    }
    if value.chars().any(char::is_control) {
        return Err(invalid("control_character", "must not contain control characters"));
    }
    Ok(())
}

fn positive_quantity(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(n) if n <= 0 => Err(invalid("non_positive", "must be positive")),
        Ok(n) if n > i64::from(i32::MAX) => Err(invalid("too_large", "is too large")),
        Ok(_) => Ok(()),
        Err(_) => Err(invalid("not_a_number", "must be a whole number")),
    }
}

fn known_period(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Period>()
        .map(|_| ())
        .map_err(|_| invalid("period", "must be one of Morning, Afternoon, Evening"))
}

fn iso_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid("date", "must be a date in YYYY-MM-DD format"))
}

// ---------------------------------------------------------------------------
// Calendar & availability
// ---------------------------------------------------------------------------

/// Calendar feed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    pub id: i32,
    pub title: String,
    /// ISO date (YYYY-MM-DD)
    pub start: String,
}

/// Query parameters for slot availability, taken as text like the form
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(default)]
pub struct AvailabilityQuery {
    pub equipment_kind: String,
    /// Morning, Afternoon or Evening
    pub period: String,
    /// Lesson slot number
    pub lesson_slot: String,
    /// Date (YYYY-MM-DD)
    pub date: String,
}

impl AvailabilityQuery {
    pub fn bucket(&self, rules: &BookingConfig) -> AppResult<Bucket> {
        // Placeholder text fields; only the bucket fields matter here
        let draft = BookingDraft {
            requester: "-".to_string(),
            subject: "-".to_string(),
            equipment_kind: self.equipment_kind.clone(),
            quantity: "1".to_string(),
            period: self.period.clone(),
            lesson_slot: self.lesson_slot.clone(),
            activity: "-".to_string(),
            date: self.date.clone(),
        };
        Ok(draft.validate_with(rules)?.bucket())
    }
}

/// Stock left in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SlotAvailability {
    pub equipment_kind: String,
    pub period: Period,
    pub lesson_slot: i16,
    pub date: NaiveDate,
    /// Units owned
    pub total: i32,
    /// Units already booked in this slot
    pub committed: i64,
    /// Units still free in this slot
    pub remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> BookingDraft {
        BookingDraft {
            requester: "Ana".to_string(),
            subject: "Math".to_string(),
            equipment_kind: "Tablet".to_string(),
            quantity: "2".to_string(),
            period: "Morning".to_string(),
            lesson_slot: "1".to_string(),
            activity: "Quiz".to_string(),
            date: "2024-05-10".to_string(),
        }
    }

    fn validation_message(draft: &BookingDraft) -> String {
        match draft.validate_with(&BookingConfig::default()) {
            Err(AppError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_draft() {
        let booking = draft().validate_with(&BookingConfig::default()).unwrap();
        assert_eq!(booking.requester, "Ana");
        assert_eq!(booking.quantity, 2);
        assert_eq!(booking.period, Period::Morning);
        assert_eq!(booking.lesson_slot, 1);
        assert_eq!(booking.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let mut d = draft();
        d.requester = "  Ana ".to_string();
        let booking = d.validate_with(&BookingConfig::default()).unwrap();
        assert_eq!(booking.requester, "Ana");
    }

    #[test]
    fn test_non_positive_quantity() {
        let mut d = draft();
        d.quantity = "0".to_string();
        assert_eq!(validation_message(&d), "quantity must be positive");
        d.quantity = "-3".to_string();
        assert_eq!(validation_message(&d), "quantity must be positive");
        d.quantity = "two".to_string();
        assert_eq!(validation_message(&d), "quantity must be a whole number");
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut d = draft();
        d.requester = "An\0a".to_string();
        assert_eq!(validation_message(&d), "requester must not contain control characters");

        let mut d = draft();
        d.activity = "Quiz\u{1b}[2J".to_string();
        assert_eq!(validation_message(&d), "activity must not contain control characters");

        // surrounding whitespace is trimmed, not rejected
        let mut d = draft();
        d.subject = "Math\r\n".to_string();
        assert_eq!(d.validate_with(&BookingConfig::default()).unwrap().subject, "Math");
    }

    #[test]
    fn test_reports_first_invalid_field_in_form_order() {
        let mut d = draft();
        d.activity = " ".to_string();
        d.period = "Night".to_string();
        d.subject = String::new();
        assert_eq!(validation_message(&d), "subject must not be empty");
    }

    #[test]
    fn test_lesson_slot_bounds() {
        let mut d = draft();
        d.lesson_slot = "7".to_string();
        assert_eq!(validation_message(&d), "lesson_slot must be between 1 and 6");
        d.lesson_slot = "0".to_string();
        assert_eq!(validation_message(&d), "lesson_slot must be between 1 and 6");

        let wide = BookingConfig { min_lesson_slot: 1, max_lesson_slot: 9 };
        d.lesson_slot = "7".to_string();
        assert_eq!(d.validate_with(&wide).unwrap().lesson_slot, 7);
    }

    #[test]
    fn test_bad_date_and_period() {
        let mut d = draft();
        d.date = "10/05/2024".to_string();
        assert_eq!(validation_message(&d), "date must be a date in YYYY-MM-DD format");
        d.period = "Noon".to_string();
        assert_eq!(
            validation_message(&d),
            "period must be one of Morning, Afternoon, Evening"
        );
    }

    #[test]
    fn test_calendar_event_title() {
        let booking = Booking {
            id: 7,
            requester: "Ana".to_string(),
            subject: "Math".to_string(),
            equipment_kind: "Tablet".to_string(),
            quantity: 2,
            period: Period::Morning,
            lesson_slot: 1,
            activity: "Quiz".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            created_at: Utc::now(),
        };
        let event = booking.calendar_event();
        assert_eq!(event.id, 7);
        assert_eq!(event.title, "Ana - Tablet (Morning Lesson 1)");
        assert_eq!(event.start, "2024-05-10");
    }

    #[test]
    fn test_bucket_key_distinguishes_slots() {
        let a = draft().validate_with(&BookingConfig::default()).unwrap().bucket();
        let mut d = draft();
        d.lesson_slot = "2".to_string();
        let b = d.validate_with(&BookingConfig::default()).unwrap().bucket();
        assert_ne!(a.lock_key(), b.lock_key());
        assert_eq!(a.lock_key(), "Tablet|0|1|2024-05-10");
    }
}
