//! Capacity decision for a booking request

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::catalog::Catalog,
};

/// Why a booking request cannot be fulfilled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    UnknownEquipment,
    NonPositiveQuantity,
    InsufficientEquipment,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Rejection::UnknownEquipment => "unknown equipment kind",
            Rejection::NonPositiveQuantity => "quantity must be positive",
            Rejection::InsufficientEquipment => "insufficient equipment for this slot",
        };
        write!(f, "{}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Accept,
    Reject(Rejection),
}

impl Availability {
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Availability::Accept => Ok(()),
            Availability::Reject(rejection) => Err(AppError::Rejected(rejection)),
        }
    }
}

/// Pure capacity check against the catalog.
///
/// `committed` is the quantity already booked in the same bucket.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker {
    catalog: Catalog,
}

impl AvailabilityChecker {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn check(&self, equipment_kind: &str, quantity: i32, committed: i64) -> Availability {
        let Some(limit) = self.catalog.limit(equipment_kind) else {
            return Availability::Reject(Rejection::UnknownEquipment);
        };
        if quantity <= 0 {
            return Availability::Reject(Rejection::NonPositiveQuantity);
        }
        if committed + i64::from(quantity) > i64::from(limit) {
            return Availability::Reject(Rejection::InsufficientEquipment);
        }
        Availability::Accept
    }

    /// Units still free in a bucket, `None` for an unknown kind
    pub fn remaining(&self, equipment_kind: &str, committed: i64) -> Option<i64> {
        self.catalog
            .limit(equipment_kind)
            .map(|limit| (i64::from(limit) - committed).max(0))
    }
}
