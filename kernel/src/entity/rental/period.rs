use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln, References};

use crate::entity::RentalLimitations;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RentalDate(OffsetDateTime);

impl RentalDate {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct EndDate(OffsetDateTime);

impl EndDate {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

/// Opening and due dates of a rental that is about to be created.
#[derive(Debug, Clone, PartialEq, Eq, References)]
pub struct RentalPeriod {
    date: RentalDate,
    end_date: EndDate,
}

impl RentalPeriod {
    pub fn starting_at(now: OffsetDateTime) -> Self {
        Self {
            date: RentalDate::new(now),
            end_date: EndDate::new(now + Duration::days(RentalLimitations::RENTAL_DAYS_LIMIT)),
        }
    }
}
