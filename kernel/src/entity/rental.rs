mod closed;
mod id;
mod late_fee;
mod limitation;
mod period;

pub use self::{closed::*, id::*, late_fee::*, limitation::*, period::*};
use crate::entity::UserId;
use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Destructure, References)]
pub struct Rental {
    id: RentalId,
    user_id: UserId,
    date: RentalDate,
    end_date: EndDate,
    closed: IsClosed,
}

impl Rental {
    pub fn new(
        id: RentalId,
        user_id: UserId,
        date: RentalDate,
        end_date: EndDate,
        closed: IsClosed,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            end_date,
            closed,
        }
    }

    pub fn is_open(&self) -> bool {
        !*self.closed.as_ref()
    }

    /// Calendar days elapsed past the end date, zero while not overdue.
    pub fn overdue_days_at(&self, now: OffsetDateTime) -> i64 {
        let end = self.end_date.as_ref().date();
        (now.date() - end).whole_days().max(0)
    }

    pub fn late_fee_at(&self, now: OffsetDateTime) -> LateFee {
        LateFee::for_overdue_days(self.overdue_days_at(now))
    }
}
