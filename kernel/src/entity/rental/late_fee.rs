use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::RentalLimitations;

/// Delinquency charge owed when a rental is finished. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, References)]
pub struct LateFee {
    overdue_days: i64,
    amount: i64,
}

impl LateFee {
    pub fn for_overdue_days(days: i64) -> Self {
        let overdue_days = days.max(0);
        Self {
            overdue_days,
            amount: overdue_days * RentalLimitations::DELINQUENT_FEE_PER_DAY,
        }
    }
}
