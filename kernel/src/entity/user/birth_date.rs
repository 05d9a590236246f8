use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

pub const ADULT_AGE: i32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct BirthDate(Date);

impl BirthDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }

    /// Whole years elapsed between the birth date and `today`.
    pub fn age_at(&self, today: Date) -> i32 {
        let born = self.0;
        let years = today.year() - born.year();
        let birthday_pending =
            (u8::from(today.month()), today.day()) < (u8::from(born.month()), born.day());
        if birthday_pending {
            years - 1
        } else {
            years
        }
    }
}
