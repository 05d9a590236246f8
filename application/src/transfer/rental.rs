use kernel::prelude::entity::{DestructRental, LateFee, Rental};
use time::OffsetDateTime;

use crate::transfer::MovieDto;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub id: i32,
    pub user_id: i32,
    pub date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub closed: bool,
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            user_id,
            date,
            end_date,
            closed,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date: date.into(),
            end_date: end_date.into(),
            closed: closed.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDetailDto {
    pub rental: RentalDto,
    pub movies: Vec<MovieDto>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FinishedRentalDto {
    pub rental_id: i32,
    pub overdue_days: i64,
    pub late_fee: i64,
}

impl FinishedRentalDto {
    pub fn new(rental_id: i32, fee: LateFee) -> Self {
        Self {
            rental_id,
            overdue_days: *fee.overdue_days(),
            late_fee: *fee.amount(),
        }
    }
}

pub struct GetRentalDto {
    pub id: i32,
}

pub struct CreateRentalDto {
    pub user_id: i32,
    pub movie_ids: Vec<i32>,
}

pub struct FinishRentalDto {
    pub rental_id: i32,
}
