use application::transfer::{FinishedRentalDto, MovieDto, RentalDetailDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    id: i32,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    user_id: i32,
    closed: bool,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            id: value.id,
            date: value.date,
            end_date: value.end_date,
            user_id: value.user_id,
            closed: value.closed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    id: i32,
    name: String,
    adults_only: bool,
    rental_id: Option<i32>,
}

impl From<MovieDto> for MovieResponse {
    fn from(value: MovieDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            adults_only: value.adults_only,
            rental_id: value.rental_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentalDetailResponse {
    #[serde(flatten)]
    rental: RentalResponse,
    movies: Vec<MovieResponse>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse(RentalResponse);

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedResponse {
    rental_id: i32,
    overdue_days: i64,
    late_fee: i64,
}

pub struct RentalPresenter;

impl Exhaust<Vec<RentalDto>> for RentalPresenter {
    type To = Json<Vec<RentalResponse>>;
    fn emit(&self, output: Vec<RentalDto>) -> Self::To {
        Json(output.into_iter().map(RentalResponse::from).collect())
    }
}

impl Exhaust<RentalDetailDto> for RentalPresenter {
    type To = Json<RentalDetailResponse>;
    fn emit(&self, output: RentalDetailDto) -> Self::To {
        Json(RentalDetailResponse {
            rental: RentalResponse::from(output.rental),
            movies: output.movies.into_iter().map(MovieResponse::from).collect(),
        })
    }
}

impl Exhaust<RentalDto> for RentalPresenter {
    type To = CreatedResponse;
    fn emit(&self, output: RentalDto) -> Self::To {
        CreatedResponse(RentalResponse::from(output))
    }
}

impl Exhaust<FinishedRentalDto> for RentalPresenter {
    type To = Json<FinishedResponse>;
    fn emit(&self, output: FinishedRentalDto) -> Self::To {
        Json(FinishedResponse {
            rental_id: output.rental_id,
            overdue_days: output.overdue_days,
            late_fee: output.late_fee,
        })
    }
}
