use application::transfer::{CreateRentalDto, FinishRentalDto, GetRentalDto};
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Deserialize;

use crate::controller::TryIntake;
use crate::error::ErrorStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    user_id: i32,
    movies_id: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishRentalRequest {
    rental_id: i32,
}

#[derive(Debug)]
pub struct GetRentalRequest {
    id: String,
}

impl GetRentalRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct RentalTransformer;

impl TryIntake<GetRentalRequest> for RentalTransformer {
    type To = GetRentalDto;
    type Error = ErrorStatus;
    fn emit(&self, input: GetRentalRequest) -> Result<Self::To, Self::Error> {
        // digits only: `parse` would also take a leading sign
        if input.id.is_empty() || !input.id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_rental_id(&input.id));
        }
        match input.id.parse::<i32>() {
            Ok(id) if id > 0 => Ok(GetRentalDto { id }),
            _ => Err(invalid_rental_id(&input.id)),
        }
    }
}

pub fn invalid_rental_id(raw: &str) -> ErrorStatus {
    ErrorStatus::BadRequest(format!(
        "Rental id must be a positive integer, got {:?}",
        raw
    ))
}

impl TryIntake<Result<Json<CreateRentalRequest>, JsonRejection>> for RentalTransformer {
    type To = CreateRentalDto;
    type Error = ErrorStatus;
    fn emit(
        &self,
        input: Result<Json<CreateRentalRequest>, JsonRejection>,
    ) -> Result<Self::To, Self::Error> {
        let Json(CreateRentalRequest { user_id, movies_id }) = input.map_err(unprocessable)?;
        Ok(CreateRentalDto {
            user_id,
            movie_ids: movies_id,
        })
    }
}

impl TryIntake<Result<Json<FinishRentalRequest>, JsonRejection>> for RentalTransformer {
    type To = FinishRentalDto;
    type Error = ErrorStatus;
    fn emit(
        &self,
        input: Result<Json<FinishRentalRequest>, JsonRejection>,
    ) -> Result<Self::To, Self::Error> {
        let Json(FinishRentalRequest { rental_id }) = input.map_err(unprocessable)?;
        Ok(FinishRentalDto { rental_id })
    }
}

// Every body rejection counts as a schema failure, syntax errors included.
fn unprocessable(rejection: JsonRejection) -> ErrorStatus {
    ErrorStatus::Unprocessable(rejection.body_text())
}
