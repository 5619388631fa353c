use application::transfer::{RentalDetailDto, RentalDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::OffsetDateTime;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct RentalResponse {
    rental_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    rental_date: OffsetDateTime,
    inventory: i32,
    customer: i32,
    staff: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    return_date: Option<OffsetDateTime>,
    is_returned: bool,
    #[serde(with = "time::serde::rfc3339")]
    last_update: OffsetDateTime,
}

impl From<RentalDto> for RentalResponse {
    fn from(value: RentalDto) -> Self {
        Self {
            is_returned: value.is_returned(),
            rental_id: value.rental_id,
            rental_date: value.rental_date,
            inventory: value.inventory_id,
            customer: value.customer_id,
            staff: value.staff_id,
            return_date: value.return_date,
            last_update: value.last_update,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentalDetailResponse {
    #[serde(flatten)]
    rental: RentalResponse,
    film_title: String,
    customer_name: String,
    staff_name: String,
}

impl From<RentalDetailDto> for RentalDetailResponse {
    fn from(value: RentalDetailDto) -> Self {
        Self {
            rental: RentalResponse::from(value.rental),
            film_title: value.film_title,
            customer_name: value.customer_name,
            staff_name: value.staff_name,
        }
    }
}

impl IntoResponse for RentalDetailResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct RentalPresenter;

impl Exhaust<RentalDetailDto> for RentalPresenter {
    type To = RentalDetailResponse;
    fn emit(&self, input: RentalDetailDto) -> Self::To {
        RentalDetailResponse::from(input)
    }
}

impl Exhaust<Option<RentalDetailDto>> for RentalPresenter {
    type To = Option<RentalDetailResponse>;
    fn emit(&self, input: Option<RentalDetailDto>) -> Self::To {
        input.map(RentalDetailResponse::from)
    }
}

impl Exhaust<Vec<RentalDetailDto>> for RentalPresenter {
    type To = axum::Json<Vec<RentalDetailResponse>>;
    fn emit(&self, input: Vec<RentalDetailDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(RentalDetailResponse::from)
            .collect::<Vec<_>>();
        axum::Json::from(result)
    }
}
