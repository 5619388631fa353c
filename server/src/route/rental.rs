use application::service::{CreateRentalService, GetRentalService, ReturnRentalService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::Query;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CreateRentalRequest, GetCustomerRentalsRequest, GetInventoryRentalsRequest,
    GetRentalRequest, PageRequest, RentalTransformer, ReturnRentalRequest,
};
use crate::response::{RentalDetailResponse, RentalPresenter};

pub trait RentalRouter {
    fn route_rental(self) -> Self;
}

impl RentalRouter for Router<AppModule> {
    fn route_rental(self) -> Self {
        self.route(
            "/rentals",
            post(
                |State(module): State<AppModule>, Json(req): Json<CreateRentalRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.pgpool().create_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| (StatusCode::CREATED, res))
                },
            ),
        )
        .route(
            "/rentals/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<i32>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(GetRentalRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(RentalDetailResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
        .route(
            "/rentals/:id/return_movie",
            post(
                |State(module): State<AppModule>, Path(id): Path<i32>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(ReturnRentalRequest::new(id))
                        .handle(|dto| async move { module.pgpool().return_rental(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/customers/:id/rentals",
            get(
                |State(module): State<AppModule>,
                 Path(id): Path<i32>,
                 Query(page): Query<PageRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(GetCustomerRentalsRequest::new(id, page))
                        .handle(|dto| async move {
                            module.pgpool().get_rentals_by_customer(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/inventory/:id/rentals",
            get(
                |State(module): State<AppModule>,
                 Path(id): Path<i32>,
                 Query(page): Query<PageRequest>| async move {
                    Controller::new(RentalTransformer, RentalPresenter)
                        .intake(GetInventoryRentalsRequest::new(id, page))
                        .handle(|dto| async move {
                            module.pgpool().get_rentals_by_inventory(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
