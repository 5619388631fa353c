use application::transfer::{
    CreateRentalDto, GetCustomerRentalsDto, GetInventoryRentalsDto, GetRentalDto,
    ReturnRentalDto,
};
use kernel::prelude::entity::{SelectLimit, SelectOffset};
use serde::Deserialize;

use crate::controller::Intake;

/// Field names follow the rental form: each carries the id of the row.
#[derive(Debug, Deserialize)]
pub struct CreateRentalRequest {
    customer: i32,
    inventory: i32,
    staff: i32,
}

#[derive(Debug)]
pub struct ReturnRentalRequest {
    id: i32,
}

impl ReturnRentalRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetRentalRequest {
    id: i32,
}

impl GetRentalRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PageRequest {
    limit: Option<i32>,
    offset: Option<i32>,
}

impl PageRequest {
    fn into_bounds(self) -> (SelectLimit, SelectOffset) {
        (
            self.limit.map(SelectLimit::new).unwrap_or_default(),
            self.offset.map(SelectOffset::new).unwrap_or_default(),
        )
    }
}

#[derive(Debug)]
pub struct GetCustomerRentalsRequest {
    id: i32,
    page: PageRequest,
}

impl GetCustomerRentalsRequest {
    pub fn new(id: i32, page: PageRequest) -> Self {
        Self { id, page }
    }
}

#[derive(Debug)]
pub struct GetInventoryRentalsRequest {
    id: i32,
    page: PageRequest,
}

impl GetInventoryRentalsRequest {
    pub fn new(id: i32, page: PageRequest) -> Self {
        Self { id, page }
    }
}

pub struct RentalTransformer;

impl Intake<CreateRentalRequest> for RentalTransformer {
    type To = CreateRentalDto;
    fn emit(
        &self,
        CreateRentalRequest {
            customer,
            inventory,
            staff,
        }: CreateRentalRequest,
    ) -> Self::To {
        CreateRentalDto {
            customer_id: customer,
            inventory_id: inventory,
            staff_id: staff,
        }
    }
}

impl Intake<ReturnRentalRequest> for RentalTransformer {
    type To = ReturnRentalDto;
    fn emit(&self, input: ReturnRentalRequest) -> Self::To {
        ReturnRentalDto {
            rental_id: input.id,
        }
    }
}

impl Intake<GetRentalRequest> for RentalTransformer {
    type To = GetRentalDto;
    fn emit(&self, input: GetRentalRequest) -> Self::To {
        GetRentalDto {
            rental_id: input.id,
        }
    }
}

impl Intake<GetCustomerRentalsRequest> for RentalTransformer {
    type To = GetCustomerRentalsDto;
    fn emit(&self, input: GetCustomerRentalsRequest) -> Self::To {
        let (limit, offset) = input.page.into_bounds();
        GetCustomerRentalsDto {
            customer_id: input.id,
            limit,
            offset,
        }
    }
}

impl Intake<GetInventoryRentalsRequest> for RentalTransformer {
    type To = GetInventoryRentalsDto;
    fn emit(&self, input: GetInventoryRentalsRequest) -> Self::To {
        let (limit, offset) = input.page.into_bounds();
        GetInventoryRentalsDto {
            inventory_id: input.id,
            limit,
            offset,
        }
    }
}
