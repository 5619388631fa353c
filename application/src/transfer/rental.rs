use time::OffsetDateTime;

use kernel::prelude::entity::{
    DestructRental, DestructRentalDetail, Rental, RentalDetail, SelectLimit, SelectOffset,
};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDto {
    pub rental_id: i32,
    pub rental_date: OffsetDateTime,
    pub inventory_id: i32,
    pub customer_id: i32,
    pub staff_id: i32,
    pub return_date: Option<OffsetDateTime>,
    pub last_update: OffsetDateTime,
}

impl RentalDto {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }
}

impl From<Rental> for RentalDto {
    fn from(value: Rental) -> Self {
        let DestructRental {
            id,
            rental_date,
            inventory_id,
            customer_id,
            staff_id,
            return_date,
            last_update,
        } = value.into_destruct();
        Self {
            rental_id: id.into(),
            rental_date: rental_date.into(),
            inventory_id: inventory_id.into(),
            customer_id: customer_id.into(),
            staff_id: staff_id.into(),
            return_date: return_date.map(Into::into),
            last_update: last_update.into(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RentalDetailDto {
    pub rental: RentalDto,
    pub film_title: String,
    pub customer_name: String,
    pub staff_name: String,
}

impl From<RentalDetail> for RentalDetailDto {
    fn from(value: RentalDetail) -> Self {
        let DestructRentalDetail {
            rental,
            film_title,
            customer_name,
            staff_name,
        } = value.into_destruct();
        Self {
            rental: RentalDto::from(rental),
            film_title: film_title.into(),
            customer_name,
            staff_name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub customer_id: i32,
    pub inventory_id: i32,
    pub staff_id: i32,
}

#[derive(Debug, Clone)]
pub struct ReturnRentalDto {
    pub rental_id: i32,
}

#[derive(Debug, Clone)]
pub struct GetRentalDto {
    pub rental_id: i32,
}

#[derive(Debug, Clone)]
pub struct GetCustomerRentalsDto {
    pub customer_id: i32,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}

#[derive(Debug, Clone)]
pub struct GetInventoryRentalsDto {
    pub inventory_id: i32,
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}
