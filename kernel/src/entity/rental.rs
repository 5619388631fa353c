mod detail;
mod draft;
mod id;
mod rental_date;
mod return_date;

pub use self::{detail::*, draft::*, id::*, rental_date::*, return_date::*};
use crate::entity::common::LastUpdate;
use crate::entity::{CustomerId, InventoryId, StaffId};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RentalState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rental {
    id: RentalId,
    rental_date: RentalDate,
    inventory_id: InventoryId,
    customer_id: CustomerId,
    staff_id: StaffId,
    return_date: Option<ReturnDate>,
    last_update: LastUpdate<Rental>,
}

impl Rental {
    pub fn new(
        id: RentalId,
        rental_date: RentalDate,
        inventory_id: InventoryId,
        customer_id: CustomerId,
        staff_id: StaffId,
        return_date: Option<ReturnDate>,
        last_update: LastUpdate<Rental>,
    ) -> Self {
        Self {
            id,
            rental_date,
            inventory_id,
            customer_id,
            staff_id,
            return_date,
            last_update,
        }
    }

    /// Materializes a draft once the store has assigned it an id.
    pub fn from_draft(id: RentalId, draft: DraftRental) -> Self {
        let DestructDraftRental {
            rental_date,
            inventory_id,
            customer_id,
            staff_id,
            last_update,
        } = draft.into_destruct();
        Self::new(
            id,
            rental_date,
            inventory_id,
            customer_id,
            staff_id,
            None,
            last_update,
        )
    }

    pub fn state(&self) -> RentalState {
        match self.return_date {
            None => RentalState::Open,
            Some(_) => RentalState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state() == RentalState::Open
    }

    /// Closes an open rental at `now`. A closed rental is left untouched and
    /// `None` is returned.
    pub fn close(self, now: OffsetDateTime) -> Option<Self> {
        if !self.is_open() {
            return None;
        }
        Some(self.reconstruct(|rental| {
            rental.return_date = Some(ReturnDate::new(now));
            rental.last_update = LastUpdate::new(now);
        }))
    }
}
