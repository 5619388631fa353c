use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

use crate::entity::{CustomerId, InventoryId, LastUpdate, Rental, RentalDate, StaffId};

/// A rental that has passed every check but has no row yet.
/// The store assigns the id on insert.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct DraftRental {
    rental_date: RentalDate,
    inventory_id: InventoryId,
    customer_id: CustomerId,
    staff_id: StaffId,
    last_update: LastUpdate<Rental>,
}

impl DraftRental {
    /// Opens a rental at `now`; `rental_date` and `last_update` share the instant.
    pub fn open(
        inventory_id: InventoryId,
        customer_id: CustomerId,
        staff_id: StaffId,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            rental_date: RentalDate::new(now),
            inventory_id,
            customer_id,
            staff_id,
            last_update: LastUpdate::new(now),
        }
    }
}
