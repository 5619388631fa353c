use std::fmt::Display;

use error_stack::Context;

use crate::entity::{CustomerId, InventoryId, RentalId, StaffId};

#[derive(Debug)]
pub enum KernelError {
    Rejected(Rejection),
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Rejected(rejection) => write!(f, "Rejected: {rejection}"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

impl From<Rejection> for KernelError {
    fn from(value: Rejection) -> Self {
        Self::Rejected(value)
    }
}

/// A request the rental rules refused. Never transient, never retried.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Rejection {
    NotFound(Missing),
    InactiveCustomer(CustomerId),
    ItemUnavailable(InventoryId),
    AlreadyReturned(RentalId),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Missing {
    Customer(CustomerId),
    Inventory(InventoryId),
    Staff(StaffId),
    Rental(RentalId),
}

impl Rejection {
    /// Input field the rejection is reported against, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Rejection::NotFound(Missing::Customer(_)) | Rejection::InactiveCustomer(_) => {
                Some("customer_id")
            }
            Rejection::NotFound(Missing::Inventory(_)) | Rejection::ItemUnavailable(_) => {
                Some("inventory_id")
            }
            Rejection::NotFound(Missing::Staff(_)) => Some("staff_id"),
            Rejection::NotFound(Missing::Rental(_)) | Rejection::AlreadyReturned(_) => None,
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::NotFound(Missing::Customer(id)) => {
                write!(f, "Customer with ID {} does not exist.", id.as_ref())
            }
            Rejection::NotFound(Missing::Inventory(id)) => {
                write!(f, "Inventory item with ID {} does not exist.", id.as_ref())
            }
            Rejection::NotFound(Missing::Staff(id)) => {
                write!(f, "Staff with ID {} does not exist.", id.as_ref())
            }
            Rejection::NotFound(Missing::Rental(id)) => {
                write!(f, "Rental with ID {} does not exist.", id.as_ref())
            }
            Rejection::InactiveCustomer(_) => {
                write!(f, "Customer is not active and cannot rent items.")
            }
            Rejection::ItemUnavailable(_) => {
                write!(f, "This inventory item is currently rented out.")
            }
            Rejection::AlreadyReturned(_) => write!(f, "This rental has already been returned."),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{CustomerId, InventoryId, RentalId, StaffId};
    use crate::{Missing, Rejection};

    #[test]
    fn create_rejections_are_keyed_by_field() {
        let customer = Rejection::NotFound(Missing::Customer(CustomerId::new(999)));
        assert_eq!(customer.field(), Some("customer_id"));
        assert_eq!(customer.to_string(), "Customer with ID 999 does not exist.");

        let inactive = Rejection::InactiveCustomer(CustomerId::new(1));
        assert_eq!(inactive.field(), Some("customer_id"));

        let unavailable = Rejection::ItemUnavailable(InventoryId::new(7));
        assert_eq!(unavailable.field(), Some("inventory_id"));
        assert_eq!(
            unavailable.to_string(),
            "This inventory item is currently rented out."
        );

        let staff = Rejection::NotFound(Missing::Staff(StaffId::new(3)));
        assert_eq!(staff.field(), Some("staff_id"));
        assert_eq!(staff.to_string(), "Staff with ID 3 does not exist.");
    }

    #[test]
    fn return_rejections_are_flat() {
        let missing = Rejection::NotFound(Missing::Rental(RentalId::new(42)));
        assert_eq!(missing.field(), None);
        assert_eq!(missing.to_string(), "Rental with ID 42 does not exist.");

        let returned = Rejection::AlreadyReturned(RentalId::new(42));
        assert_eq!(returned.field(), None);
        assert_eq!(returned.to_string(), "This rental has already been returned.");
    }
}
