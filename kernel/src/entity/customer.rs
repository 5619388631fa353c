mod id;

pub use self::id::*;
use crate::entity::common::{full_name, FirstName, IsActive, LastName};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Customer {
    id: CustomerId,
    first_name: FirstName,
    last_name: LastName,
    active: IsActive<Customer>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        first_name: FirstName,
        last_name: LastName,
        active: IsActive<Customer>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            active,
        }
    }

    /// Only active customers may rent.
    pub fn can_rent(&self) -> bool {
        self.active.is_active()
    }

    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}
