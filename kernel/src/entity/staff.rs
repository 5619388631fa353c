mod id;

pub use self::id::*;
use crate::entity::common::{full_name, FirstName, LastName};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Staff {
    id: StaffId,
    first_name: FirstName,
    last_name: LastName,
}

impl Staff {
    pub fn new(id: StaffId, first_name: FirstName, last_name: LastName) -> Self {
        Self {
            id,
            first_name,
            last_name,
        }
    }

    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}
