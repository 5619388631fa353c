mod customer;
mod inventory;
mod rental;
mod staff;

pub use self::{customer::*, inventory::*, rental::*, staff::*};
