mod common;
mod customer;
mod film;
mod inventory;
mod rental;
mod staff;

pub use self::{common::*, customer::*, film::*, inventory::*, rental::*, staff::*};
