use destructure::Destructure;
use vodca::References;

use crate::entity::{FilmTitle, Rental};

/// A rental joined with the display names of what it references.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct RentalDetail {
    rental: Rental,
    film_title: FilmTitle,
    customer_name: String,
    staff_name: String,
}

impl RentalDetail {
    pub fn new(
        rental: Rental,
        film_title: FilmTitle,
        customer_name: String,
        staff_name: String,
    ) -> Self {
        Self {
            rental,
            film_title,
            customer_name,
            staff_name,
        }
    }
}
