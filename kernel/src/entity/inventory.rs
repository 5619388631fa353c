mod id;

pub use self::id::*;
use crate::entity::FilmId;
use destructure::Destructure;
use vodca::References;

/// One rentable physical copy of a film.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Inventory {
    id: InventoryId,
    film_id: FilmId,
}

impl Inventory {
    pub fn new(id: InventoryId, film_id: FilmId) -> Self {
        Self { id, film_id }
    }
}
