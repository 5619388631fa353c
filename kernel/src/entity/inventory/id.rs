use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct InventoryId(i32);

impl InventoryId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
