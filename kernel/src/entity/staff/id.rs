use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct StaffId(i32);

impl StaffId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
