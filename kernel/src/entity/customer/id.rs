use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct CustomerId(i32);

impl CustomerId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
