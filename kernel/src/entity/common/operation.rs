use vodca::{AsRefln, Fromln};

const MAX_SELECT_LIMIT: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectLimit(i32);

impl SelectLimit {
    /// Clamped to `1..=100`.
    pub fn new(value: impl Into<i32>) -> Self {
        SelectLimit(value.into().clamp(1, MAX_SELECT_LIMIT))
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(30)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectOffset(i32);

impl SelectOffset {
    pub fn new(value: impl Into<i32>) -> Self {
        SelectOffset(value.into().max(0))
    }
}
