use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct FilmId(i32);

impl FilmId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }
}
