use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct FilmTitle(String);

impl FilmTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }
}
