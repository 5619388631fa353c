use std::marker::PhantomData;

use time::OffsetDateTime;

/// Row modification stamp, typed by the entity it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LastUpdate<T>(OffsetDateTime, PhantomData<T>);

impl<T> LastUpdate<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> AsRef<OffsetDateTime> for LastUpdate<T> {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}

impl<T> From<LastUpdate<T>> for OffsetDateTime {
    fn from(value: LastUpdate<T>) -> Self {
        value.0
    }
}
