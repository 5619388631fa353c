use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsActive<T>(bool, PhantomData<T>);

impl<T> IsActive<T> {
    pub fn new(value: impl Into<bool>) -> Self {
        IsActive(value.into(), PhantomData)
    }

    pub fn is_active(&self) -> bool {
        self.0
    }
}

impl<T> From<IsActive<T>> for bool {
    fn from(value: IsActive<T>) -> Self {
        value.0
    }
}
