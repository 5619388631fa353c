use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct FirstName(String);

impl FirstName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct LastName(String);

impl LastName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// "{first} {last}" with surrounding whitespace removed, so a missing half
/// does not leave a dangling space.
pub fn full_name(first: &FirstName, last: &LastName) -> String {
    format!("{} {}", first.as_ref(), last.as_ref())
        .trim()
        .to_string()
}

#[cfg(test)]
mod test {
    use super::{full_name, FirstName, LastName};

    #[test]
    fn joins_and_trims() {
        assert_eq!(
            full_name(&FirstName::new("John"), &LastName::new("Doe")),
            "John Doe"
        );
        assert_eq!(full_name(&FirstName::new("Cher"), &LastName::new("")), "Cher");
    }
}
