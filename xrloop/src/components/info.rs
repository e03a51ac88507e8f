/// Component that adds some information about the entity
/// Useful for debugging and for finding things in tests
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// A helpful name
    pub name: String,
}

impl Info {
    /// Create an `Info` with `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
