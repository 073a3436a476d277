use crate::types::FaraidhError;

/// Shared by the input and configuration builders.
///
/// `build` is where deferred conversion errors surface, so setters can stay chainable.
pub trait Builder<T> {
    fn build(self) -> Result<T, FaraidhError>;
}
