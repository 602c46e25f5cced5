use super::*;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} {name:?}: {source}")]
    Quantity {
        kind: &'static str,
        name: String,
        source: QuantityParseError,
    },

    #[error("invalid node label selector {0:?}, expected KEY=VALUE")]
    Selector(String),
}

impl Error {
    /// Attach the offending object to a quantity parse failure.
    pub(crate) fn quantity(
        kind: &'static str,
        name: Option<&str>,
    ) -> impl FnOnce(QuantityParseError) -> Self {
        let name = name.unwrap_or_default().to_string();
        move |source| Self::Quantity { kind, name, source }
    }
}
