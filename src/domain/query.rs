use crate::error::QueryError;

/// A listing page plus the text identifying one student's row on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultQuery {
    listing_url: String,
    identifier: String,
}

impl ResultQuery {
    pub fn new(
        listing_url: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(QueryError::BlankIdentifier);
        }

        Ok(ResultQuery {
            listing_url: listing_url.into(),
            identifier,
        })
    }

    pub fn listing_url(&self) -> &str {
        &self.listing_url
    }

    /// Matched case-sensitively as a substring of rendered row text.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}
