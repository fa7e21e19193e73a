//! Concept references embedded in rule text

use crate::error::{RuleError, RuleResult};
use std::fmt;

const SOURCE_KEYWORD: &str = " from ";

/// A parsed `{<concept text> from <source>}` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptReference {
    text: String,
    query: String,
    source: String,
}

impl ConceptReference {
    /// Parse a reference, failing on anything that does not yield a lookup key
    ///
    /// The last ` from ` separates the concept text from the source, so
    /// concept names may themselves contain the word.
    pub fn parse(text: &str) -> RuleResult<Self> {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| RuleError::malformed_reference(text, "expected text enclosed in braces"))?;

        let split = inner
            .rfind(SOURCE_KEYWORD)
            .ok_or_else(|| RuleError::malformed_reference(text, "missing 'from' clause"))?;

        let query = inner[..split].trim();
        let source = inner[split + SOURCE_KEYWORD.len()..].trim();
        if query.is_empty() {
            return Err(RuleError::malformed_reference(text, "empty concept text"));
        }
        if source.is_empty() {
            return Err(RuleError::malformed_reference(text, "empty source"));
        }

        Ok(Self {
            text: trimmed.to_string(),
            query: query.to_string(),
            source: source.to_string(),
        })
    }

    /// Reference as written
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Concept text handed to the concept lookup
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for ConceptReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
