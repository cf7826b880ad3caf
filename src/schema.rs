//! Field schemas and the field extractor.

use crate::chain::SelectorChain;
use crate::document::Document;
use crate::error::{ConfigError, ExtractError};
use crate::models::Record;
use itertools::Itertools;
use tracing::trace;

/// A named column with its selector chain and "not found" sentinel.
#[derive(Debug)]
pub struct Field {
    pub name: String,
    pub chain: SelectorChain,
    pub sentinel: String,
}

impl Field {
    pub fn new(name: &str, sentinel: &str, chain: SelectorChain) -> Self {
        Self {
            name: name.to_string(),
            chain,
            sentinel: sentinel.to_string(),
        }
    }
}

/// An ordered, fixed set of fields with one primary field.
///
/// Rows whose primary value ends up empty are dropped when the table is finalized.
#[derive(Debug)]
pub struct Schema {
    fields: Vec<Field>,
    primary: usize,
}

impl Schema {
    /// Validate and build a schema. `owner` names the source for error messages.
    pub fn new(owner: &str, fields: Vec<Field>, primary: &str) -> Result<Self, ConfigError> {
        let schema_err = |reason: String| ConfigError::Schema {
            source_name: owner.to_string(),
            reason,
        };

        if fields.is_empty() {
            return Err(schema_err("schema has no fields".to_string()));
        }
        if let Some(f) = fields.iter().find(|f| f.name.trim().is_empty()) {
            return Err(schema_err(format!("field with blank name (sentinel `{}`)", f.sentinel)));
        }
        if let Some(dup) = fields.iter().map(|f| f.name.as_str()).duplicates().next() {
            return Err(schema_err(format!("duplicate field `{dup}`")));
        }
        let primary = fields
            .iter()
            .position(|f| f.name == primary)
            .ok_or_else(|| schema_err(format!("primary field `{primary}` is not in the schema")))?;

        Ok(Self { fields, primary })
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn primary(&self) -> &str {
        &self.fields[self.primary].name
    }

    pub fn primary_index(&self) -> usize {
        self.primary
    }

    /// Run every field's chain against `doc`, in schema order.
    ///
    /// Fields whose chain comes up empty get their sentinel. A strategy error
    /// aborts the whole record.
    pub fn extract(&self, doc: &Document) -> Result<Record, ExtractError> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match field.chain.evaluate(doc) {
                Ok(Some(v)) => v,
                Ok(None) => {
                    trace!(field = %field.name, url = doc.url(), "No strategy matched; using sentinel");
                    field.sentinel.clone()
                }
                Err(e) => {
                    return Err(ExtractError {
                        field: field.name.clone(),
                        reason: e.reason,
                    });
                }
            };
            values.push((field.name.clone(), value));
        }
        Ok(Record::new(values))
    }
}
