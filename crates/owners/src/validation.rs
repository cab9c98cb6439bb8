//! Declarative field constraints for owners and the validator that applies them.
//!
//! The owner itself never validates its setters. Form handling runs an
//! [`OwnerValidator`] built from an [`OwnerSchema`] before anything is stored.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use petclinic_core::DomainError;

use crate::owner::Owner;

/// Message key reported for blank required fields.
pub const REQUIRED_KEY: &str = "required";

/// Message key reported for a malformed telephone number.
pub const TELEPHONE_INVALID_KEY: &str = "telephone.invalid";

/// Owner fields that carry constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerField {
    Address,
    City,
    Telephone,
}

impl OwnerField {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerField::Address => "address",
            OwnerField::City => "city",
            OwnerField::Telephone => "telephone",
        }
    }

    fn value(self, owner: &Owner) -> &str {
        match self {
            OwnerField::Address => owner.address(),
            OwnerField::City => owner.city(),
            OwnerField::Telephone => owner.telephone(),
        }
    }
}

impl core::fmt::Display for OwnerField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single constraint on a text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Must contain at least one non-whitespace character.
    NotBlank,
    /// The whole value must match `regex`.
    Pattern { regex: String, message_key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: OwnerField,
    pub constraints: Vec<FieldConstraint>,
}

/// Constraint schema for owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSchema {
    pub rules: Vec<FieldRule>,
}

impl Default for OwnerSchema {
    fn default() -> Self {
        Self {
            rules: vec![
                FieldRule {
                    field: OwnerField::Address,
                    constraints: vec![FieldConstraint::NotBlank],
                },
                FieldRule {
                    field: OwnerField::City,
                    constraints: vec![FieldConstraint::NotBlank],
                },
                FieldRule {
                    field: OwnerField::Telephone,
                    constraints: vec![
                        FieldConstraint::NotBlank,
                        // ASCII digits only; `\d` would accept any Unicode digit.
                        FieldConstraint::Pattern {
                            regex: "[0-9]{10}".to_string(),
                            message_key: TELEPHONE_INVALID_KEY.to_string(),
                        },
                    ],
                },
            ],
        }
    }
}

impl OwnerSchema {
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("owner schema: {e}")))
    }
}

/// A violated constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: OwnerField,
    pub message_key: String,
}

impl FieldError {
    /// English text for the known message keys; unknown keys are returned as-is.
    pub fn default_message(&self) -> &str {
        match self.message_key.as_str() {
            REQUIRED_KEY => "is required",
            TELEPHONE_INVALID_KEY => "Telephone must be a 10-digit number",
            other => other,
        }
    }
}

/// Every constraint violation found on an owner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("owner has {} invalid field(s): {}", .errors.len(), summary(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn for_field(&self, field: OwnerField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has_error(&self, field: OwnerField, message_key: &str) -> bool {
        self.for_field(field).any(|e| e.message_key == message_key)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message_key))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationErrors> for DomainError {
    fn from(value: ValidationErrors) -> Self {
        DomainError::validation(summary(&value.errors))
    }
}

#[derive(Debug, Clone)]
enum Check {
    NotBlank,
    Pattern { regex: Regex, message_key: String },
}

/// Validator compiled from an [`OwnerSchema`].
#[derive(Debug, Clone)]
pub struct OwnerValidator {
    rules: Vec<(OwnerField, Vec<Check>)>,
}

impl Default for OwnerValidator {
    fn default() -> Self {
        match Self::new(&OwnerSchema::default()) {
            Ok(validator) => validator,
            Err(err) => {
                // Keep the not-blank checks rather than accepting everything.
                tracing::error!(error = %err, "built-in owner schema failed to compile");
                Self {
                    rules: [OwnerField::Address, OwnerField::City, OwnerField::Telephone]
                        .into_iter()
                        .map(|field| (field, vec![Check::NotBlank]))
                        .collect(),
                }
            }
        }
    }
}

impl OwnerValidator {
    pub fn new(schema: &OwnerSchema) -> Result<Self, DomainError> {
        let rules = schema
            .rules
            .iter()
            .map(|rule| {
                let checks = rule
                    .constraints
                    .iter()
                    .map(|c| compile(rule.field, c))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((rule.field, checks))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { rules })
    }

    pub fn validate(&self, owner: &Owner) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        for (field, checks) in &self.rules {
            let value = field.value(owner);
            for check in checks {
                let violated = match check {
                    Check::NotBlank => is_blank(value).then_some(REQUIRED_KEY),
                    Check::Pattern { regex, message_key } => {
                        (!regex.is_match(value)).then_some(message_key.as_str())
                    }
                };
                if let Some(key) = violated {
                    errors.push(FieldError {
                        field: *field,
                        message_key: key.to_string(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), errors = %summary(&errors), "owner failed validation");
            Err(ValidationErrors { errors })
        }
    }
}

/// Blank means nothing left after stripping control characters and ASCII
/// spaces (`<= U+0020`) from both ends; other Unicode spaces count as content.
fn is_blank(value: &str) -> bool {
    value.trim_matches(|c: char| c <= ' ').is_empty()
}

fn compile(field: OwnerField, constraint: &FieldConstraint) -> Result<Check, DomainError> {
    match constraint {
        FieldConstraint::NotBlank => Ok(Check::NotBlank),
        FieldConstraint::Pattern { regex, message_key } => {
            // Patterns must match the entire value.
            let anchored = format!("^(?:{regex})$");
            let regex = Regex::new(&anchored)
                .map_err(|e| DomainError::validation(format!("{field} pattern: {e}")))?;
            Ok(Check::Pattern {
                regex,
                message_key: message_key.clone(),
            })
        }
    }
}
