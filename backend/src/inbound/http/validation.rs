//! Path parameter validation for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{DomainError, IdentifierValidationError, ResourceId, UserId};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USER_ID_FIELD: FieldName = FieldName::new("userId");
pub(crate) const RESOURCE_ID_FIELD: FieldName = FieldName::new("resourceId");

fn code_for(error: IdentifierValidationError) -> &'static str {
    match error {
        IdentifierValidationError::Empty { .. } => "empty_identifier",
        IdentifierValidationError::ContainsWhitespace { .. } => "whitespace_identifier",
    }
}

fn identifier_error(
    field: FieldName,
    value: &str,
    error: IdentifierValidationError,
) -> DomainError {
    DomainError::invalid_request(error.to_string()).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code_for(error),
    }))
}

pub(crate) fn parse_user_id(raw: String) -> Result<UserId, DomainError> {
    UserId::new(raw.as_str()).map_err(|err| identifier_error(USER_ID_FIELD, &raw, err))
}

pub(crate) fn parse_resource_id(raw: String) -> Result<ResourceId, DomainError> {
    ResourceId::new(raw.as_str()).map_err(|err| identifier_error(RESOURCE_ID_FIELD, &raw, err))
}
