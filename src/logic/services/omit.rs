use crate::config::JsonApiOptions;
use crate::error::{JsonApiError, Result};
use crate::logic::services::QueryParameterService;
use crate::model::QueryParameterKind;

/// Parses the serializer switches `?omitNull=true` and `?omitDefault=false`.
pub struct OmitValueService {
    kind: QueryParameterKind,
    allow_override: bool,
    default: bool,
    value: Option<bool>,
}

impl OmitValueService {
    pub fn omit_null(options: &JsonApiOptions) -> Self {
        Self {
            kind: QueryParameterKind::OmitNull,
            allow_override: options.allow_omit_null_override,
            default: options.omit_null_by_default,
            value: None,
        }
    }

    pub fn omit_default(options: &JsonApiOptions) -> Self {
        Self {
            kind: QueryParameterKind::OmitDefault,
            allow_override: options.allow_omit_default_override,
            default: options.omit_default_by_default,
            value: None,
        }
    }
}

impl QueryParameterService for OmitValueService {
    type Output = bool;

    fn kind(&self) -> QueryParameterKind {
        self.kind
    }

    fn get(&self) -> bool {
        self.value.unwrap_or(self.default)
    }

    fn can_parse(&self, key: &str) -> bool {
        key == self.kind.name()
    }

    fn parse(&mut self, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(JsonApiError::empty_parameter(key, self.kind));
        }

        if !self.allow_override {
            return Err(JsonApiError::invalid_query(
                key,
                format!(
                    "Overriding '{}' through the query string is not allowed.",
                    key
                ),
            ));
        }

        let value = if value.eq_ignore_ascii_case("true") {
            true
        } else if value.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(JsonApiError::invalid_query(
                key,
                format!(
                    "Value '{}' in '{}' query parameter must be 'true' or 'false'.",
                    value, key
                ),
            ));
        };

        self.value = Some(value);
        Ok(())
    }
}
