use std::str::FromStr;

use super::components::LinkComponents;
use super::decode::{DecodeError, DecodeResult, Field};

impl LinkComponents {
    /// Reads an optional query key: absent yields `default()`, present but empty is
    /// [`DecodeError::EmptyField`], anything else goes through `parse`.
    pub(super) fn field<T>(
        &self,
        field: Field,
        default: impl FnOnce() -> T,
        parse: impl FnOnce(&str) -> DecodeResult<T>,
    ) -> DecodeResult<T> {
        match self.queries.get(field.key).map(String::as_str) {
            None => Ok(default()),
            Some("") => Err(DecodeError::EmptyField(field)),
            Some(value) => parse(value),
        }
    }

    pub(super) fn string_field(
        &self,
        field: Field,
        default: impl FnOnce() -> String,
    ) -> DecodeResult<String> {
        self.field(field, default, |value| Ok(value.to_owned()))
    }

    pub(super) fn enum_field<T: FromStr>(&self, field: Field, default: T) -> DecodeResult<T> {
        self.field(field, || default, |value| parse_enum(field, value))
    }

    /// Reads a query key that must be present and non-empty.
    pub(super) fn required_field(&self, field: Field) -> DecodeResult<String> {
        match self.queries.get(field.key) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(DecodeError::MissingRequiredField(field)),
        }
    }

    /// Reads a query key whose empty value is meaningful.
    pub(super) fn lenient_field(&self, field: Field) -> String {
        self.queries.get(field.key).cloned().unwrap_or_default()
    }
}

pub(super) fn parse_enum<T: FromStr>(field: Field, value: &str) -> DecodeResult<T> {
    value.parse().map_err(|_| DecodeError::UnknownEnumValue {
        field,
        value: value.to_owned(),
    })
}
