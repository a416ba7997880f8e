//! Form input sanitization and validation

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidateLength, ValidationErrors};

use crate::models::{
    author::{AuthorForm, NewAuthor},
    view::FieldError,
};

/// ASCII letters and digits only, at least one character
pub static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("alphanumeric pattern is valid"));

/// Order in which field errors are reported
const FIELD_ORDER: [&str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];

/// Longest accepted name, matching the `VARCHAR(100)` author columns
pub const MAX_NAME_LENGTH: u64 = 100;

/// Replace HTML-significant characters with their entities.
///
/// Backslash and backtick are escaped as well, on top of the quoted-attribute set.
pub fn escape_html(input: &str) -> String {
    html_escape::encode_safe(input)
        .replace('\\', "&#x5C;")
        .replace('`', "&#96;")
}

/// Trim surrounding whitespace, then escape
pub fn sanitize(input: &str) -> String {
    escape_html(input.trim())
}

/// Parse an ISO-8601 calendar date (`2024-05-01`) or date-time, keeping the date part
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}

/// Optional date field: empty values are skipped, anything else must parse
fn optional_date(
    raw: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse_iso_date(raw);
    if parsed.is_none() {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
    parsed
}

/// Names longer than the store accepts
fn max_name_length(value: &str, field: &str, message: &str, errors: &mut Vec<FieldError>) {
    if !value.validate_length(None, Some(MAX_NAME_LENGTH), None) {
        errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
}

fn field_position(error: &FieldError) -> usize {
    FIELD_ORDER
        .iter()
        .position(|field| *field == error.field)
        .unwrap_or(FIELD_ORDER.len())
}

fn ordered_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| by_field.get(*field).map(|list| (*field, list)))
        .flat_map(|(field, list)| {
            list.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect()
}

/// Sanitize a create-author form into a candidate record.
///
/// The candidate is always returned; the error list is empty only when every
/// rule passed.
pub fn check_author_form(form: &AuthorForm) -> (NewAuthor, Vec<FieldError>) {
    let mut date_errors = Vec::new();
    let date_of_birth = optional_date(
        form.date_of_birth.as_deref(),
        "date_of_birth",
        "Invalid date of birth",
        &mut date_errors,
    );
    let date_of_death = optional_date(
        form.date_of_death.as_deref(),
        "date_of_death",
        "Invalid date of death",
        &mut date_errors,
    );

    let candidate = NewAuthor {
        first_name: sanitize(form.first_name.as_deref().unwrap_or_default()),
        family_name: sanitize(form.family_name.as_deref().unwrap_or_default()),
        date_of_birth,
        date_of_death,
    };

    let mut errors = match candidate.validate() {
        Ok(()) => Vec::new(),
        Err(e) => ordered_field_errors(&e),
    };
    max_name_length(
        &candidate.first_name,
        "first_name",
        "First name must be at most 100 characters.",
        &mut errors,
    );
    max_name_length(
        &candidate.family_name,
        "family_name",
        "Family name must be at most 100 characters.",
        &mut errors,
    );
    errors.extend(date_errors);
    // stable: rules keep their order within a field
    errors.sort_by_key(field_position);

    (candidate, errors)
}
