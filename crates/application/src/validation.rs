//! Field-level validation rules shared by mutation input payloads.

use taskboard_core::FieldErrors;

/// Records title rule violations: required, and at least three characters.
pub(crate) fn validate_title(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "Title is required");
    } else if value.chars().count() < 3 {
        errors.push(field, "Title is too short.");
    }
}

/// Records description rule violations: at least three characters when set.
pub(crate) fn validate_description(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.chars().count() < 3 {
        errors.push(field, "Description is too short.");
    }
}
