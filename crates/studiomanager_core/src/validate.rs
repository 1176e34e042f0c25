//! Field validation for user-entered names and control values.
//!
//! # Responsibility
//! - Check name/value strings against emptiness and length rules.
//! - Produce user-facing error strings with the entity kind spelled out.
//!
//! # Invariants
//! - All checks are pure and deterministic; no side effects.
//! - Lengths are measured in characters after trimming, not bytes.

/// Maximum accepted length for any entity name.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum accepted length for a setting's control value.
pub const CONTROL_VALUE_MAX_LEN: usize = 50;

/// Result of a validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A successful validation result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// An invalid result carrying one or more error messages.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

/// Validates a name field for the given entity kind.
///
/// Whitespace is trimmed before both checks. An empty trimmed name and an
/// over-long trimmed name each append their own message, so callers get the
/// full list of problems in one pass.
pub fn validate_name(name: &str, entity_kind: &str, max_length: usize) -> ValidationResult {
    let trimmed = name.trim();
    let mut errors = Vec::new();

    if trimmed.is_empty() {
        errors.push(format!("{entity_kind} name cannot be empty"));
    }

    if trimmed.chars().count() > max_length {
        errors.push(format!(
            "{entity_kind} name must be {max_length} characters or less"
        ));
    }

    if errors.is_empty() {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(errors)
    }
}

/// Validates a gear item name.
pub fn validate_gear_item(name: &str) -> ValidationResult {
    validate_name(name, "Gear item", NAME_MAX_LEN)
}

/// Validates a manufacturer name.
pub fn validate_manufacturer(name: &str) -> ValidationResult {
    validate_name(name, "Manufacturer", NAME_MAX_LEN)
}

/// Validates a gear type name.
pub fn validate_gear_type(name: &str) -> ValidationResult {
    validate_name(name, "Gear type", NAME_MAX_LEN)
}

/// Validates a control type name.
pub fn validate_control_type(name: &str) -> ValidationResult {
    validate_name(name, "Control type", NAME_MAX_LEN)
}

/// Validates a control name.
pub fn validate_control(name: &str) -> ValidationResult {
    validate_name(name, "Control", NAME_MAX_LEN)
}

/// Validates a preset name.
pub fn validate_preset(name: &str) -> ValidationResult {
    validate_name(name, "Preset", NAME_MAX_LEN)
}

/// Validates a scenario name.
pub fn validate_scenario(name: &str) -> ValidationResult {
    validate_name(name, "Scenario", NAME_MAX_LEN)
}

/// Validates a setting's control value.
///
/// Unlike name validation the two checks are mutually exclusive: an empty
/// value returns before the length check runs.
pub fn validate_control_value(value: &str) -> ValidationResult {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return ValidationResult::invalid(vec!["Control value cannot be empty".to_string()]);
    }

    if trimmed.chars().count() > CONTROL_VALUE_MAX_LEN {
        return ValidationResult::invalid(vec![format!(
            "Control value must be {CONTROL_VALUE_MAX_LEN} characters or less"
        )]);
    }

    ValidationResult::valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_invalid() {
        let result = validate_name("", "Test", NAME_MAX_LEN);
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"Test name cannot be empty".to_string()));
    }

    #[test]
    fn whitespace_only_name_is_invalid() {
        let result = validate_name("   \n\t", "Test", NAME_MAX_LEN);
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"Test name cannot be empty".to_string()));
    }

    #[test]
    fn valid_name_passes() {
        let result = validate_name("Valid Name", "Test", NAME_MAX_LEN);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn name_over_max_length_is_invalid() {
        let long_name = "a".repeat(NAME_MAX_LEN + 1);
        let result = validate_name(&long_name, "Test", NAME_MAX_LEN);
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"Test name must be 100 characters or less".to_string()));
    }

    #[test]
    fn name_at_max_length_is_valid() {
        let max_name = "a".repeat(NAME_MAX_LEN);
        let result = validate_name(&max_name, "Test", NAME_MAX_LEN);
        assert!(result.is_valid);
    }

    #[test]
    fn custom_max_length_is_respected() {
        let name = "a".repeat(51);
        assert!(!validate_name(&name, "Test", 50).is_valid);
        assert!(validate_name(&"a".repeat(50), "Test", 50).is_valid);
    }

    #[test]
    fn length_is_counted_in_characters_not_bytes() {
        // 100 multi-byte characters stay within the limit.
        let name = "ä".repeat(NAME_MAX_LEN);
        assert!(validate_name(&name, "Test", NAME_MAX_LEN).is_valid);
    }

    #[test]
    fn surrounding_whitespace_does_not_count_toward_length() {
        let name = format!("  {}  ", "a".repeat(NAME_MAX_LEN));
        assert!(validate_name(&name, "Test", NAME_MAX_LEN).is_valid);
    }

    #[test]
    fn entity_wrappers_name_the_entity_kind() {
        assert!(validate_gear_item("LA-2A Compressor").is_valid);
        assert!(validate_manufacturer("Universal Audio").is_valid);
        assert!(validate_scenario("Drum Recording").is_valid);
        assert!(validate_preset("Vocal Recording Session").is_valid);

        let result = validate_control_type("");
        assert_eq!(
            result.errors,
            vec!["Control type name cannot be empty".to_string()]
        );
        let result = validate_control("");
        assert_eq!(
            result.errors,
            vec!["Control name cannot be empty".to_string()]
        );
        let result = validate_gear_type("");
        assert_eq!(
            result.errors,
            vec!["Gear type name cannot be empty".to_string()]
        );
    }

    #[test]
    fn control_value_empty_returns_single_error() {
        let result = validate_control_value("");
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Control value cannot be empty".to_string()]
        );
    }

    #[test]
    fn control_value_length_boundaries() {
        assert!(validate_control_value("7").is_valid);
        assert!(validate_control_value(&"a".repeat(50)).is_valid);

        let result = validate_control_value(&"a".repeat(51));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Control value must be 50 characters or less".to_string()]
        );
    }
}
