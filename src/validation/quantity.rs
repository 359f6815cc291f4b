//! # Quantity Validation
//!
//! Validates Kubernetes resource quantity strings (`500m`, `128Mi`, `1.5`, `1e3`).

use anyhow::Result;
use regex::Regex;

/// Optional sign, decimal number, optional binary (Ki..Ei),
/// decimal (n, u, m, k, M..E) or exponent (e3, E-2) suffix
const QUANTITY_PATTERN: &str =
    r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+|Ki|Mi|Gi|Ti|Pi|Ei|n|u|m|k|M|G|T|P|E)?$";

/// Validate a Kubernetes quantity against [`QUANTITY_PATTERN`]
pub fn validate_quantity(quantity: &str) -> Result<()> {
    let quantity_trimmed = quantity.trim();

    if quantity_trimmed.is_empty() {
        return Err(anyhow::anyhow!("quantity cannot be empty"));
    }

    if quantity_trimmed != quantity {
        return Err(anyhow::anyhow!(
            "quantity '{quantity}' must not contain leading or trailing whitespace"
        ));
    }

    let quantity_regex = Regex::new(QUANTITY_PATTERN)
        .map_err(|e| anyhow::anyhow!("Failed to compile regex: {e}"))?;

    if !quantity_regex.is_match(quantity_trimmed) {
        return Err(anyhow::anyhow!(
            "quantity '{quantity_trimmed}' must match the regular expression '{QUANTITY_PATTERN}'"
        ));
    }

    if quantity_trimmed.starts_with('-') {
        return Err(anyhow::anyhow!(
            "quantity '{quantity_trimmed}' must not be negative"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity_valid() {
        let valid = vec![
            "1", "500m", "0.5", ".5", "1.", "128Mi", "1Gi", "2k", "3M", "1e3", "1E-2", "+1",
            "500u", "10n",
        ];
        for quantity in valid {
            assert!(
                validate_quantity(quantity).is_ok(),
                "Quantity '{}' should be valid",
                quantity
            );
        }
    }

    #[test]
    fn test_validate_quantity_invalid() {
        let invalid = vec![
            "",     // Empty
            " 1",   // Leading whitespace
            "1 ",   // Trailing whitespace
            "abc",  // Not a number
            "1MB",  // Unknown suffix
            "1mi",  // Lowercase binary suffix
            "1.2.3", // Two dots
            "-1",   // Negative
            "Mi",   // Suffix only
            "1un",  // Two suffixes
        ];
        for quantity in invalid {
            assert!(
                validate_quantity(quantity).is_err(),
                "Quantity '{}' should be invalid",
                quantity
            );
        }
    }

    #[test]
    fn test_error_quotes_applied_pattern() {
        let err = validate_quantity("1MB").unwrap_err();
        assert!(
            err.to_string().contains(QUANTITY_PATTERN),
            "unexpected error: {err}"
        );
    }
}
