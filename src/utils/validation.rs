//! Validation utilities

use bigdecimal::BigDecimal;

use crate::traits::*;
use crate::types::*;

/// Validate that a monetary field is not negative
pub fn validate_non_negative(amount: &BigDecimal, field: &str) -> FeeResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(FeeError::Validation(format!(
            "{} cannot be negative, got {}",
            field, amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that a card scheme label is not blank
///
/// Labels are free text: spaces, hyphens and other punctuation are allowed.
pub fn validate_card_scheme(card_scheme: &str) -> FeeResult<()> {
    if card_scheme.trim().is_empty() {
        return Err(FeeError::Validation(
            "Card scheme cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Strict validator with per-field checks on every rule
pub struct StrictRuleValidator;

impl RuleValidator for StrictRuleValidator {
    fn validate_rule(&self, rule: &FeeRule) -> FeeResult<()> {
        validate_card_scheme(&rule.card_scheme)?;
        validate_non_negative(&rule.fixed_amount, "fixed_amount")?;
        validate_non_negative(&rule.rate, "rate")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: u32) -> FeeRule {
        FeeRule::new(id, "TransactPlus".to_string(), BigDecimal::from(0), BigDecimal::from(25))
    }

    #[test]
    fn test_strict_validator_accepts_clean_rules() {
        let rules = vec![rule(1).with_acis(&["A", "B"]), rule(2)];
        assert!(StrictRuleValidator.validate_rule_set(&rules).is_ok());
    }

    #[test]
    fn test_strict_validator_rejects_negative_rate() {
        let mut bad = rule(1);
        bad.rate = BigDecimal::from(-1);
        assert!(matches!(
            StrictRuleValidator.validate_rule(&bad),
            Err(FeeError::Validation(_))
        ));
    }

    #[test]
    fn test_strict_validator_allows_repeated_restriction_values() {
        // Repeats do not change membership
        let repeated = rule(1).with_account_types(&["R", "R"]);
        assert!(StrictRuleValidator.validate_rule(&repeated).is_ok());
    }

    #[test]
    fn test_card_scheme_labels_are_free_text() {
        let rules = vec![
            FeeRule::new(1, "Global Card".to_string(), BigDecimal::from(0), BigDecimal::from(1)),
            FeeRule::new(2, "Nex-Pay".to_string(), BigDecimal::from(0), BigDecimal::from(1)),
        ];
        assert!(StrictRuleValidator.validate_rule_set(&rules).is_ok());

        assert!(validate_card_scheme("GlobalCard").is_ok());
        assert!(validate_card_scheme("  ").is_err());
    }
}
