//! Traits for reference-data access and rule validation

use std::collections::HashSet;

use crate::types::*;

/// Read-only access to a fee-rule collection
///
/// Rules are reference data: backends hand out copies and never change them
/// once loaded.
pub trait FeeRuleStorage {
    /// Get a rule by ID
    fn get_rule(&self, id: u32) -> FeeResult<Option<FeeRule>>;

    /// List all rules, ascending by ID
    fn list_rules(&self) -> FeeResult<Vec<FeeRule>>;

    /// List the rules of one card scheme, ascending by ID
    fn rules_for_scheme(&self, card_scheme: &str) -> FeeResult<Vec<FeeRule>>;

    /// Get a rule by ID, returning an error if not found
    fn get_rule_required(&self, id: u32) -> FeeResult<FeeRule> {
        self.get_rule(id)?.ok_or(FeeError::RuleNotFound(id))
    }
}

/// Trait for implementing custom rule-set validation
pub trait RuleValidator {
    /// Validate a single rule
    fn validate_rule(&self, rule: &FeeRule) -> FeeResult<()>;

    /// Validate a whole rule set before it is used for matching
    fn validate_rule_set(&self, rules: &[FeeRule]) -> FeeResult<()> {
        if rules.is_empty() {
            return Err(FeeError::Validation(
                "Fee rule set cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for rule in rules {
            if !seen.insert(rule.id) {
                return Err(FeeError::Validation(format!(
                    "Duplicate fee rule ID: {}",
                    rule.id
                )));
            }
            self.validate_rule(rule)?;
        }

        Ok(())
    }
}

/// Default validator: non-empty set with unique IDs
pub struct DefaultRuleValidator;

impl RuleValidator for DefaultRuleValidator {
    fn validate_rule(&self, _rule: &FeeRule) -> FeeResult<()> {
        Ok(())
    }
}
