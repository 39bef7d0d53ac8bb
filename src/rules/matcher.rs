//! Fee-rule matching

use log::trace;

use crate::rules::query::RuleQuery;
use crate::traits::*;
use crate::types::*;

/// Selects the fee rules applicable to a query
#[derive(Debug, Clone)]
pub struct FeeRuleMatcher {
    rules: Vec<FeeRule>,
}

impl FeeRuleMatcher {
    /// Create a matcher over the given rules without validating them
    pub fn new(rules: Vec<FeeRule>) -> Self {
        Self { rules }
    }

    /// Create a matcher after checking the rule set is non-empty and its
    /// identifiers are unique
    pub fn try_new(rules: Vec<FeeRule>) -> FeeResult<Self> {
        Self::with_validator(rules, &DefaultRuleValidator)
    }

    /// Create a matcher after running a custom validator over the rules
    pub fn with_validator(rules: Vec<FeeRule>, validator: &dyn RuleValidator) -> FeeResult<Self> {
        validator.validate_rule_set(&rules)?;
        Ok(Self::new(rules))
    }

    /// Create a matcher over every rule held by a storage backend
    pub fn from_storage<S: FeeRuleStorage + ?Sized>(storage: &S) -> FeeResult<Self> {
        Self::try_new(storage.list_rules()?)
    }

    /// The rules this matcher selects from
    pub fn rules(&self) -> &[FeeRule] {
        &self.rules
    }

    /// Rules accepted by the query, ascending by identifier
    pub fn matching_rules(&self, query: &RuleQuery) -> Vec<&FeeRule> {
        let mut matched: Vec<&FeeRule> = self
            .rules
            .iter()
            .filter(|rule| query.accepts(rule))
            .collect();
        // IDs are unique, so the order is total
        matched.sort_by_key(|rule| rule.id);

        trace!(
            "{} of {} fee rules match {:?}",
            matched.len(),
            self.rules.len(),
            query
        );
        matched
    }

    /// Identifiers of the rules accepted by the query, ascending
    pub fn matching_ids(&self, query: &RuleQuery) -> Vec<u32> {
        self.matching_rules(query)
            .into_iter()
            .map(|rule| rule.id)
            .collect()
    }
}

/// Identifiers of the rules accepted by the query, ascending
pub fn match_rule_ids(rules: &[FeeRule], query: &RuleQuery) -> Vec<u32> {
    let mut ids: Vec<u32> = rules
        .iter()
        .filter(|rule| query.accepts(rule))
        .map(|rule| rule.id)
        .collect();
    ids.sort_unstable();
    ids
}
