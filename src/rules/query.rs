//! Queries describing which fee rules a transaction falls under

use crate::types::*;

/// The field values a fee-rule lookup is made for
///
/// Only fields that are set take part in matching. Every set field must be
/// accepted by a rule for the rule to match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleQuery {
    pub account_type: Option<String>,
    pub aci: Option<String>,
    pub merchant_category_code: Option<u32>,
    pub is_credit: Option<bool>,
    pub card_scheme: Option<String>,
}

impl RuleQuery {
    /// Create an empty query, which matches every rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the query for a transaction made at a merchant with the given
    /// account type and merchant category code
    pub fn from_transaction(
        transaction: &TransactionRecord,
        account_type: &str,
        merchant_category_code: u32,
    ) -> Self {
        Self {
            account_type: Some(account_type.to_string()),
            aci: Some(transaction.aci.clone()),
            merchant_category_code: Some(merchant_category_code),
            is_credit: transaction.is_credit,
            card_scheme: Some(transaction.card_scheme.clone()),
        }
    }

    pub fn account_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    pub fn aci(mut self, aci: impl Into<String>) -> Self {
        self.aci = Some(aci.into());
        self
    }

    pub fn merchant_category_code(mut self, merchant_category_code: u32) -> Self {
        self.merchant_category_code = Some(merchant_category_code);
        self
    }

    pub fn is_credit(mut self, is_credit: bool) -> Self {
        self.is_credit = Some(is_credit);
        self
    }

    /// Card scheme is compared for equality, every rule names exactly one
    pub fn card_scheme(mut self, card_scheme: impl Into<String>) -> Self {
        self.card_scheme = Some(card_scheme.into());
        self
    }

    /// True when no field is queried
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether every queried field is compatible with the rule
    pub fn accepts(&self, rule: &FeeRule) -> bool {
        self.account_type
            .as_deref()
            .is_none_or(|account_type| rule.account_type.matches(account_type))
            && self.aci.as_deref().is_none_or(|aci| rule.aci.matches(aci))
            && self
                .merchant_category_code
                .is_none_or(|mcc| rule.merchant_category_code.matches(&mcc))
            // A rule without a credit flag covers both credit and debit
            && self
                .is_credit
                .is_none_or(|is_credit| rule.is_credit.is_none_or(|r| r == is_credit))
            && self
                .card_scheme
                .as_deref()
                .is_none_or(|card_scheme| rule.card_scheme == card_scheme)
    }
}
