//! Core types and data structures for fee-rule lookup

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;

/// Restriction on a single fee-rule field.
///
/// A missing key, `null` and `[]` are all wildcards and match every value.
/// A non-empty list matches only its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Restriction<T>(Option<Vec<T>>);

impl<T> Restriction<T> {
    /// A restriction that matches everything
    pub fn wildcard() -> Self {
        Self(None)
    }

    /// A restriction that matches only the listed values
    pub fn allow(values: Vec<T>) -> Self {
        Self(Some(values))
    }

    /// True for `null` or an empty collection
    pub fn is_wildcard(&self) -> bool {
        self.0.as_ref().is_none_or(|values| values.is_empty())
    }

    /// The allowed values, empty for a wildcard
    pub fn values(&self) -> &[T] {
        self.0.as_deref().unwrap_or(&[])
    }

    /// Whether `value` is allowed by this restriction
    pub fn matches<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.is_wildcard() || self.values().iter().any(|allowed| allowed.borrow() == value)
    }
}

impl<T> Default for Restriction<T> {
    fn default() -> Self {
        Self::wildcard()
    }
}

impl<T> From<Vec<T>> for Restriction<T> {
    fn from(values: Vec<T>) -> Self {
        Self::allow(values)
    }
}

/// A single fee rule from the fee-rule dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeRule {
    /// Unique rule identifier
    #[serde(rename = "ID")]
    pub id: u32,
    /// Card scheme the rule belongs to (e.g. "GlobalCard")
    pub card_scheme: String,
    /// Allowed merchant account types
    #[serde(default)]
    pub account_type: Restriction<String>,
    /// Allowed authorization characteristic indicators
    #[serde(default)]
    pub aci: Restriction<String>,
    /// Allowed merchant category codes
    #[serde(default)]
    pub merchant_category_code: Restriction<u32>,
    /// Credit/debit restriction, `None` applies to both
    #[serde(default)]
    pub is_credit: Option<bool>,
    /// Fixed fee per transaction, in euros
    #[serde(deserialize_with = "deserialize_decimal")]
    pub fixed_amount: BigDecimal,
    /// Proportional rate, applied per 10 000 units of transaction value
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: BigDecimal,
}

/// Accepts JSON numbers as well as decimal strings.
///
/// Numbers go through their shortest decimal form so that `0.1` stays `0.1`.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => {
            crate::rules::fee::amount_from_f64(value).map_err(de::Error::custom)
        }
        RawAmount::Text(text) => text.trim().parse().map_err(de::Error::custom),
        RawAmount::Bool(_) => Err(de::Error::custom(
            "expected a decimal amount, found a boolean",
        )),
        RawAmount::Null => Err(de::Error::custom("expected a decimal amount, found null")),
    }
}

impl FeeRule {
    /// Create a rule without restrictions
    pub fn new(id: u32, card_scheme: String, fixed_amount: BigDecimal, rate: BigDecimal) -> Self {
        Self {
            id,
            card_scheme,
            account_type: Restriction::wildcard(),
            aci: Restriction::wildcard(),
            merchant_category_code: Restriction::wildcard(),
            is_credit: None,
            fixed_amount,
            rate,
        }
    }

    /// Restrict the rule to the given account types
    pub fn with_account_types(mut self, account_types: &[&str]) -> Self {
        self.account_type =
            Restriction::allow(account_types.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Restrict the rule to the given ACIs
    pub fn with_acis(mut self, acis: &[&str]) -> Self {
        self.aci = Restriction::allow(acis.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Restrict the rule to the given merchant category codes
    pub fn with_merchant_category_codes(mut self, codes: Vec<u32>) -> Self {
        self.merchant_category_code = Restriction::allow(codes);
        self
    }

    /// Restrict the rule to credit or debit transactions
    pub fn with_is_credit(mut self, is_credit: bool) -> Self {
        self.is_credit = Some(is_credit);
        self
    }
}

/// A value of unknown origin type, as read from a dataset column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// Already numeric
    Number(f64),
    /// Boolean flag, cast to `1.0` or `0.0`
    Bool(bool),
    /// Free text, possibly with currency symbols, percent signs or ranges
    Text(String),
    /// Missing value
    Null,
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(value as f64)
    }
}

impl From<bool> for RawAmount {
    fn from(value: bool) -> Self {
        RawAmount::Bool(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

/// One row of the payments transactions dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub year: i32,
    /// 1-based ordinal day within `year`
    pub day_of_year: u32,
    pub hour_of_day: u32,
    pub merchant: String,
    pub card_scheme: String,
    pub eur_amount: f64,
    #[serde(default)]
    pub is_credit: Option<bool>,
    pub has_fraudulent_dispute: bool,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    pub ip_country: String,
    pub issuing_country: String,
    pub shopper_interaction: String,
    pub aci: String,
}

impl TransactionRecord {
    /// Calendar date of the transaction
    pub fn date(&self) -> FeeResult<NaiveDate> {
        NaiveDate::from_yo_opt(self.year, self.day_of_year).ok_or(FeeError::InvalidDate {
            year: self.year,
            day_of_year: self.day_of_year,
        })
    }

    /// Transaction value as a decimal amount
    pub fn amount(&self) -> FeeResult<BigDecimal> {
        crate::rules::fee::amount_from_f64(self.eur_amount)
    }
}

/// Entry in the merchant category code reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantCategory {
    pub mcc: u32,
    pub description: String,
}

/// Errors that can occur while coercing values or working with fee rules
#[derive(Debug, thiserror::Error)]
pub enum FeeError {
    #[error("Could not convert string to float: '{input}'")]
    Parse {
        input: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Type error: {0}")]
    TypeMismatch(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Fee rule not found: {0}")]
    RuleNotFound(u32),
    #[error("Invalid date: day {day_of_year} of year {year}")]
    InvalidDate { year: i32, day_of_year: u32 },
    #[error("Calculation error: {0}")]
    Calculation(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fee operations
pub type FeeResult<T> = Result<T, FeeError>;
