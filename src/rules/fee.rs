//! Fee computation for matched rules

use bigdecimal::BigDecimal;
use std::str::FromStr;

use crate::types::*;

/// Rates in the fee-rule dataset are expressed per 10 000 units
pub const DEFAULT_RATE_DIVISOR: i64 = 10_000;

/// Convert a coerced float into a decimal amount
///
/// Goes through the shortest decimal representation, so `0.1` becomes
/// exactly `0.1`.
pub fn amount_from_f64(value: f64) -> FeeResult<BigDecimal> {
    if !value.is_finite() {
        return Err(FeeError::Calculation(format!(
            "amount must be finite, got {}",
            value
        )));
    }

    // Display prints the shortest round-trip digits and never uses an exponent
    BigDecimal::from_str(&value.to_string())
        .map_err(|e| FeeError::Calculation(format!("invalid amount {}: {}", value, e)))
}

/// Fee calculator
#[derive(Debug, Clone)]
pub struct FeeCalculator {
    /// Divisor applied to `rate * amount`
    rate_divisor: BigDecimal,
}

impl FeeCalculator {
    /// Create a calculator with a custom rate divisor
    pub fn new(rate_divisor: BigDecimal) -> FeeResult<Self> {
        if rate_divisor <= BigDecimal::from(0) {
            return Err(FeeError::Validation(format!(
                "Rate divisor must be positive, got {}",
                rate_divisor
            )));
        }

        Ok(Self { rate_divisor })
    }

    pub fn rate_divisor(&self) -> &BigDecimal {
        &self.rate_divisor
    }

    /// `fixed_amount + rate * amount / divisor`
    pub fn fee_for_rule(&self, rule: &FeeRule, amount: &BigDecimal) -> BigDecimal {
        &rule.fixed_amount + (&rule.rate * amount) / self.rate_divisor.clone()
    }

    /// Sum of the fees charged by every given rule
    pub fn total_fee<'a, I>(&self, rules: I, amount: &BigDecimal) -> BigDecimal
    where
        I: IntoIterator<Item = &'a FeeRule>,
    {
        rules
            .into_iter()
            .map(|rule| self.fee_for_rule(rule, amount))
            .sum()
    }

    /// Mean fee over the given rules, `None` if there are none
    pub fn average_fee<'a, I>(&self, rules: I, amount: &BigDecimal) -> Option<BigDecimal>
    where
        I: IntoIterator<Item = &'a FeeRule>,
    {
        let fees: Vec<BigDecimal> = rules
            .into_iter()
            .map(|rule| self.fee_for_rule(rule, amount))
            .collect();

        if fees.is_empty() {
            return None;
        }

        let count = BigDecimal::from(fees.len() as u64);
        Some(fees.into_iter().sum::<BigDecimal>() / count)
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self {
            rate_divisor: BigDecimal::from(DEFAULT_RATE_DIVISOR),
        }
    }
}

impl FeeRule {
    /// Fee this rule charges for a transaction of `amount` euros
    pub fn fee_for(&self, amount: &BigDecimal) -> BigDecimal {
        FeeCalculator::default().fee_for_rule(self, amount)
    }
}
