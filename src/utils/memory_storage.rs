//! In-memory reference tables

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::traits::*;
use crate::types::*;

/// In-memory fee-rule storage, keyed by rule ID
#[derive(Debug, Clone)]
pub struct MemoryRuleStore {
    rules: BTreeMap<u32, FeeRule>,
}

impl MemoryRuleStore {
    /// Create a store from rules, rejecting empty sets and duplicate IDs
    pub fn from_rules(rules: Vec<FeeRule>) -> FeeResult<Self> {
        Self::with_validator(rules, &DefaultRuleValidator)
    }

    /// Create a store from rules checked by a custom validator
    pub fn with_validator(rules: Vec<FeeRule>, validator: &dyn RuleValidator) -> FeeResult<Self> {
        validator.validate_rule_set(&rules)?;

        // Keyed by ID so listing is already in ascending order
        let rules: BTreeMap<u32, FeeRule> =
            rules.into_iter().map(|rule| (rule.id, rule)).collect();
        debug!("Loaded {} fee rules", rules.len());
        Ok(Self { rules })
    }

    /// Decode a JSON array of fee rules
    pub fn from_json_str(json: &str) -> FeeResult<Self> {
        let rules: Vec<FeeRule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    /// Decode a JSON array of fee rules from a reader
    pub fn from_json_reader<R: Read>(reader: R) -> FeeResult<Self> {
        let rules: Vec<FeeRule> = serde_json::from_reader(reader)?;
        Self::from_rules(rules)
    }

    /// Load fee rules from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> FeeResult<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FeeRuleStorage for MemoryRuleStore {
    fn get_rule(&self, id: u32) -> FeeResult<Option<FeeRule>> {
        Ok(self.rules.get(&id).cloned())
    }

    fn list_rules(&self) -> FeeResult<Vec<FeeRule>> {
        Ok(self.rules.values().cloned().collect())
    }

    fn rules_for_scheme(&self, card_scheme: &str) -> FeeResult<Vec<FeeRule>> {
        Ok(self
            .rules
            .values()
            .filter(|rule| rule.card_scheme == card_scheme)
            .cloned()
            .collect())
    }
}

/// Merchant category code reference table
#[derive(Debug, Clone, Default)]
pub struct MerchantCategoryTable {
    descriptions: HashMap<u32, String>,
}

impl MerchantCategoryTable {
    pub fn new(categories: Vec<MerchantCategory>) -> Self {
        let descriptions: HashMap<u32, String> = categories
            .into_iter()
            .map(|category| (category.mcc, category.description))
            .collect();
        debug!("Loaded {} merchant category codes", descriptions.len());
        Self { descriptions }
    }

    /// Decode a JSON array of `{"mcc": .., "description": ..}` records
    pub fn from_json_str(json: &str) -> FeeResult<Self> {
        let categories: Vec<MerchantCategory> = serde_json::from_str(json)?;
        Ok(Self::new(categories))
    }

    /// Decode a JSON array of merchant categories from a reader
    pub fn from_json_reader<R: Read>(reader: R) -> FeeResult<Self> {
        let categories: Vec<MerchantCategory> = serde_json::from_reader(reader)?;
        Ok(Self::new(categories))
    }

    /// Load merchant categories from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> FeeResult<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Description of a merchant category code
    pub fn description(&self, mcc: u32) -> Option<&str> {
        self.descriptions.get(&mcc).map(String::as_str)
    }

    /// Code whose description matches exactly
    pub fn code_for(&self, description: &str) -> Option<u32> {
        self.descriptions
            .iter()
            .find(|(_, d)| d.as_str() == description)
            .map(|(mcc, _)| *mcc)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    const RULES_JSON: &str = r#"[
        {"ID": 9, "card_scheme": "NexPay", "account_type": ["R"], "aci": [],
         "fixed_amount": 0.11, "rate": 30},
        {"ID": 2, "card_scheme": "GlobalCard", "account_type": null, "aci": ["A", "B"],
         "fixed_amount": 0.02, "rate": 12},
        {"ID": 5, "card_scheme": "NexPay", "fixed_amount": 0, "rate": 80}
    ]"#;

    #[test]
    fn test_rule_store_from_json() {
        let store = MemoryRuleStore::from_json_str(RULES_JSON).unwrap();

        assert_eq!(store.len(), 3);
        let ids: Vec<u32> = store.list_rules().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);

        let nexpay: Vec<u32> = store
            .rules_for_scheme("NexPay")
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(nexpay, vec![5, 9]);

        let rule = store.get_rule_required(9).unwrap();
        assert_eq!(rule.fixed_amount, "0.11".parse::<BigDecimal>().unwrap());
        assert!(store.get_rule(1).unwrap().is_none());
        assert!(matches!(
            store.get_rule_required(1),
            Err(FeeError::RuleNotFound(1))
        ));
    }

    #[test]
    fn test_rule_store_from_reader() {
        let store = MemoryRuleStore::from_json_reader(RULES_JSON.as_bytes()).unwrap();
        assert!(!store.is_empty());
    }

    #[test]
    fn test_rule_store_rejects_duplicates() {
        let json = r#"[
            {"ID": 1, "card_scheme": "NexPay", "fixed_amount": 0, "rate": 1},
            {"ID": 1, "card_scheme": "GlobalCard", "fixed_amount": 0, "rate": 2}
        ]"#;

        assert!(matches!(
            MemoryRuleStore::from_json_str(json),
            Err(FeeError::Validation(_))
        ));
    }

    #[test]
    fn test_rule_store_rejects_malformed_json() {
        assert!(matches!(
            MemoryRuleStore::from_json_str("{not json"),
            Err(FeeError::Json(_))
        ));
        let null_amount = r#"[{"ID": 1, "card_scheme": "X", "fixed_amount": null, "rate": 1}]"#;
        assert!(matches!(
            MemoryRuleStore::from_json_str(null_amount),
            Err(FeeError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            MemoryRuleStore::from_json_file("/nonexistent/fees.json"),
            Err(FeeError::Io(_))
        ));
        assert!(matches!(
            MerchantCategoryTable::from_json_file("/nonexistent/merchant_category_codes.json"),
            Err(FeeError::Io(_))
        ));
    }

    #[test]
    fn test_merchant_category_lookup() {
        let table = MerchantCategoryTable::from_json_str(
            r#"[
                {"mcc": 5812, "description": "Eating Places and Restaurants"},
                {"mcc": 7997, "description": "Membership Clubs (Sports, Recreation, Athletic), Country Clubs, and Private Golf Courses"}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.description(5812), Some("Eating Places and Restaurants"));
        assert_eq!(table.description(1234), None);
        assert_eq!(table.code_for("Eating Places and Restaurants"), Some(5812));
        assert_eq!(table.code_for("Eating places"), None);
    }
}
