//! # Fee Rules Core
//!
//! Value coercion and fee-rule matching for payment transaction analysis.
//!
//! ## Features
//!
//! - **Value coercion**: turns amounts such as `"$1,234.50"`, `"12%"`, `">100"`
//!   or `"50-60"` into plain floats
//! - **Fee-rule matching**: selects the rules whose `account_type`, `aci`,
//!   merchant category code and credit restrictions accept a transaction, with
//!   absent or empty restrictions acting as wildcards
//! - **Fee computation**: fixed plus proportional fees for the matched rules
//! - **Reference data**: in-memory fee-rule and merchant category code tables
//!   decoded from JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use fee_rules_core::{coerce_str, FeeRuleMatcher, MemoryRuleStore, RuleQuery};
//!
//! assert_eq!(coerce_str("$1,234.50").unwrap(), 1234.50);
//!
//! let store = MemoryRuleStore::from_json_str(
//!     r#"[{"ID": 1, "card_scheme": "GlobalCard", "account_type": [], "aci": ["A"],
//!          "fixed_amount": 0.1, "rate": 19}]"#,
//! )
//! .unwrap();
//! let matcher = FeeRuleMatcher::from_storage(&store).unwrap();
//! let query = RuleQuery::new().account_type("F").aci("A");
//! assert_eq!(matcher.matching_ids(&query), vec![1]);
//! ```

pub mod coercion;
pub mod rules;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use coercion::*;
pub use rules::*;
pub use traits::*;
pub use types::*;
pub use utils::{MemoryRuleStore, MerchantCategoryTable};
