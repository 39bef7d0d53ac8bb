//! Fee lookup example: coerce raw values, match rules and price a transaction

use fee_rules_core::{
    coerce_to_float, FeeCalculator, FeeRuleMatcher, MemoryRuleStore, MerchantCategoryTable,
    RawAmount, RuleQuery, TransactionRecord,
};

const FEES_JSON: &str = r#"[
    {"ID": 12, "card_scheme": "SwiftCharge", "account_type": ["F", "H"], "aci": ["A", "B"],
     "merchant_category_code": [5812], "is_credit": null, "fixed_amount": 0.07, "rate": 24},
    {"ID": 3, "card_scheme": "SwiftCharge", "account_type": [], "aci": null,
     "merchant_category_code": [], "is_credit": true, "fixed_amount": 0.1, "rate": 19},
    {"ID": 27, "card_scheme": "SwiftCharge", "account_type": ["R"], "aci": ["A"],
     "merchant_category_code": [], "is_credit": null, "fixed_amount": 0.0, "rate": 55},
    {"ID": 40, "card_scheme": "GlobalCard", "account_type": null, "aci": [],
     "merchant_category_code": [], "is_credit": null, "fixed_amount": 0.12, "rate": 70}
]"#;

const MCC_JSON: &str = r#"[
    {"mcc": 5812, "description": "Eating Places and Restaurants"},
    {"mcc": 7997, "description": "Membership Clubs (Sports, Recreation, Athletic), Country Clubs, and Private Golf Courses"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Value coercion:");
    for raw in ["$1,234.50", "12%", "50-60", ">100", "≥5-7", "5-10%"] {
        match coerce_to_float(&RawAmount::from(raw)) {
            Ok(value) => println!("  {:>10} -> {}", raw, value),
            Err(e) => println!("  {:>10} -> error: {}", raw, e),
        }
    }
    println!();

    let store = match MemoryRuleStore::from_json_str(FEES_JSON) {
        Ok(store) => store,
        Err(e) => {
            println!("Could not load fee rules: {}", e);
            return Ok(());
        }
    };
    let mcc_table = MerchantCategoryTable::from_json_str(MCC_JSON)?;
    let matcher = FeeRuleMatcher::from_storage(&store)?;

    println!("Rules for account_type = F, aci = A:");
    let query = RuleQuery::new().account_type("F").aci("A");
    println!("  {:?}", matcher.matching_ids(&query));
    println!();

    let transaction = TransactionRecord {
        year: 2023,
        day_of_year: 200,
        hour_of_day: 18,
        merchant: "Crossfit_Hanna".to_string(),
        card_scheme: "SwiftCharge".to_string(),
        eur_amount: 84.5,
        is_credit: Some(true),
        has_fraudulent_dispute: false,
        ip_address: None,
        email_address: Some("shopper@example.com".to_string()),
        ip_country: "NL".to_string(),
        issuing_country: "NL".to_string(),
        shopper_interaction: "Ecommerce".to_string(),
        aci: "A".to_string(),
    };

    let mcc = mcc_table
        .code_for("Eating Places and Restaurants")
        .ok_or("unknown merchant category")?;
    let query = RuleQuery::from_transaction(&transaction, "F", mcc);
    let matched = matcher.matching_rules(&query);

    let calculator = FeeCalculator::default();
    let amount = transaction.amount()?;

    println!(
        "Transaction on {} for €{} ({}):",
        transaction.date()?,
        amount,
        mcc_table.description(mcc).unwrap_or("unknown")
    );
    for rule in &matched {
        println!("  rule {:>3}: fee €{}", rule.id, rule.fee_for(&amount));
    }
    match calculator.average_fee(matched.iter().copied(), &amount) {
        Some(fee) => println!("  average fee: €{}", fee.round(6)),
        None => println!("  no applicable fee rules"),
    }

    Ok(())
}
