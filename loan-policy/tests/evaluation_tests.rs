//! End-to-end evaluation scenarios
//!
//! Exercises the public API the way the calculator page uses it: build a
//! request, evaluate against a rule set, read the result back as JSON.

use loan_policy::{
    compare_rate_scenarios, evaluate, policy, Bottleneck, BorrowerType, Config, LoanLimitResult,
    LoanRequest, PolicyTable, RateScenarioComparison, RateType, RegionType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base_request() -> LoanRequest {
    LoanRequest {
        property_value: dec!(1000000000),
        annual_income: dec!(80000000),
        existing_debt_payment: Decimal::ZERO,
        loan_period_months: 360,
        interest_rate: dec!(4.5),
        region_type: RegionType::Regulated,
        borrower_type: BorrowerType::SingleHome,
        rate_type: RateType::Variable,
    }
}

#[test]
fn test_regulated_variable_reference_case() {
    let result = evaluate(&base_request(), policy::current());

    assert_eq!(result.ltv_limit, dec!(600000000));
    assert_eq!(result.ltv_ratio, dec!(60));
    assert_eq!(result.dti_ratio, dec!(50));
    assert_eq!(result.dsr_ceiling, dec!(40));
    assert_eq!(result.stress_rate, dec!(3.0));
    assert_eq!(result.effective_rate, dec!(7.5));
    assert_eq!(result.bottleneck, Bottleneck::Dsr);
    assert_eq!(result.final_limit, result.dsr_limit);
    assert!(result.dsr_limit < result.dti_limit);
    assert!(result.dsr_limit < result.ltv_limit);
}

#[test]
fn test_existing_debt_lowers_income_limits() {
    let table = PolicyTable::rules_2026();
    let clean = evaluate(&base_request(), &table);

    let mut indebted = base_request();
    indebted.existing_debt_payment = dec!(12000000);
    let result = evaluate(&indebted, &table);

    assert!(result.dsr_limit < clean.dsr_limit);
    assert!(result.dti_limit < clean.dti_limit);
    assert_eq!(result.ltv_limit, clean.ltv_limit);
    assert!(result.dsr_ratio > Decimal::ZERO);
}

#[test]
fn test_speculation_zone_is_strictest() {
    let table = PolicyTable::rules_2026();
    let mut limits = Vec::new();
    for region in [
        RegionType::Speculation,
        RegionType::Regulated,
        RegionType::NonRegulated,
    ] {
        let mut req = base_request();
        req.region_type = region;
        req.annual_income = dec!(300000000);
        limits.push(evaluate(&req, &table).ltv_limit);
    }

    assert!(limits[0] < limits[1]);
    assert!(limits[1] < limits[2]);
}

#[test]
fn test_first_time_buyer_cap_scenario() {
    let table = PolicyTable::rules_2026();
    let mut req = base_request();
    req.region_type = RegionType::FirstTimeBuyer;
    req.property_value = dec!(1200000000);
    req.annual_income = dec!(250000000);
    req.rate_type = RateType::Periodic;

    let result = evaluate(&req, &table);

    assert_eq!(result.bottleneck, Bottleneck::Cap);
    assert_eq!(result.final_limit, policy::FIRST_TIME_BUYER_CAP);
    assert_eq!(result.ltv_ratio, dec!(80));
}

#[test]
fn test_policy_year_swap() {
    let req = base_request();
    let rules_2025 = evaluate(&req, &PolicyTable::rules_2025());
    let rules_2026 = evaluate(&req, &PolicyTable::rules_2026());

    assert_eq!(rules_2025.policy_version, "2025");
    assert_eq!(rules_2026.policy_version, "2026");
    assert_eq!(rules_2025.effective_rate, dec!(6.0));
    assert!(rules_2025.dsr_limit > rules_2026.dsr_limit);
    assert_eq!(rules_2025.ltv_limit, rules_2026.ltv_limit);
}

#[test]
fn test_config_driven_evaluation() {
    let config = Config {
        policy_version: "2025".to_string(),
        ..Config::default()
    };
    let table = config.load_policy().unwrap();
    let result = evaluate(&base_request(), &table);

    assert_eq!(result.policy_version, "2025");
}

#[test]
fn test_result_json_shape() {
    let result = evaluate(&base_request(), policy::current());
    let value: serde_json::Value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["bottleneck"], "dsr");
    assert_eq!(value["ltvLimit"], "600000000");
    assert!(value.get("finalLimit").is_some());
    assert!(value.get("monthlyPayment").is_some());
    assert!(value["warnings"].is_array());

    let back: LoanLimitResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_comparison_json_keys() {
    let comparison = compare_rate_scenarios(&base_request(), policy::current());
    let value = serde_json::to_value(&comparison).unwrap();

    for key in ["fixed", "periodic", "mixed_5y", "variable"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }

    let back: RateScenarioComparison = serde_json::from_value(value).unwrap();
    assert_eq!(back, comparison);
}

#[test]
fn test_switching_to_fixed_gain() {
    let comparison = compare_rate_scenarios(&base_request(), policy::current());
    let gain = comparison.limit_gain(RateType::Variable, RateType::Fixed);

    assert_eq!(
        gain,
        comparison.fixed.final_limit - comparison.variable.final_limit
    );
    assert!(gain > Decimal::ZERO);
    assert!(comparison.variable.warnings.iter().any(|w| w.contains("고정형")));
}
