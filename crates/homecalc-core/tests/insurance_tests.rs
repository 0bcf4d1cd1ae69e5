use chrono::NaiveDate;
use homecalc_core::insurance::needs::{
    analyze_needs, Assets, Child, Contact, HouseholdMode, HouseholdProfile, Liabilities,
    PersonProfile, Policy, PolicyOwner,
};
use homecalc_core::insurance::quick::{quick_estimate, QuickEstimateInput};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn person(name: &str, income: Decimal, years: Decimal) -> PersonProfile {
    PersonProfile {
        name: name.into(),
        annual_income: income,
        years_to_replace: years,
        smoker: false,
        dob: None,
        contact: None,
    }
}

fn single_earner() -> HouseholdProfile {
    HouseholdProfile {
        mode: HouseholdMode::Single,
        spouse1: person("John Doe", dec!(60000), dec!(10)),
        spouse2: None,
        liabilities: Liabilities::default(),
        children: vec![],
        assets: Assets::default(),
        policies: vec![],
    }
}

fn joint_family() -> HouseholdProfile {
    HouseholdProfile {
        mode: HouseholdMode::Joint,
        spouse1: person("John Doe", dec!(60000), dec!(10)),
        spouse2: Some(person("Jane Doe", dec!(50000), dec!(10))),
        liabilities: Liabilities {
            mortgage_balance: dec!(300000),
            other_debts: dec!(20000),
            final_expenses: dec!(15000),
        },
        children: vec![
            Child { name: "Ava".into(), dob: None, education_cost: dec!(60000) },
            Child { name: "Leo".into(), dob: None, education_cost: dec!(60000) },
        ],
        assets: Assets {
            cash: dec!(20000),
            investments: dec!(30000),
        },
        policies: vec![
            Policy {
                owner: PolicyOwner::Spouse1,
                policy_type: Some("Group".into()),
                coverage_amount: dec!(120000),
            },
            Policy {
                owner: PolicyOwner::Spouse2,
                policy_type: Some("Term 20".into()),
                coverage_amount: dec!(500000),
            },
            Policy {
                owner: PolicyOwner::Spouse2,
                policy_type: None,
                coverage_amount: dec!(100000),
            },
        ],
    }
}

// ===========================================================================
// Single earner
// ===========================================================================

#[test]
fn test_single_needs_round_trip() {
    let out = analyze_needs(&single_earner()).result;
    assert_eq!(out.spouse1.total_needs, dec!(600000));
    assert_eq!(out.spouse1.total_assets, Decimal::ZERO);
    assert_eq!(out.spouse1.coverage_gap, dec!(600000));
}

#[test]
fn test_single_policy_closes_gap_exactly() {
    let mut h = single_earner();
    h.policies.push(Policy {
        owner: PolicyOwner::Spouse1,
        policy_type: Some("Term".into()),
        coverage_amount: dec!(600000),
    });
    let out = analyze_needs(&h).result;
    assert_eq!(out.spouse1.coverage_gap, Decimal::ZERO);
    assert_eq!(out.total_new_coverage, Decimal::ZERO);
}

// ===========================================================================
// Joint household
// ===========================================================================

#[test]
fn test_joint_shared_liabilities() {
    let out = analyze_needs(&joint_family()).result;
    assert_eq!(out.total_education_cost, dec!(120000));
    // 300k + 20k + 15k + 120k
    assert_eq!(out.total_liabilities, dec!(455000));
    assert_eq!(out.shared_liquid_assets, dec!(50000));
}

#[test]
fn test_joint_scenarios_are_independent() {
    let out = analyze_needs(&joint_family()).result;

    // John dies: 600k income + 455k liabilities, 50k shared + 120k group cover
    let s1 = &out.spouse1;
    assert_eq!(s1.total_needs, dec!(1055000));
    assert_eq!(s1.existing_coverage, dec!(120000));
    assert_eq!(s1.total_assets, dec!(170000));
    assert_eq!(s1.coverage_gap, dec!(885000));

    // Jane dies: 500k income + 455k, 50k shared + 600k own cover
    let s2 = out.spouse2.as_ref().unwrap();
    assert_eq!(s2.total_needs, dec!(955000));
    assert_eq!(s2.existing_coverage, dec!(600000));
    assert_eq!(s2.coverage_gap, dec!(305000));
    assert_eq!(s2.policies.len(), 2);
    assert_eq!(s2.policies[1].label, "Policy");

    // both scenarios see the full shared pool
    assert_eq!(s1.shared_assets, s2.shared_assets);
    assert_eq!(out.total_new_coverage, dec!(1190000));
}

#[test]
fn test_report_fields_pass_through() {
    let mut h = joint_family();
    h.spouse1.smoker = true;
    h.spouse1.dob = NaiveDate::from_ymd_opt(1985, 4, 12);
    h.spouse1.contact = Some(Contact {
        email: Some("john@example.com".into()),
        phone: None,
    });
    let with_details = analyze_needs(&h).result;
    let without = analyze_needs(&joint_family()).result;
    assert_eq!(with_details.spouse1.coverage_gap, without.spouse1.coverage_gap);
}

#[test]
fn test_household_from_json() {
    let json = r#"{
        "mode": "joint",
        "spouse1": { "name": "John", "annual_income": "60000", "years_to_replace": 10,
                     "dob": "1985-04-12" },
        "spouse2": { "name": "Jane", "annual_income": "50000", "years_to_replace": 8 },
        "liabilities": { "mortgage_balance": "300000" },
        "children": [ { "name": "Ava", "education_cost": "60000" } ],
        "assets": { "cash": "20000", "investments": "30000" },
        "policies": [ { "owner": "spouse2", "type": "Term", "coverage_amount": "250000" } ]
    }"#;
    let h: HouseholdProfile = serde_json::from_str(json).unwrap();
    assert_eq!(h.liabilities.final_expenses, Decimal::ZERO);
    let out = analyze_needs(&h).result;
    let s2 = out.spouse2.unwrap();
    // 400k + 360k - (50k + 250k)
    assert_eq!(s2.coverage_gap, dec!(460000));
}

#[test]
fn test_needs_analysis_is_idempotent() {
    let h = joint_family();
    assert_eq!(analyze_needs(&h), analyze_needs(&h));
}

// ===========================================================================
// Quick estimator
// ===========================================================================

#[test]
fn test_quick_estimate_matches_household_for_simple_case() {
    let quick = quick_estimate(&QuickEstimateInput {
        annual_income: dec!(60000),
        years_to_replace: dec!(10),
        debt: dec!(20000),
        mortgage: dec!(300000),
        education: dec!(120000),
        savings: dec!(50000),
        existing_insurance: dec!(120000),
    })
    .result;

    let mut h = joint_family();
    h.mode = HouseholdMode::Single;
    h.liabilities.final_expenses = Decimal::ZERO;
    let full = analyze_needs(&h).result;

    assert_eq!(quick.gap, full.spouse1.coverage_gap);
}

// ===========================================================================
// Out-of-domain inputs
// ===========================================================================

#[test]
fn test_fractional_years_from_json() {
    let json = r#"{ "spouse1": { "annual_income": "60000", "years_to_replace": 7.5 } }"#;
    let h: HouseholdProfile = serde_json::from_str(json).unwrap();
    assert_eq!(h.spouse1.years_to_replace, dec!(7.5));
    let out = analyze_needs(&h).result;
    assert_eq!(out.spouse1.coverage_gap, dec!(450000));
}

#[test]
fn test_quick_estimate_huge_income_does_not_panic() {
    let out = quick_estimate(&QuickEstimateInput {
        annual_income: Decimal::from_i128_with_scale(10_i128.pow(28), 0),
        years_to_replace: dec!(10),
        debt: Decimal::ZERO,
        mortgage: Decimal::ZERO,
        education: Decimal::ZERO,
        savings: Decimal::ZERO,
        existing_insurance: Decimal::ZERO,
    });
    assert_eq!(out.result.breakdown.income_replacement, Decimal::ZERO);
    assert_eq!(out.result.gap, Decimal::ZERO);
}

#[test]
fn test_needs_near_max_income_does_not_panic() {
    let mut h = joint_family();
    h.spouse1.annual_income = Decimal::MAX;
    h.spouse2.as_mut().unwrap().annual_income = Decimal::MAX;
    let out = analyze_needs(&h).result;
    assert_eq!(out.spouse1.income_replacement, Decimal::ZERO);
    // liabilities alone: 455k - 170k
    assert_eq!(out.spouse1.coverage_gap, dec!(285000));
    assert_eq!(out.spouse2.unwrap().income_replacement, Decimal::ZERO);
}
