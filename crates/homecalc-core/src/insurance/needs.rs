use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::HomeCalcError;
use crate::types::{
    add_or_zero, mul_or_zero, sub_or_zero, sum_or_zero, with_metadata, ComputationOutput, Money,
};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdMode {
    /// One income earner.
    #[default]
    Single,
    /// Two earners, each analysed as the deceased in turn.
    Joint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyOwner {
    #[serde(rename = "spouse1")]
    Spouse1,
    #[serde(rename = "spouse2")]
    Spouse2,
}

impl FromStr for PolicyOwner {
    type Err = HomeCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "").as_str() {
            "spouse1" => Ok(PolicyOwner::Spouse1),
            "spouse2" => Ok(PolicyOwner::Spouse2),
            _ => Err(HomeCalcError::unknown_variant("owner", s, &["spouse1", "spouse2"])),
        }
    }
}

impl fmt::Display for PolicyOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyOwner::Spouse1 => f.write_str("spouse1"),
            PolicyOwner::Spouse2 => f.write_str("spouse2"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// An income earner. Smoker status, birth date and contact details are carried
/// for the report only; they do not change the needs figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    #[serde(default)]
    pub name: String,
    pub annual_income: Money,
    /// Fractional years are allowed (7.5).
    pub years_to_replace: Decimal,
    #[serde(default)]
    pub smoker: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Liabilities {
    pub mortgage_balance: Money,
    pub other_debts: Money,
    /// Funeral and estate settlement costs.
    pub final_expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    pub education_cost: Money,
}

/// Liquid assets shared by the household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub cash: Money,
    pub investments: Money,
}

/// An existing life insurance policy on one spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub owner: PolicyOwner,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    pub coverage_amount: Money,
}

/// Everything the needs analysis looks at, assembled by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdProfile {
    #[serde(default)]
    pub mode: HouseholdMode,
    pub spouse1: PersonProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse2: Option<PersonProfile>,
    #[serde(default)]
    pub liabilities: Liabilities,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub assets: Assets,
    #[serde(default)]
    pub policies: Vec<Policy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationLine {
    pub name: String,
    pub education_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyLine {
    pub label: String,
    pub coverage_amount: Money,
}

/// Needs and gap if `deceased` dies and the other spouse survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub deceased: PolicyOwner,
    pub name: String,
    pub income_replacement: Money,
    pub total_needs: Money,
    pub shared_assets: Money,
    pub existing_coverage: Money,
    pub total_assets: Money,
    /// Additional coverage needed, never negative.
    pub coverage_gap: Money,
    pub policies: Vec<PolicyLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedsAnalysisOutput {
    pub mode: HouseholdMode,
    pub education: Vec<EducationLine>,
    pub total_education_cost: Money,
    /// Mortgage + debts + final expenses + education.
    pub total_liabilities: Money,
    pub shared_liquid_assets: Money,
    pub spouse1: ScenarioResult,
    pub spouse2: Option<ScenarioResult>,
    /// Sum of the scenario gaps: new coverage to buy across the household.
    pub total_new_coverage: Money,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Needs, offsetting assets and gap for one spouse's death.
///
/// Liabilities and liquid assets are the full household pool; only the
/// policies owned by `deceased` are counted.
pub fn evaluate_scenario(
    person: &PersonProfile,
    deceased: PolicyOwner,
    total_liabilities: Money,
    shared_assets: Money,
    policies: &[Policy],
) -> ScenarioResult {
    let income_replacement = mul_or_zero(person.annual_income, person.years_to_replace);
    let total_needs = add_or_zero(income_replacement, total_liabilities);

    let policy_lines: Vec<PolicyLine> = policies
        .iter()
        .filter(|p| p.owner == deceased)
        .map(|p| PolicyLine {
            label: p
                .policy_type
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or("Policy")
                .to_string(),
            coverage_amount: p.coverage_amount,
        })
        .collect();
    let existing_coverage = sum_or_zero(policy_lines.iter().map(|p| p.coverage_amount));

    let total_assets = add_or_zero(shared_assets, existing_coverage);
    let coverage_gap = sub_or_zero(total_needs, total_assets).max(Decimal::ZERO);

    log::debug!(
        "needs[{deceased}]: needs={total_needs} assets={total_assets} gap={coverage_gap}"
    );

    ScenarioResult {
        deceased,
        name: person.name.clone(),
        income_replacement,
        total_needs,
        shared_assets,
        existing_coverage,
        total_assets,
        coverage_gap,
        policies: policy_lines,
    }
}

/// DIME needs analysis for a single or joint household.
pub fn analyze_needs(household: &HouseholdProfile) -> ComputationOutput<NeedsAnalysisOutput> {
    let mut warnings: Vec<String> = Vec::new();

    let education: Vec<EducationLine> = household
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| EducationLine {
            name: if child.name.trim().is_empty() {
                format!("Child {}", i + 1)
            } else {
                child.name.clone()
            },
            education_cost: child.education_cost,
        })
        .collect();
    let total_education_cost = sum_or_zero(education.iter().map(|e| e.education_cost));

    let liabilities = &household.liabilities;
    let total_liabilities = sum_or_zero([
        liabilities.mortgage_balance,
        liabilities.other_debts,
        liabilities.final_expenses,
        total_education_cost,
    ]);
    let shared_liquid_assets = add_or_zero(household.assets.cash, household.assets.investments);

    let spouse1 = evaluate_scenario(
        &household.spouse1,
        PolicyOwner::Spouse1,
        total_liabilities,
        shared_liquid_assets,
        &household.policies,
    );

    let spouse2 = match (household.mode, household.spouse2.as_ref()) {
        (HouseholdMode::Joint, Some(person)) => Some(evaluate_scenario(
            person,
            PolicyOwner::Spouse2,
            total_liabilities,
            shared_liquid_assets,
            &household.policies,
        )),
        (HouseholdMode::Joint, None) => {
            warnings.push(
                "Joint household without a second spouse; only spouse 1 was analysed".into(),
            );
            None
        }
        (HouseholdMode::Single, _) => {
            if household.policies.iter().any(|p| p.owner == PolicyOwner::Spouse2) {
                warnings.push(
                    "Policies owned by spouse 2 are ignored in a single-earner analysis".into(),
                );
            }
            None
        }
    };

    let total_new_coverage = add_or_zero(
        spouse1.coverage_gap,
        spouse2.as_ref().map_or(Decimal::ZERO, |s| s.coverage_gap),
    );

    let output = NeedsAnalysisOutput {
        mode: household.mode,
        education,
        total_education_cost,
        total_liabilities,
        shared_liquid_assets,
        spouse1,
        spouse2,
        total_new_coverage,
    };

    with_metadata(
        "DIME needs analysis: income x years replaced plus shared liabilities and \
         education, less liquid assets and the deceased's existing coverage",
        &serde_json::json!({
            "mode": household.mode,
            "num_children": household.children.len(),
            "num_policies": household.policies.len(),
        }),
        warnings,
        output,
    )
}
