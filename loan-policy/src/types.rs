//! Core types for loan-limit evaluation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Regulatory zone of the property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionType {
    /// 투기과열지구
    Speculation,
    /// 조정대상지역
    Regulated,
    /// 비규제지역
    NonRegulated,
    /// 생애최초 구입자 (special case with higher ceilings and an absolute cap)
    FirstTimeBuyer,
}

impl RegionType {
    /// Every region, in table order
    pub const ALL: [RegionType; 4] = [
        RegionType::Speculation,
        RegionType::Regulated,
        RegionType::NonRegulated,
        RegionType::FirstTimeBuyer,
    ];

    /// Stable snake_case key
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Speculation => "speculation",
            RegionType::Regulated => "regulated",
            RegionType::NonRegulated => "non_regulated",
            RegionType::FirstTimeBuyer => "first_time_buyer",
        }
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Home ownership of the borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowerType {
    /// No home or one home
    SingleHome,
    /// Two or more homes
    MultiHome,
}

/// Interest-rate product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// 고정형
    Fixed,
    /// 주기형
    Periodic,
    /// 혼합형 (fixed for five years, then variable)
    #[serde(rename = "mixed_5y")]
    Mixed5y,
    /// 변동형
    Variable,
}

impl RateType {
    /// Canonical order, lightest stress add-on first
    pub const ALL: [RateType; 4] = [
        RateType::Fixed,
        RateType::Periodic,
        RateType::Mixed5y,
        RateType::Variable,
    ];

    /// Stable snake_case key
    pub fn as_str(&self) -> &'static str {
        match self {
            RateType::Fixed => "fixed",
            RateType::Periodic => "periodic",
            RateType::Mixed5y => "mixed_5y",
            RateType::Variable => "variable",
        }
    }
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint that determined the final limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bottleneck {
    /// Loan-to-value ceiling
    Ltv,
    /// Debt-to-income ceiling
    Dti,
    /// Stress DSR ceiling
    Dsr,
    /// Absolute loan cap
    Cap,
    /// Loan prohibited outright
    Blocked,
}

/// Mortgage request as entered by the user
///
/// Currency amounts are in won. Positivity of `property_value`,
/// `annual_income` and `interest_rate` is checked by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Purchase price of the property
    pub property_value: Decimal,

    /// Gross annual income
    pub annual_income: Decimal,

    /// Annual principal and interest already paid on other debt
    #[serde(default)]
    pub existing_debt_payment: Decimal,

    /// Repayment period in months
    pub loan_period_months: u32,

    /// Nominal annual interest rate in percent
    pub interest_rate: Decimal,

    /// Regulatory zone
    pub region_type: RegionType,

    /// Home ownership
    pub borrower_type: BorrowerType,

    /// Rate product
    pub rate_type: RateType,
}

impl LoanRequest {
    /// Same request under a different rate product
    pub fn with_rate_type(&self, rate_type: RateType) -> Self {
        Self {
            rate_type,
            ..self.clone()
        }
    }

    /// Whether the regulatory block applies
    pub fn is_blocked(&self) -> bool {
        self.borrower_type == BorrowerType::MultiHome
            && self.region_type != RegionType::NonRegulated
    }
}

/// Outcome of a loan-limit evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanLimitResult {
    /// Limit implied by the LTV ceiling
    pub ltv_limit: Decimal,

    /// Limit implied by the DTI ceiling at the nominal rate
    pub dti_limit: Decimal,

    /// Limit implied by the DSR ceiling at the stressed rate
    pub dsr_limit: Decimal,

    /// Maximum loan available
    pub final_limit: Decimal,

    /// Binding constraint
    pub bottleneck: Bottleneck,

    /// Monthly installment for `final_limit` at the nominal rate
    pub monthly_payment: Decimal,

    /// Nominal rate plus stress add-on
    pub effective_rate: Decimal,

    /// Total debt service over income at `final_limit`, in percent
    pub dsr_ratio: Decimal,

    /// Applied LTV ceiling (%)
    ///
    /// The three applied ceilings are all 0 for a [`Bottleneck::Blocked`]
    /// result, since no lending is allowed there.
    pub ltv_ratio: Decimal,

    /// Applied DTI ceiling (%), 0 when blocked
    pub dti_ratio: Decimal,

    /// Applied DSR ceiling (%), 0 when blocked
    pub dsr_ceiling: Decimal,

    /// Applied stress add-on (percentage points)
    pub stress_rate: Decimal,

    /// Applied absolute cap, if the region carries one
    pub loan_cap: Option<Decimal>,

    /// Version of the rule set that produced this result
    pub policy_version: String,

    /// One-line summary of the applied rules
    pub description: String,

    /// Advisory messages for the borrower
    pub warnings: Vec<String>,
}

impl LoanLimitResult {
    /// Check if a loan is available at all
    pub fn is_approved(&self) -> bool {
        self.final_limit > Decimal::ZERO
    }

    /// Limit for a given constraint
    pub fn limit_for(&self, bottleneck: Bottleneck) -> Option<Decimal> {
        match bottleneck {
            Bottleneck::Ltv => Some(self.ltv_limit),
            Bottleneck::Dti => Some(self.dti_limit),
            Bottleneck::Dsr => Some(self.dsr_limit),
            Bottleneck::Cap => self.loan_cap,
            Bottleneck::Blocked => None,
        }
    }
}
