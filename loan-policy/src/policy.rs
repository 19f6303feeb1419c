//! Regulatory constant tables
//!
//! A [`PolicyTable`] bundles the LTV/DTI/DSR ceilings for every
//! [`RegionType`] and the stress add-on for every [`RateType`] in force for one
//! policy year. Tables are plain data: they can be built in code, loaded from
//! TOML, and passed to the evaluator explicitly.

use crate::{Error, RateType, RegionType, Result};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Absolute cap for first-time buyers (6억원)
pub const FIRST_TIME_BUYER_CAP: Decimal = dec!(600000000);

lazy_static! {
    static ref CURRENT: PolicyTable = PolicyTable::rules_2026();
}

/// Default rule set, shared process-wide
pub fn current() -> &'static PolicyTable {
    &CURRENT
}

/// Ceilings applied in one regulatory zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPolicy {
    /// Loan-to-value ceiling (%)
    pub ltv: Decimal,

    /// Debt-to-income ceiling (%)
    pub dti: Decimal,

    /// Debt-service-ratio ceiling (%)
    pub dsr: Decimal,

    /// Display name
    pub label: String,

    /// Short explanation of the zone
    pub description: String,

    /// Absolute loan ceiling on top of the ratio limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_cap: Option<Decimal>,
}

impl RegionPolicy {
    fn new(ltv: Decimal, dti: Decimal, dsr: Decimal, label: &str, description: &str) -> Self {
        Self {
            ltv,
            dti,
            dsr,
            label: label.to_string(),
            description: description.to_string(),
            loan_cap: None,
        }
    }

    fn with_cap(mut self, cap: Decimal) -> Self {
        self.loan_cap = Some(cap);
        self
    }
}

/// Stress treatment of one rate product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePolicy {
    /// Display name
    pub label: String,

    /// Percentage points added to the nominal rate for DSR
    pub stress_rate: Decimal,
}

impl RatePolicy {
    fn new(label: &str, stress_rate: Decimal) -> Self {
        Self {
            label: label.to_string(),
            stress_rate,
        }
    }
}

/// Region table, one entry per [`RegionType`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    /// 투기과열지구
    pub speculation: RegionPolicy,
    /// 조정대상지역
    pub regulated: RegionPolicy,
    /// 비규제지역
    pub non_regulated: RegionPolicy,
    /// 생애최초 구입자
    pub first_time_buyer: RegionPolicy,
}

/// Rate table, one entry per [`RateType`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// 고정형
    pub fixed: RatePolicy,
    /// 주기형
    pub periodic: RatePolicy,
    /// 혼합형
    pub mixed_5y: RatePolicy,
    /// 변동형
    pub variable: RatePolicy,
}

/// Complete rule set for one policy year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyTable {
    /// Rule-set identifier, e.g. "2026"
    pub version: String,

    /// Date the rules took effect
    pub effective_from: NaiveDate,

    /// Ceilings by region
    pub regions: RegionTable,

    /// Stress add-ons by rate product
    pub rates: RateTable,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::rules_2026()
    }
}

impl PolicyTable {
    /// Rules in force from 2026: stage-3 stress DSR with a 3.0%p variable-rate add-on
    pub fn rules_2026() -> Self {
        Self {
            version: "2026".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or(NaiveDate::MIN),
            regions: Self::region_ceilings(),
            rates: RateTable {
                fixed: RatePolicy::new("고정형", dec!(0.0)),
                periodic: RatePolicy::new("주기형", dec!(0.9)),
                mixed_5y: RatePolicy::new("혼합형(5년)", dec!(1.8)),
                variable: RatePolicy::new("변동형", dec!(3.0)),
            },
        }
    }

    /// Rules in force during 2025: same ceilings, lighter stress add-ons
    pub fn rules_2025() -> Self {
        Self {
            version: "2025".to_string(),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN),
            regions: Self::region_ceilings(),
            rates: RateTable {
                fixed: RatePolicy::new("고정형", dec!(0.0)),
                periodic: RatePolicy::new("주기형", dec!(0.45)),
                mixed_5y: RatePolicy::new("혼합형(5년)", dec!(0.9)),
                variable: RatePolicy::new("변동형", dec!(1.5)),
            },
        }
    }

    fn region_ceilings() -> RegionTable {
        RegionTable {
            speculation: RegionPolicy::new(
                dec!(40),
                dec!(40),
                dec!(40),
                "투기과열지구",
                "서울 전역 등 주택 가격 상승이 과열된 지역",
            ),
            regulated: RegionPolicy::new(
                dec!(60),
                dec!(50),
                dec!(40),
                "조정대상지역",
                "주택 가격 상승 우려로 대출 규제가 적용되는 지역",
            ),
            non_regulated: RegionPolicy::new(
                dec!(70),
                dec!(60),
                dec!(40),
                "비규제지역",
                "규제지역으로 지정되지 않은 지역",
            ),
            first_time_buyer: RegionPolicy::new(
                dec!(80),
                dec!(60),
                dec!(40),
                "생애최초 구입",
                "생애 최초로 주택을 구입하는 무주택 세대주",
            )
            .with_cap(FIRST_TIME_BUYER_CAP),
        }
    }

    /// Built-in rule set by version
    pub fn builtin(version: &str) -> Result<Self> {
        match version.trim() {
            "2026" => Ok(Self::rules_2026()),
            "2025" => Ok(Self::rules_2025()),
            other => Err(Error::UnknownPolicyVersion(other.to_string())),
        }
    }

    /// Ceilings for a region
    pub fn region(&self, region: RegionType) -> &RegionPolicy {
        match region {
            RegionType::Speculation => &self.regions.speculation,
            RegionType::Regulated => &self.regions.regulated,
            RegionType::NonRegulated => &self.regions.non_regulated,
            RegionType::FirstTimeBuyer => &self.regions.first_time_buyer,
        }
    }

    /// Stress treatment for a rate product
    pub fn rate(&self, rate_type: RateType) -> &RatePolicy {
        match rate_type {
            RateType::Fixed => &self.rates.fixed,
            RateType::Periodic => &self.rates.periodic,
            RateType::Mixed5y => &self.rates.mixed_5y,
            RateType::Variable => &self.rates.variable,
        }
    }

    /// Stress add-on for a rate product
    pub fn stress_rate(&self, rate_type: RateType) -> Decimal {
        self.rate(rate_type).stress_rate
    }

    /// Check structural rules of the table
    ///
    /// Percentages must lie in 0–100, stress add-ons must be non-negative and
    /// non-decreasing from fixed to variable, and caps must be positive.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::InvalidPolicy("version is empty".to_string()));
        }

        let hundred = dec!(100);
        for region in RegionType::ALL {
            let policy = self.region(region);
            for (name, value) in [("ltv", policy.ltv), ("dti", policy.dti), ("dsr", policy.dsr)] {
                if value < Decimal::ZERO || value > hundred {
                    return Err(Error::InvalidPolicy(format!(
                        "{} {} of {}% is outside 0-100",
                        region, name, value
                    )));
                }
            }
            if let Some(cap) = policy.loan_cap {
                if cap <= Decimal::ZERO {
                    return Err(Error::InvalidPolicy(format!(
                        "{} loan cap {} must be positive",
                        region, cap
                    )));
                }
            }
        }

        let mut previous: Option<(RateType, Decimal)> = None;
        for rate_type in RateType::ALL {
            let stress = self.stress_rate(rate_type);
            if stress < Decimal::ZERO {
                return Err(Error::InvalidPolicy(format!(
                    "{} stress rate {} is negative",
                    rate_type, stress
                )));
            }
            if let Some((prev_type, prev_stress)) = previous {
                if stress < prev_stress {
                    return Err(Error::InvalidPolicy(format!(
                        "{} stress rate {} is lower than {} stress rate {}",
                        rate_type, stress, prev_type, prev_stress
                    )));
                }
            }
            previous = Some((rate_type, stress));
        }

        Ok(())
    }

    /// Parse a table from TOML and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let table: PolicyTable = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse policy table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize the table as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize policy table: {}", e)))
    }
}
