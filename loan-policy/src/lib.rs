//! Mortgage loan-limit engine for Korean lending regulation
//!
//! Computes the maximum mortgage a borrower can obtain when LTV, DTI and
//! stress-DSR ceilings apply at the same time, names the binding constraint,
//! and compares the outcome across interest-rate products.
//!
//! # Example
//!
//! ```
//! use loan_policy::{evaluate, Bottleneck, BorrowerType, LoanRequest, PolicyTable, RateType, RegionType};
//! use rust_decimal_macros::dec;
//!
//! let request = LoanRequest {
//!     property_value: dec!(1000000000),
//!     annual_income: dec!(80000000),
//!     existing_debt_payment: dec!(0),
//!     loan_period_months: 360,
//!     interest_rate: dec!(4.5),
//!     region_type: RegionType::Regulated,
//!     borrower_type: BorrowerType::SingleHome,
//!     rate_type: RateType::Variable,
//! };
//!
//! let result = evaluate(&request, &PolicyTable::rules_2026());
//! assert_eq!(result.ltv_limit, dec!(600000000));
//! assert_eq!(result.bottleneck, Bottleneck::Dsr);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod annuity;
pub mod config;
pub mod error;
pub mod limits;
pub mod policy;
pub mod scenario;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use limits::{evaluate, LoanLimitEvaluator};
pub use policy::PolicyTable;
pub use scenario::{compare_rate_scenarios, RateScenarioComparator, RateScenarioComparison};
pub use types::*;
