//! Rate-type scenario comparison
//!
//! Re-runs the evaluation once per [`RateType`] with every other input held
//! fixed, so the borrower can see what a different rate product does to the
//! stress-DSR limit.

use crate::{
    limits::LoanLimitEvaluator, policy::PolicyTable, LoanLimitResult, LoanRequest, RateType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Evaluation results for every rate product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateScenarioComparison {
    /// 고정형
    pub fixed: LoanLimitResult,
    /// 주기형
    pub periodic: LoanLimitResult,
    /// 혼합형
    pub mixed_5y: LoanLimitResult,
    /// 변동형
    pub variable: LoanLimitResult,
}

impl RateScenarioComparison {
    /// Result for one rate product
    pub fn get(&self, rate_type: RateType) -> &LoanLimitResult {
        match rate_type {
            RateType::Fixed => &self.fixed,
            RateType::Periodic => &self.periodic,
            RateType::Mixed5y => &self.mixed_5y,
            RateType::Variable => &self.variable,
        }
    }

    /// Results in canonical rate-type order
    pub fn iter(&self) -> impl Iterator<Item = (RateType, &LoanLimitResult)> + '_ {
        RateType::ALL.into_iter().map(move |rate_type| (rate_type, self.get(rate_type)))
    }

    /// Rate product with the highest final limit (earliest wins on ties)
    pub fn best(&self) -> (RateType, &LoanLimitResult) {
        let mut best = (RateType::Fixed, &self.fixed);
        for (rate_type, result) in self.iter().skip(1) {
            if result.final_limit > best.1.final_limit {
                best = (rate_type, result);
            }
        }
        best
    }

    /// Change in final limit when switching from one product to another
    pub fn limit_gain(&self, from: RateType, to: RateType) -> Decimal {
        self.get(to).final_limit - self.get(from).final_limit
    }
}

/// Runs one request under every rate product
#[derive(Debug, Clone, Copy)]
pub struct RateScenarioComparator<'a> {
    evaluator: LoanLimitEvaluator<'a>,
}

impl<'a> RateScenarioComparator<'a> {
    /// Create new comparator
    pub fn new(policy: &'a PolicyTable) -> Self {
        Self {
            evaluator: LoanLimitEvaluator::new(policy),
        }
    }

    /// Compare the request across rate products; its own `rate_type` is ignored
    pub fn compare(&self, request: &LoanRequest) -> RateScenarioComparison {
        let run = |rate_type: RateType| self.evaluator.evaluate(&request.with_rate_type(rate_type));

        let comparison = RateScenarioComparison {
            fixed: run(RateType::Fixed),
            periodic: run(RateType::Periodic),
            mixed_5y: run(RateType::Mixed5y),
            variable: run(RateType::Variable),
        };

        tracing::debug!(
            fixed = %comparison.fixed.final_limit,
            variable = %comparison.variable.final_limit,
            "rate scenarios compared"
        );

        comparison
    }
}

/// Compare a request across rate products under a rule set
pub fn compare_rate_scenarios(request: &LoanRequest, policy: &PolicyTable) -> RateScenarioComparison {
    RateScenarioComparator::new(policy).compare(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bottleneck, BorrowerType, RegionType};
    use rust_decimal_macros::dec;

    fn request() -> LoanRequest {
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
    fn test_each_scenario_uses_its_rate_type() {
        let table = PolicyTable::rules_2026();
        let comparison = compare_rate_scenarios(&request(), &table);

        for (rate_type, result) in comparison.iter() {
            assert_eq!(result.stress_rate, table.stress_rate(rate_type));
            assert_eq!(result.effective_rate, dec!(4.5) + table.stress_rate(rate_type));
        }
    }

    #[test]
    fn test_dsr_limit_ordering() {
        let table = PolicyTable::rules_2026();
        let comparison = compare_rate_scenarios(&request(), &table);

        assert!(comparison.variable.dsr_limit < comparison.mixed_5y.dsr_limit);
        assert!(comparison.mixed_5y.dsr_limit < comparison.periodic.dsr_limit);
        assert!(comparison.periodic.dsr_limit < comparison.fixed.dsr_limit);
    }

    #[test]
    fn test_dsr_limit_ordering_over_very_long_term() {
        let table = PolicyTable::rules_2026();
        let mut req = request();
        // Variable's stressed growth factor no longer fits a Decimal at this length
        req.loan_period_months = 12000;

        let comparison = compare_rate_scenarios(&req, &table);

        assert!(comparison.variable.dsr_limit < comparison.mixed_5y.dsr_limit);
        assert!(comparison.mixed_5y.dsr_limit < comparison.periodic.dsr_limit);
        assert!(comparison.periodic.dsr_limit < comparison.fixed.dsr_limit);
        // 32M/yr as a perpetuity at 7.5%
        assert!((comparison.variable.dsr_limit - dec!(426666667)).abs() <= dec!(1));
        assert!(comparison.fixed.final_limit >= comparison.variable.final_limit);
    }

    #[test]
    fn test_fixed_beats_variable_when_dsr_binds() {
        let table = PolicyTable::rules_2026();
        let comparison = compare_rate_scenarios(&request(), &table);

        assert_eq!(comparison.variable.bottleneck, Bottleneck::Dsr);
        assert!(comparison.fixed.final_limit >= comparison.variable.final_limit);
        assert!(comparison.limit_gain(RateType::Variable, RateType::Fixed) > Decimal::ZERO);

        let (best_type, best) = comparison.best();
        assert_eq!(best_type, RateType::Fixed);
        assert_eq!(best.final_limit, comparison.fixed.final_limit);
    }

    #[test]
    fn test_best_prefers_earlier_on_tie() {
        let table = PolicyTable::rules_2026();
        let mut req = request();
        // LTV binds for every product
        req.property_value = dec!(200000000);

        let comparison = compare_rate_scenarios(&req, &table);
        for (_, result) in comparison.iter() {
            assert_eq!(result.bottleneck, Bottleneck::Ltv);
        }
        assert_eq!(comparison.best().0, RateType::Fixed);
        assert_eq!(comparison.limit_gain(RateType::Variable, RateType::Fixed), Decimal::ZERO);
    }

    #[test]
    fn test_blocked_in_every_scenario() {
        let table = PolicyTable::rules_2026();
        let mut req = request();
        req.borrower_type = BorrowerType::MultiHome;
        req.region_type = RegionType::Speculation;

        let comparison = compare_rate_scenarios(&req, &table);
        assert!(comparison
            .iter()
            .all(|(_, result)| result.bottleneck == Bottleneck::Blocked
                && result.final_limit.is_zero()));
    }
}
