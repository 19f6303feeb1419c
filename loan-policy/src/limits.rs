//! Loan-limit evaluation
//!
//! Runs the LTV, DTI and stress-DSR ceilings of a [`PolicyTable`] against a
//! [`LoanRequest`] and reports the smallest of them as the final limit.
//!
//! # Algorithm
//!
//! 1. Multi-home borrowers outside non-regulated zones are blocked outright
//! 2. LTV limit = property value × LTV%
//! 3. DTI limit = principal whose installment at the nominal rate fits
//!    income × DTI% − existing debt service
//! 4. DSR limit = same inversion at nominal + stress rate with DSR%
//! 5. Regions with an absolute cap add it as a fourth candidate
//! 6. Final limit = minimum; ties resolve DSR > DTI > LTV > cap
//!
//! Amounts are kept at full precision and rounded half-up to whole won only
//! when the result is assembled.

use crate::{
    annuity,
    policy::{PolicyTable, RegionPolicy},
    Bottleneck, LoanLimitResult, LoanRequest, RateType,
};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Order in which tied constraints are reported
pub const TIE_BREAK_PRIORITY: [Bottleneck; 4] = [
    Bottleneck::Dsr,
    Bottleneck::Dti,
    Bottleneck::Ltv,
    Bottleneck::Cap,
];

/// Round to whole won, half away from zero
pub fn round_won(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn round_ratio(ratio: Decimal) -> Decimal {
    ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Loan-limit evaluator bound to one rule set
#[derive(Debug, Clone, Copy)]
pub struct LoanLimitEvaluator<'a> {
    policy: &'a PolicyTable,
}

impl<'a> LoanLimitEvaluator<'a> {
    /// Create new evaluator
    pub fn new(policy: &'a PolicyTable) -> Self {
        Self { policy }
    }

    /// Rule set in use
    pub fn policy(&self) -> &'a PolicyTable {
        self.policy
    }

    /// Evaluate the maximum loan for a request
    pub fn evaluate(&self, request: &LoanRequest) -> LoanLimitResult {
        let region = self.policy.region(request.region_type);
        let rate = self.policy.rate(request.rate_type);
        let effective_rate = request.interest_rate + rate.stress_rate;

        if request.is_blocked() {
            tracing::debug!(
                region = %request.region_type,
                "multi-home borrower blocked in regulated region"
            );
            return self.blocked(request, region, rate.stress_rate, effective_rate);
        }

        let months = request.loan_period_months.max(1);
        let existing_debt = request.existing_debt_payment.max(Decimal::ZERO);

        let ltv_limit = (request.property_value * region.ltv / PERCENT).max(Decimal::ZERO);
        let dti_limit = self.income_limit(
            request.annual_income,
            region.dti,
            existing_debt,
            request.interest_rate,
            months,
        );
        let dsr_limit = self.income_limit(
            request.annual_income,
            region.dsr,
            existing_debt,
            effective_rate,
            months,
        );

        let (binding, limit) = resolve_bottleneck(&[
            (Bottleneck::Dsr, Some(dsr_limit)),
            (Bottleneck::Dti, Some(dti_limit)),
            (Bottleneck::Ltv, Some(ltv_limit)),
            (Bottleneck::Cap, region.loan_cap),
        ]);

        let final_limit = round_won(limit.max(Decimal::ZERO));
        let raw_payment = annuity::monthly_payment(final_limit, request.interest_rate, months);
        let dsr_ratio = if request.annual_income > Decimal::ZERO {
            round_ratio(
                (raw_payment * MONTHS_PER_YEAR + existing_debt) / request.annual_income * PERCENT,
            )
        } else {
            Decimal::ZERO
        };

        let warnings = self.warnings(request, region, binding, final_limit);

        tracing::debug!(
            region = %request.region_type,
            rate_type = %request.rate_type,
            bottleneck = ?binding,
            %final_limit,
            "loan limit evaluated"
        );

        LoanLimitResult {
            ltv_limit: round_won(ltv_limit),
            dti_limit: round_won(dti_limit),
            dsr_limit: round_won(dsr_limit),
            final_limit,
            bottleneck: binding,
            monthly_payment: round_won(raw_payment),
            effective_rate,
            dsr_ratio,
            ltv_ratio: region.ltv,
            dti_ratio: region.dti,
            dsr_ceiling: region.dsr,
            stress_rate: rate.stress_rate,
            loan_cap: region.loan_cap,
            policy_version: self.policy.version.clone(),
            description: self.describe(request, region),
            warnings,
        }
    }

    /// Principal whose installments fit the share of income left after existing debt
    fn income_limit(
        &self,
        annual_income: Decimal,
        ceiling_pct: Decimal,
        existing_debt: Decimal,
        annual_rate_pct: Decimal,
        months: u32,
    ) -> Decimal {
        let allowed_annual =
            (annual_income * ceiling_pct / PERCENT - existing_debt).max(Decimal::ZERO);
        annuity::principal_from_payment(allowed_annual / MONTHS_PER_YEAR, annual_rate_pct, months)
    }

    fn blocked(
        &self,
        request: &LoanRequest,
        region: &RegionPolicy,
        stress_rate: Decimal,
        effective_rate: Decimal,
    ) -> LoanLimitResult {
        LoanLimitResult {
            ltv_limit: Decimal::ZERO,
            dti_limit: Decimal::ZERO,
            dsr_limit: Decimal::ZERO,
            final_limit: Decimal::ZERO,
            bottleneck: Bottleneck::Blocked,
            monthly_payment: Decimal::ZERO,
            effective_rate,
            dsr_ratio: Decimal::ZERO,
            ltv_ratio: Decimal::ZERO,
            dti_ratio: Decimal::ZERO,
            dsr_ceiling: Decimal::ZERO,
            stress_rate,
            loan_cap: region.loan_cap,
            policy_version: self.policy.version.clone(),
            description: self.describe(request, region),
            warnings: vec![format!(
                "다주택자는 {}에서 주택담보대출을 받을 수 없습니다 (LTV 0%).",
                region.label
            )],
        }
    }

    fn describe(&self, request: &LoanRequest, region: &RegionPolicy) -> String {
        let rate = self.policy.rate(request.rate_type);
        format!(
            "{} · LTV {}% / DTI {}% / DSR {}% · {} (스트레스 +{}%p) · {} 기준",
            region.label,
            region.ltv.normalize(),
            region.dti.normalize(),
            region.dsr.normalize(),
            rate.label,
            rate.stress_rate.normalize(),
            self.policy.version
        )
    }

    fn warnings(
        &self,
        request: &LoanRequest,
        region: &RegionPolicy,
        binding: Bottleneck,
        final_limit: Decimal,
    ) -> Vec<String> {
        let mut warnings = Vec::new();

        if final_limit.is_zero() {
            warnings.push(
                "기존 부채 상환액이 DTI/DSR 허용 범위를 모두 사용하여 추가 대출이 어렵습니다."
                    .to_string(),
            );
            return warnings;
        }

        match binding {
            Bottleneck::Dsr => {
                let stress = self.policy.stress_rate(request.rate_type);
                let lighter: Vec<&str> = RateType::ALL
                    .iter()
                    .map(|&rate_type| self.policy.rate(rate_type))
                    .filter(|rate| rate.stress_rate < stress)
                    .map(|rate| rate.label.as_str())
                    .collect();

                if !lighter.is_empty() {
                    warnings.push(format!(
                        "{} 상품에는 스트레스 금리 {}%p가 적용되어 DSR 한도가 줄어듭니다. {}을 선택하면 한도가 늘어날 수 있습니다.",
                        self.policy.rate(request.rate_type).label,
                        stress.normalize(),
                        lighter.join(" 또는 ")
                    ));
                }
            }
            Bottleneck::Cap => {
                if let Some(cap) = region.loan_cap {
                    warnings.push(format!(
                        "{} 대출 한도 상한 {}원이 적용되었습니다.",
                        region.label,
                        cap.normalize()
                    ));
                }
            }
            Bottleneck::Ltv => {
                warnings.push(format!(
                    "담보가치 기준 LTV {}% 한도가 적용되었습니다. 소득 대비 여유가 있어도 주택 가격을 넘는 대출은 불가합니다.",
                    region.ltv.normalize()
                ));
            }
            _ => {}
        }

        warnings
    }
}

/// Pick the binding constraint among the candidates
///
/// Candidates without a value are skipped. On equal limits the candidate
/// listed first in [`TIE_BREAK_PRIORITY`] wins, whatever the slice order.
pub fn resolve_bottleneck(candidates: &[(Bottleneck, Option<Decimal>)]) -> (Bottleneck, Decimal) {
    let mut best: Option<(Bottleneck, Decimal)> = None;

    for kind in TIE_BREAK_PRIORITY {
        let value = candidates
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .and_then(|(_, value)| *value);

        if let Some(value) = value {
            match best {
                Some((_, current)) if value >= current => {}
                _ => best = Some((kind, value)),
            }
        }
    }

    best.unwrap_or((Bottleneck::Blocked, Decimal::ZERO))
}

/// Evaluate a request against a rule set
pub fn evaluate(request: &LoanRequest, policy: &PolicyTable) -> LoanLimitResult {
    LoanLimitEvaluator::new(policy).evaluate(request)
}
