use rust_decimal::Decimal;

use super::{check_amount, checked_month};
use crate::error::{PlanError, PlanResult, ValidationError};

/// Housing loan paid by a fixed monthly installment.
///
/// Without a principal the installment simply runs to the end of the horizon. With one, the
/// outstanding balance accrues monthly interest and the installment stops once it is repaid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HousingLoan {
    pub(crate) installment: Decimal,
    pub(crate) principal: Option<Decimal>,
    /// Annual interest rate in percent, e.g. `2.6`.
    pub(crate) annual_rate: Decimal,
    pub(crate) start_month: u32,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoanPayment {
    pub(crate) month: u32,
    pub(crate) payment: Decimal,
    pub(crate) interest: Decimal,
    /// Outstanding balance after the payment; `None` for an open-ended loan.
    pub(crate) balance: Option<Decimal>,
}

impl HousingLoan {
    pub(crate) fn new(installment: Decimal) -> Self {
        Self {
            installment,
            principal: None,
            annual_rate: Decimal::ZERO,
            start_month: 0,
        }
    }

    pub(crate) fn with_principal(mut self, principal: Decimal, annual_rate: Decimal) -> Self {
        self.principal = Some(principal);
        self.annual_rate = annual_rate;
        self
    }

    pub(crate) fn starting(mut self, month: u32) -> Self {
        self.start_month = month;
        self
    }

    fn monthly_rate(&self) -> Option<Decimal> {
        self.annual_rate.checked_div(Decimal::from(1200))
    }

    fn interest_on(&self, balance: Decimal) -> Option<Decimal> {
        let rate = self.monthly_rate()?;
        Some(balance.checked_mul(rate)?.round_dp(2))
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_amount("loan.installment", self.installment)?;
        check_amount("loan.rate", self.annual_rate)?;
        checked_month("loan.start", i64::from(self.start_month))?;

        if let Some(principal) = self.principal {
            check_amount("loan.principal", principal)?;
            if principal > Decimal::ZERO {
                let interest = self.interest_on(principal).unwrap_or(Decimal::MAX);
                if self.installment <= interest {
                    return Err(ValidationError::LoanNeverAmortizes {
                        field: "loan.installment".into(),
                        installment: self.installment,
                        interest,
                    });
                }
            }
        }
        Ok(())
    }

    /// Payment for every month `0..horizon`, zero before the start month and after payoff.
    pub(crate) fn schedule(&self, horizon: u32) -> PlanResult<Vec<LoanPayment>> {
        let mut balance = self.principal;
        let mut rows = Vec::with_capacity(horizon as usize);

        for month in 0..horizon {
            let idle = LoanPayment {
                month,
                payment: Decimal::ZERO,
                interest: Decimal::ZERO,
                balance,
            };

            if month < self.start_month {
                rows.push(idle);
                continue;
            }

            let row = match balance {
                None => LoanPayment {
                    payment: self.installment,
                    ..idle
                },
                Some(outstanding) if outstanding <= Decimal::ZERO => idle,
                Some(outstanding) => {
                    let overflow = PlanError::Computation {
                        month,
                        reason: "loan balance overflow",
                    };
                    let interest = self.interest_on(outstanding).ok_or(overflow.clone())?;
                    let due = outstanding.checked_add(interest).ok_or(overflow)?;
                    let payment = self.installment.min(due);
                    let remaining = due - payment;
                    balance = Some(remaining);
                    LoanPayment {
                        month,
                        payment,
                        interest,
                        balance: Some(remaining),
                    }
                }
            };
            rows.push(row);
        }

        Ok(rows)
    }

    /// Month index of the final installment, if the loan is repaid inside the horizon.
    pub(crate) fn payoff_month(&self, horizon: u32) -> Option<u32> {
        self.principal?;
        self.schedule(horizon)
            .ok()?
            .iter()
            .find(|row| row.payment > Decimal::ZERO && row.balance == Some(Decimal::ZERO))
            .map(|row| row.month)
    }
}
