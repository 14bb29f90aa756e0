use crate::calendar::BsDate;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result, ValidationErrors};
use crate::netting::LoanLedger;

/// Check a ledger before any interest is computed.
///
/// Every offending field is reported: the principal must be positive, the
/// rate non-negative, the loan dated on or before `as_of`, each repayment
/// positive and dated within `loan_date..=as_of`, and the repayments must
/// not add up to more than the principal.
pub fn validate_ledger_all(
    ledger: &LoanLedger,
    as_of: &BsDate,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !ledger.principal.is_positive() {
        errors.push(LedgerError::invalid_input(
            "principal",
            format!("must be greater than zero, got {}", ledger.principal),
        ));
    }

    if ledger.monthly_rate.is_negative() {
        errors.push(LedgerError::invalid_input(
            "rate",
            format!("must not be negative, got {}", ledger.monthly_rate.as_percent()),
        ));
    }

    if ledger.loan_date > *as_of {
        errors.push(LedgerError::invalid_input(
            "loan_date",
            format!("{} is after the evaluation date {}", ledger.loan_date, as_of),
        ));
    }

    for (i, repayment) in ledger.repayments.iter().enumerate() {
        if !repayment.amount.is_positive() {
            errors.push(LedgerError::invalid_input(
                format!("repayments[{}].amount", i),
                format!("must be greater than zero, got {}", repayment.amount),
            ));
        }
        if repayment.date < ledger.loan_date || repayment.date > *as_of {
            errors.push(LedgerError::invalid_input(
                format!("repayments[{}].date", i),
                format!(
                    "{} is outside {}..={}",
                    repayment.date, ledger.loan_date, as_of
                ),
            ));
        }
    }

    let repaid: Money = ledger.repayments.iter().map(|r| r.amount).sum();
    if repaid > ledger.principal {
        errors.push(LedgerError::invalid_input(
            "repayments",
            format!("total {} exceeds principal {}", repaid, ledger.principal),
        ));
    }

    errors.into_result()
}

/// fail-fast form, returning the first offending field
pub fn validate_ledger(ledger: &LoanLedger, as_of: &BsDate) -> Result<()> {
    validate_ledger_all(ledger, as_of).map_err(|errors| {
        errors
            .into_first()
            .unwrap_or_else(|| LedgerError::invalid_input("ledger", "invalid"))
    })
}
