mod parse;
mod records;

pub(crate) use parse::{
    parse_amount, parse_date, parse_keyword, parse_month, parse_month_of_year, parse_range,
    parse_signed_amount, split_range,
};
pub(crate) use records::{
    annual_args, child_args, education_args, event_args, expense_args, loan_args, parse_annual,
    parse_child, parse_education, parse_event, parse_expense, parse_fees, parse_loan, parse_rate,
};

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
