//! Life insurance needs analysis (DIME: debt, income, mortgage, education).

pub mod needs;
pub mod quick;
