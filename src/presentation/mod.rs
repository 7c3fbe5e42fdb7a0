//! Claimant-facing output: text report, currency format, contact link

mod report;
mod contact;

pub use report::{format_currency, render_report, Report};
pub use contact::{ContactLink, DEFAULT_GREETING, DEFAULT_PHONE, DISCLAIMER};
