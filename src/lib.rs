//! Mortgage estimator library.
//!
//! Computes the monthly payment, total repayment and total interest of a
//! repayment or interest-only mortgage from typed form input. The binary
//! (`mortgage-estimator`) is a thin CLI over these modules.

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;
