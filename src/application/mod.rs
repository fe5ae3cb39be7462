//! Application layer orchestrating a single estimate.
//!
//! This module defines the `Estimator`, which resolves the deposit, validates
//! the request and invokes the amortization engine, reusing the previous
//! result while the inputs are unchanged.

pub mod estimator;
