//! Domain layer: the mortgage model, input validation and the amortization
//! engine. Nothing here performs I/O.

pub mod amortization;
pub mod mortgage;
pub mod validation;
