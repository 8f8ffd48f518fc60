//! Serde adapters for the wire conventions Lockstep uses for dates and money.

pub mod date_format;
pub mod decimal_format;
