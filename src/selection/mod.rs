pub mod probe;
pub mod unit;
