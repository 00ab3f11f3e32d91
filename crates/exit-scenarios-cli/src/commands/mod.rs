pub mod scenarios;
pub mod tax;
