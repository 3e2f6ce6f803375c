pub mod balance;
pub mod dataset;
pub mod error;
