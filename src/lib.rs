pub mod admin;
pub mod brackets;
pub mod claim;
pub mod contract;
mod error;
pub mod lottery;
pub mod msg;
pub mod pricing;
pub mod query;
pub mod randomness;
pub mod state;
pub mod token;

pub use crate::error::ContractError;
