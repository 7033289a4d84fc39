pub mod balances;
pub mod columns;
mod common;
pub mod filter;
