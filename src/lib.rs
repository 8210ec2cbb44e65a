//! Scripts for deploying and initializing the Nomiswap Uniswap V2 contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod solidity;
pub mod utils;
