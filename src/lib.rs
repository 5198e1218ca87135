//! Liquidated Damages Engine for delayed works contracts
//!
//! This crate computes liquidated damages (LD) using the quarterly
//! work-distribution method and renders the result into a report sentence.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
