//! Youth Labor Compliance and Payroll Engine
//!
//! This crate evaluates submitted work weeks against child-labor rules
//! (hour caps, time-of-day windows, documentation requirements) and
//! computes exact decimal payroll, including overtime premiums from an
//! effective-dated wage history, for an agricultural/retail operation.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod payroll;
pub mod rules;
pub mod store;
