//! HTTP handlers

pub mod health;
pub mod register;
pub mod verification;
