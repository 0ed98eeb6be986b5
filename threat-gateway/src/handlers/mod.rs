//! HTTP handlers

pub mod health;
pub mod threats;
pub mod bridge;
pub mod catalog;
