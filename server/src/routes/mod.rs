//! HTTP route handlers

pub mod classes;
pub mod health;
pub mod predict;
