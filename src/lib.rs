//! NutriSafe Library
//!
//! Nutrition-data reconciliation and allergen-safety engine, exposed as an
//! MCP tool server.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
