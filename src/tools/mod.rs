//! NutriSafe Tools module
//!
//! MCP tool implementations over the nutrition engine.

pub mod allergens;
pub mod body;
pub mod foods;
pub mod meals;
pub mod payload;
pub mod status;
