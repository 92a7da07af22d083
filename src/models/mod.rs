// src/models/mod.rs

pub mod meal_plan;
pub mod recipe;
pub mod user;
