// src/handlers/mod.rs

pub mod auth;
pub mod meal_plan;
pub mod profile;
pub mod recipes;
pub mod social;
