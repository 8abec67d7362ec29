// src/io/mod.rs

pub mod provider;
pub mod reporting;
