// src/model/mod.rs

pub mod policy;
pub mod sales;
