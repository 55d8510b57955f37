//! Core planning engine: models, scoring, scheduling, assembly and validation

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod validation;
