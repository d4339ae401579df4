// src/lib.rs
pub mod api;
pub mod banner;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod extractor;
pub mod grader;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod report;
