//! Service layer between HTTP handlers and the question store

pub mod questions;

pub use questions::QuestionService;
