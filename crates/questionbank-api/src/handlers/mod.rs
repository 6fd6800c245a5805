//! HTTP handlers

pub mod questions;
