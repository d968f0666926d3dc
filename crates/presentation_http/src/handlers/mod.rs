//! HTTP request handlers

pub mod debug;
pub mod health;
pub mod pages;
pub mod research;
