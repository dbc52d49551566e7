#![recursion_limit = "256"]

pub mod api;
pub mod components;
pub mod components_impl;
pub mod config;
pub mod error;
pub mod storage;
pub mod store;
pub mod toast;
pub mod types;
