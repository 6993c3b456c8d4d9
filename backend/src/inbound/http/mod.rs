//! HTTP inbound adapter: HTML pages for browsers and a small JSON API.

pub mod account;
pub mod api;
pub mod assets;
pub mod auth;
pub mod contact;
pub mod context;
pub mod error;
pub mod health;
pub mod pages;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::{ApiResult, PageError, PageResult};
