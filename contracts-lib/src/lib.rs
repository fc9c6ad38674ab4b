//! Contracts ERP client library
//!
//! Table pipeline (filter, sort, paginate, selection) over contract records,
//! a client for the contracts REST API, and the sign-in session.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod table;

mod client;

pub use client::*;
