//! Customer module: three-layer architecture (domain, store, service).
//!
//! This module centralizes customer business rules under the service crate.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::CustomerService;
