//! SleepWell Core - Shared data model.
//!
//! This crate provides the types shared by every SleepWell component:
//! - `storefront` - JSON API server backed by the in-memory store
//! - `client` - API client, cart coordinator and checkout flow
//! - `cli` - Command-line front end built on the client
//!
//! # Architecture
//!
//! The core crate contains only types, validation rules and pricing policy -
//! no I/O, no storage, no HTTP clients. This keeps it lightweight and allows
//! the server and the client to agree on one wire format.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and enumerations
//! - [`models`] - Entity records and their insert/update schemas
//! - [`pricing`] - Cart totals and the shipping policy
//! - [`validation`] - Custom validators and human-readable validation messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use types::*;
