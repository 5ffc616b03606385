// src/core/mod.rs
//! Outbound integration with the France Travail offers API

pub mod service_client;

pub use service_client::FranceTravailClient;
