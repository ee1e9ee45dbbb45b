//! DME Lookup - lead-generation gateway for a DME insurance lookup tool
//!
//! This library provides the core functionality for the DME Lookup gateway,
//! including cached reference data, search orchestration, the partner
//! order-API redirect sequencer, click tracking and the admin console API.
//!
//! # Architecture
//! - `clients`: HTTP clients for the backend REST API and the partner order API
//! - `services`: search orchestration, redirect sequencing, click tracking, CSV import
//! - `api`: HTTP services and middleware
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and server startup
//! - `system`: Logging and system utilities

pub mod api;
pub mod clients;
pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod system;
