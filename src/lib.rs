//! Smile Studio
//!
//! Smile design preview server: upload a portrait, adjust teeth whitening
//! and smile brightness, compare before and after, export the result.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
