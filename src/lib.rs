//! Wardrobe - Social wardrobe-sharing backend
//!
//! This crate exposes a typed JSON API for image posts tagged by clothing
//! category, backed by PostgreSQL and pre-signed object-storage uploads.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
