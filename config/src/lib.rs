//! # Config Crate
//!
//! Centralized constants and static knowledge tables for the RVMAT toolchain.
//! Format defaults and the engine name lists live here so that the parser,
//! writer and validator agree on a single source of truth.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BINARY_SNIFF_LEN, DEFAULT_INDENT};
//! use config::tables::is_known_pixel_shader;
//!
//! assert_eq!(DEFAULT_INDENT, "    ");
//! assert_eq!(BINARY_SNIFF_LEN, 4096);
//! assert!(is_known_pixel_shader("Super"));
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Every literal shared between crates is defined once
//! - **Static Lookups**: Name tables are compile-time `phf` sets
//! - **Engine Compatible**: Names match what the engine's material loader accepts

pub mod constants;
pub mod tables;
