//! planeconv - Amiga bitplane and sprite data converter
//!
//! Converts palette-based PNG images into 68k assembler data for OCS
//! displays. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
