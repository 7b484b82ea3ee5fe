//! Bearer-token types shared by the library service and its tests.
//!
//! Provides JWT issue/validation and the `Identity` extractor.

pub mod identity;
pub mod token;
