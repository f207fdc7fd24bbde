//! Shared helpers.

pub mod category;
pub mod hash;
pub mod html;
pub mod minify;
