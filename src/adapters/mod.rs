//! Concrete adapter implementations for ports.

pub mod card_svg;
pub mod catalogue_adapter;
pub mod file_config_adapter;
#[cfg(feature = "web")]
pub mod web;
