//! Core infrastructure shared by the platform and storage layers.

pub mod logging;
