//! Device lookup capability.
//!
//! Templates reference devices by MAC or IP (`{{IP.SrcIP#Device}}`). This module
//! provides:
//! - The [`LookupContext`] trait the template renderer resolves devices through
//! - The [`Device`] record as published by the router's management API
//! - An in-memory [`DeviceDirectory`] implementing the capability

mod directory;
mod types;

pub use directory::{DeviceDirectory};
pub use types::{
    is_mac_address, strip_port, Device, DeviceError, DeviceResult, DeviceStyle, LookupContext,
    MatchField,
};
