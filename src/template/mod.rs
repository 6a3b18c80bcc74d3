//! Alert template rendering.
//!
//! Alert rules carry user-authored Title/Body templates such as
//! `"Dropped traffic from {{IP.SrcIP#Device}} on {{InDev#Interface}}"`.
//! This module provides:
//! - A placeholder scanner for `{{path}}` and `{{path#tag}}`
//! - Path resolution into arbitrarily nested event records
//! - Tag transforms, including device resolution through a [`LookupContext`]
//! - Plain-string or structured-segment output
//!
//! # Example
//!
//! ```ignore
//! let directory = DeviceDirectory::from_devices(vec![
//!     Device::new("11:22:33:44:55:66", "Device#11"),
//! ]);
//!
//! let event = json!({ "MAC": "11:22:33:44:55:66", "Iface": "wlan1" });
//! let renderer = TemplateRenderer::new(&directory);
//!
//! let text = renderer.render_text("{{MAC#Device}} joined {{Iface}}", &event);
//! assert_eq!(text, "Device#11 joined wlan1");
//! ```
//!
//! [`LookupContext`]: crate::device::LookupContext

mod placeholder;
mod render;
mod tags;
mod types;

pub use placeholder::{display_value, is_truthy, resolve_path, scan, Placeholder};
pub use render::{render, TemplateRenderer};
pub use tags::{transform_tag, Tag};
pub use types::{DeviceField, DeviceState, RenderMode, Rendered, Segment, TagElement};
