//! Tag transforms applied to resolved placeholder values

use std::fmt;

use serde_json::Value;

use super::placeholder::display_value;
use super::types::{DeviceField, DeviceState, RenderMode, Segment, TagElement};
use crate::device::{LookupContext, MatchField};
use crate::metrics::RenderMetrics;

/// Placeholder tag, case-sensitive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Interface,
    Device,
    DeviceIcon,
    DeviceName,
    DeviceIp,
    DeviceMac,
    Disabled,
    /// Any other tag name
    Other(String),
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        match name {
            "Interface" => Tag::Interface,
            "Device" => Tag::Device,
            "DeviceIcon" => Tag::DeviceIcon,
            "DeviceName" => Tag::DeviceName,
            "DeviceIP" => Tag::DeviceIp,
            "DeviceMAC" => Tag::DeviceMac,
            "Disabled" => Tag::Disabled,
            other => Tag::Other(other.to_string()),
        }
    }
}

impl Tag {
    pub fn as_str(&self) -> &str {
        match self {
            Tag::Interface => "Interface",
            Tag::Device => "Device",
            Tag::DeviceIcon => "DeviceIcon",
            Tag::DeviceName => "DeviceName",
            Tag::DeviceIp => "DeviceIP",
            Tag::DeviceMac => "DeviceMAC",
            Tag::Disabled => "Disabled",
            Tag::Other(name) => name,
        }
    }

    /// Fields shown for device-badge tags, `None` for other tags
    pub fn device_fields(&self) -> Option<&'static [DeviceField]> {
        match self {
            Tag::Device => Some(&[DeviceField::Style, DeviceField::Name]),
            Tag::DeviceIcon => Some(&[DeviceField::Style]),
            Tag::DeviceName => Some(&[DeviceField::Name]),
            Tag::DeviceIp => Some(&[DeviceField::RecentIp]),
            Tag::DeviceMac => Some(&[DeviceField::Mac]),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transform a resolved value according to `tag`.
///
/// Device-resolving tags call `context.get_device` exactly once. A lookup
/// miss degrades to the raw value (or `Unknown` for `Disabled`); an absent
/// context or unknown tag yields `value#tag`.
pub fn transform_tag(
    context: Option<&dyn LookupContext>,
    tag: &Tag,
    value: &Value,
    mode: RenderMode,
) -> Segment {
    let raw = display_value(value);

    let element = match context {
        None => {
            RenderMetrics::record_no_context();
            TagElement::Generic {
                value: raw,
                tag: tag.to_string(),
            }
        }
        Some(context) => match tag {
            Tag::Interface => TagElement::Interface { name: raw },
            Tag::Disabled => {
                let device = lookup(context, &raw);
                TagElement::DeviceState {
                    state: DeviceState::of(device.as_ref()),
                    identifier: raw,
                }
            }
            Tag::Other(_) => TagElement::Generic {
                value: raw,
                tag: tag.to_string(),
            },
            _ => {
                let show = tag.device_fields().unwrap_or_default().to_vec();
                let device = lookup(context, &raw);
                TagElement::Device {
                    identifier: raw,
                    show,
                    device,
                }
            }
        },
    };

    match mode {
        RenderMode::Plain => Segment::Text(element.to_string()),
        RenderMode::Structured => Segment::Element(element),
    }
}

fn lookup(context: &dyn LookupContext, raw: &str) -> Option<crate::device::Device> {
    let (field, identifier) = MatchField::classify(raw);
    let device = context.get_device(identifier, field);

    if device.is_some() {
        RenderMetrics::record_lookup_hit();
    } else {
        RenderMetrics::record_lookup_miss();
        tracing::debug!(identifier = %identifier, field = %field, "Device lookup missed");
    }
    device
}
