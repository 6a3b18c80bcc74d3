//! Render output types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::Device;

/// Output shape selected by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Flatten everything into one string
    #[default]
    Plain,
    /// Keep tag results as discrete elements for rich rendering
    Structured,
}

impl RenderMode {
    pub fn from_structured(structured: bool) -> Self {
        if structured {
            RenderMode::Structured
        } else {
            RenderMode::Plain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Plain => "plain",
            RenderMode::Structured => "structured",
        }
    }
}

/// Device attribute a device element displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceField {
    Style,
    Name,
    #[serde(rename = "RecentIP")]
    RecentIp,
    #[serde(rename = "MAC")]
    Mac,
}

/// Result of the `Disabled` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceState {
    Unknown,
    Enabled,
    Disabled,
}

impl DeviceState {
    pub fn of(device: Option<&Device>) -> Self {
        match device {
            None => DeviceState::Unknown,
            Some(d) if d.enabled => DeviceState::Enabled,
            Some(_) => DeviceState::Disabled,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::Unknown => "Unknown",
            DeviceState::Enabled => "Enabled",
            DeviceState::Disabled => "Disabled",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag transform result kept as a typed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TagElement {
    /// Interface badge
    Interface { name: String },

    /// Device badge showing the listed fields; `device` is `None` on a lookup miss
    Device {
        identifier: String,
        show: Vec<DeviceField>,
        device: Option<Device>,
    },

    /// Enabled/disabled classification of a device
    DeviceState {
        identifier: String,
        state: DeviceState,
    },

    /// Unrecognized tag or no lookup context
    Generic { value: String, tag: String },
}

impl fmt::Display for TagElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagElement::Interface { name } => f.write_str(name),
            TagElement::Device {
                identifier,
                show,
                device,
            } => {
                let Some(device) = device else {
                    return f.write_str(identifier);
                };

                // The icon has no text form unless it is all that was asked for.
                let icon_only = show.iter().all(|field| *field == DeviceField::Style);
                let parts: Vec<&str> = show
                    .iter()
                    .filter(|field| icon_only || **field != DeviceField::Style)
                    .map(|field| match field {
                        DeviceField::Style => device.style.icon(),
                        DeviceField::Name => device.name.as_str(),
                        DeviceField::RecentIp => device.recent_ip.as_str(),
                        DeviceField::Mac => device.mac.as_str(),
                    })
                    .filter(|part| !part.is_empty())
                    .collect();

                if parts.is_empty() {
                    f.write_str(identifier)
                } else {
                    f.write_str(&parts.join(" "))
                }
            }
            TagElement::DeviceState { state, .. } => write!(f, "{}", state),
            TagElement::Generic { value, tag } => write!(f, "{}#{}", value, tag),
        }
    }
}

/// One piece of a structured rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Segment {
    /// Literal template text or an untagged resolved value
    Text(String),
    /// Tag transform result
    Element(TagElement),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Text(text) => f.write_str(text),
            Segment::Element(element) => fmt::Display::fmt(element, f),
        }
    }
}

/// Rendered template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    /// Plain string, also returned for identity passthrough
    Text(String),
    /// Ordered segments in template order
    Elements(Vec<Segment>),
}

impl Rendered {
    /// Flatten to the display string
    pub fn to_text(&self) -> String {
        match self {
            Rendered::Text(text) => text.clone(),
            Rendered::Elements(segments) => segments.iter().map(ToString::to_string).collect(),
        }
    }

    /// True when the rendering produces no visible text
    pub fn is_blank(&self) -> bool {
        match self {
            Rendered::Text(text) => text.is_empty(),
            Rendered::Elements(segments) => segments.iter().all(|segment| match segment {
                Segment::Text(text) => text.is_empty(),
                Segment::Element(_) => false,
            }),
        }
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Text(text) => f.write_str(text),
            Rendered::Elements(segments) => {
                for segment in segments {
                    fmt::Display::fmt(segment, f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_segment_serialization() {
        let text = serde_json::to_value(Segment::Text("hello".to_string())).unwrap();
        assert_eq!(text, json!({"kind": "text", "value": "hello"}));

        let element = serde_json::to_value(Segment::Element(TagElement::Interface {
            name: "wlan0".to_string(),
        }))
        .unwrap();
        assert_eq!(
            element,
            json!({"kind": "element", "value": {"type": "interface", "name": "wlan0"}})
        );
    }

    #[test]
    fn test_device_element_display() {
        let device = Device::new("11:22:33:44:55:66", "Device#11").with_recent_ip("10.0.0.2");

        let badge = TagElement::Device {
            identifier: "11:22:33:44:55:66".to_string(),
            show: vec![DeviceField::Style, DeviceField::Name],
            device: Some(device.clone()),
        };
        assert_eq!(badge.to_string(), "Device#11");

        let icon = TagElement::Device {
            identifier: "11:22:33:44:55:66".to_string(),
            show: vec![DeviceField::Style],
            device: Some(device),
        };
        assert_eq!(icon.to_string(), "Laptop");

        let missing = TagElement::Device {
            identifier: "10.0.0.9".to_string(),
            show: vec![DeviceField::Name],
            device: None,
        };
        assert_eq!(missing.to_string(), "10.0.0.9");
    }

    #[test]
    fn test_device_element_empty_field_falls_back() {
        let element = TagElement::Device {
            identifier: "11:22:33:44:55:66".to_string(),
            show: vec![DeviceField::RecentIp],
            device: Some(Device::new("11:22:33:44:55:66", "no ip")),
        };
        assert_eq!(element.to_string(), "11:22:33:44:55:66");
    }

    #[test]
    fn test_rendered_to_text() {
        let rendered = Rendered::Elements(vec![
            Segment::Text("on ".to_string()),
            Segment::Element(TagElement::Generic {
                value: "x".to_string(),
                tag: "Foo".to_string(),
            }),
        ]);
        assert_eq!(rendered.to_text(), "on x#Foo");
        assert_eq!(rendered.to_string(), "on x#Foo");
        assert!(!rendered.is_blank());
        assert!(Rendered::Elements(vec![Segment::Text(String::new())]).is_blank());
    }

    #[test]
    fn test_device_state() {
        assert_eq!(DeviceState::of(None), DeviceState::Unknown);
        let device = Device::new("11:22:33:44:55:66", "x");
        assert_eq!(DeviceState::of(Some(&device)), DeviceState::Enabled);
        let device = device.with_enabled(false);
        assert_eq!(DeviceState::of(Some(&device)), DeviceState::Disabled);
    }
}
