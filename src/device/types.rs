//! Device record, lookup capability and device error definitions

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Device-specific error type
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Device not found: {0}")]
    NotFound(String),

    #[error("Invalid MAC address: {0}")]
    InvalidMac(String),

    #[error("Failed to read device file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse device file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for device directory operations
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Field a device identifier is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchField {
    /// Hardware address (default)
    #[default]
    #[serde(rename = "MAC")]
    Mac,
    /// Most recently leased IP address
    #[serde(rename = "RecentIP")]
    RecentIp,
}

impl MatchField {
    /// Pick the match field for a raw identifier.
    ///
    /// Six colon-separated hex octets are a MAC; anything else is treated as
    /// an IP, with a trailing `:port` removed.
    pub fn classify(value: &str) -> (MatchField, &str) {
        if is_mac_address(value) {
            (MatchField::Mac, value)
        } else {
            (MatchField::RecentIp, strip_port(value))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchField::Mac => "MAC",
            MatchField::RecentIp => "RecentIP",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a value looks like `aa:bb:cc:dd:ee:ff`
pub fn is_mac_address(value: &str) -> bool {
    let mut octets = 0;
    for part in value.split(':') {
        if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }
        octets += 1;
    }
    octets == 6
}

/// Remove a `:port` suffix from `a.b.c.d:port` or `[v6]:port`.
///
/// A bare IPv6 address has several colons and is returned as-is.
pub fn strip_port(value: &str) -> &str {
    if let Some(rest) = value.strip_prefix('[') {
        if let Some((host, _port)) = rest.split_once("]:") {
            return host;
        }
        return rest.strip_suffix(']').unwrap_or(value);
    }

    match value.split_once(':') {
        Some((host, port)) if !port.contains(':') => host,
        _ => value,
    }
}

/// Icon and color used by the dashboard to draw a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStyle {
    #[serde(rename = "Icon", default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    #[serde(rename = "Color", default, skip_serializing_if = "String::is_empty")]
    pub color: String,
}

impl DeviceStyle {
    /// Icon name, `Laptop` when none is configured
    pub fn icon(&self) -> &str {
        if self.icon.is_empty() {
            "Laptop"
        } else {
            &self.icon
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// A device entry as published by the router's management API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "MAC", default)]
    pub mac: String,

    #[serde(rename = "RecentIP", default)]
    pub recent_ip: String,

    #[serde(rename = "Style", default)]
    pub style: DeviceStyle,

    /// Devices without an explicit flag are considered enabled
    #[serde(rename = "Enabled", default = "default_enabled")]
    pub enabled: bool,

    #[serde(rename = "Groups", default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    #[serde(rename = "DeviceTags", default, skip_serializing_if = "Vec::is_empty")]
    pub device_tags: Vec<String>,

    /// Fields this service does not interpret (PSKEntry, VLANTag, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Device {
    /// Create a device with only a MAC and a name set
    pub fn new(mac: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mac: mac.into(),
            recent_ip: String::new(),
            style: DeviceStyle::default(),
            enabled: true,
            groups: Vec::new(),
            device_tags: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_recent_ip(mut self, ip: impl Into<String>) -> Self {
        self.recent_ip = ip.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.style.icon = icon.into();
        self
    }

    /// Value of the field selected by `field`
    pub fn field(&self, field: MatchField) -> &str {
        match field {
            MatchField::Mac => &self.mac,
            MatchField::RecentIp => &self.recent_ip,
        }
    }
}

/// Device-by-identifier resolution supplied to the template renderer.
///
/// Implementations must not panic on unknown identifiers; a miss is `None`.
pub trait LookupContext: Send + Sync {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device>;
}

impl<T: LookupContext + ?Sized> LookupContext for Arc<T> {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device> {
        (**self).get_device(identifier, field)
    }
}

impl<T: LookupContext + ?Sized> LookupContext for &T {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device> {
        (**self).get_device(identifier, field)
    }
}

/// Linear lookup over a fixed device list
impl LookupContext for [Device] {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device> {
        if identifier.is_empty() {
            return None;
        }
        self.iter()
            .find(|device| device.field(field) == identifier)
            .cloned()
    }
}

impl LookupContext for Vec<Device> {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device> {
        self.as_slice().get_device(identifier, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_mac() {
        let (field, id) = MatchField::classify("11:22:33:44:55:66");
        assert_eq!(field, MatchField::Mac);
        assert_eq!(id, "11:22:33:44:55:66");

        assert!(is_mac_address("aa:BB:cc:0:ee:ff"));
        assert!(!is_mac_address("11:22:33:44:55"));
        assert!(!is_mac_address("11:22:33:44:55:66:77"));
        assert!(!is_mac_address("fe80:0:0:0:0:1"));
    }

    #[test]
    fn test_classify_ip_strips_port() {
        assert_eq!(
            MatchField::classify("192.168.2.10:53"),
            (MatchField::RecentIp, "192.168.2.10")
        );
        assert_eq!(
            MatchField::classify("192.168.2.10"),
            (MatchField::RecentIp, "192.168.2.10")
        );
        assert_eq!(
            MatchField::classify("[fd00::1]:443"),
            (MatchField::RecentIp, "fd00::1")
        );
        assert_eq!(
            MatchField::classify("fd00::1"),
            (MatchField::RecentIp, "fd00::1")
        );
    }

    #[test]
    fn test_device_deserialize_api_shape() {
        let device: Device = serde_json::from_value(json!({
            "Name": "rpi4",
            "MAC": "11:22:33:44:55:66",
            "RecentIP": "192.168.2.23",
            "Style": { "Icon": "Raspberry", "Color": "red" },
            "VLANTag": "",
            "Groups": ["lan"]
        }))
        .unwrap();

        assert_eq!(device.name, "rpi4");
        assert_eq!(device.recent_ip, "192.168.2.23");
        assert_eq!(device.style.icon(), "Raspberry");
        assert!(device.enabled);
        assert_eq!(device.groups, vec!["lan".to_string()]);
        assert_eq!(device.extra["VLANTag"], "");
    }

    #[test]
    fn test_default_icon() {
        assert_eq!(DeviceStyle::default().icon(), "Laptop");
    }

    #[test]
    fn test_slice_lookup() {
        let devices = vec![
            Device::new("11:22:33:44:55:66", "Device#11").with_recent_ip("192.168.2.11"),
        ];

        assert_eq!(
            devices
                .get_device("192.168.2.11", MatchField::RecentIp)
                .map(|d| d.name),
            Some("Device#11".to_string())
        );
        assert!(devices.get_device("", MatchField::Mac).is_none());
        assert!(devices.get_device("192.168.2.11", MatchField::Mac).is_none());
    }
}
