//! In-memory device directory backing the lookup capability

use std::collections::HashMap;
use std::path::Path;

use dashmap::DashMap;
use serde::Deserialize;

use super::types::{is_mac_address, Device, DeviceError, DeviceResult, LookupContext, MatchField};

/// Device file layouts accepted by [`DeviceDirectory::load_from_file`]
#[derive(Deserialize)]
#[serde(untagged)]
enum DeviceFile {
    /// `{ "11:22:..": { ... }, ... }` as served by the management API
    Keyed(HashMap<String, Device>),
    List(Vec<Device>),
}

/// Concurrent device storage keyed by lower-cased MAC
pub struct DeviceDirectory {
    devices: DashMap<String, Device>,
}

impl Default for DeviceDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            devices: DashMap::new(),
        }
    }

    /// Build a directory from a device list, skipping entries without a valid MAC
    pub fn from_devices(devices: impl IntoIterator<Item = Device>) -> Self {
        let directory = Self::new();
        for device in devices {
            if let Err(e) = directory.upsert(device) {
                tracing::warn!(error = %e, "Skipping device");
            }
        }
        directory
    }

    /// Insert or replace a device
    pub fn upsert(&self, device: Device) -> DeviceResult<Device> {
        if !is_mac_address(&device.mac) {
            return Err(DeviceError::InvalidMac(device.mac));
        }

        self.devices.insert(normalize_mac(&device.mac), device.clone());
        Ok(device)
    }

    /// Get a device by MAC
    pub fn get(&self, mac: &str) -> DeviceResult<Device> {
        self.devices
            .get(&normalize_mac(mac))
            .map(|d| d.clone())
            .ok_or_else(|| DeviceError::NotFound(mac.to_string()))
    }

    /// List all devices, ordered by MAC
    pub fn list(&self) -> Vec<Device> {
        let mut devices: Vec<Device> = self
            .devices
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        devices.sort_by(|a, b| a.mac.cmp(&b.mac));
        devices
    }

    /// Remove a device by MAC
    pub fn remove(&self, mac: &str) -> DeviceResult<()> {
        self.devices
            .remove(&normalize_mac(mac))
            .map(|_| ())
            .ok_or_else(|| DeviceError::NotFound(mac.to_string()))
    }

    /// Get the number of devices
    pub fn count(&self) -> usize {
        self.devices.len()
    }

    /// Load devices from a JSON file, returning how many were stored.
    ///
    /// Keyed files use the map key as MAC when the entry itself has none.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> DeviceResult<usize> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let devices = match serde_json::from_str::<DeviceFile>(&data)? {
            DeviceFile::Keyed(map) => map
                .into_iter()
                .map(|(key, mut device)| {
                    if device.mac.is_empty() {
                        device.mac = key;
                    }
                    device
                })
                .collect(),
            DeviceFile::List(list) => list,
        };

        let mut loaded = 0;
        for device in devices {
            match self.upsert(device) {
                Ok(_) => loaded += 1,
                Err(e) => tracing::warn!(error = %e, "Skipping device from file"),
            }
        }

        tracing::info!(path = %path.as_ref().display(), loaded, "Device directory loaded");
        Ok(loaded)
    }
}

impl LookupContext for DeviceDirectory {
    fn get_device(&self, identifier: &str, field: MatchField) -> Option<Device> {
        if identifier.is_empty() {
            return None;
        }

        match field {
            MatchField::Mac => self.devices.get(&normalize_mac(identifier)).map(|d| d.clone()),
            MatchField::RecentIp => self
                .devices
                .iter()
                .filter(|entry| entry.value().recent_ip == identifier)
                .min_by(|a, b| a.key().cmp(b.key()))
                .map(|entry| entry.value().clone()),
        }
    }
}

fn normalize_mac(mac: &str) -> String {
    mac.to_ascii_lowercase()
}
