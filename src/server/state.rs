use std::sync::Arc;
use std::time::Instant;

use crate::aggregate::FieldAggregator;
use crate::config::Settings;
use crate::device::DeviceDirectory;
use crate::metrics::DeviceMetrics;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub devices: Arc<DeviceDirectory>,
    pub aggregator: FieldAggregator,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::with_devices(settings, Arc::new(DeviceDirectory::new()))
    }

    pub fn with_devices(settings: Settings, devices: Arc<DeviceDirectory>) -> Self {
        let aggregator = FieldAggregator::new(settings.aggregation.max_depth);
        DeviceMetrics::set_loaded(devices.count());

        Self {
            settings: Arc::new(settings),
            devices,
            aggregator,
            started_at: Instant::now(),
        }
    }
}
