mod settings;

pub use settings::{AggregationConfig, ApiConfig, DevicesConfig, ServerConfig, Settings};
