mod callback;
pub use callback::GattCallback;

mod client;
pub use client::{GATT_SUCCESS, GattClient};

mod config;
pub use config::DiscoveryConfig;

pub mod discover;
pub use discover::{ServicesAccessor, ServicesDiscoverOperation};
