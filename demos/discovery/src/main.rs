use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use radio_core::{RadioQueue, RunContext};
use radio_gatt::{DiscoveryConfig, GATT_SUCCESS, GattCallback, GattClient, ServicesDiscoverOperation};
use radio_model::{
    CharacteristicProperties, GattCharacteristic, GattService, ServiceKind, TimeoutConfig,
};
use radio_observe::{Journal, LoggerConfig, logger_init};
use tracing::{error, info};
use uuid::Uuid;

/// How the simulated stack answers a discovery request.
#[derive(Debug, Clone, Copy)]
enum Peripheral {
    Healthy,
    SilentCallback,
    Busy,
}

struct SimulatedStack {
    mode: Mutex<Peripheral>,
    callback: GattCallback,
    tree: Vec<GattService>,
    held: Arc<Mutex<Vec<GattService>>>,
}

impl SimulatedStack {
    fn set_mode(&self, mode: Peripheral) {
        *self.mode.lock().unwrap_or_else(|p| p.into_inner()) = mode;
        self.held.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

impl GattClient for SimulatedStack {
    fn discover_services(&self) -> bool {
        let mode = *self.mode.lock().unwrap_or_else(|p| p.into_inner());
        if matches!(mode, Peripheral::Busy) {
            return false;
        }

        let held = Arc::clone(&self.held);
        let callback = self.callback.clone();
        let tree = self.tree.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            *held.lock().unwrap_or_else(|p| p.into_inner()) = tree.clone();
            if matches!(mode, Peripheral::Healthy) {
                callback.services_discovered(GATT_SUCCESS, tree);
            }
        });
        true
    }

    fn services(&self) -> Vec<GattService> {
        self.held.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

fn battery_service() -> GattService {
    GattService {
        uuid: Uuid::new_v4(),
        instance_id: 0,
        kind: ServiceKind::Primary,
        characteristics: vec![GattCharacteristic {
            uuid: Uuid::new_v4(),
            instance_id: 0,
            properties: CharacteristicProperties(
                CharacteristicProperties::READ | CharacteristicProperties::NOTIFY,
            ),
            descriptors: vec![],
        }],
        included: vec![],
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger_init(&LoggerConfig::from_env()?)?;

    let callback = GattCallback::new();
    let stack = Arc::new(SimulatedStack {
        mode: Mutex::new(Peripheral::Healthy),
        callback: callback.clone(),
        tree: vec![battery_service()],
        held: Arc::new(Mutex::new(Vec::new())),
    });

    let queue = RadioQueue::new(RunContext::current()).with_subscriber(Arc::new(Journal::new()));
    let config = DiscoveryConfig::new(TimeoutConfig::new(
        Duration::from_secs(2),
        Duration::from_secs(1),
    ));

    for mode in [
        Peripheral::Healthy,
        Peripheral::SilentCallback,
        Peripheral::Busy,
    ] {
        stack.set_mode(mode);
        let op = ServicesDiscoverOperation::new(Arc::clone(&stack), callback.clone(), config);
        match queue.submit(op).await {
            Ok(services) => info!(?mode, services = services.len(), "discovery finished"),
            Err(e) => error!(?mode, error = %e, "discovery failed"),
        }
    }

    queue.close();
    Ok(())
}
