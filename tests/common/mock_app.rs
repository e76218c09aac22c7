use std::sync::Arc;
use std::time::Duration;

use roomsync::configs::{Database, SchemaManager, Storage};
use roomsync::models::{NewRoom, Room};
use roomsync::services::{DeviceSyncClient, MeasurementService, RoomService};

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub room_service: Arc<RoomService>,
    pub measurement_service: Arc<MeasurementService>,
}

impl MockApp {
    pub async fn new() -> Self {
        // suites race on the global subscriber, first one wins
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "roomsync=debug".into()),
            )
            .try_init();

        let storage = Arc::new(
            Storage::new(
                Database {
                    url: String::from("sqlite::memory:"),
                    clean_start: true,
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        // short push timeout, suites hit unreachable addresses on purpose
        let device_sync = Arc::new(DeviceSyncClient::with_timeout(Duration::from_millis(500)).unwrap());

        let room_service = Arc::new(RoomService::new(storage.clone(), device_sync));
        let measurement_service = Arc::new(MeasurementService::new(storage.clone()));

        Self {
            storage,
            room_service,
            measurement_service,
        }
    }

    pub async fn create_test_room(&self, name: &str) -> Room {
        self.room_service
            .create(test_room_input(name))
            .await
            .unwrap()
            .room
    }
}

/// A valid room payload with no device address and every day closed.
pub fn test_room_input(name: &str) -> NewRoom {
    NewRoom {
        name: name.to_string(),
        volume: Some(120.0),
        glazed_surface: Some(14.5),
        door_count: Some(2),
        exterior_wall_count: Some(1),
        min_temp: Some(20.0),
        max_temp: Some(24.0),
        ..NewRoom::default()
    }
}
