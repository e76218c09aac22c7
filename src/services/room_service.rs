use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::configs::Storage;
use crate::errors::RoomError;
use crate::models::{NewRoom, Room, RoomPatch, WeeklySchedule};
use crate::repositories::RoomRepository;
use crate::services::device_sync::{DeviceSyncClient, SyncStatus};

/// Which pushes a mutation triggered and how each went. `None` means the
/// push was not applicable, not that it failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSyncReport {
    pub temp_config: Option<SyncStatus>,
    pub hours_config: Option<SyncStatus>,
}

/// A committed room change plus its side-channel sync outcome. A failed
/// push never turns the committed change into an error.
#[derive(Debug, Clone, Serialize)]
pub struct RoomMutation {
    pub room: Room,
    pub device_sync: DeviceSyncReport,
}

pub struct RoomService {
    rooms: RoomRepository,
    device_sync: Arc<DeviceSyncClient>,
}

impl RoomService {
    pub fn new(storage: Arc<Storage>, device_sync: Arc<DeviceSyncClient>) -> Self {
        Self {
            rooms: RoomRepository::new(storage),
            device_sync,
        }
    }

    pub async fn create(&self, input: NewRoom) -> Result<RoomMutation, RoomError> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(RoomError::MissingField("name"));
        }

        let volume = check_non_negative("volume", require_field("volume", input.volume)?)?;
        let glazed_surface = check_non_negative(
            "glazed_surface",
            require_field("glazed_surface", input.glazed_surface)?,
        )?;
        let door_count = check_count("door_count", require_field("door_count", input.door_count)?)?;
        let exterior_wall_count = check_count(
            "exterior_wall_count",
            require_field("exterior_wall_count", input.exterior_wall_count)?,
        )?;

        check_temperature_bounds(input.min_temp, input.max_temp)?;

        let schedule = WeeklySchedule::normalize(&input.schedule);
        schedule.validate()?;

        if self.rooms.find_by_name(&name).await?.is_some() {
            return Err(RoomError::RoomNameExists);
        }

        let room = Room {
            id: Uuid::new_v4().to_string(),
            name,
            device_address: input.device_address,
            volume,
            glazed_surface,
            door_count,
            exterior_wall_count,
            min_temp: input.min_temp,
            max_temp: input.max_temp,
            co2_threshold: input.co2_threshold,
            min_humidity: input.min_humidity,
            max_humidity: input.max_humidity,
            schedule,
            is_exists: true,
        };

        let room = self.rooms.create(&room).await?;
        tracing::info!("room {} ({}) created", room.id, room.name);

        let device_sync = self.push_full_config(&room).await;

        Ok(RoomMutation { room, device_sync })
    }

    pub async fn update(&self, id: &str, patch: RoomPatch) -> Result<RoomMutation, RoomError> {
        let mut room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or(RoomError::RoomNotFound)?;

        if let Some(name) = &patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(RoomError::MissingField("name"));
            }
            // a rename must not collide with another live room
            if !name.eq_ignore_ascii_case(&room.name)
                && self.rooms.find_by_name(&name).await?.is_some()
            {
                return Err(RoomError::RoomNameExists);
            }
            room.name = name;
        }

        apply_patch(&mut room, &patch)?;
        check_temperature_bounds(room.min_temp, room.max_temp)?;
        room.schedule.validate()?;

        let room = self
            .rooms
            .update(&room)
            .await?
            .ok_or(RoomError::RoomNotFound)?;
        tracing::info!("room {} updated", room.id);

        let device_sync = self.push_patched_config(&room, &patch).await;

        Ok(RoomMutation { room, device_sync })
    }

    /// Flips the soft-delete flag. `Ok(false)` only happens when another
    /// delete won the race after the lookup.
    pub async fn delete(&self, id: &str) -> Result<bool, RoomError> {
        if self.rooms.find_by_id(id).await?.is_none() {
            return Err(RoomError::RoomNotFound);
        }

        let deleted = self.rooms.soft_delete(id).await?;
        if deleted {
            tracing::info!("room {} deleted", id);
        }

        Ok(deleted)
    }

    pub async fn list(&self) -> Result<Vec<Room>, RoomError> {
        Ok(self.rooms.find_all().await?)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Room, RoomError> {
        self.rooms
            .find_by_id(id)
            .await?
            .ok_or(RoomError::RoomNotFound)
    }

    /// Re-pushes the current configuration, for a device that was offline
    /// when it changed. Nothing-to-push cases come back as failed statuses
    /// rather than errors so the operator sees why the device is stale.
    pub async fn resync(&self, id: &str) -> Result<DeviceSyncReport, RoomError> {
        let room = self
            .rooms
            .find_by_id(id)
            .await?
            .ok_or(RoomError::RoomNotFound)?;

        let Some(address) = room.device_address.as_deref() else {
            let missing = SyncStatus::failed("no device address configured");
            return Ok(DeviceSyncReport {
                temp_config: Some(missing.clone()),
                hours_config: Some(missing),
            });
        };

        let temp_config = match (room.min_temp, room.max_temp) {
            (Some(min), Some(max)) => self.device_sync.push_temp_config(address, min, max).await,
            _ => SyncStatus::failed("temperature bounds not configured"),
        };
        let hours_config = self
            .device_sync
            .push_hours_config(address, &room.schedule)
            .await;

        Ok(DeviceSyncReport {
            temp_config: Some(temp_config),
            hours_config: Some(hours_config),
        })
    }

    // Push everything the device can take, used after create
    async fn push_full_config(&self, room: &Room) -> DeviceSyncReport {
        let Some(address) = room.device_address.as_deref() else {
            return DeviceSyncReport::default();
        };

        let temp_config = match (room.min_temp, room.max_temp) {
            (Some(min), Some(max)) => {
                Some(self.device_sync.push_temp_config(address, min, max).await)
            }
            _ => None,
        };
        let hours_config = Some(
            self.device_sync
                .push_hours_config(address, &room.schedule)
                .await,
        );

        DeviceSyncReport {
            temp_config,
            hours_config,
        }
    }

    // Push only what the patch touched
    async fn push_patched_config(&self, room: &Room, patch: &RoomPatch) -> DeviceSyncReport {
        let temp_touched = patch.min_temp.is_some() || patch.max_temp.is_some();
        let hours_touched = patch.schedule.is_some();

        if !temp_touched && !hours_touched {
            return DeviceSyncReport::default();
        }

        let Some(address) = room.device_address.as_deref() else {
            return DeviceSyncReport::default();
        };

        let temp_config = if temp_touched {
            Some(match (room.min_temp, room.max_temp) {
                (Some(min), Some(max)) => {
                    self.device_sync.push_temp_config(address, min, max).await
                }
                _ => SyncStatus::failed("temperature bounds not configured"),
            })
        } else {
            None
        };

        let hours_config = if hours_touched {
            Some(
                self.device_sync
                    .push_hours_config(address, &room.schedule)
                    .await,
            )
        } else {
            None
        };

        DeviceSyncReport {
            temp_config,
            hours_config,
        }
    }
}

fn require_field<T>(field: &'static str, value: Option<T>) -> Result<T, RoomError> {
    value.ok_or(RoomError::MissingField(field))
}

fn check_non_negative(field: &'static str, value: f64) -> Result<f64, RoomError> {
    if value < 0.0 {
        Err(RoomError::NegativeField { field, value })
    } else {
        Ok(value)
    }
}

fn check_count(field: &'static str, value: i64) -> Result<i64, RoomError> {
    if value < 0 {
        Err(RoomError::NegativeField {
            field,
            value: value as f64,
        })
    } else {
        Ok(value)
    }
}

fn check_temperature_bounds(min: Option<f64>, max: Option<f64>) -> Result<(), RoomError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(RoomError::TemperatureBoundsInverted { min, max });
        }
    }

    Ok(())
}

// Everything except the name, which needs a uniqueness lookup
fn apply_patch(room: &mut Room, patch: &RoomPatch) -> Result<(), RoomError> {
    if let Some(address) = &patch.device_address {
        room.device_address = Some(address.clone());
    }
    if let Some(volume) = patch.volume {
        room.volume = check_non_negative("volume", volume)?;
    }
    if let Some(glazed_surface) = patch.glazed_surface {
        room.glazed_surface = check_non_negative("glazed_surface", glazed_surface)?;
    }
    if let Some(door_count) = patch.door_count {
        room.door_count = check_count("door_count", door_count)?;
    }
    if let Some(exterior_wall_count) = patch.exterior_wall_count {
        room.exterior_wall_count = check_count("exterior_wall_count", exterior_wall_count)?;
    }
    if let Some(min_temp) = patch.min_temp {
        room.min_temp = Some(min_temp);
    }
    if let Some(max_temp) = patch.max_temp {
        room.max_temp = Some(max_temp);
    }
    if let Some(co2_threshold) = patch.co2_threshold {
        room.co2_threshold = Some(co2_threshold);
    }
    if let Some(min_humidity) = patch.min_humidity {
        room.min_humidity = Some(min_humidity);
    }
    if let Some(max_humidity) = patch.max_humidity {
        room.max_humidity = Some(max_humidity);
    }
    if let Some(schedule_patch) = &patch.schedule {
        room.schedule = room.schedule.apply(schedule_patch);
    }

    Ok(())
}
