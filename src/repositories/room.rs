use std::sync::Arc;

use sqlx::Error;
use sqlx::types::Json;

use crate::configs::Storage;
use crate::models::Room;

pub struct RoomRepository {
    storage: Arc<Storage>,
}

impl RoomRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl RoomRepository {
    pub async fn create(&self, item: &Room) -> Result<Room, Error> {
        let room: Room = sqlx::query_as(
            r#"
            INSERT INTO rooms (
                id, name, device_address, volume, glazed_surface, door_count,
                exterior_wall_count, min_temp, max_temp, co2_threshold,
                min_humidity, max_humidity, schedule, is_exists
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.device_address)
        .bind(item.volume)
        .bind(item.glazed_surface)
        .bind(item.door_count)
        .bind(item.exterior_wall_count)
        .bind(item.min_temp)
        .bind(item.max_temp)
        .bind(item.co2_threshold)
        .bind(item.min_humidity)
        .bind(item.max_humidity)
        .bind(Json(&item.schedule))
        .bind(item.is_exists)
        .fetch_one(self.storage.get_pool())
        .await?;

        Ok(room)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Room>, Error> {
        let room: Option<Room> =
            sqlx::query_as("SELECT * FROM rooms WHERE id = $1 AND is_exists = TRUE")
                .bind(id)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(room)
    }

    // Name uniqueness is case-insensitive among live rooms only, a deleted
    // room frees its name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Room>, Error> {
        let room: Option<Room> =
            sqlx::query_as("SELECT * FROM rooms WHERE LOWER(name) = LOWER($1) AND is_exists = TRUE")
                .bind(name)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(room)
    }

    pub async fn find_by_device_address(&self, address: &str) -> Result<Option<Room>, Error> {
        let room: Option<Room> =
            sqlx::query_as("SELECT * FROM rooms WHERE device_address = $1 AND is_exists = TRUE")
                .bind(address)
                .fetch_optional(self.storage.get_pool())
                .await?;

        Ok(room)
    }

    pub async fn find_all(&self) -> Result<Vec<Room>, Error> {
        let rooms: Vec<Room> =
            sqlx::query_as("SELECT * FROM rooms WHERE is_exists = TRUE ORDER BY name")
                .fetch_all(self.storage.get_pool())
                .await?;

        Ok(rooms)
    }

    // Full-row replace. Returns None when the room vanished between the
    // caller's read and this write.
    pub async fn update(&self, item: &Room) -> Result<Option<Room>, Error> {
        let room: Option<Room> = sqlx::query_as(
            r#"
            UPDATE rooms
            SET name = $2, device_address = $3, volume = $4, glazed_surface = $5,
                door_count = $6, exterior_wall_count = $7, min_temp = $8, max_temp = $9,
                co2_threshold = $10, min_humidity = $11, max_humidity = $12, schedule = $13
            WHERE id = $1 AND is_exists = TRUE
            RETURNING *
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.device_address)
        .bind(item.volume)
        .bind(item.glazed_surface)
        .bind(item.door_count)
        .bind(item.exterior_wall_count)
        .bind(item.min_temp)
        .bind(item.max_temp)
        .bind(item.co2_threshold)
        .bind(item.min_humidity)
        .bind(item.max_humidity)
        .bind(Json(&item.schedule))
        .fetch_optional(self.storage.get_pool())
        .await?;

        Ok(room)
    }

    // Flip the soft-delete flag, the row and its measurements stay
    pub async fn soft_delete(&self, id: &str) -> Result<bool, Error> {
        let result =
            sqlx::query("UPDATE rooms SET is_exists = FALSE WHERE id = $1 AND is_exists = TRUE")
                .bind(id)
                .execute(self.storage.get_pool())
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
