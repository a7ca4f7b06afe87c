//! Postgres-backed plant store.
//!
//! Owns the five tables behind the catalog: `plants`,
//! `plant_care_instructions`, `plant_facts`, `plant_likes` and
//! `identification_history`. The schema is created idempotently at connect
//! time. Counter updates are single atomic SQL statements so concurrent
//! devices can't lose increments to a read-modify-write race.

use anyhow::Result;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use crate::domain::plant::{CareInstructions, CareLevel, PlantRecord};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Self::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_schema(pool: &PgPool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS plants (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                scientific_name TEXT NOT NULL,
                image_url TEXT NOT NULL,
                watering_needs TEXT NOT NULL,
                sunlight TEXT NOT NULL,
                temperature TEXT NOT NULL,
                description TEXT NOT NULL,
                price TEXT,
                likes_count BIGINT NOT NULL DEFAULT 0,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS plant_care_instructions (
                plant_id TEXT PRIMARY KEY REFERENCES plants(id),
                watering TEXT NOT NULL,
                light TEXT NOT NULL,
                soil TEXT NOT NULL,
                humidity TEXT NOT NULL,
                fertilizing TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS plant_facts (
                id BIGSERIAL PRIMARY KEY,
                plant_id TEXT NOT NULL REFERENCES plants(id),
                fact TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS plant_likes (
                id BIGSERIAL PRIMARY KEY,
                plant_id TEXT NOT NULL,
                device_id TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                UNIQUE (plant_id, device_id)
            )",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS identification_history (
                id BIGSERIAL PRIMARY KEY,
                image_url TEXT NOT NULL,
                identified_plant_id TEXT,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // --- Reads ---

    pub async fn all_plants(&self) -> Result<Vec<PlantRecord>> {
        let rows = sqlx::query("SELECT * FROM plants ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        let mut plants = Vec::with_capacity(rows.len());
        for row in rows {
            plants.push(self.hydrate(&row).await?);
        }
        Ok(plants)
    }

    pub async fn plant_by_id(&self, id: &str) -> Result<Option<PlantRecord>> {
        let row = sqlx::query("SELECT * FROM plants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(self.hydrate(&row).await?)),
            None => Ok(None),
        }
    }

    /// Substring search over common and scientific name, case-insensitive.
    pub async fn search_plants(&self, query: &str) -> Result<Vec<PlantRecord>> {
        let pattern = format!("%{query}%");
        let rows = sqlx::query(
            "SELECT * FROM plants WHERE name ILIKE $1 OR scientific_name ILIKE $1 ORDER BY name ASC",
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        let mut plants = Vec::with_capacity(rows.len());
        for row in rows {
            plants.push(self.hydrate(&row).await?);
        }
        Ok(plants)
    }

    /// First `count` records in stable catalog order (insertion order).
    pub async fn featured_plants(&self, count: i64) -> Result<Vec<PlantRecord>> {
        let rows = sqlx::query("SELECT * FROM plants ORDER BY created_at ASC, id ASC LIMIT $1")
            .bind(count)
            .fetch_all(&self.pool)
            .await?;
        let mut plants = Vec::with_capacity(rows.len());
        for row in rows {
            plants.push(self.hydrate(&row).await?);
        }
        Ok(plants)
    }

    /// Top `count` by like count, ties broken by catalog order.
    pub async fn popular_plants(&self, count: i64) -> Result<Vec<PlantRecord>> {
        let rows = sqlx::query(
            "SELECT * FROM plants ORDER BY likes_count DESC, created_at ASC, id ASC LIMIT $1",
        )
        .bind(count)
        .fetch_all(&self.pool)
        .await?;
        let mut plants = Vec::with_capacity(rows.len());
        for row in rows {
            plants.push(self.hydrate(&row).await?);
        }
        Ok(plants)
    }

    pub async fn plant_exists(&self, id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 AS one FROM plants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Assembles a full record: base row plus the care-instruction row and
    /// fact rows for that plant.
    async fn hydrate(&self, row: &sqlx::postgres::PgRow) -> Result<PlantRecord> {
        let id: String = row.try_get("id")?;

        let care_row = sqlx::query(
            "SELECT watering, light, soil, humidity, fertilizing
             FROM plant_care_instructions WHERE plant_id = $1",
        )
        .bind(&id)
        .fetch_optional(&self.pool)
        .await?;
        let care_instructions = match care_row {
            Some(care) => Some(CareInstructions {
                watering: care.try_get("watering")?,
                light: care.try_get("light")?,
                soil: care.try_get("soil")?,
                humidity: care.try_get("humidity")?,
                fertilizing: care.try_get("fertilizing")?,
            }),
            None => None,
        };

        let fact_rows = sqlx::query("SELECT fact FROM plant_facts WHERE plant_id = $1 ORDER BY id ASC")
            .bind(&id)
            .fetch_all(&self.pool)
            .await?;
        let facts: Vec<String> = fact_rows
            .iter()
            .map(|r| r.try_get::<String, _>("fact"))
            .collect::<Result<_, _>>()?;

        let watering: String = row.try_get("watering_needs")?;
        let sunlight: String = row.try_get("sunlight")?;

        Ok(PlantRecord {
            name: row.try_get("name")?,
            scientific_name: row.try_get("scientific_name")?,
            image: row.try_get("image_url")?,
            watering_needs: CareLevel::parse_loose(&watering).unwrap_or_default(),
            sunlight: CareLevel::parse_loose(&sunlight).unwrap_or_default(),
            temperature: row.try_get("temperature")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            care_instructions,
            facts: if facts.is_empty() { None } else { Some(facts) },
            likes_count: row.try_get("likes_count")?,
            id,
        })
    }

    // --- Writes ---

    /// Inserts a new plant with its care-instruction and fact child rows, in
    /// that order, within one transaction.
    pub async fn insert_plant(&self, plant: &PlantRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO plants
                (id, name, scientific_name, image_url, watering_needs, sunlight,
                 temperature, description, price, likes_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(&plant.id)
        .bind(&plant.name)
        .bind(&plant.scientific_name)
        .bind(&plant.image)
        .bind(plant.watering_needs.as_str())
        .bind(plant.sunlight.as_str())
        .bind(&plant.temperature)
        .bind(&plant.description)
        .bind(&plant.price)
        .bind(plant.likes_count)
        .execute(&mut *tx)
        .await?;

        if let Some(care) = &plant.care_instructions {
            sqlx::query(
                "INSERT INTO plant_care_instructions
                    (plant_id, watering, light, soil, humidity, fertilizing)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(&plant.id)
            .bind(&care.watering)
            .bind(&care.light)
            .bind(&care.soil)
            .bind(&care.humidity)
            .bind(&care.fertilizing)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(facts) = &plant.facts {
            for fact in facts {
                sqlx::query("INSERT INTO plant_facts (plant_id, fact) VALUES ($1, $2)")
                    .bind(&plant.id)
                    .bind(fact)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Upsert by id: overwrites the base row, replaces care instructions and
    /// facts. Existing like counters are preserved.
    pub async fn upsert_plant(&self, plant: &PlantRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO plants
                (id, name, scientific_name, image_url, watering_needs, sunlight,
                 temperature, description, price)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                scientific_name = EXCLUDED.scientific_name,
                image_url = EXCLUDED.image_url,
                watering_needs = EXCLUDED.watering_needs,
                sunlight = EXCLUDED.sunlight,
                temperature = EXCLUDED.temperature,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                updated_at = now()",
        )
        .bind(&plant.id)
        .bind(&plant.name)
        .bind(&plant.scientific_name)
        .bind(&plant.image)
        .bind(plant.watering_needs.as_str())
        .bind(plant.sunlight.as_str())
        .bind(&plant.temperature)
        .bind(&plant.description)
        .bind(&plant.price)
        .execute(&mut *tx)
        .await?;

        if let Some(care) = &plant.care_instructions {
            sqlx::query(
                "INSERT INTO plant_care_instructions
                    (plant_id, watering, light, soil, humidity, fertilizing)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT (plant_id) DO UPDATE SET
                    watering = EXCLUDED.watering,
                    light = EXCLUDED.light,
                    soil = EXCLUDED.soil,
                    humidity = EXCLUDED.humidity,
                    fertilizing = EXCLUDED.fertilizing",
            )
            .bind(&plant.id)
            .bind(&care.watering)
            .bind(&care.light)
            .bind(&care.soil)
            .bind(&care.humidity)
            .bind(&care.fertilizing)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(facts) = &plant.facts {
            sqlx::query("DELETE FROM plant_facts WHERE plant_id = $1")
                .bind(&plant.id)
                .execute(&mut *tx)
                .await?;
            for fact in facts {
                sqlx::query("INSERT INTO plant_facts (plant_id, fact) VALUES ($1, $2)")
                    .bind(&plant.id)
                    .bind(fact)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    /// Appends to the identification log. `plant_id` is `None` when the
    /// image couldn't be identified.
    pub async fn record_identification(
        &self,
        image_url: &str,
        plant_id: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO identification_history (image_url, identified_plant_id, created_at)
             VALUES ($1, $2, $3)",
        )
        .bind(image_url)
        .bind(plant_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // --- Likes ---

    pub async fn is_liked(&self, plant_id: &str, device_id: &str) -> Result<bool> {
        let row = sqlx::query("SELECT id FROM plant_likes WHERE plant_id = $1 AND device_id = $2")
            .bind(plant_id)
            .bind(device_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Idempotent like: the unique (plant_id, device_id) constraint backs up
    /// the existence check, and the counter is bumped only when a row was
    /// actually inserted.
    pub async fn like_plant(&self, plant_id: &str, device_id: &str) -> Result<bool> {
        if self.is_liked(plant_id, device_id).await? {
            return Ok(true);
        }

        let inserted = sqlx::query(
            "INSERT INTO plant_likes (plant_id, device_id, created_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (plant_id, device_id) DO NOTHING",
        )
        .bind(plant_id)
        .bind(device_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            sqlx::query("UPDATE plants SET likes_count = likes_count + 1 WHERE id = $1")
                .bind(plant_id)
                .execute(&self.pool)
                .await?;
        }
        Ok(true)
    }

    /// Returns `false` when the pair was never liked. The counter decrement
    /// is clamped at zero.
    pub async fn unlike_plant(&self, plant_id: &str, device_id: &str) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM plant_likes WHERE plant_id = $1 AND device_id = $2")
            .bind(plant_id)
            .bind(device_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE plants SET likes_count = GREATEST(likes_count - 1, 0) WHERE id = $1")
            .bind(plant_id)
            .execute(&self.pool)
            .await?;
        Ok(true)
    }

    pub async fn likes_count(&self, plant_id: &str) -> Result<i64> {
        let row = sqlx::query("SELECT likes_count FROM plants WHERE id = $1")
            .bind(plant_id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(row.try_get("likes_count")?),
            None => Ok(0),
        }
    }
}
