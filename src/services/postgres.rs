use crate::models::{BreedField, BreedRecord, CategoryCount, Coordinate, Dog};
use crate::services::store::{EntityStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

const DOG_COLUMNS: &str = r#"
    id, owner_id, name, breed, gender, age, available, vaccinated, neutered,
    temperament, status, address, city, county, postcode, country, latitude, longitude
"#;

const BREED_COLUMNS: &str = r#"
    name, slug, type, kennel_club_category, size, size_class, height, weight, color, longevity,
    health_problems, image_url, official_link, exercise_needs, grooming, temperament,
    good_with_children, search_keywords
"#;

/// PostgreSQL-backed entity store
///
/// Migrations in `./migrations` are applied on connect.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

}

#[async_trait]
impl EntityStore for PostgresStore {
    async fn dogs_missing_coordinates(&self) -> Result<Vec<Dog>, StoreError> {
        let query = format!(
            "SELECT {} FROM dogs WHERE latitude IS NULL OR longitude IS NULL ORDER BY created_at, id",
            DOG_COLUMNS
        );

        let dogs = sqlx::query_as::<_, Dog>(&query).fetch_all(&self.pool).await?;

        tracing::debug!("Found {} dogs without coordinates", dogs.len());
        Ok(dogs)
    }

    async fn set_dog_coordinates(&self, dog_id: Uuid, coordinate: Coordinate) -> Result<(), StoreError> {
        let query = r#"
            UPDATE dogs
            SET latitude = $2, longitude = $3, updated_at = NOW()
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(dog_id)
            .bind(coordinate.latitude)
            .bind(coordinate.longitude)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Dog {}", dog_id)));
        }

        Ok(())
    }

    async fn get_dog(&self, dog_id: Uuid) -> Result<Option<Dog>, StoreError> {
        let query = format!("SELECT {} FROM dogs WHERE id = $1", DOG_COLUMNS);

        Ok(sqlx::query_as::<_, Dog>(&query)
            .bind(dog_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn active_dogs(&self) -> Result<Vec<Dog>, StoreError> {
        let query = format!("SELECT {} FROM dogs WHERE status = 'ACTIVE' ORDER BY created_at DESC", DOG_COLUMNS);

        Ok(sqlx::query_as::<_, Dog>(&query).fetch_all(&self.pool).await?)
    }

    async fn get_breed(&self, slug: &str) -> Result<Option<BreedRecord>, StoreError> {
        let query = format!("SELECT {} FROM breeds WHERE slug = $1", BREED_COLUMNS);

        Ok(sqlx::query_as::<_, BreedRecord>(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Uses INSERT ... ON CONFLICT so a slug collision replaces the stored row
    async fn upsert_breed(&self, breed: BreedRecord) -> Result<BreedRecord, StoreError> {
        if breed.slug.is_empty() {
            return Err(StoreError::InvalidData(format!("Breed '{}' has no slug", breed.name)));
        }

        let query = format!(
            r#"
            INSERT INTO breeds ({columns})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            ON CONFLICT (slug)
            DO UPDATE SET
                name = EXCLUDED.name,
                type = EXCLUDED.type,
                kennel_club_category = EXCLUDED.kennel_club_category,
                size = EXCLUDED.size,
                size_class = EXCLUDED.size_class,
                height = EXCLUDED.height,
                weight = EXCLUDED.weight,
                color = EXCLUDED.color,
                longevity = EXCLUDED.longevity,
                health_problems = EXCLUDED.health_problems,
                image_url = EXCLUDED.image_url,
                official_link = EXCLUDED.official_link,
                exercise_needs = EXCLUDED.exercise_needs,
                grooming = EXCLUDED.grooming,
                temperament = EXCLUDED.temperament,
                good_with_children = EXCLUDED.good_with_children,
                search_keywords = EXCLUDED.search_keywords,
                updated_at = NOW()
            RETURNING {columns}
            "#,
            columns = BREED_COLUMNS
        );

        let stored = sqlx::query_as::<_, BreedRecord>(&query)
            .bind(&breed.name)
            .bind(&breed.slug)
            .bind(&breed.breed_type)
            .bind(&breed.kennel_club_category)
            .bind(&breed.size)
            .bind(breed.size_class)
            .bind(&breed.height)
            .bind(&breed.weight)
            .bind(&breed.color)
            .bind(&breed.longevity)
            .bind(&breed.health_problems)
            .bind(&breed.image_url)
            .bind(&breed.official_link)
            .bind(&breed.exercise_needs)
            .bind(&breed.grooming)
            .bind(&breed.temperament)
            .bind(&breed.good_with_children)
            .bind(&breed.search_keywords)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Upserted breed {} ({})", stored.name, stored.slug);
        Ok(stored)
    }

    async fn list_breeds(&self) -> Result<Vec<BreedRecord>, StoreError> {
        let query = format!("SELECT {} FROM breeds ORDER BY name ASC", BREED_COLUMNS);

        Ok(sqlx::query_as::<_, BreedRecord>(&query).fetch_all(&self.pool).await?)
    }

    async fn count_breeds_by(&self, field: BreedField) -> Result<Vec<CategoryCount>, StoreError> {
        let query = match field {
            BreedField::Type => {
                "SELECT type AS name, COUNT(*) AS count FROM breeds GROUP BY type ORDER BY type ASC"
            }
            BreedField::Size => {
                "SELECT size AS name, COUNT(*) AS count FROM breeds WHERE size IS NOT NULL GROUP BY size ORDER BY size ASC"
            }
        };

        Ok(sqlx::query_as::<_, CategoryCount>(query).fetch_all(&self.pool).await?)
    }

    async fn delete_all_breeds(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM breeds").execute(&self.pool).await?;

        tracing::info!("Deleted {} breeds", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
