//! Repository for the `datasets` table.
//!
//! Rows are addressed by `name`, which carries the `uq_datasets_name` unique
//! constraint. Every write is a single statement or a single transaction, so
//! a failed write leaves the table untouched.

use datacontrol_core::dataset::DatasetDraft;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::dataset::Dataset;

/// Column list for `datasets` queries.
const COLUMNS: &str = "\
    id, name, area, description, source, creator, permitted, copyright, \
    link, info, coordinate_system, creation_date, update_date, format, \
    check_date, update_frequency_days, bounding_box";

/// Provides CRUD operations for catalog records.
pub struct DatasetRepo;

impl DatasetRepo {
    /// Insert a new record.
    ///
    /// `check_date` falls back to `NOW()` when the draft carries none. Fails
    /// with [`StoreError::DuplicateKey`] if the name is already taken.
    pub async fn insert(pool: &PgPool, draft: &DatasetDraft) -> Result<Dataset, StoreError> {
        let query = format!(
            "INSERT INTO datasets \
                (name, area, description, source, creator, permitted, copyright, \
                 link, info, coordinate_system, creation_date, update_date, format, \
                 check_date, update_frequency_days, bounding_box) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, \
                     COALESCE($14, NOW()), $15, $16) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Dataset>(&query)
            .bind(&draft.name)
            .bind(&draft.area)
            .bind(&draft.description)
            .bind(&draft.source)
            .bind(&draft.creator)
            .bind(draft.permitted)
            .bind(&draft.copyright)
            .bind(&draft.link)
            .bind(&draft.info)
            .bind(&draft.coordinate_system)
            .bind(draft.creation_date)
            .bind(draft.update_date)
            .bind(&draft.format)
            .bind(draft.check_date)
            .bind(draft.update_frequency_days)
            .bind(&draft.bounding_box)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Find a record by exact name. Absence is `Ok(None)`, not an error.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Dataset>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM datasets WHERE name = $1");
        let row = sqlx::query_as::<_, Dataset>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// All records whose area equals `area` exactly (case-sensitive).
    pub async fn find_by_area(pool: &PgPool, area: &str) -> Result<Vec<Dataset>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM datasets WHERE area = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, Dataset>(&query)
            .bind(area)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Every record, in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Dataset>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM datasets ORDER BY id");
        let rows = sqlx::query_as::<_, Dataset>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Number of stored records.
    pub async fn count(pool: &PgPool) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM datasets")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Overwrite every mutable field of the record named `name`.
    ///
    /// `check_date` is reset to `NOW()`; any value in the draft is ignored.
    /// Returns `None` if no such record exists. Renaming onto another
    /// record's name fails with [`StoreError::DuplicateKey`] and rolls back.
    pub async fn replace(
        pool: &PgPool,
        name: &str,
        draft: &DatasetDraft,
    ) -> Result<Option<Dataset>, StoreError> {
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM datasets WHERE name = $1 FOR UPDATE")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(id) = id else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE datasets SET \
                name = $2, \
                area = $3, \
                description = $4, \
                source = $5, \
                creator = $6, \
                permitted = $7, \
                copyright = $8, \
                link = $9, \
                info = $10, \
                coordinate_system = $11, \
                creation_date = $12, \
                update_date = $13, \
                format = $14, \
                update_frequency_days = $15, \
                bounding_box = $16, \
                check_date = GREATEST(NOW(), check_date) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Dataset>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.area)
            .bind(&draft.description)
            .bind(&draft.source)
            .bind(&draft.creator)
            .bind(draft.permitted)
            .bind(&draft.copyright)
            .bind(&draft.link)
            .bind(&draft.info)
            .bind(&draft.coordinate_system)
            .bind(draft.creation_date)
            .bind(draft.update_date)
            .bind(&draft.format)
            .bind(draft.update_frequency_days)
            .bind(&draft.bounding_box)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Refresh only `check_date` of the record named `name`.
    ///
    /// `check_date` never moves backwards, even if a caller stored a future
    /// timestamp at creation. Returns `None` if no such record exists.
    pub async fn touch(pool: &PgPool, name: &str) -> Result<Option<Dataset>, StoreError> {
        let query = format!(
            "UPDATE datasets SET check_date = GREATEST(NOW(), check_date) \
             WHERE name = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Dataset>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Delete the record named `name`, returning the number of rows removed (0 or 1).
    pub async fn delete_by_name(pool: &PgPool, name: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM datasets WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
