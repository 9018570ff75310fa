//! PostgreSQL folder repository.

use async_trait::async_trait;
use sqlx::PgPool;

use foldertree_core::error::{AppError, ErrorKind};
use foldertree_core::result::AppResult;
use foldertree_entity::folder::{Folder, FolderId, NewFolder};

use crate::repository::FolderRepository;

/// Table used when none is configured.
pub const DEFAULT_TABLE: &str = "folders";

const COLUMNS: &str = "id, name, parent_id, sort_order, depth, path, item_count, \
                       total_item_count, created_at, updated_at, deleted_at";

/// Repository over one PostgreSQL hierarchy table.
///
/// Every table used here must have the schema created by the
/// `0001_create_folders` migration.
#[derive(Debug, Clone)]
pub struct PgFolderRepository {
    pool: PgPool,
    table: String,
}

impl PgFolderRepository {
    /// Create a repository over the default `folders` table.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Create a repository over another table with the same schema.
    pub fn with_table(pool: PgPool, table: &str) -> AppResult<Self> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        let sql = format!(
            "INSERT INTO {} (name, parent_id, sort_order, depth, path) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(&data.name)
            .bind(data.parent_id)
            .bind(data.sort_order)
            .bind(data.depth)
            .bind(&data.path)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to create folder", &data.name))
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        let sql = format!(
            "UPDATE {} SET name = $2, parent_id = $3, sort_order = $4, depth = $5, path = $6, \
             updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL RETURNING {COLUMNS}",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(folder.id)
            .bind(&folder.name)
            .bind(folder.parent_id)
            .bind(folder.sort_order)
            .bind(folder.depth)
            .bind(&folder.path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, "Failed to update folder", &folder.name))?
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let sql = format!(
            "UPDATE {} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to delete folder"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to find folder"))
    }

    async fn find_by_parent(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE parent_id IS NOT DISTINCT FROM $1 \
             AND deleted_at IS NULL ORDER BY sort_order ASC, id ASC",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to list children"))
    }

    async fn find_by_path_prefix(&self, prefix: &str) -> AppResult<Vec<Folder>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE path LIKE $1 || '%' \
             AND deleted_at IS NULL ORDER BY depth ASC, sort_order ASC, id ASC",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(prefix)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to list subtree"))
    }

    async fn find_all(&self) -> AppResult<Vec<Folder>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE deleted_at IS NULL \
             ORDER BY depth ASC, sort_order ASC, id ASC",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to list folders"))
    }

    async fn find_by_ids(&self, ids: &[FolderId]) -> AppResult<Vec<Folder>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = ANY($1) AND deleted_at IS NULL \
             ORDER BY depth ASC, id ASC",
            self.table
        );
        sqlx::query_as::<_, Folder>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to find folders"))
    }

    async fn max_sort_order(&self, parent_id: Option<FolderId>) -> AppResult<i32> {
        let sql = format!(
            "SELECT COALESCE(MAX(sort_order), 0) FROM {} \
             WHERE parent_id IS NOT DISTINCT FROM $1 AND deleted_at IS NULL",
            self.table
        );
        sqlx::query_scalar::<_, i32>(&sql)
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to read sort order"))
    }

    async fn set_sort_order(&self, id: FolderId, sort_order: i32) -> AppResult<()> {
        let sql = format!(
            "UPDATE {} SET sort_order = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(sort_order)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to update sort order"))?;
        Ok(())
    }

    async fn set_path_and_depth(&self, id: FolderId, path: &str, depth: i32) -> AppResult<()> {
        let sql = format!(
            "UPDATE {} SET path = $2, depth = $3, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(path)
            .bind(depth)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to update folder path"))?;
        Ok(())
    }

    async fn rewrite_descendant_paths(
        &self,
        old_prefix: &str,
        new_prefix: &str,
        depth_delta: i32,
    ) -> AppResult<u64> {
        // Splice rather than REPLACE(): the old prefix may reappear deeper
        // in a path and must stay untouched there. Paths hold only digits
        // and `/`, so the prefix never carries LIKE wildcards.
        let sql = format!(
            "UPDATE {} SET path = $2 || SUBSTRING(path FROM LENGTH($1) + 1), \
             depth = depth + $3, updated_at = NOW() \
             WHERE path LIKE $1 || '%' AND path <> $1 AND deleted_at IS NULL",
            self.table
        );
        let result = sqlx::query(&sql)
            .bind(old_prefix)
            .bind(new_prefix)
            .bind(depth_delta)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to rewrite descendant paths"))?;
        Ok(result.rows_affected())
    }

    async fn exists_by_name(
        &self,
        name: &str,
        parent_id: Option<FolderId>,
        exclude_id: Option<FolderId>,
    ) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1 \
             AND parent_id IS NOT DISTINCT FROM $2 \
             AND ($3::BIGINT IS NULL OR id <> $3) AND deleted_at IS NULL)",
            self.table
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .bind(parent_id)
            .bind(exclude_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to check folder name"))
    }

    async fn has_children(&self, id: FolderId) -> AppResult<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE parent_id = $1 AND deleted_at IS NULL)",
            self.table
        );
        sqlx::query_scalar::<_, bool>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to check children"))
    }

    async fn increment_item_count(&self, id: FolderId, delta: i64) -> AppResult<()> {
        let sql = format!(
            "UPDATE {} SET item_count = GREATEST(item_count + $2, 0), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to update item count"))?;
        Ok(())
    }

    async fn increment_total_item_count(&self, ids: &[FolderId], delta: i64) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let sql = format!(
            "UPDATE {} SET total_item_count = GREATEST(total_item_count + $2, 0), \
             updated_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL",
            self.table
        );
        sqlx::query(&sql)
            .bind(ids)
            .bind(delta)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(e, "Failed to update total item counts"))?;
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn validate_table_name(table: &str) -> AppResult<()> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && table.len() <= 63 {
        Ok(())
    } else {
        Err(AppError::configuration(format!(
            "Invalid folder table name '{table}'"
        )))
    }
}

fn db_error(e: sqlx::Error, message: &str) -> AppError {
    AppError::with_source(ErrorKind::Database, message, e)
}

fn write_error(e: sqlx::Error, message: &str, name: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::conflict(format!("Folder '{name}' already exists under this parent"))
        }
        _ => db_error(e, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("folders").is_ok());
        assert!(validate_table_name("article_categories").is_ok());
        assert!(validate_table_name("_drive2").is_ok());

        for bad in ["", "2folders", "folders; DROP TABLE x", "public.folders", "fold-ers"] {
            let err = validate_table_name(bad).unwrap_err();
            assert!(err.is(ErrorKind::Configuration), "{bad} accepted");
        }
        assert!(validate_table_name(&"a".repeat(64)).is_err());
    }
}
