//! Record store seam
//!
//! Site content lives in tables of JSON records. [`RecordStore`] is the
//! narrow interface the services use; [`MemoryStore`] keeps tables in memory
//! and can mirror each table to `<data_dir>/<table>.json`.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

pub type Record = Map<String, Value>;

/// Errors that can occur in record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record '{id}' not found in table '{table}'")]
    NotFound { table: String, id: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to access table file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode table: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Field-equality filter with optional ordering and limit
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order: Option<(String, SortOrder)>,
    limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep records whose `field` equals `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order = Some((field.into(), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when the record passes every filter
    pub fn matches(&self, record: &Record) -> bool {
        self.filters
            .iter()
            .all(|(field, value)| record.get(field) == Some(value))
    }

    /// Filter, sort and truncate a table snapshot
    pub fn apply<'a>(&self, rows: impl Iterator<Item = &'a Record>) -> Vec<Record> {
        let mut selected: Vec<Record> = rows.filter(|r| self.matches(r)).cloned().collect();

        if let Some((field, order)) = &self.order {
            selected.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }

        selected
    }
}

/// Order JSON values: missing/null first, then numbers, strings and booleans
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Record store operations used by the site services
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Select records from a table
    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Record>>;

    /// Insert a record; the store assigns `id`, `created_at` and `updated_at`
    async fn insert(&self, table: &str, record: Value) -> StoreResult<Record>;

    /// Merge `patch` into the record with the given id
    async fn update(&self, table: &str, id: &str, patch: Value) -> StoreResult<Record>;

    /// Delete the record with the given id
    async fn delete(&self, table: &str, id: &str) -> StoreResult<()>;

    /// Fetch a single record by id
    async fn get(&self, table: &str, id: &str) -> StoreResult<Option<Record>> {
        let rows = self.select(table, &Query::new().eq("id", id).limit(1)).await?;
        Ok(rows.into_iter().next())
    }
}

fn into_object(value: Value) -> StoreResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidRecord(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

/// In-memory tables, optionally mirrored to JSON files
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Record>>>,
    data_dir: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by `<dir>/<table>.json` files, loading existing tables
    pub async fn open(dir: &Path) -> StoreResult<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let mut tables = HashMap::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(false, |e| e == "json") {
                if let Some(table) = path.file_stem().and_then(|s| s.to_str()) {
                    let content = tokio::fs::read_to_string(&path).await?;
                    let rows: Vec<Record> = serde_json::from_str(&content)?;
                    tracing::debug!(table, rows = rows.len(), "Loaded table");
                    tables.insert(table.to_string(), rows);
                }
            }
        }

        Ok(Self {
            tables: RwLock::new(tables),
            data_dir: Some(dir.to_path_buf()),
        })
    }

    async fn persist(&self, table: &str, rows: &[Record]) -> StoreResult<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        let path = dir.join(format!("{}.json", table));
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(rows)?;
        tokio::fs::write(&temp_path, content).await?;
        tokio::fs::rename(&temp_path, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> StoreResult<Vec<Record>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|rows| query.apply(rows.iter()))
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, record: Value) -> StoreResult<Record> {
        let mut record = into_object(record)?;
        let now = Value::String(Utc::now().to_rfc3339());
        record.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        record.insert("created_at".to_string(), now.clone());
        record.insert("updated_at".to_string(), now);

        let mut tables = self.tables.write().await;
        let mut next = tables.get(table).cloned().unwrap_or_default();
        next.push(record.clone());

        // Memory only changes once the table file is written
        self.persist(table, &next).await?;
        tables.insert(table.to_string(), next);
        Ok(record)
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> StoreResult<Record> {
        let patch = into_object(patch)?;
        let not_found = || StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        };

        let mut tables = self.tables.write().await;
        let mut next = tables.get(table).cloned().ok_or_else(not_found)?;
        let row = next
            .iter_mut()
            .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            .ok_or_else(not_found)?;

        for (key, value) in patch {
            if key != "id" && key != "created_at" {
                row.insert(key, value);
            }
        }
        row.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        let updated = row.clone();

        self.persist(table, &next).await?;
        tables.insert(table.to_string(), next);
        Ok(updated)
    }

    async fn delete(&self, table: &str, id: &str) -> StoreResult<()> {
        let not_found = || StoreError::NotFound {
            table: table.to_string(),
            id: id.to_string(),
        };

        let mut tables = self.tables.write().await;
        let rows = tables.get(table).ok_or_else(not_found)?;
        let next: Vec<Record> = rows
            .iter()
            .filter(|r| r.get("id").and_then(Value::as_str) != Some(id))
            .cloned()
            .collect();
        if next.len() == rows.len() {
            return Err(not_found());
        }

        self.persist(table, &next).await?;
        tables.insert(table.to_string(), next);
        Ok(())
    }
}
