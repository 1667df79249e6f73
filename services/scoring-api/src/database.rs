use crate::models::StoredPrediction;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use scoring_engine::{DecisionRecord, DecisionRecorder, PredictionType};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::time::Duration;

const SCHEMA: [&str; 2] = [
    "CREATE TABLE IF NOT EXISTS predictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        prediction_type TEXT NOT NULL,
        input_data TEXT NOT NULL,
        risk_score REAL NOT NULL,
        risk_category TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_predictions_type ON predictions (prediction_type, id)",
];

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Create tables if they do not exist yet
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

pub async fn insert_prediction(
    pool: &SqlitePool,
    record: &DecisionRecord,
) -> std::result::Result<i64, sqlx::Error> {
    let score = record.score.to_f64().unwrap_or_default();

    let id = sqlx::query(
        "INSERT INTO predictions (prediction_type, input_data, risk_score, risk_category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(record.prediction_type.as_str())
    .bind(record.input_data.to_string())
    .bind(score)
    .bind(&record.category_or_action)
    .bind(record.decided_at)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Newest predictions first, optionally of one type
pub async fn recent_predictions(
    pool: &SqlitePool,
    limit: u32,
    prediction_type: Option<PredictionType>,
) -> std::result::Result<Vec<StoredPrediction>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT id, prediction_type, input_data, risk_score, risk_category, created_at
         FROM predictions
         WHERE ?1 IS NULL OR prediction_type = ?1
         ORDER BY id DESC
         LIMIT ?2",
    )
    .bind(prediction_type.map(|t| t.as_str()))
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| -> std::result::Result<StoredPrediction, sqlx::Error> {
            let input_text: String = row.try_get("input_data")?;
            Ok(StoredPrediction {
                id: row.try_get("id")?,
                prediction_type: row.try_get("prediction_type")?,
                input_data: serde_json::from_str(&input_text)
                    .unwrap_or(serde_json::Value::String(input_text)),
                risk_score: row.try_get("risk_score")?,
                risk_category: row.try_get("risk_category")?,
                created_at: row.try_get("created_at")?,
            })
        })
        .collect()
}

/// Decision recorder backed by the `predictions` table
#[derive(Clone)]
pub struct SqliteRecorder {
    pool: SqlitePool,
}

impl SqliteRecorder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DecisionRecorder for SqliteRecorder {
    async fn record(&self, decision: &DecisionRecord) -> scoring_engine::Result<()> {
        insert_prediction(&self.pool, decision)
            .await
            .map(|_| ())
            .map_err(|e| scoring_engine::Error::Recorder(e.to_string()))
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
