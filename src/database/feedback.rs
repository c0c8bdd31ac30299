// ABOUTME: Pairing feedback storage
// ABOUTME: Append-only telemetry table written by the feedback endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

use super::Database;
use crate::errors::{AppError, AppResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cocktail_core::models::{FeedbackAction, NewPairingFeedback, PairingFeedback};
use cocktail_intelligence::FeedbackRepository;
use sqlx::{sqlite::SqliteRow, Row};

impl Database {
    /// Create the feedback table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_feedback(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pairing_feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                food_id INTEGER NOT NULL,
                beverage_id INTEGER NOT NULL,
                action TEXT NOT NULL CHECK (action IN ('view', 'favorite', 'reject')),
                rating INTEGER CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
                reason_tag TEXT,
                session_id TEXT,
                meta TEXT,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_pairing_feedback_food ON pairing_feedback(food_id, beverage_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append a feedback event
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for an invalid rating, or a database error
    pub async fn record_feedback(&self, feedback: &NewPairingFeedback) -> AppResult<i64> {
        feedback.validate()?;
        let meta = feedback.meta.as_ref().map(serde_json::to_string).transpose()?;

        let row = sqlx::query(
            r"
            INSERT INTO pairing_feedback (
                food_id, beverage_id, action, rating, reason_tag, session_id, meta, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(feedback.food_id)
        .bind(feedback.beverage_id)
        .bind(feedback.action.as_str())
        .bind(feedback.rating.map(i64::from))
        .bind(feedback.reason_tag.as_deref())
        .bind(feedback.session_id.as_deref())
        .bind(meta)
        .bind(Utc::now().to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record feedback: {e}")))?;

        Ok(row.get("id"))
    }

    /// Feedback recorded for a food, oldest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails or a stored row is malformed
    pub async fn list_feedback_for_food(&self, food_id: i64) -> AppResult<Vec<PairingFeedback>> {
        let rows = sqlx::query(
            r"
            SELECT id, food_id, beverage_id, action, rating, reason_tag, session_id, meta, created_at
            FROM pairing_feedback
            WHERE food_id = $1
            ORDER BY id
            ",
        )
        .bind(food_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list feedback: {e}")))?;

        rows.iter().map(row_to_feedback).collect()
    }
}

fn row_to_feedback(row: &SqliteRow) -> AppResult<PairingFeedback> {
    let action_str: String = row.get("action");
    let rating: Option<i64> = row.get("rating");
    let meta_json: Option<String> = row.get("meta");
    let created_at_str: String = row.get("created_at");

    let rating = rating
        .map(u8::try_from)
        .transpose()
        .map_err(|e| AppError::internal(format!("Stored rating out of range: {e}")))?;
    let meta = meta_json.as_deref().map(serde_json::from_str).transpose()?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| AppError::internal(format!("Invalid feedback timestamp: {e}")))?
        .with_timezone(&Utc);

    Ok(PairingFeedback {
        id: row.get("id"),
        feedback: NewPairingFeedback {
            food_id: row.get("food_id"),
            beverage_id: row.get("beverage_id"),
            action: FeedbackAction::parse(&action_str)?,
            rating,
            reason_tag: row.get("reason_tag"),
            session_id: row.get("session_id"),
            meta,
        },
        created_at,
    })
}

#[async_trait]
impl FeedbackRepository for Database {
    async fn record_feedback(&self, feedback: &NewPairingFeedback) -> AppResult<i64> {
        Self::record_feedback(self, feedback).await
    }
}
