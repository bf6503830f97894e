//! PostgreSQL experiment repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{
    DomainError, Experiment, ExperimentId, ExperimentRepository, GeneratedResponse, ParameterSet,
    QualityMetrics, ResponseId, ResponseRecord, SessionId,
};

const RESPONSE_COLUMNS: &str = r#"
    id, experiment_id, position, text, temperature, top_p, max_tokens,
    tokens_used, latency_ms, metrics_overall, metrics_length, metrics_coherence,
    metrics_structure, metrics_readability, metrics_completeness,
    metrics_specificity, created_at
"#;

/// PostgreSQL implementation of ExperimentRepository.
///
/// Experiments live in `experiments`, their responses in
/// `experiment_responses` keyed by position so the batch order survives a
/// round trip.
#[derive(Debug, Clone)]
pub struct PostgresExperimentRepository {
    pool: PgPool,
}

impl PostgresExperimentRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they don't exist
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experiments (
                id UUID PRIMARY KEY,
                session_id UUID NOT NULL,
                prompt TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create experiments table: {}", e)))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_experiments_session_created
                ON experiments (session_id, created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create experiments index: {}", e)))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS experiment_responses (
                id UUID PRIMARY KEY,
                experiment_id UUID NOT NULL REFERENCES experiments(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                text TEXT NOT NULL,
                temperature DOUBLE PRECISION NOT NULL,
                top_p DOUBLE PRECISION NOT NULL,
                max_tokens INTEGER NOT NULL,
                tokens_used BIGINT NOT NULL,
                latency_ms BIGINT NOT NULL,
                metrics_overall DOUBLE PRECISION NOT NULL,
                metrics_length DOUBLE PRECISION NOT NULL,
                metrics_coherence DOUBLE PRECISION NOT NULL,
                metrics_structure DOUBLE PRECISION NOT NULL,
                metrics_readability DOUBLE PRECISION NOT NULL,
                metrics_completeness DOUBLE PRECISION NOT NULL,
                metrics_specificity DOUBLE PRECISION NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                UNIQUE (experiment_id, position)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create responses table: {}", e)))?;

        Ok(())
    }

    async fn load_responses(
        &self,
        experiment_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ResponseRecord>>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM experiment_responses WHERE experiment_id = ANY($1) \
             ORDER BY experiment_id, position",
            RESPONSE_COLUMNS
        ))
        .bind(experiment_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load responses: {}", e)))?;

        let mut grouped: HashMap<Uuid, Vec<ResponseRecord>> = HashMap::new();

        for row in rows {
            let experiment_id: Uuid = column(&row, "experiment_id")?;
            grouped
                .entry(experiment_id)
                .or_default()
                .push(row_to_response(&row)?);
        }

        Ok(grouped)
    }
}

#[async_trait]
impl ExperimentRepository for PostgresExperimentRepository {
    async fn create(&self, experiment: Experiment) -> Result<Experiment, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO experiments (id, session_id, prompt, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(experiment.id().as_uuid())
        .bind(experiment.session_id().as_uuid())
        .bind(experiment.prompt())
        .bind(experiment.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create experiment: {}", e)))?;

        for (position, record) in experiment.responses().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO experiment_responses (
                    id, experiment_id, position, text, temperature, top_p, max_tokens,
                    tokens_used, latency_ms, metrics_overall, metrics_length,
                    metrics_coherence, metrics_structure, metrics_readability,
                    metrics_completeness, metrics_specificity, created_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                "#,
            )
            .bind(record.id.as_uuid())
            .bind(experiment.id().as_uuid())
            .bind(position as i32)
            .bind(&record.generated.text)
            .bind(record.parameters.temperature)
            .bind(record.parameters.top_p)
            .bind(record.parameters.max_tokens as i32)
            .bind(i64::from(record.generated.tokens_used))
            .bind(i64::try_from(record.generated.latency_ms).unwrap_or(i64::MAX))
            .bind(record.metrics.overall)
            .bind(record.metrics.length)
            .bind(record.metrics.coherence)
            .bind(record.metrics.structure)
            .bind(record.metrics.readability)
            .bind(record.metrics.completeness)
            .bind(record.metrics.specificity)
            .bind(record.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create response: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit experiment: {}", e)))?;

        Ok(experiment)
    }

    async fn get_for_session(
        &self,
        id: &ExperimentId,
        session_id: &SessionId,
    ) -> Result<Option<Experiment>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, session_id, prompt, created_at
            FROM experiments
            WHERE id = $1 AND session_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get experiment: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut responses = self.load_responses(&[*id.as_uuid()]).await?;
        let records = responses.remove(id.as_uuid()).unwrap_or_default();

        Ok(Some(row_to_experiment(&row, records)?))
    }

    async fn list_for_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<Experiment>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, prompt, created_at
            FROM experiments
            WHERE session_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list experiments: {}", e)))?;

        let ids = rows
            .iter()
            .map(|row| column::<Uuid>(row, "id"))
            .collect::<Result<Vec<_>, _>>()?;

        let mut responses = self.load_responses(&ids).await?;

        rows.iter()
            .zip(&ids)
            .map(|(row, id)| row_to_experiment(row, responses.remove(id).unwrap_or_default()))
            .collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM experiments")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count experiments: {}", e)))?;

        Ok(count.max(0) as usize)
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

fn unsigned<T: TryFrom<i64>>(value: i64, name: &str) -> Result<T, DomainError> {
    T::try_from(value)
        .map_err(|_| DomainError::storage(format!("Column '{}' out of range: {}", name, value)))
}

fn row_to_experiment(row: &PgRow, responses: Vec<ResponseRecord>) -> Result<Experiment, DomainError> {
    let id: Uuid = column(row, "id")?;
    let session_id: Uuid = column(row, "session_id")?;
    let prompt: String = column(row, "prompt")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;

    Ok(Experiment::restore(
        ExperimentId::from(id),
        SessionId::from(session_id),
        prompt,
        responses,
        created_at,
    ))
}

fn row_to_response(row: &PgRow) -> Result<ResponseRecord, DomainError> {
    let id: Uuid = column(row, "id")?;
    let max_tokens: i32 = column(row, "max_tokens")?;
    let tokens_used: i64 = column(row, "tokens_used")?;
    let latency_ms: i64 = column(row, "latency_ms")?;

    Ok(ResponseRecord {
        id: ResponseId::from(id),
        parameters: ParameterSet::new(
            column(row, "temperature")?,
            column(row, "top_p")?,
            unsigned(i64::from(max_tokens), "max_tokens")?,
        ),
        generated: GeneratedResponse::new(
            column::<String>(row, "text")?,
            unsigned(tokens_used, "tokens_used")?,
            unsigned(latency_ms, "latency_ms")?,
        ),
        metrics: QualityMetrics {
            overall: column(row, "metrics_overall")?,
            length: column(row, "metrics_length")?,
            coherence: column(row, "metrics_coherence")?,
            structure: column(row, "metrics_structure")?,
            readability: column(row, "metrics_readability")?,
            completeness: column(row, "metrics_completeness")?,
            specificity: column(row, "metrics_specificity")?,
        },
        created_at: column(row, "created_at")?,
    })
}
