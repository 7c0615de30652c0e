use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::{debug, warn};

use crate::common::DatabaseError;

/// Run `SELECT 1` against the pool. Backs the readiness probe.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        warn!(error = %e, "PostgreSQL health check failed");
        DatabaseError::HealthCheckFailed(e.to_string())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase};
    use std::collections::BTreeMap;

    fn one_row() -> Vec<BTreeMap<&'static str, sea_orm::Value>> {
        vec![BTreeMap::from([("?column?", sea_orm::Value::Int(Some(1)))])]
    }

    #[tokio::test]
    async fn test_check_health_passes_when_query_succeeds() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([one_row()])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_reports_query_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().contains("connection reset"));
    }
}
