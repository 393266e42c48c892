use sqlx::PgPool;
use uuid::Uuid;

/// Record an audit event after a mutation. Auditing never fails the
/// surrounding request; errors are logged and dropped.
pub async fn record(
    pool: &PgPool,
    company_id: Uuid,
    user_id: Option<Uuid>,
    action: &str,
    resource_type: &str,
    resource_id: Option<Uuid>,
) {
    let result = sqlx::query(
        "INSERT INTO audit_events (company_id, user_id, action, resource_type, resource_id)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(company_id)
    .bind(user_id)
    .bind(action)
    .bind(resource_type)
    .bind(resource_id)
    .execute(pool)
    .await;

    if let Err(e) = result {
        tracing::error!("Failed to record audit event {action}: {e}");
    }
}
