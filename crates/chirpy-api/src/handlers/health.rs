//! Health check handler

/// Liveness check
///
/// GET /api/healthz
pub async fn healthz() -> &'static str {
    "OK"
}
