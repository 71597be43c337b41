pub async fn health_check() -> &'static str {
    "Portfolio API is healthy"
}
