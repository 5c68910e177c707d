/// Mask the password component of a DSN so it can be logged.
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    match dsn {
        Some(dsn) if dsn.contains('@') => {
            if let Ok(mut parsed) = url::Url::parse(dsn) {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            } else {
                "***".to_string()
            }
        }
        Some(dsn) => dsn.to_string(),
        None => "none".to_string(),
    }
}

/// True for `sqlite::memory:`, `sqlite://:memory:` and shared-cache memory URIs.
pub fn is_in_memory_sqlite(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}
