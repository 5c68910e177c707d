use std::time::Duration;

use sqlx::SqliteConnection;

use crate::{is_in_memory_sqlite, Result};

/// Normalise a SQLite DSN for sqlx:
/// - in-memory DSNs pass through untouched;
/// - parent directories of file DSNs are created when `create_dirs` is set;
/// - `mode=rwc` is appended when no mode is given, so the file is created on first start.
pub(crate) fn prepare_path(dsn: &str, create_dirs: bool) -> Result<String> {
    if is_in_memory_sqlite(dsn) {
        return Ok(dsn.to_string());
    }

    let raw = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))
        .unwrap_or(dsn);
    let (path, query) = match raw.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (raw, None),
    };

    if create_dirs && !path.starts_with("file:") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                // One-time blocking call during startup.
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let has_mode = query
        .map(|q| q.split('&').any(|kv| kv.starts_with("mode=")))
        .unwrap_or(false);
    if has_mode {
        return Ok(dsn.to_string());
    }
    let sep = if query.is_some() { '&' } else { '?' };
    Ok(format!("{dsn}{sep}mode=rwc"))
}

/// Per-connection PRAGMAs. WAL does not apply to in-memory databases, and a
/// busy timeout is pointless there too.
pub(crate) async fn apply_pragmas(
    conn: &mut SqliteConnection,
    in_memory: bool,
    busy: Option<Duration>,
) -> std::result::Result<(), sqlx::Error> {
    if in_memory {
        sqlx::query("PRAGMA journal_mode = DELETE")
            .execute(&mut *conn)
            .await?;
    } else {
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&mut *conn)
            .await?;
        if let Some(busy) = busy {
            let stmt = format!("PRAGMA busy_timeout = {}", busy.as_millis());
            sqlx::query(&stmt).execute(&mut *conn).await?;
        }
    }
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_untouched() {
        assert_eq!(prepare_path("sqlite::memory:", true).unwrap(), "sqlite::memory:");
    }

    #[test]
    fn file_dsn_gets_create_mode_and_parent_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("nested/dir/app.db");
        let dsn = format!("sqlite://{}", file.to_string_lossy().replace('\\', "/"));

        let out = prepare_path(&dsn, true).unwrap();
        assert!(out.ends_with("?mode=rwc"), "got {out}");
        assert!(file.parent().unwrap().exists());
    }

    #[test]
    fn explicit_mode_is_preserved() {
        let out = prepare_path("sqlite://app.db?mode=ro", false).unwrap();
        assert_eq!(out, "sqlite://app.db?mode=ro");

        let out = prepare_path("sqlite://app.db?cache=shared", false).unwrap();
        assert_eq!(out, "sqlite://app.db?cache=shared&mode=rwc");
    }
}
