use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

/// Resolve the server home directory into an absolute path.
///
/// `None` selects `<user home>/<default_subdir>`. A leading `~` is expanded
/// against the user's home. Relative paths are anchored at the current
/// working directory. The directory is created when `create` is set.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home directory"));

    let path = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => {
            if raw == "~" {
                user_home()?
            } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
                user_home()?.join(rest)
            } else {
                let p = PathBuf::from(&raw);
                if p.is_absolute() {
                    p
                } else {
                    std::env::current_dir()
                        .context("cannot read current directory")?
                        .join(p)
                }
            }
        }
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home_dir {}", path.display()))?;
    }
    Ok(path)
}

/// Join `file` onto `base_dir` unless it is already absolute.
pub fn resolve_under(base_dir: &Path, file: &str) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
