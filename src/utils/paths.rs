use dirs::home_dir;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".exit_ledger";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// Environment variable that relocates every file the application writes.
pub const HOME_ENV: &str = "EXIT_LEDGER_HOME";

/// Returns the application data directory, defaulting to `~/.exit_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the key-value slots.
pub fn data_dir_in(base: &Path) -> PathBuf {
    base.join(DATA_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling path used to stage a write before renaming over the target.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path` through a temporary file so readers never observe
/// a half-written file.
pub fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn tmp_path_keeps_original_extension() {
        let tmp = tmp_path(Path::new("/data/expenses.json"));
        assert_eq!(tmp, PathBuf::from("/data/expenses.json.tmp"));
    }

    #[test]
    fn write_atomic_creates_parent_and_leaves_no_tmp() {
        let temp = TempDir::new().expect("temp dir");
        let target = temp.path().join("nested").join("slot.json");
        write_atomic(&target, "[]").expect("write");
        assert_eq!(fs::read_to_string(&target).expect("read"), "[]");
        assert!(!tmp_path(&target).exists());
    }
}
