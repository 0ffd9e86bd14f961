use crate::db;
use crate::error::{Result, StoreError};
use crate::paths;
use rusqlite::backup::Backup;
use rusqlite::Connection;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const PAGES_PER_STEP: i32 = 128;
const STEP_PAUSE: Duration = Duration::from_millis(10);
const SIDECAR_SUFFIXES: [&str; 3] = ["-wal", "-shm", "-journal"];

/// Copies the live database into `path` with the SQLite online backup API.
///
/// The copy is written next to the destination and renamed into place once
/// complete, so an interrupted run never leaves a truncated file behind.
pub fn backup_to(conn: &Connection, path: &Path) -> Result<()> {
    paths::ensure_parent_dir(path)?;
    let target = absolute_target(path)?;
    if target.is_dir() || reserved_paths(conn)?.contains(&target) {
        return Err(StoreError::InvalidBackupPath(path.to_path_buf()));
    }

    let staging = with_suffix(&target, ".partial");
    if staging.exists() {
        fs::remove_file(&staging)?;
    }
    if let Err(err) = copy_into(conn, &staging) {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }
    fs::rename(&staging, &target)?;
    db::restrict_db_permissions(&target)?;
    Ok(())
}

fn copy_into(conn: &Connection, staging: &Path) -> Result<()> {
    let mut dest = Connection::open(staging)?;
    Backup::new(conn, &mut dest)?.run_to_completion(PAGES_PER_STEP, STEP_PAUSE, None)?;
    Ok(())
}

/// Files belonging to any attached on-disk database, sidecars included.
fn reserved_paths(conn: &Connection) -> Result<Vec<PathBuf>> {
    let mut stmt = conn.prepare("PRAGMA database_list;")?;
    let files = stmt
        .query_map([], |row| row.get::<_, String>(2))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut reserved = Vec::new();
    for file in files.into_iter().filter(|file| !file.is_empty()) {
        let main = absolute_target(Path::new(&file))?;
        for suffix in SIDECAR_SUFFIXES {
            reserved.push(with_suffix(&main, suffix));
        }
        reserved.push(main);
    }
    Ok(reserved)
}

fn absolute_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(fs::canonicalize(path)?);
    }
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidBackupPath(path.to_path_buf()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(fs::canonicalize(parent)?.join(file_name))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::with_suffix;
    use std::path::Path;

    #[test]
    fn suffix_is_appended_to_file_name() {
        assert_eq!(
            with_suffix(Path::new("/data/clientele.sqlite3"), "-wal"),
            Path::new("/data/clientele.sqlite3-wal")
        );
    }
}
