//! Host probe for executables on `PATH`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Report whether `name` resolves to an executable on this host.
///
/// Never fails: lookup errors are reported as `false`. The answer can go
/// stale before the binary is actually used.
pub async fn check_command_available(name: &str) -> bool {
    let name = name.to_string();
    let path = std::env::var_os("PATH");
    let found = tokio::task::spawn_blocking(move || find_executable(&name, path).is_some())
        .await
        .unwrap_or(false);
    debug!(available = found, "Availability probe finished");
    found
}

/// Resolve `name` against the given `PATH` value.
pub fn find_executable(name: &str, path: Option<OsString>) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return with_extensions(candidate).into_iter().find(|p| is_executable(p));
    }

    let path = path?;
    std::env::split_paths(&path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| with_extensions(&dir.join(name)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn with_extensions(base: &Path) -> Vec<PathBuf> {
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    let mut out = vec![base.to_path_buf()];
    for ext in exts.split(';').filter(|e| !e.is_empty()) {
        let mut with_ext = base.as_os_str().to_owned();
        with_ext.push(ext);
        out.push(PathBuf::from(with_ext));
    }
    out
}

#[cfg(not(windows))]
fn with_extensions(base: &Path) -> Vec<PathBuf> {
    vec![base.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match std::fs::metadata(path) {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
