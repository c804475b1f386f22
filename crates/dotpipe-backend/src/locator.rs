//! Executable discovery on the process search path.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{GraphvizError, GraphvizResult};

/// Resolves an executable name to a runnable path.
pub trait ExecutableLocator: Send + Sync {
    /// Returns the path to run for `name`.
    ///
    /// Fails with [`GraphvizError::ExecutableNotFound`] when `name` cannot be
    /// found; other lookup failures surface as a different error kind.
    fn locate(&self, name: &Path) -> GraphvizResult<PathBuf>;
}

/// Looks executables up on `PATH` with the `which` crate.
///
/// Names containing a path separator are checked in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchPathLocator;

impl ExecutableLocator for SearchPathLocator {
    fn locate(&self, name: &Path) -> GraphvizResult<PathBuf> {
        match which::which(name) {
            Ok(path) => {
                log::debug!("resolved {} to {}", name.display(), path.display());
                Ok(path)
            }
            Err(which::Error::CannotFindBinaryPath) => match non_executable_candidate(name) {
                Some(path) => {
                    log::debug!("{} exists but is not executable", path.display());
                    Err(GraphvizError::LaunchFailed {
                        program: path,
                        source: io::Error::new(
                            io::ErrorKind::PermissionDenied,
                            "file exists but is not executable",
                        ),
                    })
                }
                None => Err(GraphvizError::ExecutableNotFound {
                    name: name.display().to_string(),
                }),
            },
            Err(source) => Err(GraphvizError::LocateFailed {
                name: name.display().to_string(),
                source,
            }),
        }
    }
}

/// First file `which` would have considered for `name`.
///
/// `which` skips files without execute permission, so a hit here means the
/// executable is present but cannot be run.
fn non_executable_candidate(name: &Path) -> Option<PathBuf> {
    let is_file = |path: &Path| path.metadata().is_ok_and(|meta| meta.is_file());

    if name.components().count() > 1 || name.is_absolute() {
        return is_file(name).then(|| name.to_path_buf());
    }
    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| is_file(candidate.as_path()))
}

/// Returns names unchanged and leaves discovery to process launch.
///
/// A missing executable is then reported by the runner, which maps the
/// OS "not found" launch error onto [`GraphvizError::ExecutableNotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLocator;

impl ExecutableLocator for PassthroughLocator {
    fn locate(&self, name: &Path) -> GraphvizResult<PathBuf> {
        Ok(name.to_path_buf())
    }
}

/// Locates `name` with [`SearchPathLocator`].
pub fn locate(name: impl AsRef<Path>) -> GraphvizResult<PathBuf> {
    SearchPathLocator.locate(name.as_ref())
}
