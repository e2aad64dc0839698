//! # Resource Path Resolution

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::errors::{SeqfeedError, SeqfeedResult};

/// Environment variable key to override the default resource directory.
pub const SEQFEED_RESOURCE_DIR: &str = "SEQFEED_RESOURCE_DIR";

/// Resolves the directory relative resource files are found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDirResolver {
    /// Environment variables to check, in order.
    pub env_vars: &'static [&'static str],
}

/// Default [`ResourceDirResolver`] for seqfeed.
pub const SEQFEED_RESOURCE_CONFIG: ResourceDirResolver = ResourceDirResolver {
    env_vars: &[SEQFEED_RESOURCE_DIR],
};

impl ResourceDirResolver {
    /// Resolve the resource directory.
    ///
    /// An explicit `dir` wins; then the first set environment variable;
    /// then `None` (the working directory). `~` and `$VAR` are expanded.
    pub fn resolve<S: AsRef<str>>(
        &self,
        dir: Option<S>,
    ) -> SeqfeedResult<Option<PathBuf>> {
        if let Some(dir) = dir.as_ref() {
            return expand_path(dir.as_ref()).map(Some);
        }

        for env_var in self.env_vars {
            if let Ok(dir) = env::var(env_var) {
                return expand_path(&dir).map(Some);
            }
        }

        Ok(None)
    }
}

/// Expand `~` and environment variables in a path.
pub fn expand_path(path: &str) -> SeqfeedResult<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| SeqfeedError::InvalidOptions(format!("cannot expand {path:?}: {e}")))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Join a resource file onto an optional base directory.
///
/// Absolute files are returned as-is.
pub fn join_resource<B: AsRef<Path>>(
    base: Option<B>,
    file: &str,
) -> SeqfeedResult<PathBuf> {
    let file = expand_path(file)?;
    Ok(match base {
        Some(base) if file.is_relative() => base.as_ref().join(file),
        _ => file,
    })
}
