use std::path::{Path, PathBuf};

use snafu::ResultExt;
use walkdir::WalkDir;

use crate::resolver::{Error, error};

/// Finds files referenced by service properties.
///
/// The build output directory is searched recursively for a file whose path
/// contains the requested fragment; the classpath roots are the fallback.
#[derive(Clone, Debug)]
pub struct ResourceLocator {
    build_output: PathBuf,
    classpath: Vec<PathBuf>,
}

impl ResourceLocator {
    pub fn new<I, P>(build_output: impl Into<PathBuf>, classpath: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            build_output: build_output.into(),
            classpath: classpath.into_iter().map(Into::into).collect(),
        }
    }

    /// Path of the first build output file matching `fragment`, or the
    /// fragment itself when nothing matches.
    pub fn locate(&self, fragment: &str) -> PathBuf {
        WalkDir::new(&self.build_output)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .find(|entry| entry.path().to_string_lossy().contains(fragment))
            .map_or_else(|| PathBuf::from(fragment), walkdir::DirEntry::into_path)
    }

    /// Path of the resource, trying the build output first and the classpath
    /// roots afterwards. `None` when no candidate exists.
    pub fn resolve_path(&self, fragment: &str) -> Option<PathBuf> {
        let located = self.locate(fragment);
        let relative = Path::new(fragment.trim_start_matches('/'));
        std::iter::once(located)
            .chain(self.classpath.iter().map(|root| root.join(relative)))
            .find(|candidate| candidate.is_file())
    }

    /// Reads the resource found by [`Self::resolve_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be found or read.
    pub fn read(&self, fragment: &str) -> Result<String, Error> {
        let file_path = self.resolve_path(fragment).ok_or_else(|| Error::ResourceNotFound {
            fragment: fragment.to_string(),
            build_output: self.build_output.clone(),
        })?;

        std::fs::read_to_string(&file_path).context(error::ReadResourceSnafu { file_path })
    }
}
