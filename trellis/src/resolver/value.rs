use std::{fmt, str::FromStr};

use trellis_base::consts::properties::{
    DESTINATION_SEPARATOR, RESOURCE_MOUNT_ROOT, RESOURCE_PREFIX, RESOURCE_WITH_DESTINATION_PREFIX,
    SECRET_PREFIX,
};

use crate::resolver::Error;

/// A service property value, classified by its reserved prefix.
///
/// A literal that happens to start with a reserved prefix is indistinguishable
/// from a tagged value; no escaping is supported.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PropertyValue {
    Literal(String),
    Resource { path: String },
    ResourceWithDestination { mount_path: String, file: String },
    Secret { path: String },
}

impl FromStr for PropertyValue {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = value.strip_prefix(RESOURCE_WITH_DESTINATION_PREFIX) {
            return match rest.split_once(DESTINATION_SEPARATOR) {
                Some((mount_path, file)) if !mount_path.is_empty() && !file.is_empty() => {
                    Ok(Self::ResourceWithDestination {
                        mount_path: mount_path.to_string(),
                        file: file.to_string(),
                    })
                }
                _ => Err(Error::MalformedDestination {
                    prefix: RESOURCE_WITH_DESTINATION_PREFIX,
                    value: value.to_string(),
                }),
            };
        }
        if let Some(path) = value.strip_prefix(RESOURCE_PREFIX) {
            return Ok(Self::Resource { path: path.to_string() });
        }
        if let Some(path) = value.strip_prefix(SECRET_PREFIX) {
            return Ok(Self::Secret { path: path.to_string() });
        }
        Ok(Self::Literal(value.to_string()))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.write_str(value),
            Self::Resource { path } => write!(f, "{RESOURCE_PREFIX}{path}"),
            Self::ResourceWithDestination { mount_path, file } => {
                write!(f, "{RESOURCE_WITH_DESTINATION_PREFIX}{mount_path}{DESTINATION_SEPARATOR}{file}")
            }
            Self::Secret { path } => write!(f, "{SECRET_PREFIX}{path}"),
        }
    }
}

/// Last path segment.
pub fn file_name(path: &str) -> &str { path.rsplit_once('/').map_or(path, |(_, name)| name) }

/// Directory portion as an absolute path, or the resource mount root when
/// there is none.
pub fn mount_path(path: &str) -> String {
    match path.rsplit_once('/') {
        None | Some(("", _)) => RESOURCE_MOUNT_ROOT.to_string(),
        Some((directory, _)) if directory.starts_with('/') => directory.to_string(),
        Some((directory, _)) => format!("/{directory}"),
    }
}

/// Turns a path into a ConfigMap/Secret name: `/etc/app.d/conf` becomes
/// `etc-app-d-conf`.
pub fn normalize_object_name(path: &str) -> String {
    path.strip_prefix('/').unwrap_or(path).replace(['.', '/'], "-")
}
