//! Resolution request configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::version::Version;
use crate::Error;

/// The APIs described by the GL registry family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Api {
    Gl,
    Gles1,
    Gles2,
    Glsc2,
}

impl Api {
    /// The API name as it appears in registry attributes.
    pub fn name(&self) -> &'static str {
        match self {
            Api::Gl => "gl",
            Api::Gles1 => "gles1",
            Api::Gles2 => "gles2",
            Api::Glsc2 => "glsc2",
        }
    }

    /// The version requested when the caller does not name one.
    pub fn default_version(&self) -> Version {
        match self {
            Api::Gl => Version::new(4, 0),
            Api::Gles1 => Version::new(1, 0),
            Api::Gles2 => Version::new(2, 0),
            Api::Glsc2 => Version::new(2, 0),
        }
    }
}

impl FromStr for Api {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gl" => Ok(Api::Gl),
            "gles1" => Ok(Api::Gles1),
            "gles2" => Ok(Api::Gles2),
            "glsc2" => Ok(Api::Glsc2),
            other => Err(Error::UnknownApi {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One resolution request: which slice of the registry to materialize.
///
/// Immutable for the duration of a run. A fresh registry and accumulator
/// are built per request; nothing is shared across runs.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Target API.
    pub api: Api,

    /// Target version; feature deltas newer than this do not apply.
    pub version: Version,

    /// Profile gating require/remove entries (e.g. `core`).
    pub profile: String,

    /// Extension names the caller wants applied, e.g. `GL_ARB_debug_output`.
    pub extensions: BTreeSet<String>,
}

impl ResolveRequest {
    /// A request for the API's default version, `compatibility` profile and
    /// no extensions.
    pub fn new(api: Api) -> Self {
        Self {
            api,
            version: api.default_version(),
            profile: "compatibility".to_string(),
            extensions: BTreeSet::new(),
        }
    }
}
