//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use glgen_registry::{Api, ResolveRequest};

/// Generate GL headers and loader code for the exact API version, profile
/// and extensions that you specify.
#[derive(Parser, Debug)]
#[command(name = "glgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the GL registry XML file
    pub registry: PathBuf,

    /// API name to generate for
    #[arg(long, default_value = "gl", value_parser = ["gl", "gles1", "gles2", "glsc2"])]
    pub api: String,

    /// API version, e.g. 4.5 (defaults to 4.0 for gl, 1.0 for gles1,
    /// 2.0 for gles2 and glsc2)
    #[arg(id = "ver", long = "ver")]
    pub version: Option<String>,

    /// API profile to generate the loader for
    #[arg(long, default_value = "compatibility", value_parser = ["core", "compatibility"])]
    pub profile: String,

    /// Comma-separated extension names; the GL_ prefix is added for you
    /// (e.g. --exts ARB_debug_output,EXT_texture_filter_anisotropic)
    #[arg(long = "exts", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Base name for the generated files (default <api>_<major>_<minor>_<profile>)
    #[arg(long)]
    pub filename: Option<String>,

    /// Which emitter to use
    #[arg(long, default_value = "c")]
    pub generator: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the engine request from the parsed arguments.
    pub fn to_request(&self) -> glgen_registry::Result<ResolveRequest> {
        let api: Api = self.api.parse()?;
        let version = match &self.version {
            Some(version) => version.parse()?,
            None => api.default_version(),
        };
        let extensions = self
            .extensions
            .iter()
            .filter(|name| !name.is_empty())
            .map(|name| format!("GL_{name}"))
            .collect();
        Ok(ResolveRequest {
            api,
            version,
            profile: self.profile.clone(),
            extensions,
        })
    }

    /// The base name for the generated files.
    pub fn output_name(&self, request: &ResolveRequest) -> String {
        self.filename.clone().unwrap_or_else(|| {
            format!(
                "{}_{}_{}_{}",
                request.api,
                request.version.major(),
                request.version.minor(),
                request.profile
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glgen_registry::Version;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_gl_compatibility() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml"]).unwrap();
        let request = cli.to_request().unwrap();
        assert_eq!(request.api, Api::Gl);
        assert_eq!(request.version, Version::new(4, 0));
        assert_eq!(request.profile, "compatibility");
        assert!(request.extensions.is_empty());
    }

    #[test]
    fn version_defaults_follow_the_api() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml", "--api", "gles2"]).unwrap();
        let request = cli.to_request().unwrap();
        assert_eq!(request.api, Api::Gles2);
        assert_eq!(request.version, Version::new(2, 0));
    }

    #[test]
    fn explicit_version_overrides_the_default() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml", "--ver", "3.3"]).unwrap();
        assert_eq!(cli.to_request().unwrap().version, Version::new(3, 3));
    }

    #[test]
    fn bad_version_is_rejected_at_the_boundary() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml", "--ver", "latest"]).unwrap();
        assert!(cli.to_request().is_err());
    }

    #[test]
    fn unknown_api_is_rejected_by_clap() {
        assert!(Cli::try_parse_from(["glgen", "gl.xml", "--api", "vulkan"]).is_err());
    }

    #[test]
    fn unknown_profile_is_rejected_by_clap() {
        assert!(Cli::try_parse_from(["glgen", "gl.xml", "--profile", "lite"]).is_err());
    }

    #[test]
    fn extensions_get_the_gl_prefix() {
        let cli = Cli::try_parse_from([
            "glgen",
            "gl.xml",
            "--exts",
            "ARB_debug_output,EXT_texture_filter_anisotropic",
        ])
        .unwrap();
        let request = cli.to_request().unwrap();
        assert!(request.extensions.contains("GL_ARB_debug_output"));
        assert!(request.extensions.contains("GL_EXT_texture_filter_anisotropic"));
    }

    #[test]
    fn output_name_defaults_to_api_version_profile() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml", "--ver", "4.5", "--profile", "core"])
            .unwrap();
        let request = cli.to_request().unwrap();
        assert_eq!(cli.output_name(&request), "gl_4_5_core");
    }

    #[test]
    fn explicit_filename_wins() {
        let cli = Cli::try_parse_from(["glgen", "gl.xml", "--filename", "mygl"]).unwrap();
        let request = cli.to_request().unwrap();
        assert_eq!(cli.output_name(&request), "mygl");
    }
}
