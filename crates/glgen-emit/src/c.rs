//! C header and loader-source emitter.
//!
//! Writes `<name>.h` with type declarations, enumerant defines and
//! function-pointer declarations, and `<name>.c` with the lazy loader
//! stubs that resolve each entry point on first call. In null-driver mode
//! the source instead gets do-nothing stubs that return zero, which is
//! handy for headless builds and tests.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use glgen_registry::{CommandInfo, Emitter, EnumerantInfo, GroupInfo, Result, TypeInfo};

use crate::preamble::{HEADER_PREAMBLE, SOURCE_PREAMBLE};

struct Output {
    header: BufWriter<File>,
    source: BufWriter<File>,
}

/// Emitter producing a C header plus loader (or null-driver) source.
pub struct CEmitter {
    null_driver: bool,
    output: Option<Output>,
}

impl CEmitter {
    /// Emitter whose generated source resolves entry points at first call.
    pub fn loader() -> Self {
        Self {
            null_driver: false,
            output: None,
        }
    }

    /// Emitter whose generated source stubs every command out.
    pub fn null_driver() -> Self {
        Self {
            null_driver: true,
            output: None,
        }
    }

    fn output(&mut self) -> Result<&mut Output> {
        self.output
            .as_mut()
            .ok_or_else(|| io::Error::other("emitter used before start").into())
    }
}

impl Emitter for CEmitter {
    fn start(
        &mut self,
        output_name: &str,
        api: &str,
        profile: &str,
        version_major: u32,
        version_minor: u32,
    ) -> Result<()> {
        let header_path = PathBuf::from(format!("{output_name}.h"));
        let source_path = PathBuf::from(format!("{output_name}.c"));
        tracing::debug!(?header_path, ?source_path, "creating output files");

        let mut header = BufWriter::new(File::create(&header_path)?);
        let mut source = BufWriter::new(File::create(&source_path)?);

        writeln!(header, "{HEADER_PREAMBLE}")?;
        writeln!(header, "#define GLGEN_API_NAME \"{api}\"")?;
        writeln!(header, "#define GLGEN_API_PROFILE \"{profile}\"")?;
        writeln!(header, "#define GLGEN_API_VER_MAJ {version_major}")?;
        writeln!(header, "#define GLGEN_API_VER_MIN {version_minor}")?;

        let file_stem = output_name.rsplit(['/', '\\']).next().unwrap_or(output_name);
        writeln!(source, "#include \"{file_stem}.h\"")?;
        if !self.null_driver {
            writeln!(source, "{SOURCE_PREAMBLE}")?;
        }

        self.output = Some(Output { header, source });
        Ok(())
    }

    fn emit_type(&mut self, info: &TypeInfo) -> Result<()> {
        writeln!(self.output()?.header, "{}", info.decl)?;
        Ok(())
    }

    fn emit_enum_group(&mut self, _group: &GroupInfo) -> Result<()> {
        // Groups have no C representation; enumerants are emitted flat.
        Ok(())
    }

    fn emit_enumerant(&mut self, enumerant: &EnumerantInfo) -> Result<()> {
        let header = &mut self.output()?.header;
        let suffix = enumerant.suffix.as_deref().unwrap_or("");
        writeln!(
            header,
            "#define {} {}{}",
            enumerant.name, enumerant.value, suffix
        )?;
        if let Some(alias) = &enumerant.alias {
            writeln!(header, "#define {} {}{}", alias, enumerant.value, suffix)?;
        }
        Ok(())
    }

    fn emit_command(&mut self, command: &CommandInfo) -> Result<()> {
        let mut signature = String::new();
        let mut call = String::new();
        for param in &command.params {
            if !signature.is_empty() {
                signature.push_str(", ");
                call.push_str(", ");
            }
            signature.push_str(&param.ctype);
            signature.push(' ');
            signature.push_str(&param.name);
            call.push_str(&param.name);
        }

        let null_driver = self.null_driver;
        let output = self.output()?;
        let name = &command.name;
        let return_type = &command.return_type;

        // Function pointer type, declaration, and the macro that routes
        // calls through the pointer.
        writeln!(
            output.header,
            "\ntypedef {return_type} (GL_APIENTRY *PFN_{name})({signature});"
        )?;
        writeln!(output.header, "extern PFN_{name} _glptr_{name};")?;
        writeln!(output.header, "#define {name} _glptr_{name}")?;
        if let Some(alias) = &command.alias {
            writeln!(output.header, "#define {alias} {name}")?;
        }

        writeln!(
            output.source,
            "static {return_type} GL_APIENTRY _impl_{name} ({signature}) {{"
        )?;
        if null_driver {
            if return_type != "void" {
                writeln!(output.source, "  return ({return_type})0;")?;
            }
            writeln!(output.source, "}}")?;
        } else {
            writeln!(
                output.source,
                "  _glptr_{name} = (PFN_{name})GlgenGetProcAddress(\"{name}\");"
            )?;
            let forward = if return_type == "void" { "" } else { "return " };
            writeln!(output.source, "  {forward}_glptr_{name}({call});")?;
            writeln!(output.source, "}}")?;
        }
        writeln!(output.source, "PFN_{name} _glptr_{name} = _impl_{name};\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let output = self.output()?;
        writeln!(output.header, "#if defined(__cplusplus)\n}}\n#endif")?;
        writeln!(output.header, "#endif")?;
        output.header.flush()?;
        output.source.flush()?;
        self.output = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_command() -> CommandInfo {
        CommandInfo {
            name: "glGenTextures".to_string(),
            return_type: "void".to_string(),
            params: vec![
                glgen_registry::ParamInfo {
                    name: "n".to_string(),
                    ctype: "GLsizei ".to_string(),
                    type_ref: Some("GLsizei".to_string()),
                    ..Default::default()
                },
                glgen_registry::ParamInfo {
                    name: "textures".to_string(),
                    ctype: "GLuint *".to_string(),
                    type_ref: Some("GLuint".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn generate_sample(emitter: &mut CEmitter, base: &str) {
        emitter.start(base, "gl", "core", 4, 5).unwrap();
        emitter
            .emit_type(&TypeInfo {
                name: "GLuint".to_string(),
                decl: "typedef unsigned int  GLuint;".to_string(),
                ..Default::default()
            })
            .unwrap();
        emitter
            .emit_enumerant(&EnumerantInfo {
                name: "GL_TEXTURE_2D".to_string(),
                value: "0x0DE1".to_string(),
                ..Default::default()
            })
            .unwrap();
        emitter.emit_command(&sample_command()).unwrap();
        emitter.finish().unwrap();
    }

    #[test]
    fn writes_header_declarations() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("gl").to_string_lossy().into_owned();

        let mut emitter = CEmitter::loader();
        generate_sample(&mut emitter, &base);

        let header = fs::read_to_string(format!("{base}.h")).unwrap();
        assert!(header.contains("#define GLGEN_API_NAME \"gl\""));
        assert!(header.contains("#define GLGEN_API_PROFILE \"core\""));
        assert!(header.contains("#define GLGEN_API_VER_MAJ 4"));
        assert!(header.contains("#define GLGEN_API_VER_MIN 5"));
        assert!(header.contains("typedef unsigned int  GLuint;"));
        assert!(header.contains("#define GL_TEXTURE_2D 0x0DE1"));
        assert!(header.contains(
            "typedef void (GL_APIENTRY *PFN_glGenTextures)(GLsizei  n, GLuint * textures);"
        ));
        assert!(header.contains("extern PFN_glGenTextures _glptr_glGenTextures;"));
        assert!(header.contains("#define glGenTextures _glptr_glGenTextures"));
    }

    #[test]
    fn loader_source_resolves_entry_points_lazily() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("gl").to_string_lossy().into_owned();

        let mut emitter = CEmitter::loader();
        generate_sample(&mut emitter, &base);

        let source = fs::read_to_string(format!("{base}.c")).unwrap();
        assert!(source.contains("#include \"gl.h\""));
        assert!(source.contains("GlgenGetProcAddress(\"glGenTextures\")"));
        assert!(source.contains("_glptr_glGenTextures(n, textures);"));
        assert!(source.contains("PFN_glGenTextures _glptr_glGenTextures = _impl_glGenTextures;"));
    }

    #[test]
    fn null_driver_stubs_return_zero() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("gl").to_string_lossy().into_owned();

        let mut emitter = CEmitter::null_driver();
        emitter.start(&base, "gl", "core", 4, 5).unwrap();
        emitter
            .emit_command(&CommandInfo {
                name: "glCreateShader".to_string(),
                return_type: "GLuint".to_string(),
                ..Default::default()
            })
            .unwrap();
        emitter.emit_command(&sample_command()).unwrap();
        emitter.finish().unwrap();

        let source = fs::read_to_string(format!("{base}.c")).unwrap();
        assert!(!source.contains("GlgenGetProcAddress"));
        assert!(source.contains("  return (GLuint)0;"));
        // void commands get an empty stub body.
        assert!(source.contains("static void GL_APIENTRY _impl_glGenTextures"));
    }

    #[test]
    fn enumerant_alias_gets_its_own_define() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("gl").to_string_lossy().into_owned();

        let mut emitter = CEmitter::loader();
        emitter.start(&base, "gl", "core", 1, 0).unwrap();
        emitter
            .emit_enumerant(&EnumerantInfo {
                name: "GL_CLIENT_ALL_ATTRIB_BITS".to_string(),
                value: "0xFFFFFFFF".to_string(),
                suffix: Some("u".to_string()),
                alias: Some("GL_ALL_ATTRIB_BITS".to_string()),
                ..Default::default()
            })
            .unwrap();
        emitter.finish().unwrap();

        let header = fs::read_to_string(format!("{base}.h")).unwrap();
        assert!(header.contains("#define GL_CLIENT_ALL_ATTRIB_BITS 0xFFFFFFFFu"));
        assert!(header.contains("#define GL_ALL_ATTRIB_BITS 0xFFFFFFFFu"));
    }
}
