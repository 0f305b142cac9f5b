use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use pssl_translate::{EncodingPolicy, PreviewMode, ShaderPair, TranslateOptions, TypePolicy};

/// Shader name used for file inputs when `--name` is not given.
const DEFAULT_SHADER_NAME: &str = "Shader";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "pssl-translate",
    version,
    about = "Translate a GLSL vertex/fragment shader pair into PSSL headers and shaders.",
    group(
        ArgGroup::new("source")
            .required(true)
            .args(["vertex", "preset"])
    )
)]
pub struct Args {
    /// GLSL vertex shader source.
    ///
    /// Environment variable: `PSSL_TRANSLATE_VERTEX`.
    #[arg(long, value_name = "PATH", env = "PSSL_TRANSLATE_VERTEX", requires = "fragment")]
    pub vertex: Option<PathBuf>,

    /// GLSL fragment shader source.
    ///
    /// Environment variable: `PSSL_TRANSLATE_FRAGMENT`.
    #[arg(long, value_name = "PATH", env = "PSSL_TRANSLATE_FRAGMENT", requires = "vertex")]
    pub fragment: Option<PathBuf>,

    /// Translate a built-in shader pair instead of files: color, toon, texture, toon-texture or
    /// ripple.
    ///
    /// Environment variable: `PSSL_TRANSLATE_PRESET`.
    #[arg(long, value_name = "MODE", env = "PSSL_TRANSLATE_PRESET")]
    pub preset: Option<PreviewMode>,

    /// Shader name embedded in struct, guard and file names (defaults to the preset's name, or
    /// `Shader`).
    ///
    /// Environment variable: `PSSL_TRANSLATE_NAME`.
    #[arg(long, value_name = "IDENT", env = "PSSL_TRANSLATE_NAME")]
    pub name: Option<String>,

    /// Directory the four artifacts are written to. Created if missing.
    ///
    /// Environment variable: `PSSL_TRANSLATE_OUT_DIR`.
    #[arg(long, value_name = "DIR", env = "PSSL_TRANSLATE_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Fail on declarations of unsupported types instead of skipping them.
    #[arg(long, env = "PSSL_TRANSLATE_STRICT_TYPES")]
    pub strict_types: bool,

    /// Fail on characters outside 7-bit ASCII instead of replacing them with `?`.
    #[arg(long, env = "PSSL_TRANSLATE_STRICT_ASCII")]
    pub strict_ascii: bool,

    /// Log filter (tracing-subscriber EnvFilter syntax).
    ///
    /// Environment variable: `PSSL_TRANSLATE_LOG_LEVEL`, falling back to `RUST_LOG`.
    #[arg(long, value_name = "FILTER", env = "PSSL_TRANSLATE_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Files {
        vertex: PathBuf,
        fragment: PathBuf,
    },
    Preset(PreviewMode),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    pub name: String,
    pub out_dir: PathBuf,
    pub options: TranslateOptions,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let source = match (args.preset, args.vertex, args.fragment) {
            (Some(mode), None, None) => Source::Preset(mode),
            (None, Some(vertex), Some(fragment)) => Source::Files { vertex, fragment },
            _ => bail!("pass either --preset, or both --vertex and --fragment"),
        };

        let name = args
            .name
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| match &source {
                Source::Preset(mode) => mode.shader_name().to_string(),
                Source::Files { .. } => DEFAULT_SHADER_NAME.to_string(),
            });

        let options = TranslateOptions {
            type_policy: if args.strict_types {
                TypePolicy::Strict
            } else {
                TypePolicy::Lenient
            },
            encoding_policy: if args.strict_ascii {
                EncodingPolicy::Strict
            } else {
                EncodingPolicy::Lossy
            },
        };

        let log_level = args
            .log_level
            .or_else(|| env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string());

        Ok(Self {
            source,
            name,
            out_dir: args.out_dir,
            options,
            log_level,
        })
    }

    /// Load the shader sources this config points at.
    pub fn shader_pair(&self) -> Result<ShaderPair> {
        match &self.source {
            Source::Preset(mode) => Ok(mode.shader_pair_named(&self.name)),
            Source::Files { vertex, fragment } => {
                let vertex_src = fs::read_to_string(vertex)
                    .with_context(|| format!("failed to read vertex shader {}", vertex.display()))?;
                let fragment_src = fs::read_to_string(fragment).with_context(|| {
                    format!("failed to read fragment shader {}", fragment.display())
                })?;
                Ok(ShaderPair::new(&self.name, vertex_src, fragment_src))
            }
        }
    }
}
