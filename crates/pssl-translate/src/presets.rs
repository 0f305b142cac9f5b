//! Built-in GLSL shader pairs, one per preview mode.

use std::fmt;
use std::str::FromStr;

use crate::translate::ShaderPair;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewMode {
    /// Per-pixel Blinn-Phong lighting.
    Color,
    /// Cel shading with quantized diffuse and specular terms.
    Toon,
    /// Per-pixel lighting modulated by a diffuse texture.
    Texture,
    ToonTexture,
    /// Time-animated surface ripple over a textured plane.
    Ripple,
}

impl PreviewMode {
    pub const ALL: [PreviewMode; 5] = [
        PreviewMode::Color,
        PreviewMode::Toon,
        PreviewMode::Texture,
        PreviewMode::ToonTexture,
        PreviewMode::Ripple,
    ];

    /// Name used for the generated artifacts when no explicit name is given.
    pub fn shader_name(self) -> &'static str {
        match self {
            PreviewMode::Color => "PerPixel",
            PreviewMode::Toon => "Toon",
            PreviewMode::Texture => "PerPixelTexture",
            PreviewMode::ToonTexture => "ToonTexture",
            PreviewMode::Ripple => "Ripple",
        }
    }

    /// `(vertex, fragment)` GLSL sources.
    pub fn sources(self) -> (&'static str, &'static str) {
        match self {
            PreviewMode::Color => (
                include_str!("../shaders/per_pixel.vert"),
                include_str!("../shaders/per_pixel.frag"),
            ),
            PreviewMode::Toon => (
                include_str!("../shaders/toon.vert"),
                include_str!("../shaders/toon.frag"),
            ),
            PreviewMode::Texture => (
                include_str!("../shaders/per_pixel_texture.vert"),
                include_str!("../shaders/per_pixel_texture.frag"),
            ),
            PreviewMode::ToonTexture => (
                include_str!("../shaders/toon_texture.vert"),
                include_str!("../shaders/toon_texture.frag"),
            ),
            PreviewMode::Ripple => (
                include_str!("../shaders/ripple.vert"),
                include_str!("../shaders/ripple.frag"),
            ),
        }
    }

    pub fn shader_pair(self) -> ShaderPair {
        self.shader_pair_named(self.shader_name())
    }

    pub fn shader_pair_named(self, name: &str) -> ShaderPair {
        let (vertex, fragment) = self.sources();
        ShaderPair::new(name, vertex, fragment)
    }

    fn as_str(self) -> &'static str {
        match self {
            PreviewMode::Color => "color",
            PreviewMode::Toon => "toon",
            PreviewMode::Texture => "texture",
            PreviewMode::ToonTexture => "toon-texture",
            PreviewMode::Ripple => "ripple",
        }
    }
}

impl fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preview mode `{0}` (expected color, toon, texture, toon-texture or ripple)")]
pub struct ParsePreviewModeError(pub String);

impl FromStr for PreviewMode {
    type Err = ParsePreviewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        PreviewMode::ALL
            .into_iter()
            .find(|mode| {
                let name = mode.as_str();
                name == normalized || name.replace('-', "") == normalized
            })
            .ok_or_else(|| ParsePreviewModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_and_variants() {
        for mode in PreviewMode::ALL {
            assert_eq!(mode.to_string().parse::<PreviewMode>(), Ok(mode));
        }
        for alias in ["ToonTexture", "toon_texture", " TOON-TEXTURE "] {
            assert_eq!(alias.parse::<PreviewMode>(), Ok(PreviewMode::ToonTexture));
        }
        assert_eq!(
            "sepia".parse::<PreviewMode>(),
            Err(ParsePreviewModeError("sepia".into()))
        );
    }

    #[test]
    fn sources_are_distinct_per_mode() {
        let (vert, frag) = PreviewMode::Ripple.sources();
        assert!(vert.contains("uniform float Time;"));
        assert!(frag.contains("uniform sampler2D Diffuse;"));
        assert_ne!(PreviewMode::Color.sources(), PreviewMode::Toon.sources());
    }
}
