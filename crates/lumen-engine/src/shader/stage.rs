use std::fmt;
use std::str::FromStr;

use super::ShaderError;

/// Pipeline stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL enum passed to `createShader`.
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a stage tag: `vertex` / `vert` or `fragment` / `frag`, any case.
impl FromStr for ShaderStage {
    type Err = ShaderError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "vertex" | "vert" => Ok(ShaderStage::Vertex),
            "fragment" | "frag" => Ok(ShaderStage::Fragment),
            _ => Err(ShaderError::InvalidStage(tag.to_string())),
        }
    }
}
