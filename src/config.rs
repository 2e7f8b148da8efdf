use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::Resolution,
        error::{LensError, LensResult},
    },
    render::RenderOpts,
    texture::{Filter, Texture, load_texture},
};

/// JSON description of a transition render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionConfig {
    /// Outgoing image, shown outside the bubble.
    pub from: PathBuf,
    /// Incoming image, revealed inside the bubble.
    pub to: PathBuf,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

fn default_parallel() -> bool {
    true
}

/// Both images of a transition, decoded.
#[derive(Clone, Debug)]
pub struct LoadedTextures {
    pub from: Texture,
    pub to: Texture,
}

impl TransitionConfig {
    pub fn from_json_str(s: &str) -> LensResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> LensResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> LensResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LensError::validation("config width/height must be > 0"));
        }
        if !self.progress.is_finite() {
            return Err(LensError::validation("config progress must be finite"));
        }
        if self.threads == Some(0) {
            return Err(LensError::validation("config threads must be >= 1 when set"));
        }
        if self.from.as_os_str().is_empty() || self.to.as_os_str().is_empty() {
            return Err(LensError::validation("config from/to paths must be non-empty"));
        }
        Ok(())
    }

    pub fn resolution(&self) -> LensResult<Resolution> {
        Resolution::new(self.width, self.height)
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            filter: self.filter,
            parallel: self.parallel,
            threads: self.threads,
        }
    }

    /// Decode both images, resolving relative paths against `root`.
    pub fn load_textures(&self, root: &Path) -> LensResult<LoadedTextures> {
        Ok(LoadedTextures {
            from: load_texture(&resolve(root, &self.from))?,
            to: load_texture(&resolve(root, &self.to))?,
        })
    }
}

fn resolve(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}
