//! Persisting rendered charts under their fixed file names.

use crate::chart::ChartSpec;
use crate::error::{ChartError, RenderError};
use crate::render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes charts into a single output directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Final location of `spec` in the output directory.
    pub fn path_for(&self, spec: &ChartSpec) -> PathBuf {
        self.dir.join(spec.file_name)
    }

    /// Render `spec` and move it into place, overwriting any earlier run.
    ///
    /// The image is first rendered to a hidden sibling file, so a failed
    /// render leaves a previous chart untouched and never a partial one.
    pub fn write<R: Renderer + ?Sized>(&self, spec: &ChartSpec, renderer: &R) -> Result<PathBuf, ChartError> {
        let path = self.path_for(spec);
        let staging = self.dir.join(format!(".partial-{}", spec.file_name));

        let result = fs::create_dir_all(&self.dir)
            .map_err(RenderError::from)
            .and_then(|_| renderer.render(spec, &staging))
            .and_then(|_| fs::rename(&staging, &path).map_err(RenderError::from));

        match result {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "chart written");
                Ok(path)
            }
            Err(source) => {
                // the staging file may not exist; nothing to report if so
                let _ = fs::remove_file(&staging);
                Err(ChartError::WriteFailed { path, source })
            }
        }
    }
}
