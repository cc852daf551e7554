use std::path::{Path, PathBuf};

use crate::error::{ModelKind, PipelineError};
use crate::shared::constants::{AGE_MODEL_NAME, FACE_MODEL_NAME, GENDER_MODEL_NAME, MODELS_DIR_NAME};

/// Locations of the three network files inside one models directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelPaths {
    models_dir: PathBuf,
}

impl ModelPaths {
    pub fn in_dir(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    /// Resolves `models/` next to the install root of the running executable.
    ///
    /// The install root is the parent of the directory holding the binary
    /// (`<root>/bin/agegender` → `<root>/models`). Falls back to `./models`
    /// when the executable path is unavailable.
    pub fn from_install_root() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| install_root_models_dir(&exe))
            .unwrap_or_else(|| PathBuf::from(MODELS_DIR_NAME));
        Self::in_dir(dir)
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn path_for(&self, model: ModelKind) -> PathBuf {
        let name = match model {
            ModelKind::FaceDetector => FACE_MODEL_NAME,
            ModelKind::Age => AGE_MODEL_NAME,
            ModelKind::Gender => GENDER_MODEL_NAME,
        };
        self.models_dir.join(name)
    }

    /// Checks every model file exists and is a regular file.
    ///
    /// Checked in load order (age, gender, face detector); the first missing
    /// file is reported.
    pub fn verify(&self) -> Result<(), PipelineError> {
        for model in [ModelKind::Age, ModelKind::Gender, ModelKind::FaceDetector] {
            let path = self.path_for(model);
            if !path.is_file() {
                return Err(self.load_error(model, "file not found"));
            }
        }
        Ok(())
    }

    pub fn load_error(&self, model: ModelKind, reason: impl Into<String>) -> PipelineError {
        PipelineError::ModelLoad {
            model,
            path: self.path_for(model),
            models_dir: self.models_dir.clone(),
            reason: reason.into(),
        }
    }
}

fn install_root_models_dir(exe: &Path) -> Option<PathBuf> {
    let bin_dir = exe.parent()?;
    let root = bin_dir.parent().unwrap_or(bin_dir);
    Some(root.join(MODELS_DIR_NAME))
}
