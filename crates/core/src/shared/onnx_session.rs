use ort::session::Session;

use crate::error::{ModelKind, PipelineError};
use crate::shared::model_paths::ModelPaths;

/// Return the preferred ONNX execution providers for the current platform.
///
/// Falls back to CPU if the platform-specific provider is unavailable.
pub fn preferred_execution_providers() -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

/// Loads one network into an inference session.
///
/// Sessions are created once at startup and never reloaded; any failure
/// becomes a `ModelLoad` error naming the models directory.
pub fn load_session(paths: &ModelPaths, model: ModelKind) -> Result<Session, PipelineError> {
    let path = paths.path_for(model);
    if !path.is_file() {
        return Err(paths.load_error(model, "file not found"));
    }
    build_session(&path).map_err(|e| paths.load_error(model, e.to_string()))
}

fn build_session(path: &std::path::Path) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::builder()?
        .with_execution_providers(preferred_execution_providers())?
        .commit_from_file(path)?;
    log::debug!(
        "Loaded {} ({} input(s), {} output(s))",
        path.display(),
        session.inputs().len(),
        session.outputs().len()
    );
    Ok(session)
}
