use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::models::bert;

/// The settings file looked up in the project root
pub static SETTINGS_FILE: &str = "classificador.json";

/// Settings for a classification run. Relative paths are resolved against the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The Hugging Face Hub repository holding the model
    pub model_repo: String,

    /// Local directory holding the model files
    pub model_dir: PathBuf,

    /// Input for single-file mode
    pub text_input: PathBuf,

    /// Report written by single-file mode
    pub text_output: PathBuf,

    /// Input table for batch mode
    pub batch_input: PathBuf,

    /// Table written by batch mode
    pub batch_output: PathBuf,

    /// The column holding the texts to classify
    pub text_column: String,

    /// Fixed length of every encoded sequence
    pub max_seq_length: usize,

    /// Skip CUDA even when it is available
    pub force_cpu: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_repo: bert::DEFAULT_MODEL.to_string(),
            model_dir: PathBuf::from("modelos").join("IA_CGDF"),
            text_input: PathBuf::from("dados").join("texto.txt"),
            text_output: PathBuf::from("resultados").join("texto_classificado.txt"),
            batch_input: PathBuf::from("dados").join("textos.xlsx"),
            batch_output: PathBuf::from("resultados").join("textos_classificados.xlsx"),
            text_column: "textos".to_string(),
            max_seq_length: 512,
            force_cpu: false,
        }
    }
}

impl Settings {
    /// Load the settings for a project root, falling back to the defaults when the root has no
    /// settings file. All paths in the result are absolute (or relative to `root`).
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let file = root.join(SETTINGS_FILE);

        let settings = if file.is_file() {
            let content = std::fs::read_to_string(&file)
                .map_err(|e| anyhow!("Unable to read settings file {}: {}", file.display(), e))?;

            serde_json::from_str::<Settings>(&content)
                .map_err(|e| anyhow!("Invalid settings file {}: {}", file.display(), e))?
        } else {
            Settings::default()
        };

        Ok(settings.resolve(root))
    }

    /// Resolve every relative path against the given root
    pub fn resolve(mut self, root: &Path) -> Self {
        for path in [
            &mut self.model_dir,
            &mut self.text_input,
            &mut self.text_output,
            &mut self.batch_input,
            &mut self.batch_output,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_follow_the_project_layout() {
        let settings = Settings::default().resolve(Path::new("/projeto"));

        assert_eq!(settings.model_repo, "MirandaBiel/IA_CGDF");
        assert_eq!(settings.model_dir, PathBuf::from("/projeto/modelos/IA_CGDF"));
        assert_eq!(settings.text_input, PathBuf::from("/projeto/dados/texto.txt"));
        assert_eq!(
            settings.batch_output,
            PathBuf::from("/projeto/resultados/textos_classificados.xlsx")
        );
        assert_eq!(settings.text_column, "textos");
        assert_eq!(settings.max_seq_length, 512);
    }

    #[test]
    fn partial_settings_file_keeps_defaults() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        std::fs::write(
            root.path().join(SETTINGS_FILE),
            r#"{ "batch_input": "entrada/planilha.csv", "force_cpu": true }"#,
        )?;

        let settings = Settings::load(root.path())?;

        assert_eq!(settings.batch_input, root.path().join("entrada/planilha.csv"));
        assert!(settings.force_cpu);
        assert_eq!(settings.text_column, "textos");
        assert_eq!(settings.model_dir, root.path().join("modelos").join("IA_CGDF"));
        Ok(())
    }

    #[test]
    fn absolute_paths_are_kept() {
        let settings = Settings {
            text_output: PathBuf::from("/tmp/relatorio.txt"),
            ..Settings::default()
        }
        .resolve(Path::new("/projeto"));

        assert_eq!(settings.text_output, PathBuf::from("/tmp/relatorio.txt"));
    }

    #[test]
    fn invalid_settings_file_is_an_error() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        std::fs::write(root.path().join(SETTINGS_FILE), "{ not json")?;

        assert!(Settings::load(root.path()).is_err());
        Ok(())
    }
}
