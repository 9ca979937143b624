//! Language model loader
//!
//! Loads and validates the YAML lexicon that drives the built-in parser.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AnalysisError;

/// Environment variable naming an explicit language model file.
pub const MODEL_ENV_VAR: &str = "RULE_NLU_MODEL";

/// Model compiled into the binary; used when no explicit file is configured.
const BUILTIN_MODEL: &str = include_str!("../../config/model/en_rules.yaml");

/// Closed-class word lists for the shallow parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageModel {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub determiners: Vec<String>,

    #[serde(default)]
    pub prepositions: Vec<String>,

    #[serde(default)]
    pub pronouns: Vec<String>,

    #[serde(default)]
    pub conjunctions: Vec<String>,

    #[serde(default)]
    pub adverbs: Vec<String>,

    #[serde(default)]
    pub adjectives: Vec<String>,

    #[serde(default)]
    pub verbs: Vec<String>,
}

impl LanguageModel {
    /// Parse a model from YAML. `origin` names the source in error messages.
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self, AnalysisError> {
        let model: LanguageModel =
            serde_yaml::from_str(content).map_err(|source| AnalysisError::ModelParse {
                origin: origin.to_string(),
                source,
            })?;
        model.validate()?;
        Ok(model)
    }

    /// Word classes in a fixed order, paired with their class name.
    pub fn classes(&self) -> [(&'static str, &[String]); 7] {
        [
            ("determiners", self.determiners.as_slice()),
            ("prepositions", self.prepositions.as_slice()),
            ("pronouns", self.pronouns.as_slice()),
            ("conjunctions", self.conjunctions.as_slice()),
            ("adverbs", self.adverbs.as_slice()),
            ("adjectives", self.adjectives.as_slice()),
            ("verbs", self.verbs.as_slice()),
        ]
    }

    fn validate(&self) -> Result<(), AnalysisError> {
        let invalid = |reason: String| AnalysisError::InvalidModel {
            model: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("model name is empty".to_string()));
        }
        if self.prepositions.is_empty() {
            return Err(invalid("no prepositions defined".to_string()));
        }
        if self.verbs.is_empty() {
            return Err(invalid("no verbs defined".to_string()));
        }

        // A word may repeat within its class but must not span two classes
        let mut owner: HashMap<String, &'static str> = HashMap::new();
        for (class, words) in self.classes() {
            for word in words {
                let key = word.trim().to_lowercase();
                if key.is_empty() {
                    return Err(invalid(format!("empty word in {}", class)));
                }
                if let Some(existing) = owner.get(&key) {
                    if *existing != class {
                        return Err(invalid(format!(
                            "'{}' listed under both {} and {}",
                            key, existing, class
                        )));
                    }
                    continue;
                }
                owner.insert(key, class);
            }
        }

        Ok(())
    }
}

/// Where a model is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Builtin,
    File(PathBuf),
}

/// Resolves and loads a [`LanguageModel`].
#[derive(Debug, Clone)]
pub struct ModelLoader {
    source: ModelSource,
}

impl ModelLoader {
    pub fn builtin() -> Self {
        Self {
            source: ModelSource::Builtin,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ModelSource::File(path.into()),
        }
    }

    /// Create loader from RULE_NLU_MODEL env var or default to the built-in model
    pub fn from_env() -> Self {
        match std::env::var_os(MODEL_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::from_path(PathBuf::from(path)),
            _ => Self::builtin(),
        }
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn load(&self) -> Result<LanguageModel, AnalysisError> {
        let model = match &self.source {
            ModelSource::Builtin => LanguageModel::from_yaml(BUILTIN_MODEL, "builtin")?,
            ModelSource::File(path) => Self::load_file(path)?,
        };

        info!(
            model = %model.name,
            version = model.version.as_deref().unwrap_or("unversioned"),
            verbs = model.verbs.len(),
            prepositions = model.prepositions.len(),
            "Loaded language model"
        );

        Ok(model)
    }

    fn load_file(path: &Path) -> Result<LanguageModel, AnalysisError> {
        info!("Loading language model from {}", path.display());

        if !path.is_file() {
            return Err(AnalysisError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::ModelRead {
            path: path.to_path_buf(),
            source,
        })?;

        LanguageModel::from_yaml(&content, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_model_loads() {
        let model = ModelLoader::builtin().load().unwrap();
        assert_eq!(model.name, "en_rules_sm");
        assert!(model.prepositions.iter().any(|p| p == "for"));
        assert!(model.verbs.iter().any(|v| v == "create"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ModelLoader::from_path("/definitely/not/here.yaml")
            .load()
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ModelNotFound { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: [unclosed").unwrap();

        let err = ModelLoader::from_path(file.path()).load().unwrap_err();
        assert!(matches!(err, AnalysisError::ModelParse { .. }));
    }

    #[test]
    fn test_model_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name: tiny\nprepositions: [for]\nverbs: [create]").unwrap();

        let model = ModelLoader::from_path(file.path()).load().unwrap();
        assert_eq!(model.name, "tiny");
        assert!(model.determiners.is_empty());
    }

    #[test]
    fn test_rejects_word_in_two_classes() {
        let err = LanguageModel::from_yaml(
            "name: clash\nprepositions: [for]\nverbs: [create, FOR]",
            "inline",
        )
        .unwrap_err();

        match err {
            AnalysisError::InvalidModel { reason, .. } => {
                assert!(reason.contains("'for'"), "unexpected reason: {}", reason)
            }
            other => panic!("Expected InvalidModel, got {:?}", other),
        }
    }

    #[test]
    fn test_allows_repeat_within_class() {
        let model =
            LanguageModel::from_yaml("name: rep\nprepositions: [for, for]\nverbs: [make]", "inline")
                .unwrap();
        assert_eq!(model.prepositions.len(), 2);
    }

    #[test]
    fn test_rejects_missing_verbs() {
        let err = LanguageModel::from_yaml("name: noverbs\nprepositions: [for]", "inline")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidModel { .. }));
    }
}
