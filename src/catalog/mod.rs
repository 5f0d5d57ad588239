//! Static, hand-authored description of the API parameters taught by the app.
//!
//! The catalog is bundled into the binary as TOML and validated once at load
//! time. After that it is immutable: sessions only ever borrow from it.

pub mod category;
pub mod error;
pub mod parameter;
pub mod quiz;

use std::collections::HashSet;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};

pub use category::{CategoryFilter, CategoryMetadata};
pub use error::CatalogError;
pub use parameter::{Control, ControlKind, Example, ParameterDescriptor};
pub use quiz::QuizQuestion;

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

const PARAMETERS_FILE: &str = "parameters.toml";
const CATEGORIES_FILE: &str = "categories.toml";
const QUIZ_FILE: &str = "quiz.toml";

#[derive(Deserialize)]
struct ParametersDoc {
    #[serde(default)]
    parameter: Vec<ParameterDescriptor>,
}

#[derive(Deserialize)]
struct CategoriesDoc {
    #[serde(default)]
    category: Vec<CategoryMetadata>,
}

#[derive(Deserialize)]
struct QuizDoc {
    #[serde(default)]
    question: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Catalog {
    pub parameters: Vec<ParameterDescriptor>,
    pub categories: Vec<CategoryMetadata>,
    pub questions: Vec<QuizQuestion>,
}

impl Catalog {
    /// Load the catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        let parameters = asset_text(PARAMETERS_FILE)?;
        let categories = asset_text(CATEGORIES_FILE)?;
        let questions = asset_text(QUIZ_FILE)?;
        Self::from_toml(&parameters, &categories, &questions)
    }

    pub fn from_toml(
        parameters: &str,
        categories: &str,
        questions: &str,
    ) -> Result<Self, CatalogError> {
        let parameters: ParametersDoc =
            toml::from_str(parameters).map_err(|source| CatalogError::Parse {
                file: PARAMETERS_FILE,
                source,
            })?;
        let categories: CategoriesDoc =
            toml::from_str(categories).map_err(|source| CatalogError::Parse {
                file: CATEGORIES_FILE,
                source,
            })?;
        let questions: QuizDoc = toml::from_str(questions).map_err(|source| CatalogError::Parse {
            file: QUIZ_FILE,
            source,
        })?;

        let catalog = Self {
            parameters: parameters.parameter,
            categories: categories.category,
            questions: questions.question,
        };
        catalog.validate()?;
        tracing::debug!(
            parameters = catalog.parameters.len(),
            categories = catalog.categories.len(),
            questions = catalog.questions.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.parameters.is_empty() {
            return Err(CatalogError::NoParameters);
        }
        if self.questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }

        let mut category_keys = HashSet::new();
        for category in &self.categories {
            if !category_keys.insert(category.key.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.key.clone()));
            }
        }

        let mut ids = HashSet::new();
        for param in &self.parameters {
            if !ids.insert(param.id.as_str()) {
                return Err(CatalogError::DuplicateParameter(param.id.clone()));
            }
            if !category_keys.contains(param.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    parameter: param.id.clone(),
                    category: param.category.clone(),
                });
            }
            validate_control(param)?;
        }

        for (index, question) in self.questions.iter().enumerate() {
            if !ids.contains(question.answer.as_str()) {
                return Err(CatalogError::UnknownAnswer {
                    index,
                    answer: question.answer.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.id == id)
    }

    pub fn category(&self, key: &str) -> Option<&CategoryMetadata> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Parameters visible under `filter`, in catalog order.
    pub fn filtered(&self, filter: &CategoryFilter) -> Vec<&ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(|p| filter.matches(&p.category))
            .collect()
    }

    pub fn question(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

fn asset_text(name: &str) -> Result<String, CatalogError> {
    let file = CatalogAssets::get(name).ok_or_else(|| CatalogError::MissingAsset(name.to_string()))?;
    String::from_utf8(file.data.into_owned()).map_err(|_| CatalogError::InvalidUtf8(name.to_string()))
}

fn validate_control(param: &ParameterDescriptor) -> Result<(), CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidControl {
        parameter: param.id.clone(),
        reason,
    };

    match &param.control {
        Control::Slider { min, max, step, .. } | Control::Number { min, max, step, .. } => {
            if min > max {
                return Err(invalid(format!("min {min} is greater than max {max}")));
            }
            if *step <= 0.0 {
                return Err(invalid(format!("step must be positive, got {step}")));
            }
        }
        Control::Select { options, default } => {
            if options.is_empty() {
                return Err(invalid("select has no options".to_string()));
            }
            if !options.contains(default) {
                return Err(invalid(format!("default '{default}' is not an option")));
            }
        }
        Control::Text { .. } | Control::Json { .. } => {}
    }
    Ok(())
}
