//! The table of models mdchat knows how to talk to.

use std::fmt::{self, Display};

use crate::cli::ReasoningEffort;
use crate::errors::MdchatError;

/// Which of the two request shapes a model requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    ChatCompletions,
    Responses,
}

impl Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointKind::ChatCompletions => write!(f, "chat/completions"),
            EndpointKind::Responses => write!(f, "responses"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: String,
    pub endpoint: EndpointKind,
    /// Reasoning efforts accepted by this model. Empty for chat-completions models.
    pub reasoning_efforts: Vec<ReasoningEffort>,
}

impl ModelDescriptor {
    pub fn supports_effort(&self, effort: ReasoningEffort) -> bool {
        self.reasoning_efforts.contains(&effort)
    }
}

/// Registry of supported models, built once per invocation.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }

    /// Look up `name`, failing with the list of supported models.
    pub fn resolve(&self, name: &str) -> Result<&ModelDescriptor, MdchatError> {
        self.get(name).ok_or_else(|| MdchatError::UnsupportedModel {
            model: name.to_string(),
            supported: self.names(),
        })
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        use ReasoningEffort as E;

        let mut models = Vec::new();
        let mut insert = |name: &str, endpoint: EndpointKind, efforts: &[ReasoningEffort]| {
            models.push(ModelDescriptor {
                name: name.to_string(),
                endpoint,
                reasoning_efforts: efforts.to_vec(),
            });
        };

        insert("gpt-4o", EndpointKind::ChatCompletions, &[]);
        insert("gpt-4o-mini", EndpointKind::ChatCompletions, &[]);
        insert("gpt-4.1", EndpointKind::ChatCompletions, &[]);
        insert("gpt-4.1-mini", EndpointKind::ChatCompletions, &[]);
        insert("gpt-5", EndpointKind::Responses, &[E::Minimal, E::Low, E::Medium, E::High]);
        insert("gpt-5-mini", EndpointKind::Responses, &[E::Minimal, E::Low, E::Medium, E::High]);
        insert("gpt-5-nano", EndpointKind::Responses, &[E::Minimal, E::Low, E::Medium, E::High]);
        insert("gpt-5.1", EndpointKind::Responses, &[E::None, E::Low, E::Medium, E::High]);
        insert("gpt-5.2", EndpointKind::Responses, &[E::None, E::Low, E::Medium, E::High, E::Xhigh]);

        Self::new(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_lists_supported_names() {
        let registry = ModelRegistry::default();
        let err = registry.resolve("gpt-3").unwrap_err();
        match err {
            MdchatError::UnsupportedModel { model, supported } => {
                assert_eq!(model, "gpt-3");
                assert!(supported.contains(&"gpt-5".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn effort_sets_are_per_model() {
        let registry = ModelRegistry::default();
        let gpt5 = registry.get("gpt-5").unwrap();
        let gpt52 = registry.get("gpt-5.2").unwrap();
        assert!(gpt5.supports_effort(ReasoningEffort::Minimal));
        assert!(!gpt5.supports_effort(ReasoningEffort::Xhigh));
        assert!(gpt52.supports_effort(ReasoningEffort::Xhigh));
        assert!(!gpt52.supports_effort(ReasoningEffort::Minimal));
    }
}
