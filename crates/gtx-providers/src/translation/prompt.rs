//! Prompt construction shared by the LLM adapters

use gtx_domain::{ProviderConfig, TranslationRequest};

use crate::constants::{EXTRA_SYSTEM_PROMPT, EXTRA_VOCABULARY};
use crate::utils::encode_lines;

const DEFAULT_SYSTEM_PROMPT: &str = "\
You are an expert translator and localizer. You will receive lines of text as a JSON object \
whose keys are Line1, Line2, and so on. Translate the value of every key into {language}.

Guidelines:
- Reply with a single JSON object using exactly the same keys. Do not combine, add, or remove lines.
- Convey the intended meaning and tone rather than translating word for word.
- Use consistent translations for recurring terms and names.
- Keep placeholders, markup, escape sequences such as \\n, and surrounding whitespace intact.
- Do not add notes, explanations, or disclaimers.";

/// Builds system and user messages for one provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBuilder {
    template: Option<String>,
    vocabulary: Option<String>,
}

impl PromptBuilder {
    /// Read the prompt override and vocabulary from a provider's `extra` settings
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            template: config.extra(EXTRA_SYSTEM_PROMPT).map(str::to_string),
            vocabulary: config
                .extra(EXTRA_VOCABULARY)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        }
    }

    /// System message for `target_language`
    ///
    /// `{language}` in the template is replaced by the target language.
    pub fn system_prompt(&self, target_language: &str) -> String {
        let template = self.template.as_deref().unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let mut prompt = template.replace("{language}", target_language);
        if let Some(vocabulary) = &self.vocabulary {
            prompt.push_str("\n\n# Vocabulary\n");
            prompt.push_str(vocabulary);
        }
        prompt
    }

    /// User message carrying the line-keyed batch
    pub fn user_message(request: &TranslationRequest) -> String {
        format!(
            "Translate the following JSON into {}:\n{}",
            request.target_language(),
            encode_lines(request.texts())
        )
    }
}
