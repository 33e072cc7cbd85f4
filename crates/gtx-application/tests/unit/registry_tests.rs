//! Provider factory registry tests

use gtx_application::ports::registry::{
    TRANSLATION_PROVIDERS, list_translation_providers, resolve_translation_provider,
};
use gtx_domain::{ContentPolicy, ProviderConfig, TranslationOutcome};

use crate::test_utils::request;

#[test]
fn test_registry_contains_linked_adapters() {
    assert!(!TRANSLATION_PROVIDERS.is_empty());
    let kinds: Vec<&str> = list_translation_providers()
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert!(kinds.contains(&"null"));
    assert!(kinds.contains(&"openai"));

    let mut sorted = kinds.clone();
    sorted.sort_unstable();
    assert_eq!(kinds, sorted);
}

#[tokio::test]
async fn test_resolve_null_adapter() {
    let provider = resolve_translation_provider(&ProviderConfig::new("dry-run", "null"))
        .expect("null adapter should resolve");
    assert_eq!(provider.provider_name(), "null");

    let outcome = provider
        .translate(&request(&["一", "二"], ContentPolicy::Strict))
        .await;
    assert_eq!(
        outcome,
        TranslationOutcome::Success(vec!["一".to_string(), "二".to_string()])
    );
}

#[test]
fn test_resolve_unknown_kind() {
    let result = resolve_translation_provider(&ProviderConfig::new("p", "telepathy"));
    let Err(message) = result else {
        panic!("unknown kind should not resolve");
    };
    assert!(message.contains("telepathy"));
    assert!(message.contains("'p'"));
}
