//! # Localization Tests
//!
//! This module contains unit tests for the localization functionality,
//! testing message retrieval and formatting with various edge cases.

use food_additives::harmfulness::SeverityLevel;
use food_additives::localization::{
    create_localization_manager, LocalizationManager, SUPPORTED_LANGUAGES,
};
use std::collections::HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_localization() -> LocalizationManager {
        create_localization_manager().expect("Failed to create localization manager")
    }

    #[test]
    fn test_get_message_existing_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("report-no-matches", "en", None);
        assert_eq!(message, "No known additives were found.");
    }

    #[test]
    fn test_get_message_nonexistent_key() {
        let manager = setup_localization();

        let message = manager.get_message_in_language("nonexistent-key", "en", None);
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_get_message_unsupported_language() {
        let manager = setup_localization();

        // Should fall back to English
        let message = manager.get_message_in_language("report-no-input", "de", None);
        assert_eq!(message, "No ingredients were provided.");
    }

    #[test]
    fn test_get_message_with_args() {
        let manager = setup_localization();

        let mut args = HashMap::new();
        args.insert("count", "3");

        let message = manager.get_message_in_language("report-found", "en", Some(&args));
        assert_eq!(message, "Additives found: 3");

        let message = manager.get_message_with_args_in_language("report-found", "fr", &[("count", "2")]);
        assert_eq!(message, "Additifs trouvés : 2");
    }

    #[test]
    fn test_every_tier_is_translated() {
        let manager = setup_localization();

        for language in SUPPORTED_LANGUAGES {
            for level in SeverityLevel::ALL {
                let message = manager.get_message_in_language(&level.message_key(), language, None);
                assert!(
                    !message.starts_with("Missing"),
                    "{} missing for {}",
                    level.message_key(),
                    language
                );
            }
        }
    }

    #[test]
    fn test_french_tier_description() {
        let manager = setup_localization();
        let message = manager.get_message_in_language(
            &SeverityLevel::PossiblyCarcinogenic.message_key(),
            "fr",
            None,
        );
        assert!(message.contains("cancérigènes"));
    }

    #[test]
    fn test_detect_language() {
        let manager = setup_localization();

        assert_eq!(manager.detect_language(Some("fr")), "fr");
        assert_eq!(manager.detect_language(Some("fr-FR")), "fr");
        assert_eq!(manager.detect_language(Some("FR_ca")), "fr");
        assert_eq!(manager.detect_language(Some("en-US")), "en");
        assert_eq!(manager.detect_language(Some("de")), "en");
        assert_eq!(manager.detect_language(None), "en");
    }

    #[test]
    fn test_supported_languages() {
        let manager = setup_localization();
        assert!(manager.is_language_supported("en"));
        assert!(manager.is_language_supported("fr"));
        assert!(!manager.is_language_supported("es"));
    }
}
