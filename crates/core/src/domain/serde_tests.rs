#[cfg(test)]
mod tests {
    use crate::domain::draft::Draft;
    use crate::domain::error::{AppError, ErrorCode};
    use crate::domain::settings::{GenerationSettings, PostLength, Provider, Tone};
    use crate::domain::theme::Theme;
    use crate::domain::types::{GenerateRequest, PromptBundle};

    #[test]
    fn test_provider_serialization() {
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(
            serde_json::to_string(&Provider::Anthropic).unwrap(),
            "\"anthropic\""
        );
        assert!(serde_json::from_str::<Provider>("\"gemini\"").is_err());
    }

    #[test]
    fn test_tone_serialization() {
        for tone in Tone::ALL {
            let json = serde_json::to_string(&tone).unwrap();
            assert_eq!(json, format!("\"{}\"", tone.as_str()));
            assert_eq!(serde_json::from_str::<Tone>(&json).unwrap(), tone);
        }
        assert_eq!(
            serde_json::from_str::<Tone>("\"whimsical\"").unwrap(),
            Tone::Conversational
        );
    }

    #[test]
    fn test_length_serialization() {
        assert_eq!(serde_json::to_string(&PostLength::Short).unwrap(), "1");
        assert_eq!(serde_json::to_string(&PostLength::Long).unwrap(), "3");
        assert_eq!(
            serde_json::from_str::<PostLength>("0").unwrap(),
            PostLength::Medium
        );
    }

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::Validation).unwrap(),
            "\"E_VALIDATION\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::MissingCredential).unwrap(),
            "\"E_CREDENTIAL\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::Provider).unwrap(),
            "\"E_PROVIDER\""
        );
    }

    #[test]
    fn test_app_error_serialization() {
        let err = AppError::validation("Please enter a topic");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("E_VALIDATION"));
        assert!(json.contains("recoverable"));
    }

    #[test]
    fn test_draft_blob_shape() {
        let draft = Draft {
            id: 1_700_000_000_000,
            topic: "Ops".to_string(),
            text: "Body".to_string(),
            date: "11/14/2023".to_string(),
        };
        let json = serde_json::to_value(vec![draft.clone()]).unwrap();
        assert_eq!(json[0]["id"], serde_json::json!(1_700_000_000_000_i64));
        let back: Vec<Draft> = serde_json::from_value(json).unwrap();
        assert_eq!(back, vec![draft]);
    }

    #[test]
    fn test_settings_blob_from_browser_format() {
        let blob = r#"{"provider":"anthropic","openaiKey":"sk-o","anthropicKey":"sk-a",
            "tone":"storytelling","length":1,"useEmoji":false,"useHashtags":true,
            "showPrompts":true,"stylePost":"Short and sharp.","roleContext":"VP Eng"}"#;
        let s: GenerationSettings = serde_json::from_str(blob).unwrap();
        assert_eq!(s.provider, Provider::Anthropic);
        assert_eq!(s.tone, Tone::Storytelling);
        assert_eq!(s.length, PostLength::Short);
        assert!(s.show_prompts);
        assert_eq!(s.role_context, "VP Eng");
    }

    #[test]
    fn test_generate_request_partial_json() {
        let req: GenerateRequest =
            serde_json::from_str(r#"{"topic":"Edge AI","urls":["https://x.example"]}"#).unwrap();
        assert_eq!(req.topic, "Edge AI");
        assert!(!req.infographic);
        assert!(!req.save_draft);
    }

    #[test]
    fn test_prompt_bundle_and_theme_serialization() {
        let json = serde_json::to_string(&PromptBundle::default()).unwrap();
        assert!(json.contains("post_system"));
        assert_eq!(serde_json::to_string(&Theme::RoadSign).unwrap(), "\"roadsign\"");
    }
}
