use super::*;
use crate::field::{ElementHandle, InputKind};

#[test]
fn test_analyze_request_parsing() {
    let request: ContentRequest =
        serde_json::from_str(r#"{"action": "ANALYZE_FORM", "isWorkday": true}"#).unwrap();
    match request {
        ContentRequest::AnalyzeForm { is_workday } => assert_eq!(is_workday, Some(true)),
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_analyze_request_without_hint() {
    let request: ContentRequest = serde_json::from_str(r#"{"action": "ANALYZE_FORM"}"#).unwrap();
    assert!(matches!(request, ContentRequest::AnalyzeForm { is_workday: None }));
    assert_eq!(request.action(), "ANALYZE_FORM");
}

#[test]
fn test_autofill_request_parsing() {
    let json = serde_json::json!({
        "action": "AUTOFILL_FORM",
        "profile": {"personal": {"firstName": "Ada"}},
        "isWorkday": false
    });
    let request: ContentRequest = serde_json::from_value(json).unwrap();
    match request {
        ContentRequest::AutofillForm { profile, is_workday } => {
            assert_eq!(profile.personal.first_name.as_deref(), Some("Ada"));
            assert_eq!(is_workday, Some(false));
        }
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_legacy_request_accepts_user_data() {
    let json = serde_json::json!({
        "action": "autofill",
        "userData": {"personal": {"email": "ada@x.com"}}
    });
    let request: ContentRequest = serde_json::from_value(json).unwrap();
    assert_eq!(request.action(), "autofill");
}

#[test]
fn test_unknown_action_rejected() {
    let result = serde_json::from_str::<ContentRequest>(r#"{"action": "CHECK_JOB_SITE"}"#);
    assert!(result.is_err());
}

#[test]
fn test_autofill_response_shape() {
    let json = serde_json::to_value(AutofillResponse::completed(3)).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "fieldsFilledCount": 3}));

    let failed = AutofillResponse::failed("Page unloaded");
    assert!(!failed.success);
    assert_eq!(failed.fields_filled_count, 0);
}

#[test]
fn test_legacy_response_from_count() {
    let filled = LegacyAutofillResponse::from_count(2);
    assert!(filled.success);
    assert_eq!(filled.message.as_deref(), Some("Filled 2 fields"));

    let none = LegacyAutofillResponse::from_count(0);
    assert!(!none.success);
    assert_eq!(none.error.as_deref(), Some("No matching fields found"));
}

#[test]
fn test_content_response_untagged_parsing() {
    let mut field = FieldDescriptor::new(InputKind::Text, ElementHandle::new(1, 5));
    field.name = "first_name".to_string();
    let analyze = ContentResponse::Analyze(AnalyzeResponse { fields: vec![field] });
    let json = serde_json::to_string(&analyze).unwrap();
    let back: ContentResponse = serde_json::from_str(&json).unwrap();
    assert!(matches!(back, ContentResponse::Analyze(ref r) if r.fields.len() == 1));

    let autofill: ContentResponse =
        serde_json::from_str(r#"{"success": true, "fieldsFilledCount": 0}"#).unwrap();
    assert!(matches!(autofill, ContentResponse::Autofill(_)));

    let legacy: ContentResponse =
        serde_json::from_str(r#"{"success": false, "error": "No matching fields found"}"#)
            .unwrap();
    assert!(matches!(legacy, ContentResponse::Legacy(_)));
}
