use super::*;

#[test]
fn test_input_kind_from_element() {
    assert_eq!(InputKind::from_element("select", Some("text")), InputKind::Select);
    assert_eq!(InputKind::from_element("TEXTAREA", None), InputKind::Textarea);
    assert_eq!(InputKind::from_element("input", None), InputKind::Text);
    assert_eq!(InputKind::from_element("input", Some("EMAIL")), InputKind::Email);
    assert_eq!(InputKind::from_element("input", Some("bogus")), InputKind::Text);
    assert_eq!(
        InputKind::from_element("input", Some("color")),
        InputKind::Other("color".to_string())
    );
}

#[test]
fn test_input_kind_families() {
    assert!(InputKind::Textarea.is_text_like());
    assert!(InputKind::Tel.is_text_like());
    assert!(!InputKind::Date.is_text_like());
    assert!(InputKind::Date.is_fillable());
    assert!(InputKind::Radio.is_fillable());
    assert!(!InputKind::File.is_fillable());
    assert!(!InputKind::Hidden.is_fillable());
    assert!(!InputKind::Other("range".to_string()).is_fillable());
}

#[test]
fn test_input_kind_serde_as_string() {
    let json = serde_json::to_string(&InputKind::Checkbox).unwrap();
    assert_eq!(json, "\"checkbox\"");
    let kind: InputKind = serde_json::from_str("\"tel\"").unwrap();
    assert_eq!(kind, InputKind::Tel);
}

#[test]
fn test_identifiers_generic_mode() {
    let mut field = FieldDescriptor::new(InputKind::Text, ElementHandle::default());
    field.id = "First_Name".to_string();
    field.name = "first_name".to_string();
    field.label = "  ".to_string();
    field.automation_id = Some("legalName--firstName".to_string());

    let ids = field.identifiers(SiteVariant::Generic);
    assert_eq!(ids, vec!["first_name".to_string()]);
}

#[test]
fn test_identifiers_workday_mode_adds_ats_ids() {
    let mut field = FieldDescriptor::new(InputKind::Text, ElementHandle::default());
    field.automation_id = Some("legalName--firstName".to_string());
    field.field_group = Some("legalName".to_string());
    field.field_name = Some("firstName".to_string());

    let ids = field.identifiers(SiteVariant::Workday);
    assert_eq!(
        ids,
        vec![
            "legalname--firstname".to_string(),
            "legalname".to_string(),
            "firstname".to_string(),
        ]
    );
}

#[test]
fn test_descriptor_serialization_drops_handle() {
    let mut field = FieldDescriptor::new(InputKind::Email, ElementHandle::new(7, 42));
    field.name = "email".to_string();

    let json = serde_json::to_value(&field).unwrap();
    assert_eq!(json["type"], "email");
    assert!(json.get("handle").is_none());
    assert!(json.get("automationId").is_none());

    let back: FieldDescriptor = serde_json::from_value(json).unwrap();
    assert!(back.handle.is_detached());
    assert_eq!(back.name, "email");
}

#[test]
fn test_display_name_fallbacks() {
    let mut field = FieldDescriptor::new(InputKind::Tel, ElementHandle::default());
    assert_eq!(field.display_name(), "tel");
    field.id = "phone".to_string();
    assert_eq!(field.display_name(), "phone");
    field.name = "phone_number".to_string();
    assert_eq!(field.display_name(), "phone_number");
}

#[test]
fn test_site_variant_from_flag() {
    assert_eq!(SiteVariant::from_flag(true), SiteVariant::Workday);
    assert_eq!(SiteVariant::from_flag(false), SiteVariant::Generic);
    assert!(!SiteVariant::default().is_workday());
}
