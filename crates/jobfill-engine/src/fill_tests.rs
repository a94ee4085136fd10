use super::*;
use jobfill_dom::Document;

fn page(body: &str) -> Document {
    Document::parse(&format!("<html><body>{body}</body></html>"))
}

fn descriptor(document: &Document, id: &str) -> FieldDescriptor {
    let node = document.by_id(id).unwrap();
    let kind = InputKind::from_element(
        document.tag_name(node).unwrap(),
        document.attr(node, "type"),
    );
    let mut field = FieldDescriptor::new(kind, document.handle(node));
    field.id = id.to_string();
    field
}

fn fill(
    document: &mut Document,
    id: &str,
    value: ResolvedValue,
    options: FillOptions,
) -> Result<FillOutcome, FillError> {
    let field = descriptor(document, id);
    FillExecutor::new(document, options).fill(&field, &value)
}

#[test]
fn test_text_write_emits_input_and_change() {
    let mut document = page(r#"<input id="fn">"#);
    let outcome = fill(&mut document, "fn", "Ada".into(), FillOptions::default()).unwrap();
    assert_eq!(outcome, FillOutcome::Written);

    let node = document.by_id("fn").unwrap();
    assert_eq!(document.value(node), "Ada");
    assert_eq!(
        document.events_for(node),
        vec![EventKind::Input, EventKind::Change]
    );
    assert!(document.events().iter().all(|e| e.bubbles));
}

#[test]
fn test_workday_event_sequence() {
    let mut document = page(r#"<input id="fn"><select id="st"><option>CA</option></select>"#);
    let options = FillOptions {
        variant: SiteVariant::Workday,
        ..Default::default()
    };
    fill(&mut document, "fn", "Ada".into(), options).unwrap();
    fill(&mut document, "st", "CA".into(), options).unwrap();

    let text = document.by_id("fn").unwrap();
    assert_eq!(
        document.events_for(text),
        vec![
            EventKind::Focus,
            EventKind::Click,
            EventKind::Input,
            EventKind::Change,
            EventKind::Blur
        ]
    );
    // No synthetic click on non-text controls.
    let select = document.by_id("st").unwrap();
    assert_eq!(
        document.events_for(select),
        vec![
            EventKind::Focus,
            EventKind::Input,
            EventKind::Change,
            EventKind::Blur
        ]
    );
    assert_eq!(document.active_element(), None);
}

#[test]
fn test_value_rendering_for_text() {
    let mut document = page(r#"<textarea id="skills"></textarea><input id="cur"><input id="d">"#);
    let list = ResolvedValue::List(vec!["Rust".to_string(), "SQL".to_string()]);
    fill(&mut document, "skills", list, FillOptions::default()).unwrap();
    fill(&mut document, "cur", ResolvedValue::Bool(false), FillOptions::default()).unwrap();
    fill(
        &mut document,
        "d",
        ResolvedValue::from_date_str("2019-06-15"),
        FillOptions::default(),
    )
    .unwrap();

    assert_eq!(document.value(document.by_id("skills").unwrap()), "Rust, SQL");
    assert_eq!(document.value(document.by_id("cur").unwrap()), "No");
    assert_eq!(document.value(document.by_id("d").unwrap()), "2019-06-15");
}

#[test]
fn test_existing_text_is_kept_unless_overwrite() {
    let mut document = page(r#"<input id="e" value="old@x.com">"#);
    let outcome = fill(&mut document, "e", "new@x.com".into(), FillOptions::default()).unwrap();
    assert_eq!(outcome, FillOutcome::AlreadyFilled);
    let node = document.by_id("e").unwrap();
    assert_eq!(document.value(node), "old@x.com");
    assert!(document.events_for(node).is_empty());

    let options = FillOptions {
        overwrite_existing: true,
        ..Default::default()
    };
    fill(&mut document, "e", "new@x.com".into(), options).unwrap();
    assert_eq!(document.value(node), "new@x.com");
}

#[test]
fn test_select_passes() {
    let mut document = page(
        r#"<select id="st">
             <option value="">Choose...</option>
             <option value="NY">New York</option>
             <option value="CA">California</option>
           </select>"#,
    );
    let select = document.by_id("st").unwrap();

    fill(&mut document, "st", "california".into(), FillOptions::default()).unwrap();
    assert_eq!(document.value(select), "CA");

    fill(&mut document, "st", "NY".into(), FillOptions::default()).unwrap();
    assert_eq!(document.value(select), "NY");

    fill(&mut document, "st", "Calif".into(), FillOptions::default()).unwrap();
    assert_eq!(document.value(select), "CA");
}

#[test]
fn test_select_list_candidates_in_order() {
    let mut document = page(
        r#"<select id="lang"><option>German</option><option>French</option></select>"#,
    );
    let value = ResolvedValue::List(vec!["Klingon".to_string(), "French".to_string()]);
    fill(&mut document, "lang", value, FillOptions::default()).unwrap();
    assert_eq!(document.value(document.by_id("lang").unwrap()), "French");
}

#[test]
fn test_select_without_match() {
    let mut document = page(r#"<select id="st"><option value="NY">New York</option></select>"#);
    let err = fill(&mut document, "st", "Atlantis".into(), FillOptions::default()).unwrap_err();
    assert_eq!(
        err,
        FillError::NoMatchingOption {
            field: "st".to_string(),
            value: "Atlantis".to_string()
        }
    );
    assert!(document.events().is_empty());
}

#[test]
fn test_checkbox_bool_and_value() {
    let mut document = page(
        r#"<input type="checkbox" id="current">
           <input type="checkbox" id="relocate" value="yes">"#,
    );
    fill(&mut document, "current", ResolvedValue::Bool(true), FillOptions::default()).unwrap();
    assert!(document.is_checked(document.by_id("current").unwrap()));

    fill(&mut document, "current", ResolvedValue::Bool(false), FillOptions::default()).unwrap();
    assert!(!document.is_checked(document.by_id("current").unwrap()));

    fill(&mut document, "relocate", "yes".into(), FillOptions::default()).unwrap();
    assert!(document.is_checked(document.by_id("relocate").unwrap()));

    let err = fill(&mut document, "relocate", "Maybe".into(), FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::NoMatchingChoice { .. }));
    assert!(!document.is_checked(document.by_id("relocate").unwrap()));
}

#[test]
fn test_checkbox_value_compares_exactly() {
    let mut document = page(
        r#"<input type="checkbox" id="relocate" value="yes" checked>
           <input type="checkbox" id="remote" value="yes">
           <input type="checkbox" id="agree">"#,
    );
    let err = fill(&mut document, "relocate", "Maybe".into(), FillOptions::default()).unwrap_err();
    assert_eq!(
        err,
        FillError::NoMatchingChoice {
            field: "relocate".to_string(),
            value: "Maybe".to_string()
        }
    );
    assert!(!document.is_checked(document.by_id("relocate").unwrap()));

    let err = fill(&mut document, "remote", "YES".into(), FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::NoMatchingChoice { .. }));
    assert!(!document.is_checked(document.by_id("remote").unwrap()));

    fill(&mut document, "agree", "on".into(), FillOptions::default()).unwrap();
    assert!(document.is_checked(document.by_id("agree").unwrap()));
}

#[test]
fn test_radio_value_compares_exactly() {
    let mut document = page(r#"<input type="radio" name="lang" id="en" value="English">"#);
    let err = fill(&mut document, "en", "english".into(), FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::NoMatchingChoice { .. }));
    assert!(!document.is_checked(document.by_id("en").unwrap()));
}

#[test]
fn test_radio_checks_matching_value() {
    let mut document = page(
        r#"<form>
             <input type="radio" name="lang" id="en" value="English">
             <input type="radio" name="lang" id="fr" value="French" checked>
           </form>"#,
    );
    let value = ResolvedValue::List(vec!["English".to_string()]);
    fill(&mut document, "en", value.clone(), FillOptions::default()).unwrap();
    assert!(document.is_checked(document.by_id("en").unwrap()));
    assert!(!document.is_checked(document.by_id("fr").unwrap()));

    let err = fill(&mut document, "fr", value, FillOptions::default()).unwrap_err();
    assert!(matches!(err, FillError::NoMatchingChoice { .. }));
}

#[test]
fn test_not_editable() {
    let mut document = page(r#"<fieldset disabled><input id="a"></fieldset><input id="b" readonly>"#);
    assert_eq!(
        fill(&mut document, "a", "x".into(), FillOptions::default()),
        Err(FillError::NotEditable("a".to_string()))
    );
    assert_eq!(
        fill(&mut document, "b", "x".into(), FillOptions::default()),
        Err(FillError::NotEditable("b".to_string()))
    );
}

#[test]
fn test_unsupported_kind_and_blank_value() {
    let mut document = page(r#"<input type="file" id="cv"><input id="t">"#);
    assert_eq!(
        fill(&mut document, "cv", "resume.pdf".into(), FillOptions::default()),
        Err(FillError::UnsupportedKind("file".to_string()))
    );
    assert_eq!(
        fill(&mut document, "t", "   ".into(), FillOptions::default()),
        Err(FillError::EmptyValue("t".to_string()))
    );
}

#[test]
fn test_stale_handles() {
    let mut document = page(r#"<input id="gone"><input id="kept">"#);
    let field = descriptor(&document, "gone");
    document.remove(document.by_id("gone").unwrap()).unwrap();

    let mut executor = FillExecutor::new(&mut document, FillOptions::default());
    let err = executor.fill(&field, &"x".into()).unwrap_err();
    assert!(matches!(err, FillError::StaleHandle(_)));

    // Handles from another document never resolve here.
    let other = page(r#"<input id="kept">"#);
    let foreign = descriptor(&other, "kept");
    let err = executor.fill(&foreign, &"x".into()).unwrap_err();
    assert!(matches!(err, FillError::StaleHandle(_)));

    // The document is still usable afterwards.
    let kept = descriptor(&document, "kept");
    let mut executor = FillExecutor::new(&mut document, FillOptions::default());
    assert_eq!(executor.fill(&kept, &"x".into()), Ok(FillOutcome::Written));
}
