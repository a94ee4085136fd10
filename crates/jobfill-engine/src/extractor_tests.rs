use super::*;

fn page(body: &str) -> Document {
    Document::parse(&format!("<html><body>{body}</body></html>"))
}

fn names(extraction: &Extraction) -> Vec<&str> {
    extraction
        .fields
        .iter()
        .map(|f| f.display_name())
        .collect()
}

#[test]
fn test_relevance_filter() {
    let document = page(
        r#"<input name="text">
           <input type="email" name="email">
           <input type="checkbox" name="agree">
           <input type="radio" name="choice">
           <input type="date" name="start">
           <select name="state"><option>CA</option></select>
           <textarea name="summary"></textarea>
           <input type="hidden" name="token">
           <input type="submit" name="go">
           <input type="button" name="btn">
           <input type="image" name="img">
           <input type="reset" name="reset">
           <input type="file" name="resume">
           <input type="range" name="slider">
           <input name="disabled" disabled>
           <input name="readonly" readonly>
           <input name="invisible" style="visibility:hidden">
           <input name="transparent" style="opacity:0">
           <div style="display: none"><input name="undisplayed"></div>
           <input name="hidden-attr" hidden>
           <button name="button">Send</button>"#,
    );
    let extraction = FieldExtractor::new(&document, SiteVariant::Generic)
        .extract()
        .unwrap();
    assert_eq!(extraction.strategy, Strategy::DocumentScoped);
    assert_eq!(
        names(&extraction),
        vec!["text", "email", "agree", "choice", "start", "state", "summary"]
    );
}

#[test]
fn test_form_scoped_order_and_dedup() {
    let document = page(
        r#"<input name="outside">
           <form id="one"><input name="a"><input name="b"></form>
           <form id="two"><input name="c"></form>
           <input name="late" form="one">"#,
    );
    let extraction = FieldExtractor::new(&document, SiteVariant::Generic)
        .extract()
        .unwrap();
    assert_eq!(extraction.strategy, Strategy::FormScoped);
    // Forms in document order, each form's controls in DOM order.
    assert_eq!(names(&extraction), vec!["a", "b", "late", "c"]);
}

#[test]
fn test_descriptor_contents() {
    let document = page(
        r#"<form><label for="fn">First Name</label>
           <input id="fn" name="first_name" placeholder="Ada" value="x" data-automation-id="legalName--firstName"></form>"#,
    );
    let extraction = FieldExtractor::new(&document, SiteVariant::Generic)
        .extract()
        .unwrap();
    let field = &extraction.fields[0];
    assert_eq!(field.id, "fn");
    assert_eq!(field.name, "first_name");
    assert_eq!(field.kind, InputKind::Text);
    assert_eq!(field.label, "First Name");
    assert_eq!(field.placeholder, "Ada");
    assert_eq!(field.value, "x");
    assert_eq!(field.automation_id.as_deref(), Some("legalName--firstName"));
    // The group/name split is Workday-only.
    assert!(field.field_group.is_none());
    assert_eq!(document.resolve(field.handle), Ok(document.by_id("fn").unwrap()));
}

#[test]
fn test_workday_prefers_automation_ids() {
    let document = page(
        r#"<form>
             <div data-automation-id="legalNameSection" aria-label="Legal Name">
               <input data-automation-id="legalName--firstName">
               <input data-automation-id="legalName--lastName">
             </div>
             <input name="untagged">
           </form>"#,
    );
    let extraction = FieldExtractor::new(&document, SiteVariant::Workday)
        .extract()
        .unwrap();
    assert_eq!(extraction.strategy, Strategy::AutomationId);
    assert_eq!(extraction.len(), 2);

    let first = &extraction.fields[0];
    assert_eq!(first.field_group.as_deref(), Some("legalName"));
    assert_eq!(first.field_name.as_deref(), Some("firstName"));
    assert_eq!(first.container_label.as_deref(), Some("Legal Name"));
}

#[test]
fn test_workday_container_signature_tier() {
    let document = page(
        r#"<div class="css-1mjmy2z"><input name="inside"></div>
           <input name="outside">"#,
    );
    let extraction = FieldExtractor::new(&document, SiteVariant::Workday)
        .extract()
        .unwrap();
    assert_eq!(extraction.strategy, Strategy::ContainerSignature);
    assert_eq!(names(&extraction), vec!["inside"]);
}

#[test]
fn test_workday_document_fallback() {
    let document = page(r#"<form><input name="a"></form><input name="b">"#);
    let extraction = FieldExtractor::new(&document, SiteVariant::Workday)
        .extract()
        .unwrap();
    assert_eq!(extraction.strategy, Strategy::DocumentScoped);
    assert_eq!(names(&extraction), vec!["a", "b"]);
}

#[test]
fn test_empty_page_is_not_an_error() {
    let document = page("<p>Nothing to see</p>");
    let extraction = FieldExtractor::new(&document, SiteVariant::Generic)
        .extract()
        .unwrap();
    assert!(extraction.is_empty());
}

#[test]
fn test_unloaded_page_fails() {
    let mut document = page(r#"<input name="a">"#);
    document.unload();
    let result = FieldExtractor::new(&document, SiteVariant::Generic).extract();
    assert!(matches!(result, Err(ExtractError::PageUnloaded(_))));
}
