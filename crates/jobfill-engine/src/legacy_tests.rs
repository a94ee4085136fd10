use super::*;
use jobfill_protocols::{Education, PersonalInfo, WorkExperience};

fn page(body: &str) -> Document {
    Document::parse(&format!("<html><body>{body}</body></html>"))
}

fn value_of(document: &Document, id: &str) -> String {
    document.value(document.by_id(id).unwrap())
}

fn profile() -> Profile {
    Profile {
        personal: PersonalInfo {
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            email: Some("grace@navy.mil".to_string()),
            summary: Some("Compiler pioneer".to_string()),
            ..Default::default()
        },
        work_experience: vec![WorkExperience {
            company: Some("Remington Rand".to_string()),
            title: Some("Senior Mathematician".to_string()),
            is_current: Some(true),
            ..Default::default()
        }],
        education: vec![Education {
            school: Some("Yale".to_string()),
            is_current: Some(false),
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_fills_by_attribute_fragments() {
    let mut document = page(
        r#"<input id="a" name="applicant_first_name">
           <input id="b" name="applicant_last_name">
           <input id="c" placeholder="email">
           <textarea id="d" name="cover_letter"></textarea>
           <input id="e" name="employer">"#,
    );
    let filled = LegacyFiller::new(&mut document).fill(&profile());

    assert_eq!(filled, 5);
    assert_eq!(value_of(&document, "a"), "Grace");
    assert_eq!(value_of(&document, "b"), "Hopper");
    assert_eq!(value_of(&document, "c"), "grace@navy.mil");
    assert_eq!(value_of(&document, "d"), "Compiler pioneer");
    assert_eq!(value_of(&document, "e"), "Remington Rand");

    let node = document.by_id("a").unwrap();
    assert_eq!(
        document.events_for(node),
        vec![EventKind::Input, EventKind::Change]
    );
}

#[test]
fn test_first_match_in_dom_order_wins() {
    let mut document = page(
        r#"<input id="one" name="email">
           <input id="two" name="email_confirm">"#,
    );
    LegacyFiller::new(&mut document).fill(&profile());
    assert_eq!(value_of(&document, "one"), "grace@navy.mil");
    assert_eq!(value_of(&document, "two"), "");
}

#[test]
fn test_element_written_once_per_run() {
    // "name" would also hit the first-name field; it is already taken.
    let mut document = page(r#"<input id="f" name="first_name"><input id="n" name="name">"#);
    let mut data = profile();
    data.personal.full_name = Some("Grace Brewster Hopper".to_string());
    LegacyFiller::new(&mut document).fill(&data);
    assert_eq!(value_of(&document, "f"), "Grace");
    assert_eq!(value_of(&document, "n"), "Grace Brewster Hopper");
}

#[test]
fn test_full_name_needs_explicit_value() {
    let mut document = page(r#"<input id="n" name="name">"#);
    assert_eq!(LegacyFiller::new(&mut document).fill(&profile()), 0);
    assert_eq!(value_of(&document, "n"), "");
}

#[test]
fn test_label_fallback() {
    let mut document = page(
        r#"<label for="q1">Your job title</label><input id="q1">
           <label>Field of study <input id="q2"></label>"#,
    );
    let mut data = profile();
    data.education[0].field_of_study = Some("Mathematics".to_string());

    LegacyFiller::new(&mut document).fill(&data);
    assert_eq!(value_of(&document, "q1"), "Senior Mathematician");
    assert_eq!(value_of(&document, "q2"), "Mathematics");
}

#[test]
fn test_skips_hidden_and_readonly() {
    let mut document = page(
        r#"<input id="h" name="email" style="display:none">
           <input id="r" name="email" readonly>
           <input id="ok" name="email">"#,
    );
    LegacyFiller::new(&mut document).fill(&profile());
    assert_eq!(value_of(&document, "h"), "");
    assert_eq!(value_of(&document, "r"), "");
    assert_eq!(value_of(&document, "ok"), "grace@navy.mil");
}

#[test]
fn test_current_job_checkbox() {
    let mut document = page(
        r#"<input type="checkbox" id="cj" name="current_job">
           <input type="checkbox" id="ce" name="current_student">"#,
    );
    let filled = LegacyFiller::new(&mut document).fill(&profile());

    assert_eq!(filled, 1);
    assert!(document.is_checked(document.by_id("cj").unwrap()));
    assert!(!document.is_checked(document.by_id("ce").unwrap()));
}

#[test]
fn test_nothing_to_fill() {
    let mut document = page(r#"<input name="favourite_colour">"#);
    assert_eq!(LegacyFiller::new(&mut document).fill(&profile()), 0);
    assert_eq!(LegacyFiller::new(&mut document).fill(&Profile::default()), 0);
}

#[test]
fn test_locations_and_achievements() {
    let mut document = page(
        r#"<input id="jl" name="job_location">
           <input id="inst" name="institution">
           <input id="sl" name="school_location">
           <textarea id="aw" name="honors"></textarea>"#,
    );
    let mut data = profile();
    data.work_experience[0].location = Some("Philadelphia, PA".to_string());
    data.education[0].location = Some("New Haven, CT".to_string());
    data.education[0].achievements = Some("Phi Beta Kappa".to_string());

    let filled = LegacyFiller::new(&mut document).fill(&data);

    assert_eq!(filled, 4);
    assert_eq!(value_of(&document, "jl"), "Philadelphia, PA");
    assert_eq!(value_of(&document, "inst"), "Yale");
    assert_eq!(value_of(&document, "sl"), "New Haven, CT");
    assert_eq!(value_of(&document, "aw"), "Phi Beta Kappa");
}
