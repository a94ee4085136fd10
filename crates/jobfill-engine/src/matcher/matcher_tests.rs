use super::*;
use jobfill_protocols::{ElementHandle, Education, PersonalInfo, WorkExperience};

fn field(name: &str, label: &str) -> FieldDescriptor {
    let mut field = FieldDescriptor::new(InputKind::Text, ElementHandle::default());
    field.name = name.to_string();
    field.label = label.to_string();
    field
}

fn automation_field(automation_id: &str) -> FieldDescriptor {
    let mut field = FieldDescriptor::new(InputKind::Text, ElementHandle::default());
    field.automation_id = Some(automation_id.to_string());
    if let Some((group, name)) = automation_id.split_once("--") {
        field.field_group = Some(group.to_string());
        field.field_name = Some(name.to_string());
    }
    field
}

fn ada() -> Profile {
    Profile {
        personal: PersonalInfo {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: Some("ada@x.com".to_string()),
            phone: Some("555-0100".to_string()),
            city: Some("London".to_string()),
            state: Some("CA".to_string()),
            country: Some("United Kingdom".to_string()),
            ..Default::default()
        },
        education: vec![Education {
            school: Some("University of London".to_string()),
            start_date: Some("1832-09-01".to_string()),
            end_date: Some("Present".to_string()),
            ..Default::default()
        }],
        work_experience: vec![WorkExperience {
            company: Some("Analytical Engines Ltd".to_string()),
            title: Some("Programmer".to_string()),
            start_date: Some("1842-01-15".to_string()),
            end_date: Some("Present".to_string()),
            ..Default::default()
        }],
        skills: vec!["Mathematics".to_string(), " ".to_string(), "Poetry".to_string()],
        languages: vec![],
    }
}

fn key_of(matcher: &SemanticMatcher, field: &FieldDescriptor) -> Option<SemanticKey> {
    matcher.classify(field).map(|(key, _)| key)
}

#[test]
fn test_pattern_kinds() {
    assert!(Pattern::Exact("name").matches("name"));
    assert!(!Pattern::Exact("name").matches("username"));
    assert!(Pattern::Contains("mail").matches("e-mail address"));
    assert!(Pattern::AllOf(&["first", "name"]).matches("name_first"));
    assert!(!Pattern::AllOf(&["first", "name"]).matches("first"));
    assert!(Pattern::Word("city").matches("home_city"));
    assert!(Pattern::Word("city").matches("city"));
    assert!(!Pattern::Word("city").matches("ethnicity"));
    assert!(!Pattern::Word("state").matches("united states"));
}

#[test]
fn test_rule_exclusions_span_all_identifiers() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    assert_eq!(
        key_of(&matcher, &field("street", "")),
        Some(SemanticKey::Address)
    );
    // "Email address" is the email, never the postal address.
    assert_eq!(
        key_of(&matcher, &field("contact_address", "Email address")),
        Some(SemanticKey::Email)
    );
}

#[test]
fn test_generic_rules() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    let cases = [
        ("first_name", SemanticKey::FirstName),
        ("lastName", SemanticKey::LastName),
        ("name", SemanticKey::FullName),
        ("your-email", SemanticKey::Email),
        ("mobile", SemanticKey::Phone),
        ("linkedin_url", SemanticKey::Linkedin),
        ("portfolio", SemanticKey::Website),
        ("address_line_1", SemanticKey::Address),
        ("home_city", SemanticKey::City),
        ("state", SemanticKey::State),
        ("postal_code", SemanticKey::ZipCode),
        ("country", SemanticKey::Country),
        ("cover_letter", SemanticKey::Summary),
        ("graduation_date", SemanticKey::EducationEndDate),
        ("start_date", SemanticKey::WorkStartDate),
        ("end_date", SemanticKey::WorkEndDate),
        ("current_job", SemanticKey::CurrentJob),
        ("employer", SemanticKey::Company),
        ("job_title", SemanticKey::JobTitle),
        ("responsibilities", SemanticKey::Description),
        ("university", SemanticKey::School),
        ("degree", SemanticKey::Degree),
        ("major", SemanticKey::FieldOfStudy),
        ("gpa", SemanticKey::Gpa),
        ("skills", SemanticKey::Skills),
        ("spoken_languages", SemanticKey::Languages),
    ];
    for (name, expected) in cases {
        assert_eq!(key_of(&matcher, &field(name, "")), Some(expected), "{name}");
    }
    assert_eq!(key_of(&matcher, &field("ethnicity", "")), None);
}

#[test]
fn test_education_dates_are_not_work_dates() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    assert_eq!(
        key_of(&matcher, &field("edu_start_date", "")),
        Some(SemanticKey::EducationStartDate)
    );
    assert_eq!(
        key_of(&matcher, &field("", "School end date")),
        Some(SemanticKey::EducationEndDate)
    );
}

#[test]
fn test_workday_rule_beats_generic_rule() {
    let matcher = SemanticMatcher::new(SiteVariant::Workday);
    let field = automation_field("legalName--firstName");

    let found = matcher.resolve(&field, &ada()).unwrap();
    assert_eq!(found.key, SemanticKey::FirstName);
    assert_eq!(found.scope, RuleScope::Workday);
    assert_eq!(found.value, ResolvedValue::from("Ada"));
}

#[test]
fn test_workday_short_identifiers() {
    let workday = SemanticMatcher::new(SiteVariant::Workday);
    let generic = SemanticMatcher::new(SiteVariant::Generic);

    let mut short = field("", "");
    short.id = "first".to_string();
    assert_eq!(key_of(&workday, &short), Some(SemanticKey::FirstName));
    // The generic table wants "first" and "name" together.
    assert_eq!(key_of(&generic, &short), None);

    assert_eq!(
        key_of(&workday, &automation_field("addressSection--countryRegion")),
        Some(SemanticKey::State)
    );
    assert_eq!(
        key_of(&workday, &automation_field("addressSection--country")),
        Some(SemanticKey::Country)
    );
    assert_eq!(
        key_of(&workday, &automation_field("workExperience--currentlyWorkHere")),
        Some(SemanticKey::CurrentJob)
    );
}

#[test]
fn test_ats_identifiers_ignored_in_generic_mode() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    assert_eq!(key_of(&matcher, &automation_field("legalName--lastName")), None);
}

#[test]
fn test_input_type_fallback() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);

    let mut email = field("q1", "");
    email.kind = InputKind::Email;
    assert_eq!(
        matcher.classify(&email),
        Some((SemanticKey::Email, RuleScope::InputType))
    );

    let mut tel = field("q2", "");
    tel.kind = InputKind::Tel;
    let found = matcher.resolve(&tel, &ada()).unwrap();
    assert_eq!(found.scope, RuleScope::InputType);
    assert_eq!(found.value, ResolvedValue::from("555-0100"));

    assert_eq!(matcher.classify(&field("q3", "")), None);
}

#[test]
fn test_absent_data_is_no_match() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    let website = field("website", "");
    assert_eq!(key_of(&matcher, &website), Some(SemanticKey::Website));
    assert!(matcher.resolve(&website, &ada()).is_none());
    assert!(matcher.resolve(&website, &Profile::default()).is_none());
}

#[test]
fn test_lookup_value_shapes() {
    let profile = ada();
    assert_eq!(
        lookup(SemanticKey::FullName, &profile),
        Some(ResolvedValue::from("Ada Lovelace"))
    );
    assert_eq!(
        lookup(SemanticKey::WorkStartDate, &profile),
        Some(ResolvedValue::from_date_str("1842-01-15"))
    );
    assert_eq!(
        lookup(SemanticKey::EducationEndDate, &profile),
        Some(ResolvedValue::from("Present"))
    );
    assert_eq!(
        lookup(SemanticKey::CurrentJob, &profile),
        Some(ResolvedValue::Bool(true))
    );
    assert_eq!(
        lookup(SemanticKey::CurrentEducation, &profile),
        Some(ResolvedValue::Bool(true))
    );
    assert_eq!(
        lookup(SemanticKey::Skills, &profile),
        Some(ResolvedValue::List(vec![
            "Mathematics".to_string(),
            "Poetry".to_string()
        ]))
    );
    assert_eq!(lookup(SemanticKey::Languages, &profile), None);
    assert_eq!(lookup(SemanticKey::CurrentJob, &Profile::default()), None);
}

#[test]
fn test_describe_mapping() {
    let matcher = SemanticMatcher::new(SiteVariant::Generic);
    assert_eq!(matcher.describe_mapping(&field("zip", "")), "Zip Code");
    assert_eq!(matcher.describe_mapping(&field("favourite_colour", "")), "Unknown");
}
