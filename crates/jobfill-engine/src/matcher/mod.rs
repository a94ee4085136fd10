//! Semantic matching: which profile attribute a field asks for.
//!
//! Workday rules run before the generic ones in Workday mode, so short ATS
//! identifiers ("first", "legalName--firstName") resolve before the broader
//! compound patterns get a chance. When no rule fires, the input type is the
//! last resort (email inputs take the email, tel inputs the phone).
//!
//! A rule that fires for a key the profile has no data for yields `None`,
//! exactly like a field no rule recognizes.

pub mod rules;

use jobfill_protocols::profile::non_empty;
use jobfill_protocols::{FieldDescriptor, InputKind, Profile, ResolvedValue, SemanticKey, SiteVariant};
use tracing::trace;

pub use rules::{MatchRule, Pattern, RuleSet, GENERIC_RULES, WORKDAY_RULES};

/// Which stage of matching produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    Workday,
    Generic,
    InputType,
}

/// A field resolved to a profile value.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub key: SemanticKey,
    pub scope: RuleScope,
    pub value: ResolvedValue,
}

/// Interprets the rule tables for one site variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticMatcher {
    variant: SiteVariant,
}

impl SemanticMatcher {
    pub fn new(variant: SiteVariant) -> Self {
        Self { variant }
    }

    pub fn variant(&self) -> SiteVariant {
        self.variant
    }

    /// The key a field maps to, ignoring whether the profile has data for it.
    pub fn classify(&self, field: &FieldDescriptor) -> Option<(SemanticKey, RuleScope)> {
        let identifiers = field.identifiers(self.variant);

        if self.variant.is_workday() {
            if let Some(rule) = WORKDAY_RULES.first_match(&identifiers) {
                return Some((rule.key, RuleScope::Workday));
            }
        }
        if let Some(rule) = GENERIC_RULES.first_match(&identifiers) {
            return Some((rule.key, RuleScope::Generic));
        }

        match field.kind {
            InputKind::Email => Some((SemanticKey::Email, RuleScope::InputType)),
            InputKind::Tel => Some((SemanticKey::Phone, RuleScope::InputType)),
            _ => None,
        }
    }

    /// Key and value for a field, or `None` when there is nothing to write.
    pub fn resolve(&self, field: &FieldDescriptor, profile: &Profile) -> Option<Match> {
        let (key, scope) = self.classify(field)?;
        let value = lookup(key, profile);
        trace!(
            field = field.display_name(),
            %key,
            ?scope,
            has_value = value.is_some(),
            "Matched field"
        );
        Some(Match {
            key,
            scope,
            value: value?,
        })
    }

    /// Mapping preview shown next to analyzed fields.
    pub fn describe_mapping(&self, field: &FieldDescriptor) -> &'static str {
        self.classify(field)
            .map(|(key, _)| key.label())
            .unwrap_or("Unknown")
    }
}

/// Profile value for a key. Only the first education and work entries count.
pub fn lookup(key: SemanticKey, profile: &Profile) -> Option<ResolvedValue> {
    let personal = &profile.personal;
    let education = profile.latest_education();
    let work = profile.latest_work();
    let text = |value: Option<&str>| value.map(ResolvedValue::from);
    let date = |value: Option<&str>| value.map(ResolvedValue::from_date_str);

    match key {
        SemanticKey::FirstName => text(non_empty(&personal.first_name)),
        SemanticKey::LastName => text(non_empty(&personal.last_name)),
        SemanticKey::FullName => personal.display_name().map(ResolvedValue::Text),
        SemanticKey::Email => text(non_empty(&personal.email)),
        SemanticKey::Phone => text(non_empty(&personal.phone)),
        SemanticKey::Address => text(non_empty(&personal.address)),
        SemanticKey::City => text(non_empty(&personal.city)),
        SemanticKey::State => text(non_empty(&personal.state)),
        SemanticKey::ZipCode => text(non_empty(&personal.zip_code)),
        SemanticKey::Country => text(non_empty(&personal.country)),
        SemanticKey::Linkedin => text(non_empty(&personal.linkedin)),
        SemanticKey::Website => text(non_empty(&personal.website)),
        SemanticKey::Summary => text(non_empty(&personal.summary)),

        SemanticKey::School => text(education.and_then(|e| non_empty(&e.school))),
        SemanticKey::Degree => text(education.and_then(|e| non_empty(&e.degree))),
        SemanticKey::FieldOfStudy => text(education.and_then(|e| non_empty(&e.field_of_study))),
        SemanticKey::Gpa => text(education.and_then(|e| non_empty(&e.gpa))),
        SemanticKey::EducationStartDate => date(education.and_then(|e| non_empty(&e.start_date))),
        SemanticKey::EducationEndDate => date(education.and_then(|e| non_empty(&e.end_date))),
        SemanticKey::CurrentEducation => {
            education.map(|e| ResolvedValue::Bool(e.is_current_education()))
        }
        SemanticKey::EducationLocation => text(education.and_then(|e| non_empty(&e.location))),
        SemanticKey::Achievements => text(education.and_then(|e| non_empty(&e.achievements))),

        SemanticKey::Company => text(work.and_then(|w| non_empty(&w.company))),
        SemanticKey::JobTitle => text(work.and_then(|w| non_empty(&w.title))),
        SemanticKey::Description => text(work.and_then(|w| non_empty(&w.description))),
        SemanticKey::WorkStartDate => date(work.and_then(|w| non_empty(&w.start_date))),
        SemanticKey::WorkEndDate => date(work.and_then(|w| non_empty(&w.end_date))),
        SemanticKey::CurrentJob => work.map(|w| ResolvedValue::Bool(w.is_current_job())),
        SemanticKey::WorkLocation => text(work.and_then(|w| non_empty(&w.location))),

        SemanticKey::Skills => list(&profile.skills),
        SemanticKey::Languages => list(&profile.languages),
    }
}

fn list(items: &[String]) -> Option<ResolvedValue> {
    let items: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() {
        None
    } else {
        Some(ResolvedValue::List(items))
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
