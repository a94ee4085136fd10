//! Label-driven filler behind the legacy `autofill` message.
//!
//! Simpler than the semantic pipeline: each profile key carries a list of
//! field-name fragments searched in the `name`, `id` and `placeholder`
//! attributes, with label text as a fallback.

use std::collections::HashSet;

use jobfill_dom::{Document, EventKind, NodeId};
use jobfill_protocols::profile::non_empty;
use jobfill_protocols::{InputKind, Profile, ResolvedValue, SemanticKey};
use tracing::debug;

use crate::matcher::lookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Text,
    Checkbox,
}

struct LegacyRule {
    key: SemanticKey,
    target: Target,
    names: &'static [&'static str],
}

const fn text(key: SemanticKey, names: &'static [&'static str]) -> LegacyRule {
    LegacyRule {
        key,
        target: Target::Text,
        names,
    }
}

const fn checkbox(key: SemanticKey, names: &'static [&'static str]) -> LegacyRule {
    LegacyRule {
        key,
        target: Target::Checkbox,
        names,
    }
}

const SEARCH_ATTRS: [&str; 3] = ["name", "id", "placeholder"];

/// Personal details, then the latest job, then the latest education.
static RULES: &[LegacyRule] = &[
    text(
        SemanticKey::FirstName,
        &["first_name", "firstname", "first-name", "fname", "given-name", "givenname"],
    ),
    text(
        SemanticKey::LastName,
        &["last_name", "lastname", "last-name", "lname", "family-name", "familyname", "surname"],
    ),
    text(SemanticKey::FullName, &["full_name", "fullname", "full-name", "name"]),
    text(
        SemanticKey::Email,
        &["email", "email_address", "emailaddress", "email-address"],
    ),
    text(
        SemanticKey::Phone,
        &["phone", "phone_number", "phonenumber", "phone-number", "mobile", "cell", "telephone"],
    ),
    text(
        SemanticKey::Address,
        &["address", "street_address", "streetaddress", "street-address", "addr", "street"],
    ),
    text(SemanticKey::City, &["city", "town"]),
    text(SemanticKey::State, &["state", "province", "region"]),
    text(
        SemanticKey::ZipCode,
        &["zip", "zip_code", "zipcode", "zip-code", "postal_code", "postalcode", "postal-code"],
    ),
    text(
        SemanticKey::Linkedin,
        &["linkedin", "linkedin_url", "linkedinurl", "linkedin-url"],
    ),
    text(
        SemanticKey::Website,
        &["website", "personal_website", "personalwebsite", "personal-website", "web_site", "web-site"],
    ),
    text(
        SemanticKey::Summary,
        &[
            "summary",
            "professional_summary",
            "cover_letter",
            "coverletter",
            "cover-letter",
            "about",
            "about_me",
            "aboutme",
            "about-me",
            "bio",
            "biography",
        ],
    ),
    text(
        SemanticKey::JobTitle,
        &["job_title", "jobtitle", "job-title", "position", "title", "role"],
    ),
    text(
        SemanticKey::Company,
        &["company", "company_name", "companyname", "company-name", "employer", "organization"],
    ),
    text(
        SemanticKey::WorkStartDate,
        &[
            "start_date",
            "startdate",
            "start-date",
            "employment_start",
            "employment-start",
            "job_start",
            "job-start",
        ],
    ),
    text(
        SemanticKey::WorkEndDate,
        &[
            "end_date",
            "enddate",
            "end-date",
            "employment_end",
            "employment-end",
            "job_end",
            "job-end",
        ],
    ),
    text(
        SemanticKey::WorkLocation,
        &[
            "job_location",
            "joblocation",
            "job-location",
            "employment_location",
            "employment-location",
            "work_location",
            "work-location",
        ],
    ),
    text(
        SemanticKey::Description,
        &[
            "responsibilities",
            "job_description",
            "jobdescription",
            "job-description",
            "duties",
            "achievements",
            "accomplishments",
        ],
    ),
    checkbox(
        SemanticKey::CurrentJob,
        &[
            "current_job",
            "currentjob",
            "current-job",
            "present_job",
            "presentjob",
            "present-job",
            "current_position",
            "current-position",
            "current_employer",
            "current-employer",
        ],
    ),
    text(
        SemanticKey::Degree,
        &["degree", "degree_type", "degreetype", "degree-type", "qualification"],
    ),
    text(
        SemanticKey::FieldOfStudy,
        &[
            "field_of_study",
            "fieldofstudy",
            "field-of-study",
            "major",
            "course",
            "program",
            "subject",
        ],
    ),
    text(
        SemanticKey::School,
        &[
            "institution",
            "school",
            "university",
            "college",
            "education_institution",
            "education-institution",
        ],
    ),
    text(
        SemanticKey::EducationLocation,
        &[
            "school_location",
            "schoollocation",
            "school-location",
            "education_location",
            "education-location",
        ],
    ),
    text(
        SemanticKey::EducationStartDate,
        &[
            "education_start_date",
            "educationstartdate",
            "education-start-date",
            "school_start",
            "school-start",
        ],
    ),
    text(
        SemanticKey::EducationEndDate,
        &[
            "education_end_date",
            "educationenddate",
            "education-end-date",
            "school_end",
            "school-end",
            "graduation_date",
            "graduationdate",
            "graduation-date",
        ],
    ),
    text(
        SemanticKey::Gpa,
        &["gpa", "grade_point_average", "gradepointaverage", "grade-point-average", "grades"],
    ),
    text(
        SemanticKey::Achievements,
        &[
            "education_achievements",
            "educationachievements",
            "education-achievements",
            "academic_achievements",
            "academic-achievements",
            "honors",
            "awards",
        ],
    ),
    checkbox(
        SemanticKey::CurrentEducation,
        &[
            "current_education",
            "currenteducation",
            "current-education",
            "present_education",
            "present-education",
            "current_student",
            "current-student",
        ],
    ),
];

/// Fills a document by field-name fragments. Each element is written at
/// most once per run.
pub struct LegacyFiller<'a> {
    document: &'a mut Document,
    filled: HashSet<NodeId>,
}

impl<'a> LegacyFiller<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            filled: HashSet::new(),
        }
    }

    /// Number of elements written.
    pub fn fill(&mut self, profile: &Profile) -> usize {
        for rule in RULES {
            let Some(value) = legacy_value(rule.key, profile) else {
                continue;
            };
            match (rule.target, value) {
                (Target::Checkbox, ResolvedValue::Bool(true)) => self.tick(rule.names),
                (Target::Checkbox, _) => {}
                (Target::Text, value) => {
                    let text = value.as_text();
                    if let Some(node) = self.find_text_target(rule.names) {
                        debug!(key = %rule.key, node = %node, "Legacy fill");
                        self.write(node, &text);
                    }
                }
            }
        }
        self.filled.len()
    }

    fn find_text_target(&self, names: &[&str]) -> Option<NodeId> {
        let candidates: Vec<NodeId> = self
            .document
            .elements()
            .into_iter()
            .filter(|node| self.is_text_target(*node))
            .collect();

        for name in names {
            for attr in SEARCH_ATTRS {
                let hit = candidates.iter().copied().find(|node| {
                    self.document
                        .attr(*node, attr)
                        .is_some_and(|v| v.to_lowercase().contains(name))
                });
                if hit.is_some() {
                    return hit;
                }
            }
        }
        self.find_by_label(names)
    }

    /// Labels whose text mentions a name, read with `_` and `-` as spaces.
    fn find_by_label(&self, names: &[&str]) -> Option<NodeId> {
        let phrases: Vec<String> = names.iter().map(|n| n.replace(['_', '-'], " ")).collect();
        self.document
            .elements_by_tag("label")
            .into_iter()
            .filter(|label| {
                let text = self.document.text_content(*label).to_lowercase();
                phrases.iter().any(|phrase| text.contains(phrase.as_str()))
            })
            .filter_map(|label| self.label_target(label))
            .find(|node| self.is_text_target(*node))
    }

    fn label_target(&self, label: NodeId) -> Option<NodeId> {
        let by_for = self
            .document
            .attr(label, "for")
            .filter(|id| !id.is_empty())
            .and_then(|id| self.document.by_id(id));
        by_for.or_else(|| {
            self.document.descendants(label).into_iter().find(|node| {
                matches!(self.document.tag_name(*node), Some("input" | "textarea"))
            })
        })
    }

    fn is_text_target(&self, node: NodeId) -> bool {
        let kind = match self.document.tag_name(node) {
            Some(tag @ ("input" | "textarea")) => {
                InputKind::from_element(tag, self.document.attr(node, "type"))
            }
            _ => return false,
        };
        (kind.is_text_like() || kind == InputKind::Date) && self.is_writable(node)
    }

    fn is_writable(&self, node: NodeId) -> bool {
        !self.filled.contains(&node)
            && self.document.is_visible(node)
            && !self.document.is_disabled(node)
            && !self.document.is_readonly(node)
    }

    fn tick(&mut self, names: &[&str]) {
        let boxes: Vec<NodeId> = self
            .document
            .elements_by_tag("input")
            .into_iter()
            .filter(|node| {
                self.document
                    .attr(*node, "type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("checkbox"))
            })
            .filter(|node| self.is_writable(*node))
            .filter(|node| {
                ["name", "id"].into_iter().any(|attr| {
                    self.document.attr(*node, attr).is_some_and(|v| {
                        let v = v.to_lowercase();
                        names.iter().any(|name| v.contains(name))
                    })
                })
            })
            .collect();

        for node in boxes {
            if self.document.set_checked(node, true).is_ok() {
                self.notify(node);
            }
        }
    }

    fn write(&mut self, node: NodeId, value: &str) {
        if self.document.set_value(node, value).is_ok() {
            self.notify(node);
        }
    }

    fn notify(&mut self, node: NodeId) {
        self.filled.insert(node);
        for kind in [EventKind::Input, EventKind::Change] {
            let _ = self.document.dispatch(node, kind);
        }
    }
}

/// Like [`lookup`], except a full name is only used when given explicitly:
/// a bare "name" field would otherwise swallow the first or last name.
fn legacy_value(key: SemanticKey, profile: &Profile) -> Option<ResolvedValue> {
    match key {
        SemanticKey::FullName => non_empty(&profile.personal.full_name).map(ResolvedValue::from),
        other => lookup(other, profile),
    }
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
