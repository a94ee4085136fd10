//! Applicant profile.
//!
//! The JSON shape is camelCase. Aliases accept the snake_case keys written by
//! the profile backend and the older extension payloads.

use serde::{Deserialize, Serialize};

/// The user's application data.
///
/// Ordered sequences keep the current or most recent entry first. The matcher
/// only ever reads the first entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, alias = "personal_info")]
    pub personal: PersonalInfo,

    #[serde(default)]
    pub education: Vec<Education>,

    #[serde(default, alias = "employment", alias = "employment_history")]
    pub work_experience: Vec<WorkExperience>,

    #[serde(default)]
    pub skills: Vec<String>,

    #[serde(default)]
    pub languages: Vec<String>,
}

/// Personal and contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default, alias = "first_name", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, alias = "last_name", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, alias = "full_name", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, alias = "zip", alias = "zip_code", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, alias = "linkedInUrl", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(default, alias = "personalWebsite", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(
        default,
        alias = "professionalSummary",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
}

impl PersonalInfo {
    /// Full name, derived from first and last name when not given explicitly.
    pub fn display_name(&self) -> Option<String> {
        if let Some(full) = non_empty(&self.full_name) {
            return Some(full.to_string());
        }
        let parts: Vec<&str> = [non_empty(&self.first_name), non_empty(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    fn is_empty(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.full_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
            &self.linkedin,
            &self.website,
            &self.summary,
        ]
        .iter()
        .all(|field| non_empty(field).is_none())
    }
}

/// One education entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default, alias = "institution", skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,

    #[serde(
        default,
        alias = "field_of_study",
        alias = "major",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_of_study: Option<String>,

    #[serde(default, alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Honours, awards, notable projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,

    #[serde(
        default,
        alias = "isCurrentEducation",
        alias = "current_education",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_current: Option<bool>,
}

/// One work-experience entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(
        default,
        rename = "position",
        alias = "jobTitle",
        alias = "job_title",
        alias = "title",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(default, alias = "start_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, alias = "end_date", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(
        default,
        alias = "responsibilities",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(
        default,
        alias = "isCurrentJob",
        alias = "current_job",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_current: Option<bool>,
}

impl WorkExperience {
    /// Whether this is the applicant's current position.
    ///
    /// An explicit flag wins; otherwise an end date of "Present" counts.
    pub fn is_current_job(&self) -> bool {
        self.is_current.unwrap_or_else(|| {
            self.end_date
                .as_deref()
                .is_some_and(|end| end.trim().eq_ignore_ascii_case("present"))
        })
    }
}

impl Education {
    /// Whether the applicant is still enrolled.
    pub fn is_current_education(&self) -> bool {
        self.is_current.unwrap_or_else(|| {
            self.end_date
                .as_deref()
                .is_some_and(|end| end.trim().eq_ignore_ascii_case("present"))
        })
    }
}

impl Profile {
    /// Most recent education entry.
    pub fn latest_education(&self) -> Option<&Education> {
        self.education.first()
    }

    /// Most recent work-experience entry.
    pub fn latest_work(&self) -> Option<&WorkExperience> {
        self.work_experience.first()
    }

    /// Whether nothing at all is filled in.
    pub fn is_empty(&self) -> bool {
        self.personal.is_empty()
            && self.education.is_empty()
            && self.work_experience.is_empty()
            && self.skills.is_empty()
            && self.languages.is_empty()
    }

    /// Share of the five profile sections that carry data, 0-100.
    pub fn completion_percentage(&self) -> u8 {
        let sections = [
            !self.personal.is_empty(),
            !self.education.is_empty(),
            !self.work_experience.is_empty(),
            !self.skills.is_empty(),
            !self.languages.is_empty(),
        ];
        let completed = sections.iter().filter(|done| **done).count();
        ((completed * 100) as f64 / sections.len() as f64).round() as u8
    }

    /// The sample profile offered when no backend is reachable.
    pub fn demo() -> Self {
        Self {
            personal: PersonalInfo {
                first_name: Some("John".to_string()),
                last_name: Some("Doe".to_string()),
                email: Some("john.doe@example.com".to_string()),
                phone: Some("555-123-4567".to_string()),
                address: Some("123 Main St, Anytown, CA 12345".to_string()),
                linkedin: Some("linkedin.com/in/johndoe".to_string()),
                website: Some("johndoe.com".to_string()),
                ..Default::default()
            },
            education: vec![Education {
                school: Some("University of Technology".to_string()),
                degree: Some("Bachelor of Science".to_string()),
                field_of_study: Some("Computer Science".to_string()),
                start_date: Some("2015-09-01".to_string()),
                end_date: Some("2019-05-31".to_string()),
                gpa: Some("3.8".to_string()),
                ..Default::default()
            }],
            work_experience: vec![
                WorkExperience {
                    company: Some("Tech Solutions Inc.".to_string()),
                    title: Some("Software Developer".to_string()),
                    start_date: Some("2019-06-15".to_string()),
                    end_date: Some("Present".to_string()),
                    description: Some(
                        "Developed web applications using JavaScript, HTML, and CSS. \
                         Collaborated with cross-functional teams to implement new features \
                         and fix bugs."
                            .to_string(),
                    ),
                    ..Default::default()
                },
                WorkExperience {
                    company: Some("Digital Innovations".to_string()),
                    title: Some("Junior Developer".to_string()),
                    start_date: Some("2018-05-01".to_string()),
                    end_date: Some("2019-05-30".to_string()),
                    description: Some(
                        "Assisted in the development of mobile applications. \
                         Participated in code reviews and testing."
                            .to_string(),
                    ),
                    ..Default::default()
                },
            ],
            skills: [
                "JavaScript",
                "HTML",
                "CSS",
                "Python",
                "React",
                "Node.js",
                "Git",
                "Agile Development",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            languages: vec![
                "English (Native)".to_string(),
                "Spanish (Intermediate)".to_string(),
            ],
        }
    }
}

/// Trimmed content of an optional string, `None` when blank.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
