//! Semantic keys and the values they resolve to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical profile attribute a form field can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticKey {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
    Linkedin,
    Website,
    Summary,
    School,
    Degree,
    FieldOfStudy,
    Gpa,
    EducationStartDate,
    EducationEndDate,
    CurrentEducation,
    EducationLocation,
    Achievements,
    Company,
    JobTitle,
    Description,
    WorkStartDate,
    WorkEndDate,
    CurrentJob,
    WorkLocation,
    Skills,
    Languages,
}

impl SemanticKey {
    /// Human-readable name used in mapping previews.
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::FullName => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip Code",
            Self::Country => "Country",
            Self::Linkedin => "LinkedIn",
            Self::Website => "Website",
            Self::Summary => "Summary",
            Self::School => "School",
            Self::Degree => "Degree",
            Self::FieldOfStudy => "Field of Study",
            Self::Gpa => "GPA",
            Self::EducationStartDate => "Education Start Date",
            Self::EducationEndDate => "Education End Date",
            Self::CurrentEducation => "Currently Studying",
            Self::EducationLocation => "School Location",
            Self::Achievements => "Achievements",
            Self::Company => "Company",
            Self::JobTitle => "Job Title",
            Self::Description => "Job Description",
            Self::WorkStartDate => "Work Start Date",
            Self::WorkEndDate => "Work End Date",
            Self::CurrentJob => "Current Job",
            Self::WorkLocation => "Work Location",
            Self::Skills => "Skills",
            Self::Languages => "Languages",
        }
    }
}

impl fmt::Display for SemanticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A profile value ready to be written into a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    Bool(bool),
    List(Vec<String>),
    Date(NaiveDate),
    Text(String),
}

impl ResolvedValue {
    /// Interpret a profile date string: ISO calendar dates become `Date`,
    /// anything else ("Present", "05/2019") stays text.
    pub fn from_date_str(raw: &str) -> Self {
        let trimmed = raw.trim();
        match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            Ok(date) => Self::Date(date),
            Err(_) => Self::Text(trimmed.to_string()),
        }
    }

    /// Value as it would appear in a free-text control.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Bool(true) => "Yes".to_string(),
            Self::Bool(false) => "No".to_string(),
            Self::List(items) => items.join(", "),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Candidate strings tried against choice controls, in order.
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            other => vec![other.as_text()],
        }
    }

    /// True for values that would write nothing.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|i| i.trim().is_empty()),
            Self::Bool(_) | Self::Date(_) => false,
        }
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
