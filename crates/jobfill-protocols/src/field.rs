//! Field descriptors: what the matcher knows about one form control.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which markup conventions a page follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteVariant {
    /// Plain HTML forms; generic heuristics only.
    #[default]
    Generic,
    /// Workday-style ATS markup (automation ids, generated class names).
    Workday,
}

impl SiteVariant {
    pub fn from_flag(is_workday: bool) -> Self {
        if is_workday {
            Self::Workday
        } else {
            Self::Generic
        }
    }

    pub fn is_workday(self) -> bool {
        matches!(self, Self::Workday)
    }
}

/// Kind of form control, normalized from tag name and `type` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Url,
    Search,
    Number,
    Password,
    Date,
    Checkbox,
    Radio,
    Select,
    Textarea,
    Hidden,
    Submit,
    Button,
    Image,
    Reset,
    File,
    /// Recognized but unsupported input types (color, range, time, ...).
    Other(String),
}

impl InputKind {
    /// Classify a control. Unknown `type` values behave as text, like browsers do.
    pub fn from_element(tag_name: &str, type_attr: Option<&str>) -> Self {
        match tag_name.to_ascii_lowercase().as_str() {
            "select" => Self::Select,
            "textarea" => Self::Textarea,
            _ => type_attr
                .map(|t| Self::from(t.trim().to_ascii_lowercase()))
                .unwrap_or(Self::Text),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Search => "search",
            Self::Number => "number",
            Self::Password => "password",
            Self::Date => "date",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Textarea => "textarea",
            Self::Hidden => "hidden",
            Self::Submit => "submit",
            Self::Button => "button",
            Self::Image => "image",
            Self::Reset => "reset",
            Self::File => "file",
            Self::Other(other) => other,
        }
    }

    /// Controls whose value is free text assigned directly.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Email
                | Self::Tel
                | Self::Url
                | Self::Search
                | Self::Number
                | Self::Password
                | Self::Textarea
        )
    }

    /// Controls the extractor reports and the executor knows how to write.
    pub fn is_fillable(&self) -> bool {
        self.is_text_like()
            || matches!(self, Self::Date | Self::Checkbox | Self::Radio | Self::Select)
    }
}

impl From<String> for InputKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "" | "text" => Self::Text,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "number" => Self::Number,
            "password" => Self::Password,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "select" | "select-one" | "select-multiple" => Self::Select,
            "textarea" => Self::Textarea,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "button" => Self::Button,
            "image" => Self::Image,
            "reset" => Self::Reset,
            "file" => Self::File,
            "color" | "range" | "time" | "month" | "week" | "datetime-local" => {
                Self::Other(value)
            }
            _ => Self::Text,
        }
    }
}

impl From<InputKind> for String {
    fn from(kind: InputKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to a live element.
///
/// Only meaningful inside the document instance that issued it. It is never
/// serialized; analyze results that cross a message boundary drop it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    document: u64,
    node: usize,
}

impl ElementHandle {
    pub fn new(document: u64, node: usize) -> Self {
        Self { document, node }
    }

    pub fn document(&self) -> u64 {
        self.document
    }

    pub fn node(&self) -> usize {
        self.node
    }

    /// A handle that resolves in no document. Deserialized descriptors carry it.
    pub fn is_detached(&self) -> bool {
        self.document == 0
    }
}

/// Normalized description of one candidate form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: InputKind,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub placeholder: String,

    #[serde(default)]
    pub value: String,

    /// `data-automation-id` on ATS pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_id: Option<String>,

    /// `data-fkit-id`, a secondary ATS identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fkit_id: Option<String>,

    /// `aria-label` of the enclosing ATS container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_label: Option<String>,

    /// Part of the automation id before `--`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_group: Option<String>,

    /// Part of the automation id after `--`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,

    #[serde(skip)]
    pub handle: ElementHandle,
}

impl FieldDescriptor {
    pub fn new(kind: InputKind, handle: ElementHandle) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind,
            label: String::new(),
            placeholder: String::new(),
            value: String::new(),
            automation_id: None,
            fkit_id: None,
            container_label: None,
            field_group: None,
            field_name: None,
            handle,
        }
    }

    /// Lowercased, non-empty identifier strings the matcher tests.
    ///
    /// ATS-only identifiers are included in Workday mode only.
    pub fn identifiers(&self, variant: SiteVariant) -> Vec<String> {
        let mut sources: Vec<&str> = vec![
            self.id.as_str(),
            self.name.as_str(),
            self.label.as_str(),
            self.placeholder.as_str(),
        ];
        if variant.is_workday() {
            sources.extend(
                [
                    &self.automation_id,
                    &self.fkit_id,
                    &self.container_label,
                    &self.field_group,
                    &self.field_name,
                ]
                .into_iter()
                .filter_map(|v| v.as_deref()),
            );
        }

        let mut identifiers: Vec<String> = Vec::with_capacity(sources.len());
        for source in sources {
            let lowered = source.trim().to_lowercase();
            if !lowered.is_empty() && !identifiers.contains(&lowered) {
                identifiers.push(lowered);
            }
        }
        identifiers
    }

    /// Short name for listings: name, else id, else the input kind.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.id.is_empty() {
            &self.id
        } else {
            self.kind.as_str()
        }
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
