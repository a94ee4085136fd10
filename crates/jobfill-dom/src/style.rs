//! Inline-style parsing and the computed subset the extractor needs.

/// Tags the user-agent stylesheet renders with `display: none`.
pub(crate) const UA_HIDDEN_TAGS: &[&str] = &[
    "head", "script", "style", "template", "title", "meta", "link", "noscript",
];

/// Resolved style properties relevant to visibility.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
    pub opacity: f64,
    /// Explicit inline width in pixels, if any.
    pub width: Option<f64>,
    /// Explicit inline height in pixels, if any.
    pub height: Option<f64>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "inline".to_string(),
            visibility: "visible".to_string(),
            opacity: 1.0,
            width: None,
            height: None,
        }
    }
}

impl ComputedStyle {
    pub fn is_display_none(&self) -> bool {
        self.display == "none"
    }

    pub fn is_visibility_hidden(&self) -> bool {
        matches!(self.visibility.as_str(), "hidden" | "collapse")
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Parse a `style` attribute into lowercase `(property, value)` pairs.
///
/// Later declarations override earlier ones; `!important` is dropped.
pub(crate) fn parse_declarations(style: &str) -> Vec<(String, String)> {
    let mut declarations: Vec<(String, String)> = Vec::new();
    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value
            .trim()
            .trim_end_matches("!important")
            .trim()
            .to_ascii_lowercase();
        if property.is_empty() {
            continue;
        }
        declarations.retain(|(p, _)| *p != property);
        declarations.push((property, value));
    }
    declarations
}

/// Parse a CSS length in pixels. Unitless zero and `px` values only.
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok()
}

/// Apply one element's inline declarations on top of the inherited style.
pub(crate) fn cascade(parent: Option<&ComputedStyle>, tag_name: &str, style_attr: Option<&str>) -> ComputedStyle {
    let mut computed = ComputedStyle {
        visibility: parent
            .map(|p| p.visibility.clone())
            .unwrap_or_else(|| "visible".to_string()),
        ..Default::default()
    };
    if UA_HIDDEN_TAGS.contains(&tag_name) {
        computed.display = "none".to_string();
    }

    for (property, value) in parse_declarations(style_attr.unwrap_or("")) {
        match property.as_str() {
            "display" => computed.display = value,
            "visibility" if value != "inherit" => computed.visibility = value,
            "opacity" => {
                if let Ok(opacity) = value.parse::<f64>() {
                    computed.opacity = opacity;
                }
            }
            "width" => computed.width = parse_px(&value),
            "height" => computed.height = parse_px(&value),
            _ => {}
        }
    }
    computed
}
