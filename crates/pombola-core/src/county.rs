//! County-performance call-to-action page.
//!
//! There are three major variants of the page. The `variant` GET parameter
//! picks which promotional panel, if any, is shown next to the petition and
//! senate forms.

use serde::Serialize;

/// Promotional panel selected by the `variant` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Opportunity,
    Threat,
    #[default]
    Neither,
}

impl Variant {
    /// `o` and `t` pick a panel. `n`, a missing value and anything
    /// unrecognised show neither.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("o") => Variant::Opportunity,
            Some("t") => Variant::Threat,
            _ => Variant::Neither,
        }
    }

    /// `(show_opportunity, show_threat)`
    pub fn panels(self) -> (bool, bool) {
        match self {
            Variant::Opportunity => (true, false),
            Variant::Threat => (false, true),
            Variant::Neither => (false, false),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    Text,
    Email,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

impl FormField {
    const fn new(name: &'static str, label: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    pub fn is_textarea(&self) -> bool {
        self.kind == InputKind::Textarea
    }

    /// HTML `type` attribute for `<input>` fields
    pub fn input_type(&self) -> &'static str {
        match self.kind {
            InputKind::Email => "email",
            InputKind::Text | InputKind::Textarea => "text",
        }
    }
}

/// An unbound form: the page only ever renders it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Form {
    pub id: &'static str,
    pub heading: &'static str,
    pub fields: Vec<FormField>,
}

impl Form {
    pub fn petition() -> Self {
        Self {
            id: "petition",
            heading: "Sign the petition",
            fields: vec![
                FormField::new("name", "Your name", InputKind::Text),
                FormField::new("email", "Your email address", InputKind::Email),
            ],
        }
    }

    pub fn senate() -> Self {
        Self {
            id: "senate",
            heading: "Write to the Senate",
            fields: vec![
                FormField::new("comments", "Your message to the Senate", InputKind::Textarea),
                FormField::new("name", "Your name", InputKind::Text),
                FormField::new("email", "Your email address", InputKind::Email),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyPerformanceContext {
    pub suppress_banner: bool,
    pub petition_form: Form,
    pub senate_form: Form,
    pub show_opportunity: bool,
    pub show_threat: bool,
}

impl CountyPerformanceContext {
    pub fn from_variant(variant: Variant) -> Self {
        let (show_opportunity, show_threat) = variant.panels();
        Self {
            suppress_banner: true,
            petition_form: Form::petition(),
            senate_form: Form::senate(),
            show_opportunity,
            show_threat,
        }
    }
}
