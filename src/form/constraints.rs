//! Field constraints checked before a submission is allowed through.
//!
//! These mirror what an HTML form enforces natively: required fields, the
//! shape of email and URL inputs, closed option sets and the accepted file
//! types of the resume picker. The store itself never validates.

use crate::core::value::Value;
use crate::form::field::{FieldKind, FieldName, RESUME_EXTENSIONS};
use crate::form::state::FormState;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// The browser's `type=email` rule: any dot-atom local part and a host made of
/// dot-separated labels. A top-level domain is not required.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
    .expect("valid email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    InvalidEmail,
    InvalidUrl,
    NotAnOption,
    FileType,
    FileNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: FieldName,
    pub kind: ViolationKind,
}

impl Violation {
    fn new(field: FieldName, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => match self.field.kind() {
                FieldKind::Radio | FieldKind::Select => f.write_str("Please select one of these options"),
                FieldKind::File => f.write_str("Please select a file"),
                _ => f.write_str("Please fill out this field"),
            },
            ViolationKind::InvalidEmail => f.write_str("Please enter an email address"),
            ViolationKind::InvalidUrl => f.write_str("Please enter a URL"),
            ViolationKind::NotAnOption => f.write_str("Please select one of these options"),
            ViolationKind::FileType => {
                write!(f, "File must be one of: .{}", RESUME_EXTENSIONS.join(", ."))
            }
            ViolationKind::FileNotFound => f.write_str("File does not exist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintOptions {
    pub require_existing_resume: bool,
}

impl Default for ConstraintOptions {
    fn default() -> Self {
        Self {
            require_existing_resume: true,
        }
    }
}

/// Checks every field, returning violations in field order. At most one
/// violation is reported per field.
pub fn check(state: &FormState, options: ConstraintOptions) -> Vec<Violation> {
    state
        .iter()
        .filter_map(|(field, value)| check_field(field, value, options).err())
        .collect()
}

pub fn check_field(
    field: FieldName,
    value: &Value,
    options: ConstraintOptions,
) -> Result<(), Violation> {
    if value.is_empty() {
        if field.is_required() {
            return Err(Violation::new(field, ViolationKind::Missing));
        }
        return Ok(());
    }

    let kind = match field.kind() {
        FieldKind::Email => check_email(value),
        FieldKind::Url => check_url(value),
        FieldKind::Radio | FieldKind::Select => check_option(field, value),
        FieldKind::File => check_file(value, options),
        FieldKind::Text | FieldKind::TextArea => None,
    };

    match kind {
        Some(kind) => Err(Violation::new(field, kind)),
        None => Ok(()),
    }
}

pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            RESUME_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

fn check_email(value: &Value) -> Option<ViolationKind> {
    match value.as_text() {
        Some(text) if EMAIL.is_match(text.trim()) => None,
        _ => Some(ViolationKind::InvalidEmail),
    }
}

fn check_url(value: &Value) -> Option<ViolationKind> {
    match value.as_text().map(|text| url::Url::parse(text.trim())) {
        Some(Ok(_)) => None,
        _ => Some(ViolationKind::InvalidUrl),
    }
}

fn check_option(field: FieldName, value: &Value) -> Option<ViolationKind> {
    let options = field.options()?;
    match value.as_text() {
        Some(text) if options.contains(&text) => None,
        _ => Some(ViolationKind::NotAnOption),
    }
}

fn check_file(value: &Value, options: ConstraintOptions) -> Option<ViolationKind> {
    let Some(path) = value.as_file() else {
        return Some(ViolationKind::FileType);
    };
    if !has_accepted_extension(path) {
        return Some(ViolationKind::FileType);
    }
    if options.require_existing_resume && !path.is_file() {
        return Some(ViolationKind::FileNotFound);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{ConstraintOptions, ViolationKind, check, check_field, has_accepted_extension};
    use crate::core::value::Value;
    use crate::form::field::FieldName;
    use crate::form::state::{FormState, UpdateShape};
    use std::path::Path;

    const LENIENT: ConstraintOptions = ConstraintOptions {
        require_existing_resume: false,
    };

    fn kind_of(field: FieldName, value: Value) -> Option<ViolationKind> {
        check_field(field, &value, LENIENT).err().map(|v| v.kind)
    }

    #[test]
    fn defaults_violate_every_required_field() {
        let violations = check(&FormState::new(), LENIENT);
        let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
        let required: Vec<_> = FieldName::ALL
            .into_iter()
            .filter(|field| *field != FieldName::Country)
            .collect();
        assert_eq!(fields, required);
        assert_eq!(fields.len(), 8);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::Missing));
    }

    #[test]
    fn unselected_country_passes_but_unknown_country_does_not() {
        assert_eq!(kind_of(FieldName::Country, Value::None), None);
        assert_eq!(
            kind_of(FieldName::Country, Value::text("france")),
            Some(ViolationKind::NotAnOption)
        );
    }

    #[test]
    fn email_shape() {
        assert_eq!(kind_of(FieldName::Email, Value::text("ada@example.com")), None);
        assert_eq!(
            kind_of(FieldName::Email, Value::text("ada@")),
            Some(ViolationKind::InvalidEmail)
        );
    }

    #[test]
    fn email_accepts_what_a_browser_accepts() {
        for accepted in ["a@localhost", "o'brien!x@example.com", "x+tag@mail-1.example.co"] {
            assert_eq!(kind_of(FieldName::Email, Value::text(accepted)), None, "{accepted}");
        }
        for rejected in ["ada@", "not-an-email", "a@-host.com", "a b@example.com", "a@host..com"] {
            assert_eq!(
                kind_of(FieldName::Email, Value::text(rejected)),
                Some(ViolationKind::InvalidEmail),
                "{rejected}"
            );
        }
    }

    #[test]
    fn url_shape_requires_absolute_url() {
        assert_eq!(kind_of(FieldName::Url, Value::text("https://example.com/a.png")), None);
        assert_eq!(
            kind_of(FieldName::Url, Value::text("example.com")),
            Some(ViolationKind::InvalidUrl)
        );
    }

    #[test]
    fn choices_are_closed() {
        assert_eq!(kind_of(FieldName::Gender, Value::text("other")), None);
        assert_eq!(kind_of(FieldName::Country, Value::text("usa")), None);
        assert_eq!(
            kind_of(FieldName::Country, Value::text("country")),
            Some(ViolationKind::NotAnOption)
        );
    }

    #[test]
    fn resume_extension_is_case_insensitive() {
        assert!(has_accepted_extension(Path::new("cv.PDF")));
        assert!(has_accepted_extension(Path::new("cv.docx")));
        assert!(!has_accepted_extension(Path::new("cv.txt")));
        assert!(!has_accepted_extension(Path::new("cv")));
        assert_eq!(
            kind_of(FieldName::Resume, Value::file("cv.png")),
            Some(ViolationKind::FileType)
        );
    }

    #[test]
    fn resume_must_exist_when_required() {
        let dir = tempfile::tempdir().expect("tempdir");
        let present = dir.path().join("cv.doc");
        std::fs::write(&present, b"cv").expect("write");
        let absent = dir.path().join("missing.pdf");

        let strict = ConstraintOptions::default();
        assert!(check_field(FieldName::Resume, &Value::file(&present), strict).is_ok());
        let err = check_field(FieldName::Resume, &Value::file(&absent), strict).expect_err("missing");
        assert_eq!(err.kind, ViolationKind::FileNotFound);
    }

    #[test]
    fn wrapped_values_are_checked_like_scalars() {
        let state = FormState::new().updated(
            FieldName::Email,
            Value::text("not-an-email"),
            UpdateShape::Wrapped,
        );
        let violation = check(&state, LENIENT)
            .into_iter()
            .find(|v| v.field == FieldName::Email)
            .expect("email violation");
        assert_eq!(violation.kind, ViolationKind::InvalidEmail);
        assert_eq!(violation.to_string(), "Please enter an email address");
    }
}
