use crate::error::FormError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Contact,
    Gender,
    Country,
    Resume,
    Url,
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Radio,
    Select,
    File,
    Url,
    TextArea,
}

pub const GENDER_OPTIONS: [&str; 3] = ["male", "female", "other"];
pub const COUNTRY_OPTIONS: [&str; 3] = ["india", "usa", "uk"];
pub const RESUME_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

impl FieldName {
    /// Every field, in render order.
    pub const ALL: [FieldName; 9] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Contact,
        FieldName::Gender,
        FieldName::Country,
        FieldName::Resume,
        FieldName::Url,
        FieldName::About,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstname",
            Self::LastName => "lastname",
            Self::Email => "email",
            Self::Contact => "contact",
            Self::Gender => "gender",
            Self::Country => "country",
            Self::Resume => "resume",
            Self::Url => "url",
            Self::About => "about",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Contact => "Contact",
            Self::Gender => "Gender",
            Self::Country => "Country",
            Self::Resume => "Resume",
            Self::Url => "URL",
            Self::About => "About",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::FirstName => Some("Enter your first name"),
            Self::LastName => Some("Enter your last name"),
            Self::Email => Some("Enter your email"),
            Self::Contact => Some("Enter your phone number"),
            Self::Country => Some("Select a country"),
            Self::Resume => Some("path/to/resume.pdf"),
            Self::Url => Some("Enter Image URL"),
            Self::About => Some("Tell us about yourself"),
            Self::Gender => None,
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::FirstName | Self::LastName | Self::Contact => FieldKind::Text,
            Self::Email => FieldKind::Email,
            Self::Gender => FieldKind::Radio,
            Self::Country => FieldKind::Select,
            Self::Resume => FieldKind::File,
            Self::Url => FieldKind::Url,
            Self::About => FieldKind::TextArea,
        }
    }

    /// Country may be left unselected; every other field must be filled.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::Country)
    }

    /// Closed option set for choice fields.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Gender => Some(&GENDER_OPTIONS),
            Self::Country => Some(&COUNTRY_OPTIONS),
            _ => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

impl Serialize for FieldName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
