//! Types used for the `contacts/` endpoint

use crate::IdentifierError;
use serde::{de::Unexpected, Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;
use std::{fmt::Display, str::FromStr};
use validator::{Validate, ValidationError};

pub type Contacts = Vec<Contact>;

/// A contact as returned by a listing.
///
/// The listing keys carry spaces (`"first name"`), unlike the snake case keys
/// used when creating or patching a contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store provisioned on object creation.
    pub id: ContactId,
    #[serde(rename = "first name")]
    pub first_name: String,
    #[serde(rename = "last name")]
    pub last_name: String,
    #[serde(rename = "phone number")]
    pub phone_number: String,
}

impl Contact {
    pub fn new(id: ContactId, content: ContactContent) -> Self {
        Self {
            id,
            first_name: content.first_name,
            last_name: content.last_name,
            phone_number: content.phone_number,
        }
    }

    /// The fields of the contact without its id
    pub fn content(&self) -> ContactContent {
        ContactContent {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

/// The caller supplied part of a contact, as sent on creation and as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct ContactContent {
    #[serde(deserialize_with = "crate::string_not_empty")]
    #[validate(length(min = 1))]
    pub first_name: String,
    #[serde(deserialize_with = "crate::string_not_empty")]
    #[validate(length(min = 1))]
    pub last_name: String,
    #[serde(deserialize_with = "crate::string_not_empty")]
    #[validate(length(min = 1))]
    pub phone_number: String,
}

impl ContactContent {
    pub fn new(
        first_name: impl ToString,
        last_name: impl ToString,
        phone_number: impl ToString,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone_number.to_string(),
        }
    }
}

/// A partial update of a contact. Fields that are `None` are left untouched.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_patch_not_empty"))]
pub struct ContactPatch {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub phone_number: Option<String>,
}

fn validate_patch_not_empty(patch: &ContactPatch) -> Result<(), ValidationError> {
    if patch.is_empty() {
        Err(ValidationError::new(
            "a contact patch must change at least one of first_name, last_name or phone_number",
        ))
    } else {
        Ok(())
    }
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }

    pub fn with_first_name(mut self, first_name: impl ToString) -> Self {
        self.first_name = Some(first_name.to_string());
        self
    }

    pub fn with_last_name(mut self, last_name: impl ToString) -> Self {
        self.last_name = Some(last_name.to_string());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl ToString) -> Self {
        self.phone_number = Some(phone_number.to_string());
        self
    }

    /// The fields set in this patch, keyed by their persisted name
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("first_name", self.first_name.as_deref()),
            ("last_name", self.last_name.as_deref()),
            ("phone_number", self.phone_number.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
    }

    /// Merge the set fields into `content`
    pub fn apply(&self, content: &mut ContactContent) {
        if let Some(first_name) = &self.first_name {
            content.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            content.last_name.clone_from(last_name);
        }
        if let Some(phone_number) = &self.phone_number {
            content.phone_number.clone_from(phone_number);
        }
    }
}

/// Store assigned identifier of a contact: 24 hexadecimal characters, the text
/// form of a 12 byte object id. Always held in lower case.
// example: 65a1f0c2e4b0a1b2c3d4e5f6
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContactId(String);

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <String as Deserialize>::deserialize(deserializer)?;

        raw.parse::<ContactId>().map_err(|e| {
            serde::de::Error::invalid_value(Unexpected::Str(&raw), &e.to_string().as_str())
        })
    }
}

impl ContactId {
    pub const LENGTH: usize = 24;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn new(identifier: &str) -> Option<Self> {
        identifier.parse().ok()
    }
}

impl FromStr for ContactId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LENGTH {
            Err(IdentifierError::InvalidLength(s.len()))
        } else if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Err(IdentifierError::InvalidCharacter)
        } else {
            Ok(Self(s.to_ascii_lowercase()))
        }
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
