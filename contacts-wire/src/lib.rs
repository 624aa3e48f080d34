//! Wire format definitions for the contacts endpoints
//!
//! The types in this crate model the messages sent over the wire between the
//! contacts server and its clients.

use serde::{de::Unexpected, Deserialize, Deserializer};

pub use contact::{Contact, ContactContent, ContactId, ContactPatch};
pub use problem::Problem;

pub mod contact;
pub mod problem;

/// Deserialize a string that holds at least one character
pub fn string_not_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let string = <String as Deserialize>::deserialize(deserializer)?;

    if string.is_empty() {
        Err(serde::de::Error::invalid_value(
            Unexpected::Str(&string),
            &"a non-empty string",
        ))
    } else {
        Ok(string)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("identifier length {0} is not 24")]
    InvalidLength(usize),
    #[error("identifier contains characters besides [0-9a-fA-F]")]
    InvalidCharacter,
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq, Eq)]
    struct Test(#[serde(deserialize_with = "super::string_not_empty")] String);

    #[test]
    fn deserialize_string_not_empty() {
        assert_eq!(
            serde_json::from_str::<Test>("\"x\"").unwrap(),
            Test("x".to_string())
        );

        let long = "李".repeat(300);
        assert_eq!(
            serde_json::from_str::<Test>(&format!("\"{long}\"")).unwrap(),
            Test(long)
        );

        assert!(serde_json::from_str::<Test>("\"\"")
            .unwrap_err()
            .to_string()
            .contains("expected a non-empty string"));
    }

    #[test]
    fn deserialize_string_rejects_non_strings() {
        assert!(serde_json::from_str::<Test>("42").is_err());
        assert!(serde_json::from_str::<Test>("null").is_err());
    }
}
