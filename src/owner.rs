//! Owner record input type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A pet-owner record, as supplied by an external lookup collaborator.
///
/// The record is treated as immutable for the duration of a render call;
/// the exporter never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRecord {
    /// Record identifier.
    pub id: u32,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,
}

impl OwnerRecord {
    /// Create a record from its fields.
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: address.into(),
            city: city.into(),
        }
    }

    /// First and last name joined with a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the record is renderable: no text field may be blank.
    ///
    /// Rendering a malformed record would silently produce a blank or
    /// garbled document, so this is promoted to an explicit error.
    pub fn validate(&self) -> Result<()> {
        let blank = |name: &str, value: &str| {
            if value.trim().is_empty() {
                Err(Error::InvalidRecord(format!("{} is blank", name)))
            } else {
                Ok(())
            }
        };
        blank("first name", &self.first_name)?;
        blank("last name", &self.last_name)?;
        blank("address", &self.address)?;
        blank("city", &self.city)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OwnerRecord {
        OwnerRecord::new(1, "George", "Franklin", "110 W. Liberty St.", "Madison")
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "George Franklin");
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut owner = sample();
        owner.city = "   ".to_string();
        let err = owner.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn test_json_round_trip() {
        let owner = sample();
        let json = serde_json::to_string(&owner).unwrap();
        assert!(json.contains("\"first_name\":\"George\""));
        let back: OwnerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, owner);
    }
}
