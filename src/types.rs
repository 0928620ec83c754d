//! Canonical user record shape.
//!
//! The remote directory returns loosely-typed records; everything here
//! defaults to the empty value so partial payloads still map cleanly.

use serde::{Deserialize, Serialize};

/// A user record as held by the local store.
///
/// `User::default()` is the blank record handed to the "Add User" form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub name: UserName,
    pub email: String,
    pub picture: UserPicture,
    pub location: UserLocation,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserName {
    pub title: String,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPicture {
    pub medium: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserLocation {
    pub country: String,
    pub city: String,
    pub street: StreetAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetAddress {
    pub name: String,
    pub number: u32,
}

impl UserLocation {
    /// One-line address for the table view.
    pub fn address(&self) -> String {
        format!(
            "{} {}, {}, {}",
            self.street.number, self.street.name, self.city, self.country
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_is_blank() {
        let user = User::default();
        assert!(user.id.is_empty());
        assert!(user.name.title.is_empty());
        assert_eq!(user.location.street.number, 0);
    }

    #[test]
    fn test_address_formatting() {
        let location = UserLocation {
            country: "Norway".to_string(),
            city: "Oslo".to_string(),
            street: StreetAddress {
                name: "Karl Johans gate".to_string(),
                number: 22,
            },
        };
        assert_eq!(location.address(), "22 Karl Johans gate, Oslo, Norway");
    }

    #[test]
    fn test_deserializes_partial_record() {
        let user: User = serde_json::from_value(serde_json::json!({
            "email": "a@b.com",
            "location": { "city": "Oslo" }
        }))
        .unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.location.city, "Oslo");
        assert!(user.location.country.is_empty());
    }
}
