//! Wire shapes specific to the catalog API.
//!
//! Products come off the wire already in the [`cartwheel_core::Product`]
//! shape; only the user endpoint needs its own types, because its nested
//! record is never stored as-is - the session layer flattens it into a
//! [`cartwheel_core::User`].

use serde::Deserialize;

/// The reference user record fetched from the catalog's user endpoint.
///
/// Used only to manufacture test login credentials; unknown wire fields
/// (username, phone, geolocation) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceUser {
    /// Catalog-assigned user id.
    pub id: i64,
    /// The email that serves as the valid login identity.
    pub email: String,
    /// Split name record.
    pub name: ReferenceName,
    /// Partial address record.
    pub address: ReferenceAddress,
}

/// Name fields of a reference user.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceName {
    pub firstname: String,
    pub lastname: String,
}

/// Address fields of a reference user.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceAddress {
    pub street: String,
    pub city: String,
}

impl ReferenceUser {
    /// The display name: first and last name joined with a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name.firstname, self.name.lastname)
    }

    /// The postal address: street and city joined with a comma.
    #[must_use]
    pub fn postal_address(&self) -> String {
        format!("{}, {}", self.address.street, self.address.city)
    }
}
