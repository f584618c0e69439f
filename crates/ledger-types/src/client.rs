//! Client types

use serde::{Deserialize, Serialize};

/// Store-assigned client identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub i64);

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClientId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client ID
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Email address, unique across clients
    pub email: String,
    /// Contact phone number
    pub phone: Option<String>,
}

/// Client fields without the store-assigned id.
///
/// This is both the creation shape and the snapshot embedded in invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub age: i64,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Client {
    /// Strip the id, keeping the editable fields
    pub fn profile(&self) -> ClientProfile {
        ClientProfile {
            name: self.name.clone(),
            age: self.age,
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Merge-patch for a client: `None` leaves the field untouched.
///
/// `phone` is doubly optional so an explicit `null` can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
}

impl ClientPatch {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none() && self.phone.is_none()
    }

    /// Apply the patch onto an existing profile
    pub fn apply(self, mut profile: ClientProfile) -> ClientProfile {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(age) = self.age {
            profile.age = age;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        profile
    }
}
