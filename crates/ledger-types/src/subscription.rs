//! Subscription plan and enrollment types

use serde::{Deserialize, Serialize};

use crate::ClientId;

/// Store-assigned subscription plan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub i64);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SubscriptionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A billable plan, defined independently of any client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID
    pub id: SubscriptionId,
    /// Plan name
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i64,
}

/// Subscription creation shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub name: String,
    pub price: i64,
}

/// Store-assigned enrollment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(pub i64);

impl std::fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enrollment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Enrollment is in effect
    #[default]
    Active,
    /// Enrollment has lapsed or been paused
    Inactive,
}

impl EnrollmentStatus {
    /// Stored string form
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = EnrollmentStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(EnrollmentStatusParseError(s.to_string())),
        }
    }
}

/// Error parsing an enrollment status string
#[derive(Debug, Clone)]
pub struct EnrollmentStatusParseError(pub String);

impl std::fmt::Display for EnrollmentStatusParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid enrollment status: {}", self.0)
    }
}

impl std::error::Error for EnrollmentStatusParseError {}

/// One enrollment of a client into a subscription plan.
///
/// Each subscribe call produces a new enrollment, so a client can hold
/// several rows against the same plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrollment ID
    pub id: EnrollmentId,
    /// Enrolled client
    pub client_id: ClientId,
    /// Plan enrolled into
    pub subscription_id: SubscriptionId,
    /// Enrollment status
    pub status: EnrollmentStatus,
}
