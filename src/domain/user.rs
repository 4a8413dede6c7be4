//! User Domain Types
//!
//! Durable user records, the single-slot session record, public
//! projections, and aggregate stats. All persisted types serialize as
//! camelCase JSON to stay byte-compatible with the blobs the portal
//! pages already read from local storage.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;

/// Account category on the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Elderly resident receiving services
    Elderly,
    /// Family member managing a resident's account
    Family,
    /// Municipal service manager
    Manager,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Elderly => write!(f, "elderly"),
            Self::Family => write!(f, "family"),
            Self::Manager => write!(f, "manager"),
        }
    }
}

impl FromStr for UserType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "elderly" => Ok(Self::Elderly),
            "family" => Ok(Self::Family),
            "manager" => Ok(Self::Manager),
            other => Err(StoreError::Validation(format!(
                "unknown user type: {other}"
            ))),
        }
    }
}

/// Durable user record as persisted under `silverAgeUsers`.
///
/// Email and phone are unique across active and inactive records alike;
/// records are deactivated, never hard-deleted, so neither key is ever
/// reclaimed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque unique ID.
    pub id: String,
    /// Display name.
    pub real_name: String,
    /// Login identifier, unique.
    pub email: String,
    /// Contact number, unique.
    pub phone: String,
    /// PHC-format Argon2id hash.
    pub password_hash: String,
    /// Free-text address (may be empty).
    pub address: String,
    /// Account category.
    pub user_type: UserType,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Last successful login, absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    /// Deactivated accounts keep their record but cannot log in.
    pub is_active: bool,
}

impl UserRecord {
    /// Create a fresh active record with a new ID and current timestamps.
    pub fn new(
        real_name: String,
        email: String,
        phone: String,
        password_hash: String,
        address: String,
        user_type: UserType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            real_name,
            email,
            phone,
            password_hash,
            address,
            user_type,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            is_active: true,
        }
    }

    /// Bump the mutation timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public projection of a user record — everything except the
/// password hash. This is what operations hand back to UI glue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub real_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            real_name: record.real_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            user_type: record.user_type,
            created_at: record.created_at,
        }
    }
}

/// The single current-login record persisted under
/// `silverAgeCurrentUser`. Exactly zero or one instance exists; login
/// overwrites it, logout removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub real_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub user_type: UserType,
    /// Opaque session token, mirrored into the legacy keys.
    pub token: String,
    pub login_time: DateTime<Utc>,
}

impl SessionRecord {
    /// Build a session snapshot for a just-authenticated user.
    pub fn for_login(record: &UserRecord, token: String) -> Self {
        Self {
            id: record.id.clone(),
            real_name: record.real_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            address: record.address.clone(),
            user_type: record.user_type,
            token,
            login_time: Utc::now(),
        }
    }

    /// Refresh the profile fields from an updated record, keeping the
    /// token and login time.
    pub fn refresh_from(&mut self, record: &UserRecord) {
        self.real_name = record.real_name.clone();
        self.email = record.email.clone();
        self.phone = record.phone.clone();
        self.address = record.address.clone();
        self.user_type = record.user_type;
    }
}

/// Registration form input.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub real_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    /// Optional at registration time; defaults to empty.
    #[serde(default)]
    pub address: String,
    pub user_type: UserType,
}

/// Allow-listed mutable fields for `update_user`. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub real_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub user_type: Option<UserType>,
    /// Email changes re-check uniqueness against all other records.
    pub email: Option<String>,
}

/// Per-type user counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserTypeCounts {
    pub elderly: u64,
    pub family: u64,
    pub manager: u64,
}

/// Aggregate user statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub by_type: UserTypeCounts,
}

impl UserStats {
    /// Tally a full user collection.
    pub fn collect(users: &[UserRecord]) -> Self {
        let mut stats = Self {
            total: users.len() as u64,
            ..Self::default()
        };
        for user in users {
            if user.is_active {
                stats.active += 1;
            }
            match user.user_type {
                UserType::Elderly => stats.by_type.elderly += 1,
                UserType::Family => stats.by_type.family += 1,
                UserType::Manager => stats.by_type.manager += 1,
            }
        }
        stats
    }
}
