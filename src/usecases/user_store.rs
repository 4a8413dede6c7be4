//! User Store - Registration, Sessions, and Account Management
//!
//! Owns the `silverAgeUsers` collection and the single-slot
//! `silverAgeCurrentUser` session record. The two legacy keys
//! (`userInfo`, `elderly_vue_token`) are kept in sync with the session
//! so older page scripts keep working.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::StoreError;
use crate::domain::password::{hash_password, verify_password};
use crate::domain::user::{
    RegisterInput, SessionRecord, UserProfile, UserRecord, UserStats, UserUpdate,
};
use crate::domain::validate::{
    check_password_strength, is_valid_email, is_valid_phone, require_non_blank,
};
use crate::ports::storage::KeyValueStorage;

use super::keys;

/// Successful login result: the opaque session token plus the public
/// profile of the authenticated user.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserProfile,
}

/// User store over a key-value storage backend.
pub struct UserStore<S: KeyValueStorage> {
    storage: Arc<S>,
}

impl<S: KeyValueStorage> UserStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    // ── Collection access ───────────────────────────────────

    fn load_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let Some(raw) = self.storage.get(keys::USERS)? else {
            return Ok(Vec::new());
        };
        let users = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Storage(anyhow::Error::new(e).context(
                "corrupt user collection",
            )))?;
        Ok(users)
    }

    fn save_users(&self, users: &[UserRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string(users)
            .map_err(|e| StoreError::Storage(anyhow::Error::new(e)))?;
        self.storage.set(keys::USERS, &json)?;
        Ok(())
    }

    // ── Session slot ────────────────────────────────────────

    /// Read the current session record, if anyone is logged in.
    pub fn current_session(&self) -> Result<Option<SessionRecord>, StoreError> {
        let Some(raw) = self.storage.get(keys::CURRENT_USER)? else {
            return Ok(None);
        };
        let session = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Storage(anyhow::Error::new(e).context(
                "corrupt session record",
            )))?;
        Ok(Some(session))
    }

    /// Whether a session record currently exists.
    pub fn is_logged_in(&self) -> Result<bool, StoreError> {
        Ok(self.current_session()?.is_some())
    }

    fn write_session(&self, session: &SessionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| StoreError::Storage(anyhow::Error::new(e)))?;
        self.storage.set(keys::CURRENT_USER, &json)?;
        // Legacy mirrors for older page scripts
        self.storage.set(keys::LEGACY_USER_INFO, &json)?;
        self.storage.set(keys::LEGACY_TOKEN, &session.token)?;
        Ok(())
    }

    // ── Operations ──────────────────────────────────────────

    /// Register a new user.
    ///
    /// Validates required fields, email/phone format, and password
    /// length, then enforces email and phone uniqueness across the
    /// whole collection (active and inactive records alike).
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub fn register(&self, input: &RegisterInput) -> Result<UserProfile, StoreError> {
        let real_name = require_non_blank(&input.real_name, "realName")?;
        let email = require_non_blank(&input.email, "email")?;
        let phone = require_non_blank(&input.phone, "phone")?;
        if input.password.is_empty() {
            return Err(StoreError::MissingField("password"));
        }

        if !is_valid_email(email) {
            return Err(StoreError::Validation("invalid email address".into()));
        }
        if !is_valid_phone(phone) {
            return Err(StoreError::Validation("invalid phone number".into()));
        }
        check_password_strength(&input.password)?;

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict("email is already registered".into()));
        }
        if users.iter().any(|u| u.phone == phone) {
            return Err(StoreError::Conflict("phone is already registered".into()));
        }

        let record = UserRecord::new(
            real_name.to_string(),
            email.to_string(),
            phone.to_string(),
            hash_password(&input.password)?,
            input.address.trim().to_string(),
            input.user_type,
        );
        let profile = UserProfile::from(&record);
        users.push(record);
        self.save_users(&users)?;

        info!(user_id = %profile.id, user_type = %profile.user_type, "User registered");
        Ok(profile)
    }

    /// Authenticate and open a session.
    ///
    /// On success, updates `lastLoginAt`, writes the session record,
    /// and mirrors it into the legacy keys. A failed login leaves the
    /// user collection untouched.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, StoreError> {
        if email.trim().is_empty() {
            return Err(StoreError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(StoreError::MissingField("password"));
        }

        let mut users = self.load_users()?;
        let Some(user) = users
            .iter_mut()
            .find(|u| u.email == email && u.is_active)
        else {
            debug!("login rejected: no active record for email");
            return Err(StoreError::Unauthorized);
        };

        if !verify_password(password, &user.password_hash) {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(StoreError::Unauthorized);
        }

        let token = make_token(&user.id);
        user.last_login_at = Some(Utc::now());
        let session = SessionRecord::for_login(user, token.clone());
        let profile = UserProfile::from(&*user);
        self.save_users(&users)?;
        self.write_session(&session)?;

        info!(user_id = %profile.id, "User logged in");
        Ok(LoginOutcome {
            token,
            user: profile,
        })
    }

    /// Close the current session. Idempotent: logging out twice, or
    /// with no session at all, succeeds.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StoreError> {
        self.storage.remove(keys::CURRENT_USER)?;
        self.storage.remove(keys::LEGACY_USER_INFO)?;
        self.storage.remove(keys::LEGACY_TOKEN)?;
        info!("Session cleared");
        Ok(())
    }

    /// Apply allow-listed profile changes to a user.
    ///
    /// An email change is re-checked for uniqueness against every
    /// other record. When the updated user is the one in the session
    /// slot, the session copy (and its legacy mirrors) is refreshed.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub fn update_user(&self, id: &str, update: &UserUpdate) -> Result<UserProfile, StoreError> {
        let mut users = self.load_users()?;

        let Some(pos) = users.iter().position(|u| u.id == id) else {
            return Err(StoreError::NotFound {
                entity: "user",
                id: id.to_string(),
            });
        };

        if let Some(new_email) = update.email.as_deref() {
            let collides = users
                .iter()
                .any(|u| u.email == new_email && u.id != id);
            if collides {
                return Err(StoreError::Conflict("email is already in use".into()));
            }
        }

        let user = &mut users[pos];

        if let Some(real_name) = &update.real_name {
            user.real_name = real_name.clone();
        }
        if let Some(phone) = &update.phone {
            user.phone = phone.clone();
        }
        if let Some(address) = &update.address {
            user.address = address.clone();
        }
        if let Some(user_type) = update.user_type {
            user.user_type = user_type;
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        user.touch();

        let updated = user.clone();
        self.save_users(&users)?;

        if let Some(mut session) = self.current_session()? {
            if session.id == id {
                session.refresh_from(&updated);
                self.write_session(&session)?;
            }
        }

        info!(user_id = %id, "User updated");
        Ok(UserProfile::from(&updated))
    }

    /// Change a password after verifying the old one.
    #[instrument(skip(self, old_password, new_password), fields(user_id = %id))]
    pub fn change_password(
        &self,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.load_users()?;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Err(StoreError::NotFound {
                entity: "user",
                id: id.to_string(),
            });
        };

        if !verify_password(old_password, &user.password_hash) {
            return Err(StoreError::Unauthorized);
        }
        check_password_strength(new_password)?;

        user.password_hash = hash_password(new_password)?;
        user.touch();
        self.save_users(&users)?;

        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Reset a forgotten password.
    ///
    /// Requires an active record matching BOTH email and phone. This is
    /// a weak identity check with no possession proof; it exists only
    /// because the portal has no real auth boundary behind it.
    #[instrument(skip(self, new_password))]
    pub fn reset_password(
        &self,
        email: &str,
        phone: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.load_users()?;
        let Some(user) = users
            .iter_mut()
            .find(|u| u.email == email && u.phone == phone && u.is_active)
        else {
            return Err(StoreError::NotFound {
                entity: "user",
                id: email.to_string(),
            });
        };

        check_password_strength(new_password)?;

        user.password_hash = hash_password(new_password)?;
        user.touch();
        let user_id = user.id.clone();
        self.save_users(&users)?;

        info!(user_id = %user_id, "Password reset");
        Ok(())
    }

    /// Aggregate counts over the whole collection.
    pub fn stats(&self) -> Result<UserStats, StoreError> {
        Ok(UserStats::collect(&self.load_users()?))
    }
}

/// Opaque session token: user id + timestamp + random nonce, base64.
/// Not a credential for any real boundary — see module docs.
fn make_token(user_id: &str) -> String {
    let raw = format!(
        "{user_id}:{}:{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4()
    );
    BASE64.encode(raw)
}
