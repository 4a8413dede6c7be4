//! Usecases Layer - The Two Stores
//!
//! `UserStore` and `ReservationStore` implement the portal's business
//! operations on top of the `KeyValueStorage` port. Each store owns one
//! collection persisted whole under a fixed key; every operation is a
//! synchronous read-modify-write of that entry.
//!
//! Stores are plain instances constructed once at startup and shared
//! via `Arc` — no module-level singletons.

pub mod export;
pub mod reservation_store;
pub mod user_store;

pub use reservation_store::ReservationStore;
pub use user_store::{LoginOutcome, UserStore};

/// Fixed storage keys — the local-storage layout the portal pages read.
pub mod keys {
    /// JSON array of `UserRecord`.
    pub const USERS: &str = "silverAgeUsers";
    /// Single JSON `SessionRecord`, absent when logged out.
    pub const CURRENT_USER: &str = "silverAgeCurrentUser";
    /// JSON array of `ReservationRecord`.
    pub const RESERVATIONS: &str = "silverAgeReservations";
    /// Legacy key: JSON session blob older page scripts still read.
    pub const LEGACY_USER_INFO: &str = "userInfo";
    /// Legacy key: bare token string older page scripts still read.
    pub const LEGACY_TOKEN: &str = "elderly_vue_token";
}
