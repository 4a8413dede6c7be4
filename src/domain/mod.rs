//! Domain layer - Records, validation, and hashing rules.
//!
//! Pure business types for the SilverAge data layer. Nothing here
//! touches storage; everything is serializable and testable in
//! isolation.

pub mod error;
pub mod password;
pub mod reservation;
pub mod user;
pub mod validate;

// Re-export core types for convenience
pub use error::{ErrorKind, StoreError};
pub use reservation::{
    ReservationInput, ReservationRecord, ReservationStats, ReservationStatus,
};
pub use user::{
    RegisterInput, SessionRecord, UserProfile, UserRecord, UserStats, UserType,
    UserUpdate,
};
