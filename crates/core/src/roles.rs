//! Well-known project role name constants.
//!
//! Roles are assigned by the surrounding platform and injected into every
//! request; these constants must match the values it sends.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_LEADER: &str = "leader";
