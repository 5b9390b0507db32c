//! Strongly-typed ID newtypes for domain entities.
//!
//! This module provides newtype wrappers around `Uuid` for each entity type,
//! preventing accidental misuse of IDs (e.g., passing a `FormSessionId` where a `RoleId` is expected).
//!
//! # Example
//!
//! ```ignore
//! use keystone_models::ids::{FormSessionId, RoleId};
//!
//! fn get_role(id: RoleId) { /* ... */ }
//!
//! let role_id = RoleId::new();
//! let session_id = FormSessionId::new();
//!
//! get_role(role_id);       // OK
//! // get_role(session_id); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Macro to define a strongly-typed ID newtype.
///
/// This macro generates a newtype wrapper around `Uuid` with the trait
/// implementations needed for path extraction, serialization, and API documentation.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID.
            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Create an ID from a u128 value (useful for constants).
            #[inline]
            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            /// Get the inner UUID value.
            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// Get a reference to the inner UUID.
            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Create a nil (all zeros) ID.
            #[inline]
            pub const fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Check if this is a nil ID.
            #[inline]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl AsRef<Uuid> for $name {
            #[inline]
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        // Serde Deserialize - manual impl for transparent UUID deserialization
        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for Role entities.
    RoleId
);

define_id!(
    /// Strongly-typed ID for an open role form editing session.
    FormSessionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = RoleId::new();
        assert!(!id.is_nil());
        assert_ne!(id, RoleId::new());
    }

    #[test]
    fn test_id_from_u128() {
        let id = RoleId::from_u128(0x00000000_0000_0000_0000_000000000001);
        assert_eq!(
            id.into_inner(),
            Uuid::from_u128(0x00000000_0000_0000_0000_000000000001)
        );
    }

    #[test]
    fn test_id_nil() {
        assert!(FormSessionId::nil().is_nil());
    }

    #[test]
    fn test_id_debug_and_display() {
        let id = FormSessionId::from_u128(0x12345678_1234_1234_1234_123456789abc);
        assert_eq!(
            format!("{:?}", id),
            "FormSessionId(12345678-1234-1234-1234-123456789abc)"
        );
        assert_eq!(id.to_string(), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn test_id_from_str() {
        let id: RoleId = "12345678-1234-1234-1234-123456789abc".parse().unwrap();
        assert_eq!(
            id.into_inner(),
            Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc)
        );

        let invalid: Result<RoleId, _> = "not-a-role".parse();
        assert!(invalid.is_err());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = RoleId::from_u128(0x12345678_1234_1234_1234_123456789abc);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""12345678-1234-1234-1234-123456789abc""#);

        let back: RoleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
