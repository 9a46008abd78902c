//! Strongly typed string identifier wrappers.
//!
//! Input documents name every entity with a free-form string.  Wrapping each
//! kind in its own newtype keeps a package id from being passed where an
//! agent id is expected.  All IDs are `Ord + Hash` so they can be used as map
//! keys and sorted without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a `String`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(String);

        impl $name {
            #[inline]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

typed_id! {
    /// Identifier of a delivery agent.  Unique across initial and dynamic agents.
    pub struct AgentId;
}

typed_id! {
    /// Identifier of a package.
    pub struct PackageId;
}

typed_id! {
    /// Identifier of a warehouse (package pickup point).
    pub struct WarehouseId;
}
