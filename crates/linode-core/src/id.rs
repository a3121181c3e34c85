//! Strongly-typed integer identifiers for Linode resources.
//!
//! The API assigns every resource a numeric id. Wrapping each in its own type
//! keeps a NodeBalancer id from being passed where a config id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::endpoint::ParentId;
use crate::error::{Error, Result};

/// Macro to generate strongly-typed id wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw id.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parses an id from its decimal form, as stored in Terraform state.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a positive integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                match input.trim().parse::<u64>() {
                    Ok(0) | Err(_) => Err(Error::Validation(format!(
                        "invalid {}: `{input}`",
                        stringify!($name)
                    ))),
                    Ok(id) => Ok(Self(id)),
                }
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ParentId for $name {
            const NESTED: bool = true;

            fn segment(self) -> Option<String> {
                Some(self.0.to_string())
            }
        }
    };
}

id_type!(NodeBalancerId, "NodeBalancer id");
id_type!(NodeBalancerConfigId, "NodeBalancer config id");
id_type!(LinodeId, "Linode instance id");
id_type!(InstanceConfigId, "Instance config id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_valid() {
        let id = NodeBalancerId::parse_str("123").unwrap();
        assert_eq!(id.get(), 123);
        assert_eq!(id.to_string(), "123");
    }

    #[test]
    fn test_parse_str_rejects_zero_and_garbage() {
        for input in ["0", "", "abc", "-4", "1.5"] {
            let err = LinodeId::parse_str(input).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{input}");
        }
    }

    #[test]
    fn test_from_str() {
        let id: InstanceConfigId = " 42 ".parse().unwrap();
        assert_eq!(u64::from(id), 42);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = NodeBalancerConfigId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: NodeBalancerConfigId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ids_are_parents() {
        assert!(<NodeBalancerId as ParentId>::NESTED);
        assert_eq!(NodeBalancerId::new(9).segment().as_deref(), Some("9"));
    }
}
