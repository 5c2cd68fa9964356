//! Newtype wrappers for record identifiers.
//!
//! MIDs, TIDs and transaction IDs are all plain strings in the record
//! JSON; wrapping them keeps lookups from mixing them up.

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapping a `String` inner type.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from the given string.
            #[inline]
            #[must_use]
            pub const fn new(value: String) -> Self {
                Self(value)
            }

            /// Returns a reference to the inner string.
            #[inline]
            #[must_use]
            pub fn as_inner(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner string.
            #[inline]
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

define_string_id! {
    /// Merchant identifier (MID), e.g. `MID001`.
    MerchantId
}

define_string_id! {
    /// Terminal identifier (TID), e.g. `TID1001`.
    TerminalId
}

define_string_id! {
    /// Unique transaction identifier, e.g. `TRANS001`.
    TransactionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merchant_id_serializes_as_plain_string() {
        let id = MerchantId::new("MID001".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""MID001""#);
        let deserialized: MerchantId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn string_id_display() {
        let id = TerminalId::from("TID1001");
        assert_eq!(id.to_string(), "TID1001");
    }

    #[test]
    fn id_from_inner() {
        let id: TransactionId = "TRANS001".to_owned().into();
        assert_eq!(id.as_inner(), "TRANS001");
        assert_eq!(id.into_inner(), "TRANS001");
    }

    #[test]
    fn ids_order_lexicographically() {
        assert!(MerchantId::from("MID001") < MerchantId::from("MID002"));
    }
}
