//! Credential records and the authenticated session identity.

use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use super::{MerchantAccount, MerchantId};

/// A portal user as stored in the record set, including the password.
///
/// Only ever deserialized; the password is wrapped in a [`SecretString`]
/// so it is redacted from `Debug` output and zeroized on drop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: SecretString,
    /// Merchant display name.
    pub merchant_name: String,
    /// Merchant accounts this user can see.
    #[serde(default)]
    pub mids: Vec<MerchantAccount>,
}

impl UserRecord {
    /// Creates a record from its parts.
    #[inline]
    #[must_use]
    pub fn new(
        email: String,
        password: SecretString,
        merchant_name: String,
        mids: Vec<MerchantAccount>,
    ) -> Self {
        Self {
            email,
            password,
            merchant_name,
            mids,
        }
    }

    /// Returns `true` when both the email and the password match exactly.
    #[inline]
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }

    /// Builds the session identity for this user, leaving the password
    /// behind.
    #[inline]
    #[must_use]
    pub fn to_identity(&self) -> SessionIdentity {
        SessionIdentity::new(
            self.email.clone(),
            self.merchant_name.clone(),
            self.mids.clone(),
        )
    }
}

/// The identity held by an authenticated session.
///
/// Serialized into the session blob; it never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    /// Login email.
    pub email: String,
    /// Merchant display name.
    #[serde(rename = "merchantName")]
    pub display_name: String,
    /// Primary merchant identifier (the first account's MID).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<MerchantId>,
    /// Merchant accounts visible to this session.
    #[serde(rename = "mids", default)]
    pub accounts: Vec<MerchantAccount>,
}

impl SessionIdentity {
    /// Creates an identity; the primary MID is taken from the first account.
    #[inline]
    #[must_use]
    pub fn new(email: String, display_name: String, accounts: Vec<MerchantAccount>) -> Self {
        let merchant_id = accounts
            .first()
            .map(|account| account.merchant_id.clone());
        Self {
            email,
            display_name,
            merchant_id,
            accounts,
        }
    }

    /// Fills in a missing primary MID from the account list.
    ///
    /// Blobs written before the field existed carry only the accounts.
    #[inline]
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.merchant_id.is_none() {
            self.merchant_id = self
                .accounts
                .first()
                .map(|account| account.merchant_id.clone());
        }
        self
    }
}

/// Shape of the persisted session blob: `{ "user": SessionIdentity }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// The authenticated identity.
    pub user: SessionIdentity,
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r#"{
        "email": "merchant1@shemeel.com",
        "password": "password123",
        "merchantName": "ABC Retailers",
        "mids": [
            {
                "mid": "MID001",
                "paymentChannel": "ECOM",
                "status": "active",
                "createdDate": "2024-01-15",
                "totalTransactions": 142,
                "tids": []
            }
        ]
    }"#;

    #[test]
    fn user_record_matches_exact_credentials_only() {
        let user: UserRecord = serde_json::from_str(USER_JSON).unwrap();
        assert!(user.matches("merchant1@shemeel.com", "password123"));
        assert!(!user.matches("merchant1@shemeel.com", "wrong"));
        assert!(!user.matches("MERCHANT1@shemeel.com", "password123"));
        assert!(!user.matches("merchant1@shemeel.com", "password123 "));
    }

    #[test]
    fn user_record_debug_redacts_password() {
        let user: UserRecord = serde_json::from_str(USER_JSON).unwrap();
        let debug = format!("{user:?}");
        assert!(!debug.contains("password123"));
    }

    #[test]
    fn identity_drops_password() {
        let user: UserRecord = serde_json::from_str(USER_JSON).unwrap();
        let identity = user.to_identity();
        assert_eq!(identity.display_name, "ABC Retailers");
        assert_eq!(identity.merchant_id, Some(MerchantId::from("MID001")));

        let json = serde_json::to_string(&StoredSession { user: identity }).unwrap();
        assert!(json.starts_with(r#"{"user":"#));
        assert!(!json.contains("password"));
        assert!(json.contains(r#""merchantName":"ABC Retailers""#));
    }

    #[test]
    fn legacy_blob_without_merchant_id_is_normalized() {
        let json = r#"{"user": {"email": "a@b.c", "merchantName": "Shop", "mids": []}}"#;
        let stored: StoredSession = serde_json::from_str(json).unwrap();
        let identity = stored.user.normalized();
        assert!(identity.merchant_id.is_none());
        assert!(identity.accounts.is_empty());
    }

    #[test]
    fn normalized_fills_primary_merchant() {
        let user: UserRecord = serde_json::from_str(USER_JSON).unwrap();
        let mut identity = user.to_identity();
        identity.merchant_id = None;
        assert_eq!(
            identity.normalized().merchant_id,
            Some(MerchantId::from("MID001"))
        );
    }
}
