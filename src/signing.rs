//! Request signing for the Daraz Open Platform.
//!
//! Every API call carries a `sign` parameter computed over the canonical form
//! of its other parameters. The platform recomputes the same value with the
//! shared app secret, so any deviation in ordering, case or concatenation
//! surfaces remotely as an authentication failure, never locally.
//!
//! # Canonical form
//!
//! 1. Sort parameter names in ascending byte order.
//! 2. Start from the API path (e.g. `/orders/get`).
//! 3. Append each `name` immediately followed by its `value`, with no
//!    separators.
//!
//! The resulting string is signed with HMAC-SHA256 keyed by the app secret
//! and hex-encoded in uppercase.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use daraz_sdk::signing::{canonical_string, sign};
//!
//! let mut params = BTreeMap::new();
//! params.insert("sign_method".to_string(), "sha256".to_string());
//! params.insert("app_key".to_string(), "123456".to_string());
//!
//! assert_eq!(
//!     canonical_string("/orders/get", &params),
//!     "/orders/getapp_key123456sign_methodsha256"
//! );
//!
//! let signature = sign("secret", "/orders/get", &params);
//! assert_eq!(signature.len(), 64);
//! assert_eq!(signature, signature.to_uppercase());
//! ```

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Name of the parameter carrying the signature.
pub const SIGN_PARAM: &str = "sign";

/// Value of the `sign_method` system parameter for this scheme.
pub const SIGN_METHOD: &str = "sha256";

/// Builds the canonical string that is signed for a request.
///
/// A `BTreeMap` iterates in ascending key order, which for `String` keys is
/// byte-lexicographic.
#[must_use]
pub fn canonical_string(path: &str, parameters: &BTreeMap<String, String>) -> String {
    let capacity = path.len()
        + parameters
            .iter()
            .map(|(name, value)| name.len() + value.len())
            .sum::<usize>();

    let mut canonical = String::with_capacity(capacity);
    canonical.push_str(path);
    for (name, value) in parameters {
        canonical.push_str(name);
        canonical.push_str(value);
    }
    canonical
}

/// Computes the request signature for `path` and `parameters`.
///
/// The `sign` parameter itself must not be in `parameters`; file parameters
/// are never part of the signed set.
///
/// # Returns
///
/// An uppercase hex-encoded HMAC-SHA256 digest (64 characters).
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn sign(secret: &str, path: &str, parameters: &BTreeMap<String, String>) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(canonical_string(path, parameters).as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}

/// Checks a received signature against the expected one.
///
/// Hex case is ignored. The comparison runs in constant time with respect to
/// the signature contents.
#[must_use]
pub fn verify(
    secret: &str,
    path: &str,
    parameters: &BTreeMap<String, String>,
    signature: &str,
) -> bool {
    let expected = sign(secret, path, parameters);
    let received = signature.trim().to_ascii_uppercase();
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
