// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type for sensitive string values.
//!
//! [`SecretString`] holds values like access tokens and passwords so they
//! cannot leak through `Debug` formatting or tracing output. The inner value
//! is only reachable through an explicit [`SecretString::expose`] call, and
//! the backing memory is zeroized when the wrapper is dropped.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string whose value is redacted from all formatting output.
///
/// # Example
///
/// ```
/// use regatta_common_secret::SecretString;
///
/// let token = SecretString::new("pat-abc123".to_string());
/// assert_eq!(format!("{token:?}"), "SecretString([REDACTED])");
/// assert_eq!(token.expose(), "pat-abc123");
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	/// Wrap a sensitive value.
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Access the inner value.
	///
	/// Call sites should pass the result directly to whatever needs the raw
	/// value (an `Authorization` header, a request payload) rather than
	/// storing it in an unprotected binding.
	pub fn expose(&self) -> &String {
		&self.0
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer).map(SecretString)
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		/// No value may ever appear in debug output, whatever it contains.
		#[test]
		fn value_never_in_debug(value in "[a-zA-Z0-9]{8,64}") {
			prop_assume!(!value.contains("REDACTED"));
			let secret = SecretString::new(value.clone());
			let debug = format!("{secret:?}");
			prop_assert!(!debug.contains(&value));
		}

		/// Wrapping and exposing is the identity on the inner value.
		#[test]
		fn expose_is_identity(value in ".*") {
			let secret = SecretString::new(value.clone());
			prop_assert_eq!(secret.expose(), &value);
		}
	}
}
