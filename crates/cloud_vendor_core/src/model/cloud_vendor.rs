//! Cloud vendor domain model.
//!
//! # Responsibility
//! - Define the canonical vendor record shared by repository and service.
//! - Own field-level validation rules applied on every write and read.
//!
//! # Invariants
//! - `vendor_id` is caller-supplied, trimmed and never rewritten by updates.
//! - `vendor_name` is never blank and carries no surrounding whitespace, so
//!   trimmed name lookups can always match it.
//! - `vendor_phone_number`, when set, only uses phone punctuation and digits.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum accepted length of `vendor_id`, in characters.
pub const MAX_VENDOR_ID_LEN: usize = 64;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-(). ]*[0-9][0-9+\-(). ]*$").expect("valid phone regex"));

/// Stable identifier of a cloud vendor record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type VendorId = String;

/// Canonical cloud vendor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudVendor {
    /// Primary lookup key.
    pub vendor_id: VendorId,
    /// Display name, matched exactly by name lookups.
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_address: Option<String>,
    #[serde(default)]
    pub vendor_phone_number: Option<String>,
}

/// Validation failures for `CloudVendor` field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorValidationError {
    EmptyId,
    IdTooLong { len: usize, max: usize },
    IdHasSurroundingWhitespace,
    EmptyName,
    NameHasSurroundingWhitespace,
    InvalidPhoneNumber(String),
}

impl Display for VendorValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "vendor id cannot be empty"),
            Self::IdTooLong { len, max } => {
                write!(f, "vendor id is {len} characters long; maximum is {max}")
            }
            Self::IdHasSurroundingWhitespace => {
                write!(f, "vendor id cannot start or end with whitespace")
            }
            Self::EmptyName => write!(f, "vendor name cannot be empty"),
            Self::NameHasSurroundingWhitespace => {
                write!(f, "vendor name cannot start or end with whitespace")
            }
            Self::InvalidPhoneNumber(value) => write!(f, "invalid vendor phone number `{value}`"),
        }
    }
}

impl Error for VendorValidationError {}

impl CloudVendor {
    /// Creates a vendor with only the required fields set.
    pub fn new(vendor_id: impl Into<VendorId>, vendor_name: impl Into<String>) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            vendor_name: vendor_name.into(),
            vendor_address: None,
            vendor_phone_number: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.vendor_address = Some(address.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.vendor_phone_number = Some(phone_number.into());
        self
    }

    /// Validates field rules.
    ///
    /// # Errors
    /// - Returns the first violated rule in field order (id, name, phone).
    pub fn validate(&self) -> Result<(), VendorValidationError> {
        if self.vendor_id.trim().is_empty() {
            return Err(VendorValidationError::EmptyId);
        }
        if self.vendor_id.trim() != self.vendor_id {
            return Err(VendorValidationError::IdHasSurroundingWhitespace);
        }
        let id_len = self.vendor_id.chars().count();
        if id_len > MAX_VENDOR_ID_LEN {
            return Err(VendorValidationError::IdTooLong {
                len: id_len,
                max: MAX_VENDOR_ID_LEN,
            });
        }
        if self.vendor_name.trim().is_empty() {
            return Err(VendorValidationError::EmptyName);
        }
        if self.vendor_name.trim() != self.vendor_name {
            return Err(VendorValidationError::NameHasSurroundingWhitespace);
        }
        if let Some(phone) = self.vendor_phone_number.as_deref() {
            if !PHONE_NUMBER_RE.is_match(phone) {
                return Err(VendorValidationError::InvalidPhoneNumber(phone.to_string()));
            }
        }
        Ok(())
    }
}
