// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constructor identifiers.
//!
//! An [`Identifier`] is the CRC-32 (IEEE polynomial, the one used by zip and
//! gzip) of a constructor's canonical scheme text. It is meant to prefix
//! encoded values on the wire, so it must be reproducible bit-for-bit by any
//! other implementation of the scheme.

use std::fmt;

/// CRC-32 identifier of a canonical scheme string.
///
/// # Example
///
/// ```
/// use bscheme::Identifier;
///
/// let id = Identifier::of("user id: int, first_name: str = User");
/// assert_eq!(Identifier::from_hex(&id.to_string()), Some(id));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(u32);

impl Identifier {
    /// Create from a raw CRC-32 value.
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Raw CRC-32 value.
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Compute the identifier of `text` (CRC-32 over its UTF-8 bytes).
    pub fn of(text: &str) -> Self {
        Self(crc32fast::hash(text.as_bytes()))
    }

    /// Parse the rendered (unpadded, lowercase or uppercase) hex form.
    pub fn from_hex(text: &str) -> Option<Self> {
        if text.is_empty() || text.len() > 8 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(text, 16).ok().map(Self)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:x})", self.0)
    }
}

/// Lowercase hex without zero padding, 1 to 8 characters wide.
impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl From<Identifier> for u32 {
    fn from(id: Identifier) -> Self {
        id.0
    }
}
