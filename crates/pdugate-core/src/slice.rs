//! Network slice descriptor (S-NSSAI) validation.

use std::fmt;

use crate::error::RegistryError;

/// Number of hex digits in a slice differentiator.
const SD_DIGITS: usize = 4;

/// A validated slice descriptor.
///
/// Only constructible through [`SliceDescriptor::parse`], so holding one
/// proves both range and format checks passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SliceDescriptor {
    sst: u8,
    sd: u16,
}

impl SliceDescriptor {
    /// Validate a raw `(sst, sd)` pair.
    ///
    /// Rules are applied in order and the first failure wins:
    /// 1. `sst` in `1..=255`
    /// 2. `sd` is exactly four ASCII hex digits (either case)
    pub fn parse(sst: i64, sd: &str) -> Result<Self, RegistryError> {
        let sst = u8::try_from(sst)
            .ok()
            .filter(|&v| v != 0)
            .ok_or(RegistryError::InvalidSst(sst))?;

        if sd.len() != SD_DIGITS || !sd.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RegistryError::InvalidSd(sd.to_string()));
        }
        let sd = u16::from_str_radix(sd, 16).map_err(|_| RegistryError::InvalidSd(sd.to_string()))?;

        Ok(Self { sst, sd })
    }

    /// Slice/service type.
    pub fn sst(&self) -> u8 {
        self.sst
    }

    /// Slice differentiator.
    pub fn sd(&self) -> u16 {
        self.sd
    }
}

impl fmt::Display for SliceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sst={} sd={:04x}", self.sst, self.sd)
    }
}
