use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{LedgerError, PLATE_PAIRS, PLATE_PAIR_LEN, PLATE_SEPARATOR};

/// A normalized license plate, the key of every stay history.
///
/// Three two-character pairs joined by `-`, each pair all letters or all
/// digits, with at least one pair of each kind (`AA-00-AA`, `00-AA-00`,
/// `AA-AA-00`). Letters are stored upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VehicleId(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairKind {
    Letters,
    Digits,
}

fn pair_kind(pair: &str) -> Option<PairKind> {
    if pair.len() != PLATE_PAIR_LEN {
        return None;
    }
    if pair.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(PairKind::Letters)
    } else if pair.bytes().all(|b| b.is_ascii_digit()) {
        Some(PairKind::Digits)
    } else {
        None
    }
}

impl VehicleId {
    /// Validates and normalizes a plate, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// Returns `LedgerError::InvalidPlate` if the text is not a valid plate.
    pub fn new(plate: &str) -> Result<Self, LedgerError> {
        let plate = plate.trim();
        let invalid = || LedgerError::InvalidPlate(plate.to_owned());

        let kinds = plate
            .split(PLATE_SEPARATOR)
            .map(pair_kind)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        if kinds.len() != PLATE_PAIRS
            || !kinds.contains(&PairKind::Letters)
            || !kinds.contains(&PairKind::Digits)
        {
            return Err(invalid());
        }

        Ok(Self(plate.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VehicleId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for VehicleId {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl AsRef<str> for VehicleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for VehicleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for VehicleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
