//! Jersey sizes.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not one of the supported sizes.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown size '{0}' (expected one of S, M, L, XL, XXL)")]
pub struct ParseSizeError(String);

/// A jersey size.
///
/// Variants are declared smallest to largest, so the derived `Ord` sorts by
/// garment size rather than alphabetically (`S < M < L < XL < XXL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    /// Every size, smallest first.
    pub const ALL: [Self; 5] = [Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// The size label as shown on the tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSizeError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_garment_size() {
        let mut sizes = vec![Size::XXL, Size::S, Size::XL, Size::M, Size::L];
        sizes.sort();
        assert_eq!(sizes, Size::ALL.to_vec());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("xl".parse::<Size>().unwrap(), Size::XL);
        assert_eq!(" M ".parse::<Size>().unwrap(), Size::M);
        assert!("XS".parse::<Size>().is_err());
        assert!("".parse::<Size>().is_err());
    }

    #[test]
    fn test_serde_uses_tag_labels() {
        assert_eq!(serde_json::to_string(&Size::XXL).unwrap(), "\"XXL\"");
        let size: Size = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(size, Size::L);
        assert!(serde_json::from_str::<Size>("\"XS\"").is_err());
    }
}
