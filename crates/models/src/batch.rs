use crate::error::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

lazy_static! {
    /// Four digits: millennium 1 or 2, century digit 0 or 9
    static ref BATCH_PATTERN: Regex = Regex::new(r"^[12][09][0-9]{2}$").unwrap();
}

/// The graduating (or admission) year a student or alumnus belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Batch(u16);

impl Batch {
    pub fn year(self) -> u16 {
        self.0
    }
}

impl FromStr for Batch {
    type Err = ValidationError;

    fn from_str(batch: &str) -> Result<Self, Self::Err> {
        if batch.is_empty() {
            return Err(ValidationError::MissingBatch);
        }
        if !BATCH_PATTERN.is_match(batch) {
            return Err(ValidationError::InvalidBatch);
        }

        batch
            .parse::<u16>()
            .map(Batch)
            .map_err(|_| ValidationError::InvalidBatch)
    }
}

impl TryFrom<String> for Batch {
    type Error = ValidationError;

    fn try_from(batch: String) -> Result<Self, Self::Error> {
        Self::from_str(&batch)
    }
}

impl From<Batch> for String {
    fn from(batch: Batch) -> Self {
        batch.to_string()
    }
}

impl From<Batch> for i32 {
    fn from(batch: Batch) -> Self {
        i32::from(batch.0)
    }
}

impl Display for Batch {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Batch;
    use crate::error::ValidationError;
    use std::str::FromStr;

    #[test]
    fn test_accepts_plausible_decades() {
        for batch in ["1998", "1900", "2024", "2099", "1099", "2000"] {
            assert!(Batch::from_str(batch).is_ok(), "{batch} should be valid");
        }
        assert_eq!(Batch::from_str("2024").unwrap().year(), 2024);
    }

    #[test]
    fn test_rejects_malformed_batches() {
        for batch in ["3024", "2124", "1824", "202", "20245", "2o24", " 2024", "1,99", "-202"] {
            assert_eq!(
                Batch::from_str(batch),
                Err(ValidationError::InvalidBatch),
                "{batch} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_batch_is_missing() {
        assert_eq!(Batch::from_str(""), Err(ValidationError::MissingBatch));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let batch: Batch = serde_json::from_str("\"2021\"").unwrap();
        assert_eq!(batch.to_string(), "2021");
        assert!(serde_json::from_str::<Batch>("\"21\"").is_err());
    }
}
