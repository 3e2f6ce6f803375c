use serde::{Deserialize, Serialize};

/// Sign of an ecological balance value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    /// Biocapacity exceeds footprint
    Reserve,
    /// Footprint exceeds biocapacity
    Deficit,
    Balanced,
    Unknown,
}

impl BalanceStatus {
    pub fn classify(balance: Option<f64>) -> Self {
        match balance {
            None => BalanceStatus::Unknown,
            Some(v) if v > 0.0 => BalanceStatus::Reserve,
            Some(v) if v < 0.0 => BalanceStatus::Deficit,
            Some(_) => BalanceStatus::Balanced,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub reserve: usize,
    pub deficit: usize,
    pub balanced: usize,
    pub unknown: usize,
}

impl StatusCounts {
    pub fn tally(values: &[Option<f64>]) -> Self {
        let mut counts = Self::default();
        for value in values {
            match BalanceStatus::classify(*value) {
                BalanceStatus::Reserve => counts.reserve += 1,
                BalanceStatus::Deficit => counts.deficit += 1,
                BalanceStatus::Balanced => counts.balanced += 1,
                BalanceStatus::Unknown => counts.unknown += 1,
            }
        }
        counts
    }
}
