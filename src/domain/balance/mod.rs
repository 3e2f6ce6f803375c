// ============================================================
// ECOLOGICAL BALANCE DOMAIN LAYER
// ============================================================
// Derived-feature definitions and the row-wise difference that fills them

mod derivation;
mod feature;
mod status;

pub use derivation::{derive_feature, AddedColumn, DerivationOutcome, SkippedColumn, ValueRange};
pub use feature::{DerivedFeature, RangeFormat, ECO_BALANCE_FEATURES};
pub use status::{BalanceStatus, StatusCounts};
