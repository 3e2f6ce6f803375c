use serde::Serialize;

/// How a derived column's range is rendered in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeFormat {
    /// Three decimals, for per-capita magnitudes
    Fixed,
    /// Three-decimal scientific notation, for global-hectare totals
    Scientific,
}

impl RangeFormat {
    pub fn render(&self, value: f64) -> String {
        match self {
            RangeFormat::Fixed => format!("{:.3}", value),
            RangeFormat::Scientific => format!("{:.3e}", value),
        }
    }
}

/// A column computed as `minuend - subtrahend`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedFeature {
    pub name: &'static str,
    pub minuend: &'static str,
    pub subtrahend: &'static str,
    pub range_format: RangeFormat,
}

impl DerivedFeature {
    /// Human-readable formula, e.g. `a = b - c`
    pub fn formula(&self) -> String {
        format!("{} = {} - {}", self.name, self.minuend, self.subtrahend)
    }

    pub fn sources(&self) -> [&'static str; 2] {
        [self.minuend, self.subtrahend]
    }
}

/// Biocapacity minus consumption footprint, per capita and in total
pub const ECO_BALANCE_FEATURES: [DerivedFeature; 2] = [
    DerivedFeature {
        name: "eco_balance_percap",
        minuend: "total_BiocapPerCap",
        subtrahend: "total_EFConsPerCap",
        range_format: RangeFormat::Fixed,
    },
    DerivedFeature {
        name: "eco_balance_total",
        minuend: "total_BiocapTotGHA",
        subtrahend: "total_EFConsTotGHA",
        range_format: RangeFormat::Scientific,
    },
];
