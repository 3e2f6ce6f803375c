// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Column-oriented tabular data held in memory between read and write
// No I/O, no external dependencies beyond serde

mod cell;
mod column;
mod table;

pub use cell::{format_number, Cell, CellValue};
pub use column::Column;
pub use table::{Dataset, TextEncoding};
