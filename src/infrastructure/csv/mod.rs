// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Reading datasets from delimited text and writing them back

mod csv_reader;
mod csv_writer;

pub use csv_reader::CsvReader;
pub use csv_writer::CsvWriter;
