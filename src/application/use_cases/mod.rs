pub mod column_deriver;
