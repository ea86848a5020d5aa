pub mod charge_reader;
pub mod receipt_writer;
