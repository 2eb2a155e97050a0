pub mod tptp_printer;
pub mod twee_backend;
