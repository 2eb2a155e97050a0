#![doc = include_str!("../README.md")]

//! Oracle integration: problem rendering, response parsing and the
//! subprocess backend.

pub mod backends;
pub mod oracle;
pub mod problem;
pub mod response;

pub use oracle::{AcceptedResponse, CompletionOracle, OracleProtocolError, RoundKind, Verdict};
pub use problem::Problem;
pub use response::{parse_response, OracleResponse, RewriteRule};
