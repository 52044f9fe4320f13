//! Local persistence for FinanzCLI
//!
//! The backend owns all financial data; the client only keeps its login
//! session on disk, written atomically.

pub mod file_io;
pub mod session;

pub use file_io::{read_json, write_json_atomic, write_private_json};
pub use session::{Session, SessionStore};
