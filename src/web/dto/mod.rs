//! Request and response DTOs for the Cumulus API.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
