//! Cross-cutting helpers shared by the server crate and the binary.

pub mod types;
pub mod utils;
