//! Helpers shared by services and handlers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Destination URL checks
//! - [`password`] - Argon2id hashing

pub mod code_generator;
pub mod password;
pub mod url_validator;
