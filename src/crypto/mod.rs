//! Cryptographic functions for the budget tracker
//!
//! Provides salted Argon2id password hashing and a zeroizing string type for
//! plaintext passwords.

pub mod password;
pub mod secure_memory;

pub use password::{hash_password, verify_password, verify_password_or_dummy, PasswordHashParams};
pub use secure_memory::SecureString;
