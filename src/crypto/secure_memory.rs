//! Secure memory handling for plaintext passwords
//!
//! Plaintext passwords only live as long as a register or login call and are
//! wiped from memory on drop.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string type that zeros its contents on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new SecureString
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }
}

impl Deref for SecureString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureString")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_derefs_to_contents() {
        let s = SecureString::new(String::from("test"));
        assert_eq!(&*s, "test");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_debug_and_display_redact() {
        let s = SecureString::new("hunter2");
        assert!(!format!("{:?}", s).contains("hunter2"));
        assert_eq!(s.to_string(), "[REDACTED 7 bytes]");
    }

    #[test]
    fn test_zeroize_clears_contents() {
        let mut s = SecureString::new("hunter2");
        s.zeroize();
        assert!(s.is_empty());
    }
}
