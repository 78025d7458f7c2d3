//! Email address value object

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ADDRESS_REGEX: Regex = Regex::new(r"^[^@\s]*?@[^@\s]*?\.[^@\s]*$").unwrap();
}

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use AddressError::*;

/// An error that can occur when constructing an address
#[derive(Debug, Error)]
pub enum AddressError {
    /// The address string is empty
    #[error("address is empty")]
    EmptyAddress,

    /// The address string is not a valid email address
    #[error("address is invalid")]
    InvalidAddress,
}

/// An email address with an optional display name
///
/// Equality is by content. An address with no display name falls back to the
/// address string itself when displayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    name: Option<String>,
    address: String,
}

impl Address {
    /// Create a new address with an optional display name
    ///
    /// # Arguments
    /// * `name` - Optional display name; empty or whitespace-only names are
    ///   treated as absent.
    /// * `address` - The email address string; must be non-empty and pass
    ///   basic syntax validation.
    ///
    /// # Returns
    /// A [`Result`] with the [`Address`], or an [`AddressError`] if the
    /// address string is empty or malformed.
    pub fn new(name: Option<&str>, address: &str) -> Result<Self, AddressError> {
        let trimmed = address.trim();

        if trimmed.is_empty() {
            return Err(EmptyAddress);
        }

        if !ADDRESS_REGEX.is_match(trimmed) {
            return Err(InvalidAddress);
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);

        Ok(Self {
            name,
            address: trimmed.to_string(),
        })
    }

    /// Create an address from a bare address string, with no display name
    pub fn parse(address: &str) -> Result<Self, AddressError> {
        Self::new(None, address)
    }

    /// The display name, falling back to the address string when absent
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => &self.address,
        }
    }

    /// The bare address string
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether an explicit display name was supplied
    pub fn has_name(&self) -> bool {
        self.name.is_some()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.address
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_display_name_falls_back_to_address() -> TestResult {
        let address = Address::parse("sam@example.com")?;

        assert_eq!(address.display_name(), "sam@example.com");

        Ok(())
    }

    #[test]
    fn test_empty_display_name_falls_back_to_address() -> TestResult {
        let address = Address::new(Some(""), "sam@example.com")?;

        assert_eq!(address.display_name(), "sam@example.com");
        assert!(!address.has_name());

        Ok(())
    }

    #[test]
    fn test_display_name_used_when_present() -> TestResult {
        let address = Address::new(Some("Sam"), "sam@example.com")?;

        assert_eq!(address.display_name(), "Sam");
        assert_eq!(format!("{}", address), "Sam <sam@example.com>");

        Ok(())
    }

    #[test]
    fn test_bare_address_display() -> TestResult {
        let address = Address::parse("sam@example.com")?;

        assert_eq!(format!("{}", address), "sam@example.com");

        Ok(())
    }

    #[test]
    fn test_empty_address_is_invalid() {
        let result = Address::parse("");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), EmptyAddress));
    }

    #[test]
    fn test_address_without_at_symbol_is_invalid() {
        let result = Address::parse("sam");
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), InvalidAddress));
    }

    #[test]
    fn test_equality_is_by_content() -> TestResult {
        let a = Address::new(Some("Sam"), "sam@example.com")?;
        let b = Address::new(Some("Sam"), "sam@example.com")?;

        assert_eq!(a, b);

        Ok(())
    }
}
