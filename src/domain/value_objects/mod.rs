use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

pub const DEFAULT_LOCATION_ADDRESS: &str = "Shared Location";

/// Recipient phone number reduced to its digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strips every non-digit character and accepts 10 to 15 remaining digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
            return Err(DomainError::InvalidPhone {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits, for log lines.
    pub fn masked(&self) -> String {
        let tail = &self.0[self.0.len() - 4..];
        format!("***{tail}")
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl Location {
    pub fn parse(latitude: &str, longitude: &str, address: Option<&str>) -> Result<Self, DomainError> {
        let address = address
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_LOCATION_ADDRESS)
            .to_string();

        Ok(Self {
            latitude: parse_coordinate("latitude", latitude)?,
            longitude: parse_coordinate("longitude", longitude)?,
            address,
        })
    }
}

fn parse_coordinate(field: &'static str, value: &str) -> Result<f64, DomainError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DomainError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_strips_punctuation_and_country_code_symbols() {
        let phone = PhoneNumber::parse("+1 (555) 123-4567").unwrap();
        assert_eq!(phone.as_str(), "15551234567");
    }

    #[test]
    fn phone_accepts_length_bounds() {
        assert!(PhoneNumber::parse("5551234567").is_ok());
        assert!(PhoneNumber::parse("123456789012345").is_ok());
    }

    #[test]
    fn phone_rejects_out_of_range_lengths() {
        assert_eq!(
            PhoneNumber::parse("555123456"),
            Err(DomainError::InvalidPhone { digits: 9 })
        );
        assert_eq!(
            PhoneNumber::parse("1234567890123456"),
            Err(DomainError::InvalidPhone { digits: 16 })
        );
        assert_eq!(
            PhoneNumber::parse("+() --"),
            Err(DomainError::InvalidPhone { digits: 0 })
        );
        assert!(PhoneNumber::parse("").is_err());
    }

    #[test]
    fn phone_masks_all_but_last_four_digits() {
        let phone = PhoneNumber::parse("15551234567").unwrap();
        assert_eq!(phone.masked(), "***4567");
    }

    #[test]
    fn location_defaults_address() {
        let location = Location::parse("12.34", "56.78", None).unwrap();
        assert_eq!(location.latitude, 12.34);
        assert_eq!(location.longitude, 56.78);
        assert_eq!(location.address, DEFAULT_LOCATION_ADDRESS);

        let location = Location::parse("1", "2", Some("")).unwrap();
        assert_eq!(location.address, DEFAULT_LOCATION_ADDRESS);
    }

    #[test]
    fn location_rejects_non_numeric_coordinates() {
        assert!(matches!(
            Location::parse("north", "56.78", None),
            Err(DomainError::InvalidCoordinate { field: "latitude", .. })
        ));
        assert!(Location::parse("12.34", "NaN", None).is_err());
        assert!(Location::parse("12.34", "inf", None).is_err());
    }
}
