use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for rental units.
///
/// Identity is case-insensitive: `"P1"` and `"p1"` name the same property. The original
/// spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased lookup key used by the registry.
    pub fn canonical(&self) -> String {
        canonical_key(&self.0)
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.canonical() == canonical_key(raw)
    }
}

impl PartialEq for PropertyId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for PropertyId {}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier wrapper for renters. Compared case-insensitively like [`PropertyId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn canonical(&self) -> String {
        canonical_key(&self.0)
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.canonical() == canonical_key(raw)
    }
}

impl PartialEq for TenantId {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

impl Eq for TenantId {}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

pub(crate) fn canonical_key(raw: &str) -> String {
    raw.to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Apartment, Self::House, Self::Commercial]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::House => "House",
            Self::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropertyType {
    type Err = DomainParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainParseError::PropertyType(raw.to_string()))
    }
}

/// Monthly rent held as whole cents so amounts stay exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rent {
    cents: u64,
}

impl Rent {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    /// Whole-dollar amounts too large to hold in cents saturate at `u64::MAX` cents.
    pub const fn from_dollars(dollars: u64) -> Self {
        Self {
            cents: dollars.saturating_mul(100),
        }
    }

    pub const fn cents(self) -> u64 {
        self.cents
    }

    pub const fn is_zero(self) -> bool {
        self.cents == 0
    }

    /// Plain decimal rendering without currency symbol or grouping, e.g. `1500.00`.
    pub fn to_decimal_string(self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl fmt::Display for Rent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = (self.cents / 100).to_string();
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (idx, digit) in whole.chars().enumerate() {
            if idx > 0 && (whole.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        let rendered = format!("${}.{:02}", grouped, self.cents % 100);
        f.pad(&rendered)
    }
}

impl FromStr for Rent {
    type Err = DomainParseError;

    /// Accepts `1500`, `1500.5`, `1,500.00` and `$1500`. At most two decimal places.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainParseError::Rent(raw.to_string());
        let cleaned: String = raw
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let dollars = if whole.is_empty() {
            0
        } else {
            whole.parse::<u64>().map_err(|_| invalid())?
        };
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| invalid())?,
        };

        dollars
            .checked_mul(100)
            .and_then(|total| total.checked_add(cents))
            .map(Self::from_cents)
            .ok_or_else(invalid)
    }
}

impl Serialize for Rent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Rent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors raised while parsing free-text values into domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainParseError {
    #[error("'{0}' is not a valid rent amount")]
    Rent(String),
    #[error("'{0}' is not one of Apartment, House or Commercial")]
    PropertyType(String),
}

/// One rental unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub address: String,
    pub monthly_rent: Rent,
    pub kind: PropertyType,
    pub bedrooms: u32,
    pub square_footage: u32,
    is_occupied: bool,
}

impl Property {
    /// Builds a vacant property.
    pub fn new(
        id: impl Into<PropertyId>,
        address: impl Into<String>,
        monthly_rent: Rent,
        kind: PropertyType,
        bedrooms: u32,
        square_footage: u32,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            monthly_rent,
            kind,
            bedrooms,
            square_footage,
            is_occupied: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.is_occupied
    }

    pub fn is_available(&self) -> bool {
        !self.is_occupied
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_occupied {
            "Occupied"
        } else {
            "Vacant"
        }
    }

    pub(crate) fn set_occupied(&mut self, occupied: bool) {
        self.is_occupied = occupied;
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Address: {}, Rent: {}, Type: {}, Status: {}",
            self.id,
            self.address,
            self.monthly_rent,
            self.kind,
            self.status_label()
        )
    }
}

impl From<String> for PropertyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One renter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
}

impl Tenant {
    pub fn new(
        id: impl Into<TenantId>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            date_of_birth,
        }
    }

    /// Whole years between the date of birth and `today`; zero for future birth dates.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        if today < self.date_of_birth {
            return 0;
        }
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day())
        {
            age -= 1;
        }
        u32::try_from(age).unwrap_or(0)
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Email: {}, Phone: {}",
            self.id, self.full_name, self.email, self.phone
        )
    }
}
