//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, trimmed
//! names, non-negative quantities, known weekdays) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier was blank.
    #[error("id cannot be empty")]
    EmptyId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Amount was negative, NaN or infinite where that is not allowed.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// Quantity was zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Weekday name did not match any known day.
    #[error("unknown weekday: {0}")]
    UnknownWeekday(String),
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for opaque record identifiers
/// assigned by the API.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier ensuring it is not blank.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    Err(TypeConstraintError::EmptyId)
                } else {
                    Ok(Self(trimmed))
                }
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a customer.");
id_newtype!(ProductId, "Unique identifier for a product.");
id_newtype!(OrderId, "Unique identifier for an order.");
id_newtype!(RouteId, "Unique identifier for a persisted route.");

/// Lower-cased and validated email address used to sign in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LoginEmail(String);

impl LoginEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LoginEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(ClientName, "Customer name wrapper enforcing non-empty values.");

non_empty_string_newtype!(ProductName, "Product name wrapper enforcing non-empty values.");

/// Money amount kept in the smallest currency unit (cents).
///
/// The API exchanges amounts as decimal numbers; conversion happens once at
/// the wire boundary so arithmetic on totals and balances stays exact.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount accepted from a decimal value, in cents.
    pub const MAX_CENTS: i64 = 1_000_000_000_000_000;

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a decimal amount (e.g. `12.5`) rounding to the nearest cent.
    pub fn from_major(value: f64) -> Result<Self, TypeConstraintError> {
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::MAX_CENTS as f64 {
            return Err(TypeConstraintError::InvalidAmount(value.to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Like [`Money::from_major`] but rejects negative amounts.
    pub fn non_negative(value: f64) -> Result<Self, TypeConstraintError> {
        let money = Self::from_major(value)?;
        if money.is_negative() {
            return Err(TypeConstraintError::InvalidAmount(value.to_string()));
        }
        Ok(money)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Multiplies a unit price by a quantity.
    pub fn times(self, quantity: Quantity) -> Result<Self, TypeConstraintError> {
        self.0
            .checked_mul(i64::from(quantity.get()))
            .map(Self)
            .ok_or_else(|| {
                TypeConstraintError::InvalidAmount(format!("{self} x {}", quantity.get()))
            })
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self, TypeConstraintError> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| TypeConstraintError::InvalidAmount(format!("{self} + {rhs}")))
    }

    /// Adds up amounts, failing instead of overflowing.
    pub fn try_sum<I>(amounts: I) -> Result<Self, TypeConstraintError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// Item quantity, always at least one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value == 0 {
            Err(TypeConstraintError::ZeroQuantity)
        } else {
            Ok(Self(value))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = TypeConstraintError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

/// Day of the week on which a client expects a visit.
///
/// The API names days in Spanish (`lunes` … `domingo`). Parsing is
/// case-insensitive and accepts the unaccented spellings `miercoles` and
/// `sabado`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VisitDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl VisitDay {
    /// All days in the order the client form lists them.
    pub const ALL: [VisitDay; 7] = [
        VisitDay::Monday,
        VisitDay::Tuesday,
        VisitDay::Wednesday,
        VisitDay::Thursday,
        VisitDay::Friday,
        VisitDay::Saturday,
        VisitDay::Sunday,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            VisitDay::Monday => "lunes",
            VisitDay::Tuesday => "martes",
            VisitDay::Wednesday => "miércoles",
            VisitDay::Thursday => "jueves",
            VisitDay::Friday => "viernes",
            VisitDay::Saturday => "sábado",
            VisitDay::Sunday => "domingo",
        }
    }

    pub const fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => VisitDay::Monday,
            Weekday::Tue => VisitDay::Tuesday,
            Weekday::Wed => VisitDay::Wednesday,
            Weekday::Thu => VisitDay::Thursday,
            Weekday::Fri => VisitDay::Friday,
            Weekday::Sat => VisitDay::Saturday,
            Weekday::Sun => VisitDay::Sunday,
        }
    }

    pub const fn to_weekday(self) -> Weekday {
        match self {
            VisitDay::Monday => Weekday::Mon,
            VisitDay::Tuesday => Weekday::Tue,
            VisitDay::Wednesday => Weekday::Wed,
            VisitDay::Thursday => Weekday::Thu,
            VisitDay::Friday => Weekday::Fri,
            VisitDay::Saturday => Weekday::Sat,
            VisitDay::Sunday => Weekday::Sun,
        }
    }
}

impl Display for VisitDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisitDay {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunes" => Ok(VisitDay::Monday),
            "martes" => Ok(VisitDay::Tuesday),
            "miércoles" | "miercoles" => Ok(VisitDay::Wednesday),
            "jueves" => Ok(VisitDay::Thursday),
            "viernes" => Ok(VisitDay::Friday),
            "sábado" | "sabado" => Ok(VisitDay::Saturday),
            "domingo" => Ok(VisitDay::Sunday),
            _ => Err(TypeConstraintError::UnknownWeekday(s.to_string())),
        }
    }
}

impl Serialize for VisitDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VisitDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
