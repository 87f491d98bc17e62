//! Option catalog types: collectible items, states and cities.
//!
//! Wire DTOs stay private to this module; the rest of the core only sees the
//! typed values below.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Option value the shell uses for "nothing selected yet".
pub const UNSET_OPTION_VALUE: &str = "0";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A collectible item tag offered by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub image_url: String,
}

/// A value picked from a select box.
pub trait OptionValue: Sized {
    /// Decodes a select-box value; the placeholder and the empty string mean "unset".
    fn from_option_value(value: &str) -> Option<Self>;

    fn as_option_value(&self) -> &str;
}

/// Serde adapter for `Option<T: OptionValue>` fields sent by the shell.
///
/// `"0"`, `""` and `null` read as `None`; `None` is written as `"0"`.
pub mod option_value {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{OptionValue, UNSET_OPTION_VALUE};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: OptionValue,
    {
        serializer.serialize_str(value.as_ref().map_or(UNSET_OPTION_VALUE, T::as_option_value))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: OptionValue,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(T::from_option_value))
    }
}

macro_rules! option_text {
    ($name:ident) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl OptionValue for $name {
            fn from_option_value(value: &str) -> Option<Self> {
                let value = value.trim();
                if value.is_empty() || value == UNSET_OPTION_VALUE {
                    None
                } else {
                    Some(Self::new(value))
                }
            }

            fn as_option_value(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

option_text!(RegionCode);
option_text!(CityName);

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog request failed: {message}")]
    Transport { message: String },

    #[error("catalog responded with HTTP {status}")]
    Status { status: u16 },

    #[error("catalog response body was missing or malformed")]
    MalformedBody,
}

// --- Wire shapes ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StateDto {
    #[serde(alias = "sigla")]
    code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CityDto {
    #[serde(alias = "nome")]
    name: String,
}

pub(crate) fn states_from_wire(body: Vec<StateDto>) -> Vec<RegionCode> {
    body.into_iter().map(|s| RegionCode(s.code)).collect()
}

pub(crate) fn cities_from_wire(body: Vec<CityDto>) -> Vec<CityName> {
    body.into_iter().map(|c| CityName(c.name)).collect()
}
