//! Forward-compatible JSON codec shared by every API model.
//!
//! Every request and response body is wrapped in [`Model<T>`], which is either
//! fully typed or an opaque copy of the JSON object the server sent. Decoding
//! never fails because the server added an enum member or changed the shape of
//! a property; the payload is kept as-is instead, so encoding it again
//! reproduces exactly what was received.
//!
//! Only two conditions are fatal when decoding: the bytes are not a JSON object
//! ([`CodecError::MalformedJson`]) or a required property is absent
//! ([`CodecError::MissingRequiredField`]). Encoding fails with
//! [`CodecError::Encoding`] when a typed value holds a NaN or infinite number,
//! which JSON cannot represent.
//!
//! ```
//! use datadog_api_client::model::Model;
//! use datadog_api_client::models::LogsExclusionFilter;
//!
//! let filter: Model<LogsExclusionFilter> =
//!     Model::decode(br#"{"sample_rate": 0.5, "owner": "team-a"}"#).unwrap();
//! assert_eq!(filter.typed().map(|f| f.sample_rate), Some(0.5));
//! assert!(filter.additional_properties().unwrap().contains_key("owner"));
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod enums;
mod macros;

pub use enums::ApiEnum;
pub(crate) use macros::api_model;

/// Raw JSON object kept verbatim (unparsed payloads and additional properties).
pub type UnparsedObject = Map<String, Value>;

/// Failures surfaced by [`Model::decode`] and [`Model::encode`].
///
/// Schema drift (unknown enum members, mismatched property types) is not an
/// error; it yields a [`Model::Unparsed`] value instead.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed json: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("required field {field} missing from {model}")]
    MissingRequiredField {
        model: &'static str,
        field: &'static str,
    },

    #[error("failed to encode {model}: {source}")]
    Encoding {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a decoded payload could not be committed in typed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drift {
    /// The property held a value outside its enum allow-list.
    UnknownEnumValue(&'static str),
    /// The property is a nested model that was itself kept unparsed.
    UnparsedNested(&'static str),
}

/// Schema description of a model type, generated by `api_model!`.
pub trait Schema: Serialize + DeserializeOwned {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Wire keys of required properties, in declaration order.
    const REQUIRED: &'static [&'static str];
    /// Wire keys of optional properties.
    const OPTIONAL: &'static [&'static str];

    /// Returns the first property whose value prevents typed mode.
    ///
    /// Enum properties are checked before nested models.
    fn drift(&self) -> Option<Drift>;

    /// Returns the first property holding a number JSON cannot represent,
    /// looking through nested typed models.
    fn unrepresentable(&self) -> Option<&'static str>;

    /// Whether `key` names a declared property.
    fn is_declared(key: &str) -> bool {
        Self::REQUIRED.contains(&key) || Self::OPTIONAL.contains(&key)
    }
}

/// Property-level hooks used by [`Schema::drift`] and
/// [`Schema::unrepresentable`].
///
/// Plain values never drift. Enums report values outside their allow-list,
/// nested models report unparsed mode. Collections keep drift at the element
/// level, so one unparsed element does not hide its siblings, but a
/// non-finite number anywhere inside them is reported.
pub trait Inspect {
    fn unknown_enum(&self) -> bool {
        false
    }

    fn unparsed_model(&self) -> bool {
        false
    }

    fn non_finite(&self) -> bool {
        false
    }
}

macro_rules! inspect_plain {
    ($($ty:ty),* $(,)?) => {
        $(impl Inspect for $ty {})*
    };
}

inspect_plain!(bool, i32, i64, u32, u64, String, Value);

macro_rules! inspect_float {
    ($($ty:ty),* $(,)?) => {
        $(impl Inspect for $ty {
            fn non_finite(&self) -> bool {
                !self.is_finite()
            }
        })*
    };
}

inspect_float!(f32, f64);

impl<T: Inspect> Inspect for Vec<T> {
    fn non_finite(&self) -> bool {
        self.iter().any(Inspect::non_finite)
    }
}

impl<T: Inspect> Inspect for BTreeMap<String, T> {
    fn non_finite(&self) -> bool {
        self.values().any(Inspect::non_finite)
    }
}

impl<T: Inspect> Inspect for HashMap<String, T> {
    fn non_finite(&self) -> bool {
        self.values().any(Inspect::non_finite)
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn unknown_enum(&self) -> bool {
        self.as_ref().is_some_and(Inspect::unknown_enum)
    }

    fn unparsed_model(&self) -> bool {
        self.as_ref().is_some_and(Inspect::unparsed_model)
    }

    fn non_finite(&self) -> bool {
        self.as_ref().is_some_and(Inspect::non_finite)
    }
}

/// A model value in one of its two modes.
///
/// The mode is fixed when the value is decoded. [`Model::new`] always yields
/// typed mode with no additional properties.
#[derive(Debug, Clone, PartialEq)]
pub enum Model<T> {
    /// Declared properties are authoritative; undeclared keys ride along.
    Typed {
        value: T,
        additional_properties: UnparsedObject,
    },
    /// The payload did not fit the schema and is passed through untouched.
    Unparsed(UnparsedObject),
}

impl<T> Model<T> {
    /// Wraps a builder-produced value in typed mode.
    pub fn new(value: T) -> Self {
        Model::Typed {
            value,
            additional_properties: UnparsedObject::new(),
        }
    }

    /// Adds an undeclared property that is emitted alongside the typed fields.
    ///
    /// Has no effect on unparsed values.
    pub fn with_additional_property(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Model::Typed {
            additional_properties,
            ..
        } = &mut self
        {
            additional_properties.insert(key.into(), value);
        }
        self
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, Model::Unparsed(_))
    }

    /// Typed view, `None` when unparsed.
    pub fn typed(&self) -> Option<&T> {
        match self {
            Model::Typed { value, .. } => Some(value),
            Model::Unparsed(_) => None,
        }
    }

    pub fn typed_mut(&mut self) -> Option<&mut T> {
        match self {
            Model::Typed { value, .. } => Some(value),
            Model::Unparsed(_) => None,
        }
    }

    pub fn into_typed(self) -> Option<T> {
        match self {
            Model::Typed { value, .. } => Some(value),
            Model::Unparsed(_) => None,
        }
    }

    pub fn additional_properties(&self) -> Option<&UnparsedObject> {
        match self {
            Model::Typed {
                additional_properties,
                ..
            } => Some(additional_properties),
            Model::Unparsed(_) => None,
        }
    }

    /// Raw payload, `Some` only when unparsed.
    pub fn unparsed(&self) -> Option<&UnparsedObject> {
        match self {
            Model::Unparsed(raw) => Some(raw),
            Model::Typed { .. } => None,
        }
    }
}

impl<T> From<T> for Model<T> {
    fn from(value: T) -> Self {
        Model::new(value)
    }
}

impl<T: Schema> Model<T> {
    /// Decodes a JSON document.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: UnparsedObject =
            serde_json::from_slice(bytes).map_err(CodecError::MalformedJson)?;
        Self::from_object(raw)
    }

    /// Decodes an already-parsed JSON object.
    pub fn from_object(raw: UnparsedObject) -> Result<Self, CodecError> {
        for &field in T::REQUIRED {
            if raw.get(field).map_or(true, Value::is_null) {
                return Err(CodecError::MissingRequiredField {
                    model: T::NAME,
                    field,
                });
            }
        }

        let value = match serde_json::from_value::<T>(Value::Object(raw.clone())) {
            Ok(value) => value,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(model = T::NAME, error = %_err, "schema mismatch; keeping payload unparsed");
                return Ok(Model::Unparsed(raw));
            }
        };

        let additional_properties: UnparsedObject = raw
            .iter()
            .filter(|(key, _)| !T::is_declared(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(_drift) = value.drift() {
            #[cfg(feature = "tracing")]
            tracing::debug!(model = T::NAME, drift = ?_drift, "keeping payload unparsed");
            return Ok(Model::Unparsed(raw));
        }

        Ok(Model::Typed {
            value,
            additional_properties,
        })
    }

    /// Builds the JSON object this value serializes to.
    pub fn to_object(&self) -> Result<UnparsedObject, CodecError> {
        match self {
            Model::Unparsed(raw) => Ok(raw.clone()),
            Model::Typed {
                value,
                additional_properties,
            } => {
                if let Some(field) = value.unrepresentable() {
                    return Err(CodecError::Encoding {
                        model: T::NAME,
                        source: serde::ser::Error::custom(format!(
                            "{field} is not a finite number"
                        )),
                    });
                }
                let encoded = serde_json::to_value(value).map_err(|source| CodecError::Encoding {
                    model: T::NAME,
                    source,
                })?;
                let mut object = match encoded {
                    Value::Object(object) => object,
                    other => {
                        return Err(CodecError::Encoding {
                            model: T::NAME,
                            source: serde::ser::Error::custom(format!(
                                "expected a JSON object, got {other}"
                            )),
                        })
                    }
                };
                for (key, value) in additional_properties {
                    object.insert(key.clone(), value.clone());
                }
                Ok(object)
            }
        }
    }

    /// Encodes to JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        let object = self.to_object()?;
        serde_json::to_vec(&object).map_err(|source| CodecError::Encoding {
            model: T::NAME,
            source,
        })
    }
}

impl<T: Schema> Inspect for Model<T> {
    fn unparsed_model(&self) -> bool {
        self.is_unparsed()
    }

    fn non_finite(&self) -> bool {
        self.typed().is_some_and(|value| value.unrepresentable().is_some())
    }
}

impl<T: Schema> Serialize for Model<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Model::Unparsed(raw) => raw.serialize(serializer),
            Model::Typed { .. } => self
                .to_object()
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
        }
    }
}

impl<'de, T: Schema> Deserialize<'de> for Model<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = UnparsedObject::deserialize(deserializer)?;
        Model::from_object(raw).map_err(serde::de::Error::custom)
    }
}
