//! String enums with a fixed allow-list.
//!
//! Each enum generated by `api_enum!` has one variant per allowed member and an
//! `Unrecognized` variant holding anything else, so a server that ships a new
//! member never breaks decoding. [`crate::model::Model`] treats an
//! `Unrecognized` property as schema drift and keeps the payload unparsed.

/// Static allow-list of a string enum.
pub trait ApiEnum: Sized {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Every member, exactly as spelled on the wire.
    const ALLOWED: &'static [&'static str];

    fn as_str(&self) -> &str;

    /// Exact, case-sensitive membership test.
    fn is_allowed(value: &str) -> bool {
        Self::ALLOWED.contains(&value)
    }
}

/// Declares a string enum backed by an allow-list.
///
/// The generated type serializes as a plain string, converts leniently from
/// `String`/`&str` (unknown values become `Unrecognized`) and strictly through
/// `from_value`. A `#[default]` marker, written first on the first member,
/// also implements `Default` returning that member.
macro_rules! api_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            #[default]
            $(#[$dmeta:meta])* $dvariant:ident = $dvalue:literal
            $(, $(#[$vmeta:meta])* $variant:ident = $value:literal )* $(,)?
        }
    ) => {
        $crate::model::enums::api_enum! {
            $(#[$meta])*
            pub enum $name {
                $(#[$dmeta])* $dvariant = $dvalue,
                $( $(#[$vmeta])* $variant = $value, )*
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$dvariant
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the allow-list, kept verbatim.
            Unrecognized(String),
        }

        impl $name {
            fn known(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $value, )+
                    $name::Unrecognized(other) => other.as_str(),
                }
            }

            /// Whether this value is one of the allowed members.
            pub fn is_valid(&self) -> bool {
                !matches!(self, $name::Unrecognized(_))
            }

            /// Strict constructor: rejects values outside the allow-list.
            pub fn from_value(
                value: &str,
            ) -> ::std::result::Result<Self, $crate::errors::ValidationError> {
                Self::known(value).ok_or_else(|| {
                    $crate::errors::ValidationError::new(format!(
                        "invalid value '{}' for {}: valid values are {:?}",
                        value,
                        <Self as $crate::model::ApiEnum>::NAME,
                        <Self as $crate::model::ApiEnum>::ALLOWED,
                    ))
                })
            }
        }

        impl $crate::model::ApiEnum for $name {
            const NAME: &'static str = stringify!($name);
            const ALLOWED: &'static [&'static str] = &[$($value),+];

            fn as_str(&self) -> &str {
                $name::as_str(self)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::known(value).unwrap_or_else(|| $name::Unrecognized(value.to_string()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match Self::known(&value) {
                    Some(known) => known,
                    None => $name::Unrecognized(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unrecognized(other) => other,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl $crate::model::Inspect for $name {
            fn unknown_enum(&self) -> bool {
                !self.is_valid()
            }
        }
    };
}

pub(crate) use api_enum;
