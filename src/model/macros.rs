/// Declares a model struct and its [`Schema`](crate::model::Schema).
///
/// Required properties become plain fields and `new` arguments; optional
/// properties become `Option` fields that are omitted from the output when
/// `None`. Each property names its wire key explicitly.
///
/// ```ignore
/// api_model! {
///     /// Team link create.
///     pub struct TeamLinkCreate {
///         required {
///             attributes: Model<TeamLinkAttributes> = "attributes",
///             type_: TeamLinkType = "type",
///         }
///         optional {}
///     }
/// }
/// ```
macro_rules! api_model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            required {
                $( $(#[$rmeta:meta])* $rfield:ident : $rty:ty = $rkey:literal ),* $(,)?
            }
            optional {
                $( $(#[$ometa:meta])* $ofield:ident : $oty:ty = $okey:literal ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$rmeta])*
                #[serde(rename = $rkey)]
                pub $rfield: $rty,
            )*
            $(
                $(#[$ometa])*
                #[serde(rename = $okey, default, skip_serializing_if = "Option::is_none")]
                pub $ofield: Option<$oty>,
            )*
        }

        impl $name {
            /// Creates a value with every required property set and no optional ones.
            #[allow(clippy::new_without_default, clippy::too_many_arguments)]
            pub fn new($( $rfield: impl Into<$rty> ),*) -> Self {
                Self {
                    $( $rfield: $rfield.into(), )*
                    $( $ofield: None, )*
                }
            }
        }

        impl $crate::model::Schema for $name {
            const NAME: &'static str = stringify!($name);
            const REQUIRED: &'static [&'static str] = &[$($rkey),*];
            const OPTIONAL: &'static [&'static str] = &[$($okey),*];

            fn drift(&self) -> Option<$crate::model::Drift> {
                #[allow(unused_imports)]
                use $crate::model::Inspect;

                $(
                    if self.$rfield.unknown_enum() {
                        return Some($crate::model::Drift::UnknownEnumValue($rkey));
                    }
                )*
                $(
                    if self.$ofield.unknown_enum() {
                        return Some($crate::model::Drift::UnknownEnumValue($okey));
                    }
                )*
                $(
                    if self.$rfield.unparsed_model() {
                        return Some($crate::model::Drift::UnparsedNested($rkey));
                    }
                )*
                $(
                    if self.$ofield.unparsed_model() {
                        return Some($crate::model::Drift::UnparsedNested($okey));
                    }
                )*
                None
            }

            fn unrepresentable(&self) -> Option<&'static str> {
                #[allow(unused_imports)]
                use $crate::model::Inspect;

                $(
                    if self.$rfield.non_finite() {
                        return Some($rkey);
                    }
                )*
                $(
                    if self.$ofield.non_finite() {
                        return Some($okey);
                    }
                )*
                None
            }
        }
    };
}

pub(crate) use api_model;
