/// Defines the closed set of prediction record columns and generates:
/// - the `FieldName` enum (derives Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
///   Serialize, Deserialize), serialized as the upstream column name
/// - `FieldName::ALL` in declaration order
/// - `as_str()` returning the upstream column name
/// - `label()` returning the human-readable dashboard label
///
/// Usage:
///   define_field_names! { Month => "MONTH", "Month"; }
macro_rules! define_field_names {
    ($( $(#[$meta:meta])* $variant:ident => $key:literal, $label:literal; )+) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum FieldName {
            $(
                $(#[$meta])*
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl FieldName {
            /// Every known field, in upstream column order.
            pub const ALL: &'static [FieldName] = &[$(FieldName::$variant,)+];

            /// Upstream column name (e.g. `DEP_TIME_BLK`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(FieldName::$variant => $key,)+
                }
            }

            /// Human-readable label shown in dropdowns and axis titles.
            pub fn label(&self) -> &'static str {
                match self {
                    $(FieldName::$variant => $label,)+
                }
            }
        }
    };
}
