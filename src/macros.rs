/// Implements [`Record`](crate::Record) and [`Encode`](crate::Encode) for a
/// struct from a list of its fields.
///
/// Each entry is `field => "Name"`, optionally followed by `= "tag"` and a
/// flag list drawn from `[embedded, private, dynamic]`. Prefix an entry with `#[serde]` to convert
/// the field through serde instead of [`Encode`](crate::Encode), which is the
/// way to register collections, enums and other foreign types. A trailing
/// `capabilities [...]` list exposes marshaler traits the type implements.
///
/// Types with lifetime parameters are written with `'_`, e.g. `View<'_>`.
/// Tuple structs implement [`Record`](crate::Record) by hand.
///
/// # Examples
///
/// ```rust
/// use struct_map::{impl_record, marshal_map, Result, TextMarshaler, Value};
///
/// struct Version {
///     major: u32,
///     minor: u32,
/// }
///
/// impl TextMarshaler for Version {
///     fn marshal_text(&self) -> Result<Vec<u8>> {
///         Ok(format!("{}.{}", self.major, self.minor).into_bytes())
///     }
/// }
///
/// impl_record! {
///     Version { major => "Major", minor => "Minor" }
///     capabilities [TextMarshaler]
/// }
///
/// struct Base {
///     id: u64,
/// }
///
/// impl_record! { Base { id => "ID" = r#"map:"id""# } }
///
/// struct Package {
///     base: Base,
///     name: String,
///     version: Version,
///     keywords: Vec<String>,
///     checksum: String,
/// }
///
/// impl_record! {
///     Package {
///         base => "Base" [embedded],
///         name => "Name" = r#"map:"name""#,
///         version => "Version" = r#"map:"version,string""#,
///         #[serde] keywords => "Keywords",
///         checksum => "checksum" [private],
///     }
/// }
///
/// let package = Package {
///     base: Base { id: 3 },
///     name: "struct_map".to_string(),
///     version: Version { major: 1, minor: 2 },
///     keywords: vec!["map".to_string()],
///     checksum: "abc".to_string(),
/// };
///
/// let map = marshal_map(&package).unwrap();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["id", "name", "version", "Keywords"]);
/// assert_eq!(map.get("version"), Some(&Value::Bytes(b"1.2".to_vec())));
/// ```
#[macro_export]
macro_rules! impl_record {
    (@capability MapMarshaler) => {
        fn as_map_marshaler(&self) -> ::std::option::Option<&dyn $crate::MapMarshaler> {
            ::std::option::Option::Some(self)
        }
    };
    (@capability TextMarshaler) => {
        fn as_text_marshaler(&self) -> ::std::option::Option<&dyn $crate::TextMarshaler> {
            ::std::option::Option::Some(self)
        }
    };
    (@capability JsonMarshaler) => {
        fn as_json_marshaler(&self) -> ::std::option::Option<&dyn $crate::JsonMarshaler> {
            ::std::option::Option::Some(self)
        }
    };
    (@capability BinaryMarshaler) => {
        fn as_binary_marshaler(&self) -> ::std::option::Option<&dyn $crate::BinaryMarshaler> {
            ::std::option::Option::Some(self)
        }
    };

    (@field [] $name:literal, $value:expr) => {
        $crate::Field::new($name, $value)
    };
    (@field [serde] $name:literal, $value:expr) => {
        $crate::Field::serialized($name, $value)
    };

    (
        $ty:ty {
            $(
                $(#[$kind:ident])?
                $field:ident => $name:literal
                $(= $tag:literal)?
                $([$($flag:ident),* $(,)?])?
            ),* $(,)?
        }
        $(capabilities [$($cap:ident),* $(,)?])?
    ) => {
        impl $crate::Record for $ty {
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                ::std::vec![
                    $(
                        $crate::impl_record!(@field [$($kind)?] $name, &self.$field)
                            $(.with_tag($tag))?
                            $($(.$flag())*)?
                    ),*
                ]
            }
        }

        impl $crate::Encode for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record(self)
            }

            $($($crate::impl_record!(@capability $cap);)*)?
        }
    };
}
