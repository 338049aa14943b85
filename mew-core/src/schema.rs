//! Statically declared schemas.
//!
//! [`Describe`] classifies a Rust type into a [`TypeDescriptor`];
//! [`Serializable`] converts values of that type to and from [`Native`].
//! Records, enumerations and unions are declared with the [`record!`],
//! [`enumeration!`] and [`one_of!`] macros. [`tuple_record!`] declares a
//! record written positionally; Rust tuples are positional too.
//!
//! Types with no wire representation (maps, function pointers) still
//! implement both traits: they describe themselves as
//! [`TypeDescriptor::Unsupported`], so that a record containing one can be
//! declared and is then rejected by [`register`](crate::register).
//!
//! [`record!`]: crate::record
//! [`enumeration!`]: crate::enumeration
//! [`one_of!`]: crate::one_of
//! [`tuple_record!`]: crate::tuple_record

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use uuid::Uuid;

use crate::types::{MewError, Native, NativeRecord, Scalar, ScalarKind, TypeDescriptor};

/// Classification of a declared type.
pub trait Describe {
    fn describe() -> TypeDescriptor;
}

/// Conversion between a typed value and its dynamic [`Native`] form.
pub trait Serializable: Describe + Sized {
    fn to_native(&self) -> Result<Native, MewError>;

    fn from_native(native: Native) -> Result<Self, MewError>;
}

fn mismatch<T>(expected: &str, native: &Native) -> Result<T, MewError> {
    Err(MewError::native_mismatch("$", expected, native.shape()))
}

macro_rules! impl_scalar {
    ($ty:ty, $kind:ident, |$v:ident| $to:expr, |$n:ident| $from:expr) => {
        impl Describe for $ty {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::Scalar(ScalarKind::$kind)
            }
        }

        impl Serializable for $ty {
            fn to_native(&self) -> Result<Native, MewError> {
                let $v = self;
                Ok(Native::Scalar(Scalar::$kind($to)))
            }

            fn from_native(native: Native) -> Result<Self, MewError> {
                match native {
                    Native::Scalar(Scalar::$kind($n)) => Ok($from),
                    other => mismatch(ScalarKind::$kind.name(), &other),
                }
            }
        }
    };
}

impl_scalar!(bool, Bool, |v| *v, |b| b);
impl_scalar!(f64, Float, |v| *v, |f| f);
impl_scalar!(f32, Float, |v| f64::from(*v), |f| f as f32);
impl_scalar!(String, String, |v| v.clone(), |s| s);
impl_scalar!(Uuid, Uuid, |v| *v, |u| u);
impl_scalar!(NaiveDate, Date, |v| *v, |d| d);
impl_scalar!(NaiveTime, Time, |v| *v, |t| t);
impl_scalar!(NaiveDateTime, LocalDateTime, |v| *v, |dt| dt);
impl_scalar!(DateTime<FixedOffset>, DateTime, |v| *v, |dt| dt);
impl_scalar!(DateTime<Utc>, DateTime, |v| v.with_timezone(&Utc.fix()), |dt| dt.with_timezone(&Utc));

impl Describe for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Scalar(ScalarKind::Null)
    }
}

impl Serializable for () {
    fn to_native(&self) -> Result<Native, MewError> {
        Ok(Native::Scalar(Scalar::Null))
    }

    fn from_native(native: Native) -> Result<Self, MewError> {
        match native {
            Native::Scalar(Scalar::Null) => Ok(()),
            other => mismatch("null", &other),
        }
    }
}

// Every integer width shares the i64 wire kind; narrower types are range checked.
macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::Integer)
                }
            }

            impl Serializable for $ty {
                fn to_native(&self) -> Result<Native, MewError> {
                    i64::try_from(*self)
                        .map(|i| Native::Scalar(Scalar::Integer(i)))
                        .map_err(|_| {
                            MewError::native_mismatch("$", "integer within i64", self.to_string())
                        })
                }

                fn from_native(native: Native) -> Result<Self, MewError> {
                    match native {
                        Native::Scalar(Scalar::Integer(i)) => <$ty>::try_from(i).map_err(|_| {
                            MewError::native_mismatch("$", stringify!($ty), i.to_string())
                        }),
                        other => mismatch("integer", &other),
                    }
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: Describe> Describe for Vec<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Serializable> Serializable for Vec<T> {
    fn to_native(&self) -> Result<Native, MewError> {
        self.iter()
            .map(Serializable::to_native)
            .collect::<Result<Vec<_>, _>>()
            .map(Native::Sequence)
    }

    fn from_native(native: Native) -> Result<Self, MewError> {
        match native {
            Native::Sequence(items) => items.into_iter().map(T::from_native).collect(),
            other => mismatch("list", &other),
        }
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::optional(T::describe())
    }
}

impl<T: Serializable> Serializable for Option<T> {
    fn to_native(&self) -> Result<Native, MewError> {
        match self {
            Some(v) => Ok(Native::alternative(0, v.to_native()?)),
            None => Ok(Native::alternative(1, Native::Scalar(Scalar::Null))),
        }
    }

    fn from_native(native: Native) -> Result<Self, MewError> {
        match native {
            Native::Alternative { index: 0, value } => T::from_native(*value).map(Some),
            Native::Alternative { index: 1, .. } => Ok(None),
            other => mismatch("optional", &other),
        }
    }
}

impl<T: Describe> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Serializable> Serializable for Box<T> {
    fn to_native(&self) -> Result<Native, MewError> {
        self.as_ref().to_native()
    }

    fn from_native(native: Native) -> Result<Self, MewError> {
        T::from_native(native).map(Box::new)
    }
}

macro_rules! impl_tuple {
    ($($t:ident $idx:tt),+) => {
        impl<$($t: Describe),+> Describe for ($($t,)+) {
            fn describe() -> TypeDescriptor {
                let names = [$($t::describe().to_string()),+];
                TypeDescriptor::tuple(
                    format!("({})", names.join(", ")),
                    vec![$(crate::types::Field::of::<$t>(stringify!($idx))),+],
                )
            }
        }

        impl<$($t: Serializable),+> Serializable for ($($t,)+) {
            fn to_native(&self) -> Result<Native, MewError> {
                let mut record = NativeRecord::new();
                $(record.insert(stringify!($idx), self.$idx.to_native()?);)+
                Ok(Native::Record(record))
            }

            fn from_native(native: Native) -> Result<Self, MewError> {
                let mut record = native.into_record("tuple")?;
                Ok(($($t::from_native(record.take_required("tuple", stringify!($idx))?)?,)+))
            }
        }
    };
}

impl_tuple!(A 0, B 1);
impl_tuple!(A 0, B 1, C 2);
impl_tuple!(A 0, B 1, C 2, D 3);

fn unsupported<T>(descriptor: TypeDescriptor) -> Result<T, MewError> {
    let name = descriptor.to_string();
    Err(MewError::not_supported(name.clone(), vec![name]))
}

macro_rules! impl_unsupported_map {
    ($($map:ident),*) => {
        $(
            impl<K: Describe, V: Describe> Describe for $map<K, V> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::unsupported(format!(
                        "{}<{}, {}>",
                        stringify!($map),
                        K::describe(),
                        V::describe()
                    ))
                }
            }

            impl<K: Describe, V: Describe> Serializable for $map<K, V> {
                fn to_native(&self) -> Result<Native, MewError> {
                    unsupported(Self::describe())
                }

                fn from_native(_native: Native) -> Result<Self, MewError> {
                    unsupported(Self::describe())
                }
            }
        )*
    };
}

impl_unsupported_map!(HashMap, BTreeMap);

macro_rules! impl_unsupported_fn {
    ($($arg:ident),*) => {
        impl<R, $($arg),*> Describe for fn($($arg),*) -> R {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::unsupported(std::any::type_name::<Self>())
            }
        }

        impl<R, $($arg),*> Serializable for fn($($arg),*) -> R {
            fn to_native(&self) -> Result<Native, MewError> {
                unsupported(Self::describe())
            }

            fn from_native(_native: Native) -> Result<Self, MewError> {
                unsupported(Self::describe())
            }
        }
    };
}

impl_unsupported_fn!();
impl_unsupported_fn!(A);
impl_unsupported_fn!(A, B);
impl_unsupported_fn!(A, B, C);

impl Native {
    /// Unwrap a record, for use by [`Serializable::from_native`].
    pub fn into_record(self, record: &str) -> Result<NativeRecord, MewError> {
        match self {
            Native::Record(r) => Ok(r),
            other => mismatch(&format!("record {}", record), &other),
        }
    }

    /// Unwrap an enumeration member name.
    pub fn into_member(self, enumeration: &str) -> Result<String, MewError> {
        match self {
            Native::Member(name) => Ok(name),
            other => mismatch(&format!("member of enum {}", enumeration), &other),
        }
    }

    /// Unwrap a union alternative.
    pub fn into_alternative(self, union: &str) -> Result<(usize, Native), MewError> {
        match self {
            Native::Alternative { index, value } => Ok((index, *value)),
            other => mismatch(&format!("alternative of {}", union), &other),
        }
    }
}

impl NativeRecord {
    /// Remove a field that must be present.
    pub fn take_required(&mut self, record: &str, field: &str) -> Result<Native, MewError> {
        self.take(field).ok_or_else(|| {
            MewError::native_mismatch(format!("$.{}", field), format!("field of record {}", record), "nothing")
        })
    }
}

/// Field name as written on the wire; raw identifiers lose their `r#`.
#[doc(hidden)]
pub fn field_name(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Declare a record type.
///
/// Generates the struct plus its [`Describe`] and [`Serializable`] impls.
/// Fields keep declaration order; `field: T = expr` gives a default used
/// when the key is absent on deserialize.
///
/// ```
/// mew_core::record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Pokemon {
///         pub name: String,
///         pub pokedex: i64,
///         pub abilities: Vec<String> = Vec::new(),
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Describe for $name {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::record(
                    stringify!($name),
                    vec![
                        $(
                            $crate::Field::of::<$ty>($crate::schema::field_name(stringify!($field)))
                                .with_default($crate::__has_default!($($default)?)),
                        )*
                    ],
                )
            }
        }

        impl $crate::Serializable for $name {
            #[allow(unused_mut)]
            fn to_native(&self) -> ::std::result::Result<$crate::Native, $crate::MewError> {
                let mut record = $crate::NativeRecord::new();
                $(
                    record.insert(
                        $crate::schema::field_name(stringify!($field)),
                        $crate::Serializable::to_native(&self.$field)?,
                    );
                )*
                Ok($crate::Native::Record(record))
            }

            #[allow(unused_mut, unused_variables)]
            fn from_native(native: $crate::Native) -> ::std::result::Result<Self, $crate::MewError> {
                let mut record = native.into_record(stringify!($name))?;
                Ok(Self {
                    $(
                        $field: $crate::__take_field!(record, $name, $field, $ty $(, $default)?),
                    )*
                })
            }
        }
    };
}

/// Declare a record that is written positionally.
///
/// The struct keeps named fields, but on the wire it is a sequence of the
/// field values in declaration order, so key transforms never touch it.
/// Incoming sequences must have exactly one element per field.
///
/// ```
/// mew_core::tuple_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct GeoPosition {
///         pub latitude: f64,
///         pub longitude: f64,
///     }
/// }
/// ```
#[macro_export]
macro_rules! tuple_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )+
        }

        impl $crate::Describe for $name {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::tuple(
                    stringify!($name),
                    vec![
                        $(
                            $crate::Field::of::<$ty>($crate::schema::field_name(stringify!($field))),
                        )+
                    ],
                )
            }
        }

        impl $crate::Serializable for $name {
            fn to_native(&self) -> ::std::result::Result<$crate::Native, $crate::MewError> {
                let mut record = $crate::NativeRecord::new();
                $(
                    record.insert(
                        $crate::schema::field_name(stringify!($field)),
                        $crate::Serializable::to_native(&self.$field)?,
                    );
                )+
                Ok($crate::Native::Record(record))
            }

            fn from_native(native: $crate::Native) -> ::std::result::Result<Self, $crate::MewError> {
                let mut record = native.into_record(stringify!($name))?;
                Ok(Self {
                    $(
                        $field: $crate::__take_field!(record, $name, $field, $ty),
                    )+
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __has_default {
    () => {
        false
    };
    ($default:expr) => {
        true
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __take_field {
    ($record:ident, $name:ident, $field:ident, $ty:ty) => {
        <$ty as $crate::Serializable>::from_native(
            $record.take_required(stringify!($name), $crate::schema::field_name(stringify!($field)))?,
        )?
    };
    ($record:ident, $name:ident, $field:ident, $ty:ty, $default:expr) => {
        match $record.take($crate::schema::field_name(stringify!($field))) {
            Some(native) => <$ty as $crate::Serializable>::from_native(native)?,
            None => $default,
        }
    };
}

/// Declare an enumeration whose members carry explicit wire values.
///
/// Members serialize to their wire value, never to their name.
///
/// ```
/// mew_core::enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Subject {
///         Mathematics = 0,
///         English = 1,
///     }
/// }
/// assert_eq!(Subject::English.wire_value(), mew_core::Value::from(1));
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// The value this member is written as.
            pub fn wire_value(&self) -> $crate::Value {
                match self {
                    $( Self::$variant => $crate::Value::from($value), )*
                }
            }
        }

        impl $crate::Describe for $name {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::enumeration(
                    stringify!($name),
                    vec![ $( $crate::EnumMember::new(stringify!($variant), $value), )* ],
                )
            }
        }

        impl $crate::Serializable for $name {
            fn to_native(&self) -> ::std::result::Result<$crate::Native, $crate::MewError> {
                let name = match self {
                    $( Self::$variant => stringify!($variant), )*
                };
                Ok($crate::Native::Member(name.to_string()))
            }

            fn from_native(native: $crate::Native) -> ::std::result::Result<Self, $crate::MewError> {
                let member = native.into_member(stringify!($name))?;
                match member.as_str() {
                    $( stringify!($variant) => Ok(Self::$variant), )*
                    _ => Err($crate::MewError::native_mismatch(
                        "$",
                        concat!("member of enum ", stringify!($name)),
                        member,
                    )),
                }
            }
        }
    };
}

/// Declare a union: an enum whose variants each wrap one supported type.
///
/// On deserialize the alternatives are tried in declaration order and the
/// first that accepts the value wins; on serialize the variant held at
/// runtime decides. No tag is written.
///
/// ```
/// mew_core::one_of! {
///     #[derive(Debug, PartialEq)]
///     pub enum IntOrText {
///         Int(i64),
///         Text(String),
///     }
/// }
/// ```
#[macro_export]
macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($ty),
            )+
        }

        impl $crate::Describe for $name {
            fn describe() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::union(vec![
                    $( <$ty as $crate::Describe>::describe(), )+
                ])
            }
        }

        impl $crate::Serializable for $name {
            #[allow(unused_assignments, irrefutable_let_patterns)]
            fn to_native(&self) -> ::std::result::Result<$crate::Native, $crate::MewError> {
                let mut position = 0usize;
                $(
                    if let Self::$variant(inner) = self {
                        return Ok($crate::Native::alternative(
                            position,
                            $crate::Serializable::to_native(inner)?,
                        ));
                    }
                    position += 1;
                )+
                Err($crate::MewError::native_mismatch("$", stringify!($name), "no variant"))
            }

            #[allow(unused_assignments)]
            fn from_native(native: $crate::Native) -> ::std::result::Result<Self, $crate::MewError> {
                let (index, value) = native.into_alternative(stringify!($name))?;
                let mut position = 0usize;
                $(
                    if index == position {
                        return <$ty as $crate::Serializable>::from_native(value).map(Self::$variant);
                    }
                    position += 1;
                )+
                Err($crate::MewError::native_mismatch(
                    "$",
                    stringify!($name),
                    format!("alternative #{}", index),
                ))
            }
        }
    };
}
