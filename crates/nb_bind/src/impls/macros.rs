/// Implements [`Typed`] and [`Reflect`] for a struct described by a
/// [`PojoInfo`].
///
/// The expression is evaluated once, on first use of the type.
///
/// # Examples
///
/// ```
/// use nb_bind::impl_reflect_pojo;
/// use nb_bind::info::{CreatorInfo, FieldInfo, PojoInfo, Typed};
///
/// #[derive(Default)]
/// struct Point { x: i32, y: i32 }
///
/// impl_reflect_pojo!(Point => PojoInfo::builder::<Point>()
///     .creator(CreatorInfo::default_of::<Point>())
///     .field(FieldInfo::settable::<Point, i32>("x", |p| &p.x, |p, v| p.x = v))
///     .field(FieldInfo::settable::<Point, i32>("y", |p| &p.y, |p, v| p.y = v))
///     .build());
///
/// assert_eq!(Point::type_info().as_pojo().unwrap().fields().len(), 2);
/// ```
///
/// [`Typed`]: crate::info::Typed
/// [`Reflect`]: crate::Reflect
/// [`PojoInfo`]: crate::info::PojoInfo
#[macro_export]
macro_rules! impl_reflect_pojo {
    ($ty:ty => $info:expr) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| $crate::info::TypeInfo::Pojo($info))
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Pojo(self)
            }
        }
    };
}

/// Implements [`Typed`] and [`Reflect`] for a fieldless enum, bound to
/// the given variant names.
///
/// # Examples
///
/// ```
/// use nb_bind::{Binder, impl_reflect_enum};
///
/// #[derive(Debug, PartialEq)]
/// enum Level { Low, High }
///
/// impl_reflect_enum!(Level { Low => "LOW", High => "HIGH" });
///
/// let binder = Binder::new();
/// assert_eq!(binder.from_json::<Level>(r#""HIGH""#).unwrap(), Level::High);
/// assert_eq!(binder.to_json(&Level::Low).unwrap(), r#""LOW""#);
/// assert!(binder.from_json::<Level>(r#""MEDIUM""#).is_err());
/// ```
///
/// [`Typed`]: crate::info::Typed
/// [`Reflect`]: crate::Reflect
#[macro_export]
macro_rules! impl_reflect_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Enum($crate::info::EnumInfo::new::<$ty>(
                        &[$($name),+],
                        |name: &str| match name {
                            $(
                                $name => $crate::__macro_exports::Option::Some(
                                    $crate::__macro_exports::Box::new($ty::$variant)
                                        as $crate::__macro_exports::Box<dyn $crate::Reflect>,
                                ),
                            )+
                            _ => $crate::__macro_exports::Option::None,
                        },
                    ))
                })
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Enum(match self {
                    $($ty::$variant => $name,)+
                })
            }
        }
    };
}

/// Implements [`Typed`] and [`Reflect`] for a type that binds only through
/// a [`ValueCodec`].
///
/// Without a registered codec, decoding into the type fails with
/// [`BindError::TypeError`] and encoding it with
/// [`BindError::UnsupportedType`].
///
/// [`Typed`]: crate::info::Typed
/// [`Reflect`]: crate::Reflect
/// [`ValueCodec`]: crate::codec::ValueCodec
/// [`BindError::TypeError`]: crate::BindError::TypeError
/// [`BindError::UnsupportedType`]: crate::BindError::UnsupportedType
#[macro_export]
macro_rules! impl_reflect_opaque {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<$ty>())
                })
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Opaque(self)
            }
        }
    };
}
