use crate::info::{DynamicInfo, DynamicKind, NonGenericTypeInfoCell, ScalarInfo, ScalarKind};
use crate::info::{TypeInfo, Typed};
use crate::node::{JsonArray, JsonObject, Node, Number};
use crate::{Reflect, ReflectRef};

impl Typed for Number {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::Number)))
    }
}

impl Reflect for Number {
    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Number(*self)
    }
}

macro_rules! impl_reflect_dynamic {
    ($($ty:ty => $kind:ident, $shape:ident;)*) => {
        $(
            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>(DynamicKind::$kind)))
                }
            }

            impl Reflect for $ty {
                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::$shape(self)
                }
            }
        )*
    };
}

impl_reflect_dynamic! {
    Node => Any, Node;
    JsonObject => Object, Object;
    JsonArray => Array, Array;
}

#[cfg(test)]
mod tests {
    use crate::info::{ContainerKind, DynamicKind, Typed};
    use crate::node::{JsonArray, JsonObject, Node};

    #[test]
    fn dynamic_kinds() {
        let any = Node::type_info();
        assert_eq!(any.as_dynamic().unwrap().kind(), DynamicKind::Any);
        assert!(any.accepts_null());
        assert!(!JsonObject::type_info().accepts_null());
        assert_eq!(ContainerKind::of(JsonObject::type_info()), ContainerKind::Map);
        assert_eq!(ContainerKind::of(JsonArray::type_info()), ContainerKind::List);
    }
}
