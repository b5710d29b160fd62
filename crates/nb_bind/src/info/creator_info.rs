use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use nb_utils::hash::HashMap;

use crate::info::{Type, TypeInfo, Typed, take_value};
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// ArgInfo

/// One positional argument of a constructor.
pub struct ArgInfo {
    name: &'static str,
    aliases: &'static [&'static str],
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
}

impl ArgInfo {
    #[inline]
    pub fn new<T: Reflect + Typed>(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            ty: Type::of::<T>(),
            type_info: T::type_info,
        }
    }

    /// Alternative names accepted on decode.
    #[inline]
    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

impl fmt::Debug for ArgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgInfo")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("ty", &self.ty)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CreatorArgs

/// The positional argument slots handed to a constructor.
///
/// Slots of arguments that never arrived are empty; the constructor decides
/// whether that is an error ([`require`]) or a default ([`take_or_default`]).
///
/// [`require`]: CreatorArgs::require
/// [`take_or_default`]: CreatorArgs::take_or_default
pub struct CreatorArgs<'a> {
    owner: &'static str,
    args: &'a [ArgInfo],
    slots: Vec<Option<Box<dyn Reflect>>>,
}

impl<'a> CreatorArgs<'a> {
    pub(crate) fn new(owner: &'static str, args: &'a [ArgInfo]) -> Self {
        let mut slots = Vec::with_capacity(args.len());
        slots.resize_with(args.len(), || None);
        Self { owner, args, slots }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_filled(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Stores a decoded argument.
    ///
    /// Returns `true` if the slot was empty before. A second value for the
    /// same slot, e.g. through an alias, replaces the first one.
    pub(crate) fn put(&mut self, index: usize, value: Box<dyn Reflect>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => slot.replace(value).is_none(),
            None => false,
        }
    }

    /// Takes the argument at `index`, `None` if it never arrived.
    pub fn take<T: Reflect + Typed>(&mut self, index: usize) -> Result<Option<T>, BindError> {
        match self.slots.get_mut(index).and_then(Option::take) {
            Some(value) => take_value::<T>(value).map(Some),
            None => Ok(None),
        }
    }

    /// Takes the argument at `index`, failing if it never arrived.
    pub fn require<T: Reflect + Typed>(&mut self, index: usize) -> Result<T, BindError> {
        match self.take::<T>(index)? {
            Some(value) => Ok(value),
            None => {
                let name = self.args.get(index).map_or("?", ArgInfo::name);
                Err(BindError::type_error(
                    self.owner,
                    format!("missing constructor argument `{name}`"),
                ))
            }
        }
    }

    /// Takes the argument at `index`, or `T::default()` if it never arrived.
    pub fn take_or_default<T: Reflect + Typed + Default>(
        &mut self,
        index: usize,
    ) -> Result<T, BindError> {
        self.take::<T>(index).map(Option::unwrap_or_default)
    }
}

// -----------------------------------------------------------------------------
// CreatorInfo

trait ArgsCtor: Send + Sync {
    fn call(&self, args: &mut CreatorArgs<'_>) -> Result<Box<dyn Reflect>, BindError>;
}

struct ArgsCtorFn<O>(fn(&mut CreatorArgs<'_>) -> Result<O, BindError>);

impl<O: Reflect> ArgsCtor for ArgsCtorFn<O> {
    #[inline]
    fn call(&self, args: &mut CreatorArgs<'_>) -> Result<Box<dyn Reflect>, BindError> {
        (self.0)(args).map(|value| Box::new(value) as Box<dyn Reflect>)
    }
}

trait NoArgsCtor: Send + Sync {
    fn call(&self) -> Box<dyn Reflect>;
}

struct NoArgsCtorFn<O>(fn() -> O);

impl<O: Reflect> NoArgsCtor for NoArgsCtorFn<O> {
    #[inline]
    fn call(&self) -> Box<dyn Reflect> {
        Box::new((self.0)())
    }
}

/// How a POJO is constructed.
///
/// A no-argument constructor, when present, is preferred: the instance is
/// created up front and every key is assigned through setters. Otherwise the
/// positional constructor runs once all of its arguments arrived, in
/// whatever order the keys came.
///
/// # Examples
///
/// ```
/// use nb_bind::info::{ArgInfo, CreatorInfo};
///
/// struct Point { x: i32, y: i32 }
///
/// let creator = CreatorInfo::with_args::<Point>(
///     vec![ArgInfo::new::<i32>("x"), ArgInfo::new::<i32>("y").with_aliases(&["ordinate"])],
///     |args| Ok(Point { x: args.require(0)?, y: args.take_or_default(1)? }),
/// );
///
/// assert_eq!(creator.arity(), 2);
/// assert_eq!(creator.arg_index("ordinate"), Some(1));
/// assert!(!creator.has_no_args());
/// # impl nb_bind::info::Typed for Point {
/// #     fn type_info() -> &'static nb_bind::info::TypeInfo { unimplemented!() }
/// # }
/// # impl nb_bind::Reflect for Point {
/// #     fn reflect_ref(&self) -> nb_bind::ReflectRef<'_> { nb_bind::ReflectRef::Pojo(self) }
/// # }
/// ```
pub struct CreatorInfo {
    owner: Type,
    args: Box<[ArgInfo]>,
    arg_index: HashMap<&'static str, usize>,
    alias_index: HashMap<&'static str, usize>,
    with_args: Option<Box<dyn ArgsCtor>>,
    no_args: Option<Box<dyn NoArgsCtor>>,
}

impl CreatorInfo {
    /// A creator with a positional constructor.
    pub fn with_args<O: Reflect>(
        args: Vec<ArgInfo>,
        ctor: fn(&mut CreatorArgs<'_>) -> Result<O, BindError>,
    ) -> Self {
        let args = args.into_boxed_slice();
        let mut arg_index = HashMap::with_capacity_and_hasher(args.len(), Default::default());
        let mut alias_index = HashMap::default();
        for (index, arg) in args.iter().enumerate() {
            arg_index.insert(arg.name, index);
            for alias in arg.aliases {
                alias_index.insert(*alias, index);
            }
        }

        Self {
            owner: Type::of::<O>(),
            args,
            arg_index,
            alias_index,
            with_args: Some(Box::new(ArgsCtorFn(ctor))),
            no_args: None,
        }
    }

    /// A creator with only a no-argument constructor.
    pub fn no_args<O: Reflect>(ctor: fn() -> O) -> Self {
        Self {
            owner: Type::of::<O>(),
            args: Box::new([]),
            arg_index: HashMap::default(),
            alias_index: HashMap::default(),
            with_args: None,
            no_args: Some(Box::new(NoArgsCtorFn(ctor))),
        }
    }

    /// A creator using `O::default()` as the no-argument constructor.
    #[inline]
    pub fn default_of<O: Reflect + Default>() -> Self {
        Self::no_args::<O>(O::default)
    }

    /// Adds a no-argument constructor to a positional one.
    pub fn and_no_args<O: Reflect>(mut self, ctor: fn() -> O) -> Self {
        self.no_args = Some(Box::new(NoArgsCtorFn(ctor)));
        self
    }

    #[inline]
    pub const fn owner(&self) -> &Type {
        &self.owner
    }

    #[inline]
    pub fn args(&self) -> &[ArgInfo] {
        &self.args
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn has_args_ctor(&self) -> bool {
        self.with_args.is_some()
    }

    #[inline]
    pub fn has_no_args(&self) -> bool {
        self.no_args.is_some()
    }

    /// Resolves `key` against canonical names first, then aliases.
    #[inline]
    pub fn arg_index(&self, key: &str) -> Option<usize> {
        self.arg_index
            .get(key)
            .or_else(|| self.alias_index.get(key))
            .copied()
    }

    /// Empty slots for one construction.
    #[inline]
    pub fn new_args(&self) -> CreatorArgs<'_> {
        CreatorArgs::new(self.owner.path(), &self.args)
    }

    /// Runs the no-argument constructor, if any.
    #[inline]
    pub fn construct_empty(&self) -> Option<Box<dyn Reflect>> {
        self.no_args.as_ref().map(|ctor| ctor.call())
    }

    /// Runs the positional constructor with whatever slots are filled.
    pub fn construct(&self, args: &mut CreatorArgs<'_>) -> Result<Box<dyn Reflect>, BindError> {
        match &self.with_args {
            Some(ctor) => ctor.call(args),
            None => self.construct_empty().ok_or_else(|| {
                BindError::type_error(self.owner.path(), "no usable constructor")
            }),
        }
    }
}

impl fmt::Debug for CreatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatorInfo")
            .field("owner", &self.owner)
            .field("args", &self.args)
            .field("no_args", &self.no_args.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{ArgInfo, CreatorInfo};
    use crate::BindError;
    use crate::test_model::Person;

    #[test]
    fn put_counts_first_fill_only() {
        let creator = CreatorInfo::with_args::<Person>(
            vec![ArgInfo::new::<String>("name"), ArgInfo::new::<u32>("age")],
            |args| {
                Ok(Person {
                    name: args.require(0)?,
                    age: args.take_or_default(1)?,
                    nick: None,
                })
            },
        );
        let mut args = creator.new_args();
        assert!(args.put(0, alloc::boxed::Box::new(String::from("Ann"))));
        assert!(!args.put(0, alloc::boxed::Box::new(String::from("Bea"))));
        assert!(!args.put(5, alloc::boxed::Box::new(1_u32)));

        let person = creator.construct(&mut args).unwrap();
        let person = person.take::<Person>().unwrap();
        assert_eq!(person.name, "Bea");
        assert_eq!(person.age, 0);
    }

    #[test]
    fn require_names_the_missing_argument() {
        let creator = CreatorInfo::with_args::<Person>(
            vec![ArgInfo::new::<String>("name")],
            |args| {
                Ok(Person {
                    name: args.require(0)?,
                    age: 0,
                    nick: None,
                })
            },
        );
        let err = creator.construct(&mut creator.new_args()).unwrap_err();
        assert!(matches!(err, BindError::TypeError { .. }));
        assert!(alloc::string::ToString::to_string(&err).contains("`name`"));
    }

    #[test]
    fn wrong_slot_type_is_reported() {
        let creator = CreatorInfo::with_args::<Person>(vec![ArgInfo::new::<u32>("age")], |args| {
            Ok(Person {
                name: String::new(),
                age: args.require(0)?,
                nick: None,
            })
        });
        let mut args = creator.new_args();
        args.put(0, alloc::boxed::Box::new(true));
        assert!(creator.construct(&mut args).is_err());
    }
}
