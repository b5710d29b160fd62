use alloc::boxed::Box;

use smallvec::SmallVec;

use super::DecodeDriver;
use crate::config::UnknownKeys;
use crate::info::{CreatorArgs, CreatorInfo, PojoInfo};
use crate::node::JsonObject;
use crate::path::PathSegment;
use crate::token::StreamingReader;
use crate::{BindError, Reflect};

// -----------------------------------------------------------------------------
// PojoState

/// Field values decoded before the instance exists, in arrival order.
type Pending = SmallVec<[(usize, Box<dyn Reflect>); 8]>;

/// Construction phase of one POJO decode.
enum PojoState<'c> {
    /// Waiting for constructor arguments; field values are buffered.
    Deferred {
        args: CreatorArgs<'c>,
        remaining: usize,
        pending: Pending,
    },
    /// The instance exists; field values go straight through the setters.
    Constructed { instance: Box<dyn Reflect> },
}

impl<'c> PojoState<'c> {
    fn start(creator: &'c CreatorInfo) -> Self {
        match creator.construct_empty() {
            Some(instance) => Self::Constructed { instance },
            None => Self::Deferred {
                args: creator.new_args(),
                remaining: creator.arity(),
                pending: SmallVec::new(),
            },
        }
    }

    /// Runs the constructor if still deferred and replays buffered fields.
    fn finish(self, creator: &CreatorInfo, pojo: &PojoInfo) -> Result<Box<dyn Reflect>, BindError> {
        match self {
            Self::Constructed { instance } => Ok(instance),
            Self::Deferred {
                mut args, pending, ..
            } => {
                let mut instance = creator.construct(&mut args)?;
                for (index, value) in pending {
                    if let Some(field) = pojo.field_at(index) {
                        field.set(instance.as_mut(), value)?;
                    }
                }
                Ok(instance)
            }
        }
    }

    #[inline]
    fn construct(self, creator: &CreatorInfo, pojo: &PojoInfo) -> Result<Self, BindError> {
        self.finish(creator, pojo)
            .map(|instance| Self::Constructed { instance })
    }
}

// -----------------------------------------------------------------------------
// POJO decode

impl DecodeDriver<'_> {
    /// Decodes one object into a POJO.
    ///
    /// With a no-argument constructor the instance exists from the start.
    /// Otherwise constructor arguments are collected by name or alias in any
    /// order; the constructor runs as soon as the last one arrives, and field
    /// values seen before are replayed onto the new instance. Keys matching
    /// nothing go to the side map of a hybrid, or are skipped unread.
    pub(super) fn decode_pojo<R: StreamingReader + ?Sized>(
        &self,
        reader: &mut R,
        pojo: &'static PojoInfo,
        path: Option<&PathSegment<'_>>,
    ) -> Result<Box<dyn Reflect>, BindError> {
        let type_path = pojo.type_path();
        let creator = pojo
            .creator()
            .ok_or_else(|| BindError::type_error(type_path, "no constructor"))?;

        let mut state = PojoState::start(creator);
        if let PojoState::Deferred { remaining: 0, .. } = state {
            state = state.construct(creator, pojo)?;
        }
        let hybrid = pojo.hybrid();
        let mut side_map = hybrid.map(|_| JsonObject::new());

        reader.start_object()?;
        while reader.has_next()? {
            let key = reader.next_name()?;
            let child = PathSegment::with_name(path, type_path, &key);
            let child = child.as_ref();

            if let PojoState::Deferred {
                args,
                remaining,
                ..
            } = &mut state
                && let Some(index) = creator.arg_index(&key)
            {
                let info = creator.args()[index].type_info();
                if self.skip_absent(reader, info)? {
                    continue;
                }
                let value = self.decode_info(reader, info, child)?;
                if args.put(index, value) {
                    *remaining -= 1;
                }
                if *remaining == 0 {
                    state = state.construct(creator, pojo).map_err(|err| err.at(child))?;
                }
                continue;
            }

            if let Some(index) = pojo.field_index(&key) {
                let field = &pojo.fields()[index];
                let info = field.type_info();
                if self.skip_absent(reader, info)? {
                    continue;
                }
                let value = self.decode_info(reader, info, child)?;
                match &mut state {
                    PojoState::Constructed { instance } => {
                        field.set(instance.as_mut(), value).map_err(|err| err.at(child))?;
                    }
                    PojoState::Deferred { pending, .. } => pending.push((index, value)),
                }
                continue;
            }

            if let Some(side_map) = &mut side_map {
                crate::cfg::debug! {
                    log::trace!("capturing `{key}` into the side map of `{type_path}`");
                }
                let value = self.decode_node(reader, child).map_err(|err| err.at(child))?;
                side_map.insert(key, value);
                continue;
            }

            match self.config.unknown_keys {
                UnknownKeys::Skip => {
                    crate::cfg::debug! {
                        log::trace!("skipping unknown key `{key}` of `{type_path}`");
                    }
                    reader.next_skip()?;
                }
                UnknownKeys::Reject => {
                    let err = BindError::UnknownKey {
                        type_path,
                        key: key.clone(),
                    };
                    return Err(err.at(child));
                }
            }
        }
        reader.end_object()?;

        let mut instance = state.finish(creator, pojo)?;
        if let (Some(hybrid), Some(side_map)) = (hybrid, side_map) {
            hybrid.install(instance.as_mut(), side_map)?;
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::adapter::{TapeReader, TokenTape};
    use crate::de::DecodeDriver;
    use crate::node::{Node, Number};
    use crate::registry::TypeRegistry;
    use crate::test_model::{Family, Person, Point, Tagged};
    use crate::token::{StreamingReader, Token};
    use crate::{BindConfig, BindError, UnknownKeys};

    fn decode<T: crate::Reflect + crate::info::Typed>(
        tape: &TokenTape,
        config: BindConfig,
    ) -> Result<T, BindError> {
        let registry = TypeRegistry::new();
        DecodeDriver::new(&registry, config).decode(&mut TapeReader::new(tape))
    }

    fn person(first: (&str, Node), second: (&str, Node)) -> TokenTape {
        let mut tape = TokenTape::new().start_object();
        for (key, value) in [first, second] {
            tape = tape.name(key).node(&value);
        }
        tape.end_object()
    }

    #[test]
    fn constructor_arguments_in_any_order() {
        let ordered = person(("name", "Lily".into()), ("age", 30.into()));
        let reversed = person(("age", 30.into()), ("name", "Lily".into()));

        let a: Person = decode(&ordered, BindConfig::new()).unwrap();
        let b: Person = decode(&reversed, BindConfig::new()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.name, "Lily");
        assert_eq!(a.age, 30);
    }

    #[test]
    fn fields_before_constructor_are_replayed() {
        let tape = TokenTape::new()
            .start_object()
            .name("nick")
            .string("lil")
            .name("age")
            .number(30)
            .name("login")
            .string("Lily")
            .end_object();
        let value: Person = decode(&tape, BindConfig::new()).unwrap();
        assert_eq!(value.nick.as_deref(), Some("lil"));
        assert_eq!(value.name, "Lily");
    }

    #[test]
    fn every_alias_binds_the_same_argument() {
        for key in ["name", "user_name", "userName", "login"] {
            let tape = person((key, "Lily".into()), ("age", 1.into()));
            let value: Person = decode(&tape, BindConfig::new()).unwrap();
            assert_eq!(value.name, "Lily", "key `{key}`");
        }
    }

    #[test]
    fn alias_and_name_together_do_not_double_count() {
        // `login` fills the slot, `name` replaces it; `age` must still be awaited.
        let tape = TokenTape::new()
            .start_object()
            .name("login")
            .string("first")
            .name("name")
            .string("second")
            .name("nick")
            .string("n")
            .name("age")
            .number(7)
            .end_object();
        let value: Person = decode(&tape, BindConfig::new()).unwrap();
        assert_eq!(value.name, "second");
        assert_eq!(value.age, 7);
        assert_eq!(value.nick.as_deref(), Some("n"));
    }

    #[test]
    fn missing_required_argument_is_type_error() {
        let tape = TokenTape::new()
            .start_object()
            .name("age")
            .number(3)
            .end_object();
        let err = decode::<Person>(&tape, BindConfig::new()).unwrap_err();
        assert_eq!(err.path(), Some("$"));
        assert!(matches!(err.root_cause(), BindError::TypeError { .. }));
    }

    #[test]
    fn null_counts_as_absent() {
        let tape = TokenTape::new()
            .start_object()
            .name("x")
            .null()
            .name("y")
            .number(4)
            .end_object();
        let point: Point = decode(&tape, BindConfig::new()).unwrap();
        assert_eq!(point, Point { x: 0, y: 4 });
    }

    #[test]
    fn hybrid_captures_unknown_keys_in_order() {
        let tape = TokenTape::new()
            .start_object()
            .name("extra2")
            .number(2)
            .name("name")
            .string("Bob")
            .name("extra1")
            .start_array()
            .number(1)
            .end_array()
            .end_object();
        let value: Tagged = decode(&tape, BindConfig::new()).unwrap();
        assert_eq!(value.name, "Bob");
        let keys: Vec<&str> = value.extra.keys().collect();
        assert_eq!(keys, ["extra2", "extra1"]);
        assert_eq!(value.extra["extra2"], Node::Number(Number::PosInt(2)));
    }

    #[test]
    fn unknown_subtree_is_skipped_unread() {
        // `next_skip` must be used: the nested value is not even a valid value.
        struct SkipOnly<'a> {
            inner: TapeReader<'a>,
            skipped: usize,
        }

        impl StreamingReader for SkipOnly<'_> {
            fn peek(&mut self) -> Result<Token, BindError> {
                self.inner.peek()
            }
            fn start_object(&mut self) -> Result<(), BindError> {
                self.inner.start_object()
            }
            fn end_object(&mut self) -> Result<(), BindError> {
                self.inner.end_object()
            }
            fn start_array(&mut self) -> Result<(), BindError> {
                self.inner.start_array()
            }
            fn end_array(&mut self) -> Result<(), BindError> {
                self.inner.end_array()
            }
            fn next_name(&mut self) -> Result<String, BindError> {
                self.inner.next_name()
            }
            fn next_string(&mut self) -> Result<String, BindError> {
                self.inner.next_string()
            }
            fn next_number(&mut self) -> Result<Number, BindError> {
                self.inner.next_number()
            }
            fn next_bool(&mut self) -> Result<bool, BindError> {
                self.inner.next_bool()
            }
            fn next_null(&mut self) -> Result<(), BindError> {
                self.inner.next_null()
            }
            fn next_skip(&mut self) -> Result<(), BindError> {
                self.skipped += 1;
                // Jump to the matching `end_object` of the unknown subtree.
                let mut depth = 0_usize;
                loop {
                    let token = self.inner.peek()?;
                    self.inner.advance();
                    match token {
                        Token::StartObject | Token::StartArray => depth += 1,
                        Token::EndObject | Token::EndArray => depth -= 1,
                        _ => {}
                    }
                    if depth == 0 {
                        return Ok(());
                    }
                }
            }
        }

        let tape = TokenTape::new()
            .start_object()
            .name("surname")
            .string("Doe")
            .name("junk")
            .start_object()
            .name("deep")
            .start_array()
            .unknown()
            .end_array()
            .end_object()
            .end_object();

        let registry = TypeRegistry::new();
        let driver = DecodeDriver::new(&registry, BindConfig::new());
        let mut reader = SkipOnly {
            inner: TapeReader::new(&tape),
            skipped: 0,
        };
        let family: Family = driver.decode(&mut reader).unwrap();
        assert_eq!(family.surname, "Doe");
        assert_eq!(reader.skipped, 1);
    }

    #[test]
    fn strict_mode_rejects_unknown_keys() {
        let tape = TokenTape::new()
            .start_object()
            .name("surname")
            .string("Doe")
            .name("junk")
            .number(1)
            .end_object();
        let config = BindConfig::new().with_unknown_keys(UnknownKeys::Reject);
        let err = decode::<Family>(&tape, config).unwrap_err();
        assert_eq!(err.path(), Some("$.junk"));
        assert!(matches!(err.root_cause(), BindError::UnknownKey { key, .. } if key == "junk"));
    }

    #[test]
    fn error_path_three_levels_deep() {
        let tape = TokenTape::new()
            .start_object()
            .name("babies")
            .start_array()
            .start_object()
            .name("name")
            .string("A")
            .end_object()
            .start_object()
            .name("name")
            .number(5)
            .end_object()
            .end_array()
            .end_object();
        let err = decode::<Family>(&tape, BindConfig::new()).unwrap_err();
        assert_eq!(err.path(), Some("$.babies[1].name"));
        assert!(matches!(
            err.root_cause(),
            BindError::TokenMismatch { expected: "STRING", found: Token::Number }
        ));

        let err = decode::<Family>(&tape, BindConfig::new().with_path_tracking(false)).unwrap_err();
        assert!(err.path().is_none());
        assert!(matches!(err, BindError::TokenMismatch { .. }));
    }

    #[test]
    fn deeply_nested_unknown_value_is_skipped() {
        const DEPTH: usize = 200_000;
        let mut tape = TokenTape::new().start_object().name("junk");
        for _ in 0..DEPTH {
            tape = tape.start_array();
        }
        for _ in 0..DEPTH {
            tape = tape.end_array();
        }
        let tape = tape.name("surname").string("Doe").end_object();

        let family = decode::<Family>(&tape, BindConfig::new()).unwrap();
        assert_eq!(family.surname, "Doe");
    }
}
