//! Sample types shared by the unit tests.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::info::{ArgInfo, CreatorInfo, FieldInfo, HybridInfo, PojoInfo};
use crate::node::JsonObject;
use crate::{impl_reflect_enum, impl_reflect_pojo};

const NAME_ALIASES: &[&str] = &["user_name", "userName", "login"];

// -----------------------------------------------------------------------------
// Person

/// Constructor-only `name` and `age`, settable `nick`.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub nick: Option<String>,
}

impl_reflect_pojo!(Person => PojoInfo::builder::<Person>()
    .creator(CreatorInfo::with_args::<Person>(
        vec![
            ArgInfo::new::<String>("name").with_aliases(NAME_ALIASES),
            ArgInfo::new::<u32>("age"),
        ],
        |args| {
            Ok(Person {
                name: args.require(0)?,
                age: args.require(1)?,
                nick: None,
            })
        },
    ))
    .field(FieldInfo::new::<Person, String>("name", |p| &p.name).with_aliases(NAME_ALIASES))
    .field(FieldInfo::new::<Person, u32>("age", |p| &p.age))
    .field(FieldInfo::settable::<Person, Option<String>>("nick", |p| &p.nick, |p, v| p.nick = v))
    .build());

// -----------------------------------------------------------------------------
// Point

/// Both constructor arguments optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl_reflect_pojo!(Point => PojoInfo::builder::<Point>()
    .creator(CreatorInfo::with_args::<Point>(
        vec![ArgInfo::new::<i32>("x"), ArgInfo::new::<i32>("y")],
        |args| {
            Ok(Point {
                x: args.take_or_default(0)?,
                y: args.take_or_default(1)?,
            })
        },
    ))
    .field(FieldInfo::new::<Point, i32>("x", |p| &p.x))
    .field(FieldInfo::new::<Point, i32>("y", |p| &p.y))
    .build());

// -----------------------------------------------------------------------------
// Level

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl_reflect_enum!(Level { Low => "LOW", High => "HIGH" });

// -----------------------------------------------------------------------------
// Family

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Baby {
    pub name: String,
    pub age: u32,
    pub level: Level,
}

impl_reflect_pojo!(Baby => PojoInfo::builder::<Baby>()
    .creator(CreatorInfo::default_of::<Baby>())
    .field(FieldInfo::settable::<Baby, String>("name", |b| &b.name, |b, v| b.name = v))
    .field(FieldInfo::settable::<Baby, u32>("age", |b| &b.age, |b, v| b.age = v))
    .field(FieldInfo::settable::<Baby, Level>("level", |b| &b.level, |b, v| b.level = v))
    .build());

/// No-argument construction with nested containers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Family {
    pub surname: String,
    pub babies: Vec<Baby>,
    pub tags: BTreeSet<String>,
    pub scores: BTreeMap<String, u32>,
}

impl_reflect_pojo!(Family => PojoInfo::builder::<Family>()
    .creator(CreatorInfo::default_of::<Family>())
    .field(FieldInfo::settable::<Family, String>("surname", |f| &f.surname, |f, v| f.surname = v))
    .field(FieldInfo::settable::<Family, Vec<Baby>>("babies", |f| &f.babies, |f, v| f.babies = v))
    .field(FieldInfo::settable::<Family, BTreeSet<String>>("tags", |f| &f.tags, |f, v| f.tags = v))
    .field(FieldInfo::settable::<Family, BTreeMap<String, u32>>(
        "scores",
        |f| &f.scores,
        |f, v| f.scores = v,
    ))
    .build());

// -----------------------------------------------------------------------------
// Tagged

/// Hybrid: one declared field, everything else in `extra`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tagged {
    pub name: String,
    pub extra: JsonObject,
}

impl_reflect_pojo!(Tagged => PojoInfo::builder::<Tagged>()
    .creator(CreatorInfo::default_of::<Tagged>())
    .field(FieldInfo::settable::<Tagged, String>("name", |t| &t.name, |t, v| t.name = v))
    .hybrid(HybridInfo::new::<Tagged>(|t| &t.extra, |t, m| t.extra = m))
    .build());
