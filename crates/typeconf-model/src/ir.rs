//! The intermediate representation produced by the model builder.
//!
//! Types form a small algebra: atomic [`BasicType`]s, concrete and
//! abstract object types, enumerations, and lists. Every member of an
//! object is wrapped in an [`AnnType`] carrying optionality, default,
//! source comments, and (for `@define extends` members) the parent's
//! member view. Target-language emitters consume this IR; nothing in it
//! is specific to any output language.

use std::fmt;

use serde::Serialize;

/// Time unit of a duration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Resolve a unit name the way HOCON spells them (`ns`, `nanos`,
    /// `second`, `hours`, ...).
    pub fn from_name(name: &str) -> Option<TimeUnit> {
        match name {
            "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => Some(TimeUnit::Nanos),
            "us" | "micro" | "micros" | "microsecond" | "microseconds" => Some(TimeUnit::Micros),
            "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => Some(TimeUnit::Millis),
            "s" | "second" | "seconds" => Some(TimeUnit::Seconds),
            "m" | "minute" | "minutes" => Some(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Some(TimeUnit::Hours),
            "d" | "day" | "days" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// Canonical abbreviation.
    pub fn abbrev(&self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

/// An atomic type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BasicType {
    String,
    Boolean,
    Integer,
    Long,
    Double,
    Duration(TimeUnit),
    Size,
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicType::String => write!(f, "string"),
            BasicType::Boolean => write!(f, "boolean"),
            BasicType::Integer => write!(f, "int"),
            BasicType::Long => write!(f, "long"),
            BasicType::Double => write!(f, "double"),
            BasicType::Duration(unit) => write!(f, "duration:{}", unit),
            BasicType::Size => write!(f, "size"),
        }
    }
}

/// A type in the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Type {
    /// An atomic type.
    Basic(BasicType),
    /// A concrete object.
    Object(ObjectType),
    /// An abstract parent object: never instantiated at the root, but
    /// fields may extend it.
    AbstractObject(ObjectType),
    /// An enumeration of string values.
    Enum(Vec<String>),
    /// A homogeneous list.
    List(Box<Type>),
}

impl Type {
    pub fn is_abstract(&self) -> bool {
        matches!(self, Type::AbstractObject(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(b) => write!(f, "{}", b),
            Type::Object(o) => write!(f, "{}", o),
            Type::AbstractObject(o) => write!(f, "abstract {}", o),
            Type::Enum(values) => write!(f, "enum[{}]", values.join(",")),
            Type::List(elem) => write!(f, "[{}]", elem),
        }
    }
}

/// A concrete object type: insertion-ordered named members.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ObjectType {
    pub members: Vec<(String, AnnType)>,
}

impl ObjectType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: String, ann: AnnType) {
        self.members.push((name, ann));
    }

    /// Member by adjusted name.
    pub fn get(&self, name: &str) -> Option<&AnnType> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(n, _)| n.as_str())
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, ann)) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, ann.t)?;
        }
        write!(f, "}}")
    }
}

/// An annotated type: a member's type plus everything the emitters need
/// to know about the field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnType {
    pub t: Type,
    pub optional: bool,
    pub default: Option<String>,
    /// The joined comment block preceding the key, if any.
    pub comments: Option<String>,
    /// For `@define extends P` members: the members of the parent `P`.
    pub parent_class_members: Option<Vec<(String, AnnType)>>,
}

impl AnnType {
    /// A required member with no default and no annotations.
    pub fn required(t: Type) -> Self {
        AnnType {
            t,
            optional: false,
            default: None,
            comments: None,
            parent_class_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_unit_names() {
        assert_eq!(TimeUnit::from_name("seconds"), Some(TimeUnit::Seconds));
        assert_eq!(TimeUnit::from_name("ms"), Some(TimeUnit::Millis));
        assert_eq!(TimeUnit::from_name("day"), Some(TimeUnit::Days));
        assert_eq!(TimeUnit::from_name("fortnight"), None);
    }

    #[test]
    fn basic_type_display() {
        assert_eq!(BasicType::Integer.to_string(), "int");
        assert_eq!(
            BasicType::Duration(TimeUnit::Seconds).to_string(),
            "duration:s"
        );
    }

    #[test]
    fn type_display_composes() {
        let list = Type::List(Box::new(Type::Basic(BasicType::String)));
        assert_eq!(list.to_string(), "[string]");

        let mut obj = ObjectType::new();
        obj.push("a".into(), AnnType::required(Type::Basic(BasicType::Integer)));
        assert_eq!(Type::Object(obj.clone()).to_string(), "{a: int}");
        assert_eq!(Type::AbstractObject(obj).to_string(), "abstract {a: int}");

        let e = Type::Enum(vec!["red".into(), "green".into()]);
        assert_eq!(e.to_string(), "enum[red,green]");
    }

    #[test]
    fn object_member_lookup() {
        let mut obj = ObjectType::new();
        obj.push("a".into(), AnnType::required(Type::Basic(BasicType::Integer)));
        obj.push("b".into(), AnnType::required(Type::Basic(BasicType::String)));
        assert!(obj.get("a").is_some());
        assert!(obj.get("c").is_none());
        let names: Vec<&str> = obj.names().collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
