//! The recursive model builder.
//!
//! `ModelBuilder::build` walks the config object by object. At each
//! level it folds the entry set into struct nodes, reads the `@define`
//! annotations, and processes define-carrying members first so later
//! siblings can resolve references to them. Leaves are typed by a
//! three-way dispatch: named define, type-spec DSL, or plain value with
//! an inferred type and a default. Objects recurse under a fresh
//! namespace scope.

use typeconf_common::names::{adjust_name, escape_value};
use typeconf_hocon::{ConfigObject, ConfigValue, ValueKind};

use crate::annotation::{self, DefineCase};
use crate::dsl;
use crate::error::BuildError;
use crate::ir::{AnnType, BasicType, ObjectType, Type};
use crate::namespace::Namespace;
use crate::structs::{self, StructNode};
use crate::warning::Warning;

/// The result of a successful build: the typed root object and the
/// warnings collected along the way, sorted by line.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelBuildResult {
    pub root: ObjectType,
    pub warnings: Vec<Warning>,
}

/// Builds the typed model of a parsed config.
///
/// Builders carry no state between builds; each `build` call starts from
/// a fresh namespace and an empty warning buffer, so independent
/// builders can run in parallel.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    assume_all_required: bool,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every field is emitted as required with no default,
    /// regardless of DSL or comment hints.
    pub fn assume_all_required(mut self, value: bool) -> Self {
        self.assume_all_required = value;
        self
    }

    /// Build the typed model of `conf`.
    pub fn build(&self, conf: &ConfigObject) -> Result<ModelBuildResult, BuildError> {
        let mut ns = Namespace::new();
        let mut warnings = Vec::new();
        let root = self.from_config(&mut ns, &mut warnings, conf)?;
        warnings.sort_by_key(|w| w.line());
        Ok(ModelBuildResult { root, warnings })
    }

    fn from_config(
        &self,
        ns: &mut Namespace,
        warnings: &mut Vec<Warning>,
        conf: &ConfigObject,
    ) -> Result<ObjectType, BuildError> {
        let mut children = structs::member_structs(conf);

        // Annotation pass: attach the @define directive, if any.
        for child in &mut children {
            if let Some(cv) = conf.get(&child.name) {
                child.define_case = annotation::define_from_comments(
                    &cv.origin.comments,
                    &child.name,
                    cv.origin.line,
                )?;
            }
        }

        // Defines first (stable), so later siblings can reference them.
        children.sort_by_key(|c| c.define_case.is_none());

        let mut object = ObjectType::new();
        for child in &children {
            let name = &child.name;
            let cv = conf
                .get(name)
                .expect("struct node must come from a config entry");

            let (child_type, optional, default) = if child.is_leaf() {
                self.leaf_type(ns, warnings, child, cv)?
            } else {
                let sub = match &cv.kind {
                    ValueKind::Object(o) => o,
                    _ => unreachable!("non-leaf struct node must hold an object value"),
                };
                ns.enter_scope();
                let built = self.from_config(ns, warnings, sub);
                ns.exit_scope();
                (Type::Object(built?), false, None)
            };

            let comments = &cv.origin.comments;
            let comments_opt = if comments.is_empty() {
                None
            } else {
                Some(comments.join("\n"))
            };

            let (eff_optional, eff_default) = if self.assume_all_required {
                (false, None)
            } else {
                (optional || annotation::optional_from_comments(comments), default)
            };

            // `@define extends P`: attach the parent's member view.
            let parent_class_members = match &child.define_case {
                Some(DefineCase::Extends(parent)) => match ns.lookup(parent) {
                    Some(def) if def.is_parent => match &def.ty {
                        Type::AbstractObject(members) => Some(members.members.clone()),
                        _ => {
                            return Err(BuildError::ExtendsNonAbstract {
                                key: name.clone(),
                                parent: parent.clone(),
                                line: cv.origin.line,
                            })
                        }
                    },
                    Some(_) => {
                        return Err(BuildError::ExtendsNonAbstract {
                            key: name.clone(),
                            parent: parent.clone(),
                            line: cv.origin.line,
                        })
                    }
                    None => {
                        return Err(BuildError::UnknownParent {
                            key: name.clone(),
                            parent: parent.clone(),
                            line: cv.origin.line,
                        })
                    }
                },
                _ => None,
            };

            // An object declared `@define abstract` becomes a parent type.
            let child_type = match (child_type, &child.define_case) {
                (Type::Object(members), Some(DefineCase::Abstract)) => {
                    Type::AbstractObject(members)
                }
                (t, _) => t,
            };

            let ann = AnnType {
                t: child_type,
                optional: eff_optional,
                default: eff_default,
                comments: comments_opt,
                parent_class_members,
            };

            if let Some(case) = &child.define_case {
                ns.add_define(name.clone(), ann.t.clone(), case.is_parent());
            }

            object.push(adjust_name(name), ann);
        }

        // Abstract parents are not instantiated: drop members whose type
        // is abstract, and members whose default merely names one.
        object.members.retain(|(_, ann)| {
            let names_abstract = ann
                .default
                .as_deref()
                .is_some_and(|d| ns.is_abstract_class_define(d));
            !(ann.t.is_abstract() || names_abstract)
        });

        Ok(object)
    }

    /// Type a leaf: named define, DSL spec, or inferred from the value.
    fn leaf_type(
        &self,
        ns: &mut Namespace,
        warnings: &mut Vec<Warning>,
        child: &StructNode,
        cv: &ConfigValue,
    ) -> Result<(Type, bool, Option<String>), BuildError> {
        let is_enum = matches!(child.define_case, Some(DefineCase::Enum));
        match &cv.kind {
            ValueKind::Str(s) => {
                let value_string = escape_value(s);
                if let Some(t) = ns.resolve_define(&value_string) {
                    return Ok((t.clone(), false, None));
                }
                if let Some(spec) = dsl::parse_spec(&value_string) {
                    return Ok((Type::Basic(spec.ty), spec.optional, spec.default));
                }
                // An unrecognized string is an optional string field whose
                // default is the literal itself.
                Ok((Type::Basic(BasicType::String), true, Some(value_string)))
            }
            ValueKind::Bool(b) => Ok((
                Type::Basic(BasicType::Boolean),
                true,
                Some(b.to_string()),
            )),
            ValueKind::Number(raw) => {
                let ty = numeric_type(raw).ok_or_else(|| BuildError::InvalidNumber {
                    key: child.name.clone(),
                    value: raw.clone(),
                    line: cv.origin.line,
                })?;
                Ok((Type::Basic(ty), true, Some(raw.clone())))
            }
            ValueKind::List(elems) if is_enum => {
                let values = elems.iter().map(|e| e.unwrapped()).collect();
                Ok((Type::Enum(values), false, None))
            }
            ValueKind::List(elems) => {
                let elem = self.list_element_type(ns, warnings, elems, cv, &child.name)?;
                Ok((Type::List(Box::new(elem)), false, None))
            }
            ValueKind::Object(o) => {
                // Normally objects take the non-leaf path; an object that
                // still classified as a leaf is recursed all the same.
                ns.enter_scope();
                let built = self.from_config(ns, warnings, o);
                ns.exit_scope();
                Ok((Type::Object(built?), false, None))
            }
            ValueKind::Null => Err(BuildError::NullValue {
                key: child.name.clone(),
                line: cv.origin.line,
            }),
        }
    }

    /// Element type of a list literal. Exactly one element is expected;
    /// extra elements warn and are ignored.
    fn list_element_type(
        &self,
        ns: &mut Namespace,
        warnings: &mut Vec<Warning>,
        elems: &[ConfigValue],
        cv: &ConfigValue,
        key: &str,
    ) -> Result<Type, BuildError> {
        let line = cv.origin.line;
        let first = elems.first().ok_or_else(|| BuildError::EmptyList {
            key: key.to_string(),
            line,
        })?;
        if elems.len() > 1 {
            warnings.push(Warning::MultElemList {
                line,
                source: cv.render_compact(),
            });
        }

        match &first.kind {
            ValueKind::Str(s) => {
                let value_string = escape_value(s);
                if let Some(t) = ns.resolve_define(&value_string) {
                    return Ok(t.clone());
                }
                if let Some(spec) = dsl::parse_spec(&value_string) {
                    if spec.optional {
                        warnings.push(Warning::OptListElem {
                            line,
                            source: value_string.clone(),
                        });
                    }
                    if spec.default.is_some() {
                        warnings.push(Warning::DefaultListElem {
                            line,
                            source: value_string.clone(),
                        });
                    }
                    return Ok(Type::Basic(spec.ty));
                }
                Ok(Type::Basic(BasicType::String))
            }
            ValueKind::Bool(_) => Ok(Type::Basic(BasicType::Boolean)),
            ValueKind::Number(raw) => numeric_type(raw).map(Type::Basic).ok_or_else(|| {
                BuildError::InvalidNumber {
                    key: key.to_string(),
                    value: raw.clone(),
                    line: first.origin.line,
                }
            }),
            ValueKind::List(inner) => {
                let elem = self.list_element_type(ns, warnings, inner, first, key)?;
                Ok(Type::List(Box::new(elem)))
            }
            ValueKind::Object(o) => {
                ns.enter_scope();
                let built = self.from_config(ns, warnings, o);
                ns.exit_scope();
                Ok(Type::Object(built?))
            }
            ValueKind::Null => Err(BuildError::NullValue {
                key: key.to_string(),
                line: first.origin.line,
            }),
        }
    }
}

/// Narrowest numeric type that can represent the raw decimal text,
/// tried int -> long -> double.
fn numeric_type(raw: &str) -> Option<BasicType> {
    if raw.parse::<i32>().is_ok() {
        return Some(BasicType::Integer);
    }
    if raw.parse::<i64>().is_ok() {
        return Some(BasicType::Long);
    }
    if raw.parse::<f64>().is_ok() {
        return Some(BasicType::Double);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use typeconf_hocon::parse;

    fn build(src: &str) -> ModelBuildResult {
        let p = parse(src);
        assert!(p.ok(), "parse errors: {:?}", p.errors());
        ModelBuilder::new().build(p.root()).expect("build failed")
    }

    #[test]
    fn numeric_narrowing() {
        assert_eq!(numeric_type("1"), Some(BasicType::Integer));
        assert_eq!(numeric_type("3000000000"), Some(BasicType::Long));
        assert_eq!(numeric_type("1.5"), Some(BasicType::Double));
        assert_eq!(numeric_type("2e300"), Some(BasicType::Double));
    }

    #[test]
    fn leaf_string_without_spec_becomes_string_default() {
        let result = build("greeting = \"hello world\"\n");
        let ann = result.root.get("greeting").unwrap();
        assert_eq!(ann.t, Type::Basic(BasicType::String));
        assert!(ann.optional);
        assert_eq!(ann.default.as_deref(), Some("hello world"));
    }

    #[test]
    fn defines_are_processed_before_other_members() {
        // `y` references `X`, which is declared later in the source.
        let result = build("y = \"X\"\n# @define\nX { a = \"int\" }\n");
        let y = result.root.get("y").unwrap();
        match &y.t {
            Type::Object(o) => assert!(o.get("a").is_some()),
            other => panic!("expected object type, got {:?}", other),
        }
        assert!(!y.optional);
        assert_eq!(y.default, None);
    }

    #[test]
    fn warnings_are_sorted_by_line() {
        // X is processed first (it is a define), so its warning is
        // emitted before a's despite coming later in the source.
        let result = build("a = [1, 2]\n# @define\nX { bad = [3, 4] }\n");
        let lines: Vec<u32> = result.warnings.iter().map(|w| w.line()).collect();
        assert_eq!(lines, vec![1, 3]);
    }
}
