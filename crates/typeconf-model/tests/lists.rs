//! Integration tests for list typing and list warnings.
//!
//! Lists carry exactly one element describing the element type; extra
//! elements, optional marks, and defaults inside lists produce warnings
//! but never abort the build.

use typeconf_model::ir::{BasicType, TimeUnit, Type};
use typeconf_model::{BuildError, ModelBuildResult, ModelBuilder, Warning};

// ── Helpers ────────────────────────────────────────────────────────────

fn build(src: &str) -> ModelBuildResult {
    let parse = typeconf_hocon::parse(src);
    assert!(parse.ok(), "parse errors: {:?}", parse.errors());
    ModelBuilder::new().build(parse.root()).expect("build failed")
}

fn build_err(src: &str) -> BuildError {
    let parse = typeconf_hocon::parse(src);
    assert!(parse.ok(), "parse errors: {:?}", parse.errors());
    ModelBuilder::new()
        .build(parse.root())
        .expect_err("expected a build error")
}

fn list_of(t: Type) -> Type {
    Type::List(Box::new(t))
}

// ── Element typing ─────────────────────────────────────────────────────

#[test]
fn single_element_list_is_warning_free() {
    let result = build("xs = [\"int\"]\n");
    let xs = result.root.get("xs").unwrap();
    assert_eq!(xs.t, list_of(Type::Basic(BasicType::Integer)));
    assert!(!xs.optional);
    assert_eq!(xs.default, None);
    assert!(result.warnings.is_empty());
}

#[test]
fn element_types_are_inferred_from_values() {
    let result = build("flags = [true]\ncounts = [3000000000]\nnames = [alice]\n");
    assert_eq!(
        result.root.get("flags").unwrap().t,
        list_of(Type::Basic(BasicType::Boolean))
    );
    assert_eq!(
        result.root.get("counts").unwrap().t,
        list_of(Type::Basic(BasicType::Long))
    );
    assert_eq!(
        result.root.get("names").unwrap().t,
        list_of(Type::Basic(BasicType::String))
    );
}

#[test]
fn list_of_objects() {
    let result = build("xs = [{ id = \"int\" }]\n");
    let xs = result.root.get("xs").unwrap();
    match &xs.t {
        Type::List(elem) => match elem.as_ref() {
            Type::Object(o) => assert!(o.get("id").is_some()),
            other => panic!("expected object element, got {:?}", other),
        },
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn nested_lists() {
    let result = build("xs = [[\"int\"]]\n");
    assert_eq!(
        result.root.get("xs").unwrap().t,
        list_of(list_of(Type::Basic(BasicType::Integer)))
    );
}

#[test]
fn list_element_can_reference_a_define() {
    let result = build(
        "# @define\n\
         Item {\n\
           id = \"int\"\n\
         }\n\
         items = [\"Item\"]\n",
    );
    let items = result.root.get("items").unwrap();
    match &items.t {
        Type::List(elem) => assert!(matches!(elem.as_ref(), Type::Object(_))),
        other => panic!("expected list, got {:?}", other),
    }
}

// ── Warnings ───────────────────────────────────────────────────────────

#[test]
fn multi_element_list_warns_and_uses_the_first() {
    let result = build("a = 1\nb = 2\nxs = [\"int\", \"string\"]\n");
    let xs = result.root.get("xs").unwrap();
    assert_eq!(xs.t, list_of(Type::Basic(BasicType::Integer)));
    assert_eq!(
        result.warnings,
        vec![Warning::MultElemList {
            line: 3,
            source: "[int,string]".into(),
        }]
    );
}

#[test]
fn optional_mark_in_list_element_warns() {
    let result = build("xs = [\"int?\"]\n");
    assert_eq!(
        result.root.get("xs").unwrap().t,
        list_of(Type::Basic(BasicType::Integer))
    );
    assert_eq!(
        result.warnings,
        vec![Warning::OptListElem {
            line: 1,
            source: "int?".into(),
        }]
    );
}

#[test]
fn default_in_list_element_warns() {
    // A default implies optional, so both warnings fire.
    let result = build("xs = [\"int | 5\"]\n");
    assert_eq!(
        result.root.get("xs").unwrap().t,
        list_of(Type::Basic(BasicType::Integer))
    );
    assert_eq!(
        result.warnings,
        vec![
            Warning::OptListElem {
                line: 1,
                source: "int | 5".into(),
            },
            Warning::DefaultListElem {
                line: 1,
                source: "int | 5".into(),
            },
        ]
    );
}

#[test]
fn duration_literal_element_warns_for_opt_and_default() {
    let result = build("xs = [\"10ms\"]\n");
    assert_eq!(
        result.root.get("xs").unwrap().t,
        list_of(Type::Basic(BasicType::Duration(TimeUnit::Millis)))
    );
    assert_eq!(result.warnings.len(), 2);
    assert!(result
        .warnings
        .iter()
        .all(|w| w.line() == 1 && w.source() == "10ms"));
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn empty_list_is_an_error() {
    let err = build_err("xs = []\n");
    assert_eq!(err.to_string(), "list for 'xs' must have at least one element");
    assert_eq!(err.line(), 1);
}

#[test]
fn null_list_element_is_an_error() {
    let err = build_err("xs = [null]\n");
    assert!(matches!(err, BuildError::NullValue { .. }));
}
