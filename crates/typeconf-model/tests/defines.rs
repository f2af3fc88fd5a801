//! Integration tests for `@define` handling.
//!
//! These exercise:
//! - Plain defines and forward references (defines are typed first)
//! - Abstract defines, `@define extends`, and parent member views
//! - Abstract filtering at the object level
//! - Enum defines
//! - Define visibility scoping
//! - Malformed and duplicate annotations

use typeconf_model::ir::Type;
use typeconf_model::{BuildError, ModelBuildResult, ModelBuilder};

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

fn as_object(t: &Type) -> &typeconf_model::ir::ObjectType {
    match t {
        Type::Object(o) => o,
        other => panic!("expected object type, got {:?}", other),
    }
}

// ── Plain defines ──────────────────────────────────────────────────────

#[test]
fn define_is_visible_to_earlier_siblings() {
    // `user` references `Credentials` although the define appears later
    // in the source: define-carrying members are typed first.
    let result = build(
        "user = \"Credentials\"\n\
         # @define\n\
         Credentials {\n\
           name = \"string\"\n\
           pass = \"string\"\n\
         }\n",
    );
    let user = result.root.get("user").unwrap();
    let obj = as_object(&user.t);
    assert!(obj.get("name").is_some());
    assert!(obj.get("pass").is_some());
    assert!(!user.optional);
    assert_eq!(user.default, None);

    // The define itself stays in the model (it is not abstract).
    assert!(result.root.get("Credentials").is_some());
}

#[test]
fn leaf_define_names_a_basic_type() {
    let result = build(
        "# @define\n\
         Port = \"int\"\n\
         main = \"Port\"\n\
         backup = \"Port\"\n",
    );
    for name in ["main", "backup"] {
        let ann = result.root.get(name).unwrap();
        assert_eq!(
            ann.t,
            Type::Basic(typeconf_model::ir::BasicType::Integer),
            "{} should resolve to int",
            name
        );
        assert!(!ann.optional);
    }
}

// ── Abstract defines and extends ───────────────────────────────────────

const ANIMALS: &str = "# @define abstract\n\
                       Animal {\n\
                         name = \"string\"\n\
                       }\n\
                       Dog { # @define extends Animal\n\
                         breed = \"string\"\n\
                       }\n";

#[test]
fn abstract_parent_and_extends_child() {
    let result = build(ANIMALS);

    // Animal is abstract: filtered from the root members.
    assert!(result.root.get("Animal").is_none());
    assert_eq!(result.root.len(), 1);

    let dog = result.root.get("Dog").unwrap();
    let obj = as_object(&dog.t);
    let breed = obj.get("breed").unwrap();
    assert_eq!(breed.t, Type::Basic(typeconf_model::ir::BasicType::String));
    assert!(!breed.optional);

    // The parent's members ride along for the emitters.
    let parents = dog.parent_class_members.as_ref().unwrap();
    assert_eq!(parents.len(), 1);
    assert_eq!(parents[0].0, "name");
}

#[test]
fn field_resolving_to_abstract_define_is_filtered() {
    let src = format!("{}pet = \"Animal\"\n", ANIMALS);
    let result = build(&src);
    assert!(result.root.get("pet").is_none());
    assert!(result.root.get("Dog").is_some());
}

#[test]
fn extends_non_abstract_define_is_an_error() {
    let err = build_err(
        "# @define\n\
         Animal {\n\
           name = \"string\"\n\
         }\n\
         Dog { # @define extends Animal\n\
           breed = \"string\"\n\
         }\n",
    );
    assert_eq!(
        err.to_string(),
        "'Dog' extends 'Animal', which is not an abstract define"
    );
}

#[test]
fn extends_unknown_define_is_an_error() {
    let err = build_err(
        "Dog { # @define extends Ghost\n\
           breed = \"string\"\n\
         }\n",
    );
    assert_eq!(err.to_string(), "'Dog' extends unknown define 'Ghost'");
}

// ── Enum defines ───────────────────────────────────────────────────────

#[test]
fn enum_define_from_list_elements() {
    let result = build(
        "# @define enum\n\
         Color = [red, green, blue]\n\
         paint = \"Color\"\n",
    );
    let color = result.root.get("Color").unwrap();
    assert_eq!(
        color.t,
        Type::Enum(vec!["red".into(), "green".into(), "blue".into()])
    );

    let paint = result.root.get("paint").unwrap();
    assert_eq!(paint.t, color.t);
    assert!(!paint.optional);

    // Deriving the enum from its actual values means no warnings.
    assert!(result.warnings.is_empty());
}

// ── Scoping ────────────────────────────────────────────────────────────

#[test]
fn define_is_not_visible_outside_its_object() {
    let result = build(
        "box {\n\
           # @define\n\
           Item {\n\
             id = \"int\"\n\
           }\n\
           it = \"Item\"\n\
         }\n\
         outside = \"Item\"\n",
    );
    let the_box = result.root.get("box").unwrap();
    let it = as_object(&the_box.t).get("it").unwrap();
    assert!(matches!(it.t, Type::Object(_)));

    // Outside the box the name means nothing: plain string default.
    let outside = result.root.get("outside").unwrap();
    assert_eq!(outside.t, Type::Basic(typeconf_model::ir::BasicType::String));
    assert!(outside.optional);
    assert_eq!(outside.default.as_deref(), Some("Item"));
}

#[test]
fn nested_objects_see_outer_defines() {
    let result = build(
        "# @define\n\
         Item {\n\
           id = \"int\"\n\
         }\n\
         box {\n\
           it = \"Item\"\n\
         }\n",
    );
    let the_box = result.root.get("box").unwrap();
    let it = as_object(&the_box.t).get("it").unwrap();
    assert!(matches!(it.t, Type::Object(_)));
}

// ── Annotation errors ──────────────────────────────────────────────────

#[test]
fn malformed_define_is_an_error() {
    let err = build_err("# @define wobble\nX {\n  a = 1\n}\n");
    match &err {
        BuildError::MalformedDefine { key, annotation, .. } => {
            assert_eq!(key, "X");
            assert_eq!(annotation, "@define wobble");
        }
        other => panic!("expected MalformedDefine, got {:?}", other),
    }
}

#[test]
fn multiple_defines_on_one_key_is_an_error() {
    let err = build_err("# @define\n# @define abstract\nX {\n  a = 1\n}\n");
    assert_eq!(err.to_string(), "multiple @define's for 'X'");
}
