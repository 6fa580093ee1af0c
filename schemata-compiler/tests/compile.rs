//! End-to-end compilation tests: schema modules in, SDL out.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{str::FromStr, sync::Arc};

use schemata_blueprint::{
    ArgumentDefinition, Blueprint, EnumType, EnumValueDefinition, FieldDefinition,
    InterfaceType, ObjectType, SchemaDefinition, TypeRef,
};
use schemata_compiler::{
    Error, PhaseErrors, Pipeline, SnapshotPlugin, compile, lower, phase_fn, print_sdl,
};
use schemata_manifest::Manifest;

fn query_with(field: FieldDefinition) -> Blueprint {
    Blueprint::new()
        .with_schema(SchemaDefinition::default().with_query("Query"))
        .add_type(ObjectType::new("Query").with_field(field))
        .unwrap()
}

fn compile_modules(modules: &[&str]) -> Result<String, String> {
    let manifests: Vec<Manifest> = modules
        .iter()
        .map(|m| Manifest::from_str(m).expect("Failed to parse schema"))
        .collect();
    let blueprint = lower(&manifests).map_err(|e| e.to_string())?;
    let compiled = compile(blueprint, &Pipeline::new()).map_err(|e| e.to_string())?;
    print_sdl(&compiled).map_err(|e| e.to_string())
}

#[test]
fn test_hello_world() {
    let blueprint = query_with(
        FieldDefinition::new("hello_world", TypeRef::named("String")).with_argument(
            ArgumentDefinition::new("name", TypeRef::non_null(TypeRef::named("String"))),
        ),
    );

    let compiled = compile(blueprint, &Pipeline::new()).unwrap();
    insta::assert_snapshot!(print_sdl(&compiled).unwrap(), @r###"
    schema {
      query: Query
    }

    type Query {
      helloWorld(name: String!): String
    }
    "###);
}

#[test]
fn test_inserted_phase_adds_field() {
    let blueprint = query_with(FieldDefinition::new("module", TypeRef::named("Mod")))
        .add_type(ObjectType::new("Mod"))
        .unwrap();

    let pipeline = Pipeline::new()
        .insert_after(
            "imports",
            phase_fn("mod-field", "Add `mod_field` to `Mod`", |bp: Blueprint| {
                Ok(bp.add_field("Mod", FieldDefinition::new("mod_field", TypeRef::named("String")))?)
            }),
        )
        .unwrap();
    assert_eq!(
        pipeline.phase_names(),
        ["imports", "mod-field", "link", "validate", "conformance", "defaults", "hydrate"]
    );

    let compiled = compile(blueprint, &pipeline).unwrap();
    insta::assert_snapshot!(print_sdl(&compiled).unwrap(), @r###"
    schema {
      query: Query
    }

    type Query {
      module: Mod
    }

    type Mod {
      modField: String
    }
    "###);
}

#[test]
fn test_conformance_failure_then_fix() {
    let node = InterfaceType::new("Node")
        .with_field(FieldDefinition::new("id", TypeRef::non_null(TypeRef::named("ID"))));
    let broken = query_with(FieldDefinition::new("user", TypeRef::named("User")))
        .add_type(node.clone())
        .unwrap()
        .add_type(ObjectType::new("User").with_interface("Node"))
        .unwrap();

    let err = compile(broken, &Pipeline::new()).unwrap_err();
    assert_eq!(err.phase, "conformance");
    assert_eq!(
        err.errors,
        [Error::InterfaceConformanceViolation {
            type_name: "User".into(),
            interface: "Node".into(),
            field: "id".into(),
        }]
    );

    let fixed = query_with(FieldDefinition::new("user", TypeRef::named("User")))
        .add_type(node)
        .unwrap()
        .add_type(
            ObjectType::new("User")
                .with_interface("Node")
                .with_field(FieldDefinition::new("id", TypeRef::non_null(TypeRef::named("ID")))),
        )
        .unwrap();

    let compiled = compile(fixed, &Pipeline::new()).unwrap();
    let sdl = print_sdl(&compiled).unwrap();
    assert!(sdl.contains("type User implements Node {\n  id: ID!\n}"));
}

#[test]
fn test_enum_alias_is_printed_verbatim() {
    let blueprint = query_with(
        FieldDefinition::new("channel", TypeRef::named("Channel")).with_argument(
            ArgumentDefinition::new("pick", TypeRef::named("Channel"))
                .with_default(schemata_blueprint::Value::Enum("first".into())),
        ),
    )
    .add_type(
        EnumType::new("Channel")
            .with_value(EnumValueDefinition::new("red"))
            .with_value(EnumValueDefinition::new("first").with_alias("FiRsT  x")),
    )
    .unwrap();

    let compiled = compile(blueprint, &Pipeline::new()).unwrap();
    insta::assert_snapshot!(print_sdl(&compiled).unwrap(), @r###"
    schema {
      query: Query
    }

    type Query {
      channel(pick: Channel = FiRsT  x): Channel
    }

    enum Channel {
      RED
      FiRsT  x
    }
    "###);
}

#[test]
fn test_missing_query_root_fails_in_link() {
    let blueprint = Blueprint::new().add_type(ObjectType::new("User")).unwrap();

    let err = compile(blueprint, &Pipeline::new()).unwrap_err();
    assert_eq!(err.phase, "link");
    assert_eq!(err.errors, [Error::MissingQueryRoot]);
}

#[test]
fn test_fields_printing_the_same_name_fail_validation() {
    let blueprint = query_with(FieldDefinition::new("hello_world", TypeRef::named("String")))
        .add_field("Query", FieldDefinition::new("helloWorld", TypeRef::named("Int")))
        .unwrap();

    let err = compile(blueprint, &Pipeline::new()).unwrap_err();
    assert_eq!(err.phase, "validate");
    assert_eq!(
        err.to_string(),
        "phase `validate` failed: `hello_world` and `helloWorld` both print as `helloWorld` in type `Query`"
    );
}

#[test]
fn test_out_of_range_int_default_fails() {
    let blueprint = query_with(
        FieldDefinition::new("numbers", TypeRef::named("Int")).with_argument(
            ArgumentDefinition::new("big", TypeRef::named("Int")).with_default(5_000_000_000_i64),
        ),
    );

    let err = compile(blueprint, &Pipeline::new()).unwrap_err();
    assert_eq!(err.phase, "defaults");
}

#[test]
fn test_custom_phase_errors_stop_the_run() {
    let pipeline = Pipeline::new()
        .insert_before(
            "link",
            phase_fn("reject", "Reject every schema", |_| {
                Err(PhaseErrors::from(vec![Error::custom("first"), Error::custom("second")]))
            }),
        )
        .unwrap();

    let err = compile(query_with(FieldDefinition::new("a", TypeRef::named("Int"))), &pipeline)
        .unwrap_err();
    assert_eq!(err.phase, "reject");
    assert_eq!(err.to_string(), "phase `reject` failed: first; second");
}

#[test]
fn test_output_is_deterministic() {
    const APP: &str = r#"
[module]
name = "app"

[objects.query.fields.users]
type = "[user!]!"

[objects.query.fields.users.args.first]
type = "integer"
default = 10

[objects.user.fields.id]
type = "id!"

[objects.user.fields.display_name]
type = "string"
"#;

    let first = compile_modules(&[APP]).unwrap();
    for _ in 0..5 {
        assert_eq!(compile_modules(&[APP]).unwrap(), first);
    }
}

#[test]
fn test_modules_with_imports() {
    let shared = r#"
[module]
name = "shared"

[objects.audit.fields.created_at]
type = "string!"

[objects.audit.fields.secret]
type = "string"
"#;
    let app = r#"
[module]
name = "app"

[schema]
query = "query"

[objects.query.fields.post]
type = "post"

[objects.post]
import_fields = [{ from = "audit", module = "shared", except = ["secret"] }]

[objects.post.fields.title]
type = "string!"
"#;

    insta::assert_snapshot!(compile_modules(&[shared, app]).unwrap(), @r###"
    schema {
      query: Query
    }

    type Audit {
      createdAt: String!
      secret: String
    }

    type Query {
      post: Post
    }

    type Post {
      title: String!
      createdAt: String!
    }
    "###);
}

#[test]
fn test_unknown_reference_is_reported() {
    let app = r#"
[module]
name = "app"

[objects.query.fields.user]
type = "user"
"#;

    let err = compile_modules(&[app]).unwrap_err();
    assert_eq!(
        err,
        "phase `link` failed: unknown type `User` referenced by field `Query.user`"
    );
}

#[test]
fn test_snapshot_plugin_sees_every_phase() {
    let snapshots = Arc::new(SnapshotPlugin::new());
    let pipeline = Pipeline::new().plugin(Arc::clone(&snapshots));

    compile(query_with(FieldDefinition::new("a", TypeRef::named("Int"))), &pipeline).unwrap();

    let phases: Vec<_> = snapshots
        .snapshots()
        .into_iter()
        .map(|s| s.file_name())
        .collect();
    assert_eq!(
        phases,
        [
            "01-imports.json",
            "02-link.json",
            "03-validate.json",
            "04-conformance.json",
            "05-defaults.json",
            "06-hydrate.json",
        ]
    );
}
