// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Behavioral properties of the registry, the type algebra and conversion,
// exercised through the public API only.

use bscheme::{
    Data, Identifier, Param, Registry, SchemeConfig, SchemeError, SharedRegistry, Type,
    ValidationReason, Value,
};
use serde_json::json;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn user_params() -> Vec<Param> {
    vec![
        Param::new("id", Type::INT),
        Param::new("first_name", Type::STR | Type::NULL),
    ]
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

#[test]
fn duplicate_constructor_is_rejected() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");
    let before = registry.len();

    let err = registry
        .register("Account", "user", Vec::new())
        .expect_err("duplicate");
    let SchemeError::DuplicateConstructor { constructor, owner } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(constructor, "user");
    let identifier = user.identifier(&registry).expect("identifier");
    assert_eq!(*owner, format!("User.user#{identifier}"));

    assert_eq!(registry.len(), before);
    assert_eq!(registry.lookup("user"), Some(user));
    assert!(registry.constructors_of("Account").is_empty());
}

#[test]
fn duplicate_param_leaves_registry_untouched() {
    init();
    let mut registry = Registry::new();
    let err = registry
        .register(
            "Point",
            "point",
            vec![Param::new("x", Type::INT), Param::new("x", Type::INT)],
        )
        .expect_err("duplicate param");
    assert!(matches!(err, SchemeError::DuplicateParam { .. }));
    assert_eq!(registry.lookup("point"), None);
    assert!(registry.constructors_of("Point").is_empty());
}

#[test]
fn independent_registries_do_not_interfere() {
    init();
    let mut first = Registry::new();
    let mut second = Registry::new();
    first.register("User", "user", user_params()).expect("register");
    second.register("User", "user", user_params()).expect("register");
    second.register("User", "bot", user_params()).expect("register");

    let user = first.lookup("user").expect("user");
    assert_eq!(user.name(&first), "User");
    let user = second.lookup("user").expect("user");
    assert_eq!(user.name(&second), "User.user");
}

#[test]
fn registries_of_equal_size_keep_handles_apart() {
    init();
    let mut first = Registry::new();
    let mut second = Registry::new();
    let user = first
        .register("User", "user", vec![Param::new("id", Type::INT)])
        .expect("register");
    let point = second
        .register("Point", "point", vec![Param::new("x", Type::STR)])
        .expect("register");
    assert_eq!(first.len(), second.len());

    let err = second
        .register("Holder", "holder", vec![Param::new("owner", user.clone())])
        .expect_err("foreign parameter type");
    assert!(matches!(err, SchemeError::UnknownConstructor(_)));

    let value = first
        .convert(&user, &Data::from(json!({"id": 1})))
        .expect("convert");
    let typed = Data::Typed(value);
    assert!(!second.validate(&point, &typed));
    let err = second.convert(&point, &typed).expect_err("foreign value");
    let SchemeError::Validation(failure) = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert!(matches!(failure.reason, ValidationReason::ForeignValue { .. }));
}

// ---------------------------------------------------------------------------
// Type algebra
// ---------------------------------------------------------------------------

#[test]
fn union_is_commutative() {
    init();
    let registry = Registry::new();
    let a = Type::INT | Type::NULL;
    let b = Type::NULL | Type::INT;
    assert_eq!(a, b);
    assert_eq!(a.canonical_scheme(&registry), "int | null");
    assert_eq!(a.canonical_scheme(&registry), b.canonical_scheme(&registry));
}

#[test]
fn union_is_associative() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");

    let left = (&Type::INT | &Type::STR) | user.clone();
    let right = Type::INT | (Type::STR | user);
    assert_eq!(left, right);
    assert_eq!(left.canonical_scheme(&registry), "User | int | str");
    assert_eq!(right.canonical_scheme(&registry), "User | int | str");
}

#[test]
fn degenerate_union_collapses() {
    init();
    let registry = Registry::new();
    let twice = Type::INT | Type::INT;
    assert_eq!(twice, Type::INT);
    assert!(!twice.is_union());
    assert_eq!(
        twice.identifier(&registry).expect("identifier"),
        Type::INT.identifier(&registry).expect("identifier")
    );

    let thrice = (Type::INT | Type::INT) | Type::INT;
    assert_eq!(thrice, Type::INT);

    let nested = (Type::INT | Type::NULL) | (Type::NULL | Type::INT);
    assert_eq!(nested, Type::INT | Type::NULL);
}

#[test]
fn disambiguation_by_constructor_name() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");
    assert_eq!(user.name(&registry), "User");

    let bot = registry.register("User", "bot", user_params()).expect("register");
    assert_eq!(user.name(&registry), "User.user");
    assert_eq!(bot.name(&registry), "User.bot");
}

#[test]
fn literal_scenario() {
    init();
    let mut registry = Registry::new();
    let user = registry
        .register(
            "User",
            "user",
            vec![
                Param::new("id", Type::INT),
                Param::new("first_name", Type::STR),
            ],
        )
        .expect("register");

    let scheme = user.canonical_scheme(&registry);
    assert_eq!(scheme, "user id: int, first_name: str = User");
    let identifier = user.identifier(&registry).expect("identifier");
    assert_eq!(identifier, Identifier::of("user id: int, first_name: str = User"));
    assert_eq!(
        identifier.to_string(),
        format!("{:x}", crc32fast::hash(scheme.as_bytes()))
    );
}

#[test]
fn sibling_changes_scheme_of_referencing_types() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");
    let unused = registry
        .register(
            "UnusedType",
            "botUnused",
            vec![
                Param::new("id", Type::INT),
                Param::new("first_name", Type::STR | Type::NULL),
                Param::new("bot_creator", user.clone()),
            ],
        )
        .expect("register");
    assert_eq!(
        unused.canonical_scheme(&registry),
        "botUnused id: int, first_name: null | str, bot_creator: User = UnusedType"
    );

    let bot = registry
        .register(
            "User",
            "bot",
            vec![
                Param::new("id", Type::INT),
                Param::new("first_name", Type::STR | Type::NULL),
                Param::new("bot_creator", user),
            ],
        )
        .expect("register");
    assert_eq!(
        bot.canonical_scheme(&registry),
        "bot id: int, first_name: null | str, bot_creator: User.user = User"
    );
    assert_eq!(
        unused.canonical_scheme(&registry),
        "botUnused id: int, first_name: null | str, bot_creator: User.user = UnusedType"
    );
    assert_eq!(registry.stale_identifiers().len(), 1);
}

// ---------------------------------------------------------------------------
// Validation and conversion
// ---------------------------------------------------------------------------

#[test]
fn structural_validation() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");

    let accepts = |value: serde_json::Value| registry.validate(&user, &Data::from(value));
    assert!(accepts(json!({"id": 42, "first_name": "Mark"})));
    assert!(accepts(json!({"id": 42, "first_name": null})));
    assert!(!accepts(json!({"id": "42", "first_name": null})));
    assert!(!accepts(json!({"id": 42})));
    assert!(!accepts(json!({})));
}

#[test]
fn bool_handling_is_configurable() {
    init();
    let strict = Registry::new();
    assert!(!strict.validate(&Type::INT, &Data::Bool(false)));

    let lenient = Registry::with_config(SchemeConfig::new().with_bool_as_int(true));
    assert!(lenient.validate(&Type::INT, &Data::Bool(false)));
    let value = lenient
        .convert(&Type::INT, &Data::Bool(false))
        .expect("convert");
    assert_eq!(value.as_int(), Some(0));
}

#[test]
fn conversion_output_revalidates() {
    init();
    let mut registry = Registry::new();
    let user = registry.register("User", "user", user_params()).expect("register");
    let optional = user.clone() | Type::NULL;

    let inputs = [
        (user.clone(), json!({"id": 1, "first_name": "Ann"})),
        (user.clone(), json!({"id": -5, "first_name": null, "extra": [1, 2]})),
        (optional.clone(), json!(null)),
        (optional, json!({"id": 3, "first_name": "Bo"})),
        (Type::STR | Type::INT, json!("text")),
        (Type::STR | Type::INT, json!(7)),
    ];
    for (ty, input) in inputs {
        let data = Data::from(input);
        assert!(registry.validate(&ty, &data), "input should validate");
        let value = registry.convert(&ty, &data).expect("convert");
        assert!(registry.validate(&ty, &Data::Typed(value.clone())));
        assert_eq!(registry.convert(&ty, &Data::Typed(value.clone())), Ok(value));
    }
}

#[test]
fn recursive_constructor() {
    init();
    let mut registry = Registry::new();
    let node = registry.declare("Node", "node").expect("declare");
    assert!(matches!(
        node.identifier(&registry),
        Err(SchemeError::Undefined(_))
    ));
    registry
        .define(
            &node,
            vec![
                Param::new("value", Type::INT),
                Param::new("next", node.clone() | Type::NULL),
            ],
        )
        .expect("define");

    let data = Data::from(json!({
        "value": 1,
        "next": {"value": 2, "next": {"value": 3, "next": null}},
    }));
    let value = registry.convert(&node, &data).expect("convert");
    let third = value
        .get("next")
        .and_then(|v| v.get("next"))
        .expect("third node");
    assert_eq!(third.get("value").and_then(Value::as_int), Some(3));
    assert!(third.get("next").is_some_and(Value::is_null));

    let broken = Data::from(json!({"value": 1, "next": {"value": 2}}));
    let err = registry.convert(&node, &broken).expect_err("missing next");
    let SchemeError::Validation(failure) = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(failure.path, "$.next");
    assert!(matches!(
        failure.reason,
        ValidationReason::NoMatchingBranch { .. }
    ));
}

#[test]
fn bot_demo_renders() {
    init();
    let mut registry = Registry::new();
    let user = registry
        .register(
            "User",
            "user",
            vec![
                Param::new("id", Type::INT),
                Param::new("first_name", Type::STR),
            ],
        )
        .expect("register user");
    let bot = registry
        .register(
            "User",
            "bot",
            vec![
                Param::new("id", Type::INT),
                Param::new("first_name", Type::STR | Type::NULL),
                Param::new("bot_creator", user.clone()),
            ],
        )
        .expect("register bot");
    assert_eq!(
        bot.canonical_scheme(&registry),
        "bot id: int, first_name: null | str, bot_creator: User.user = User"
    );

    let creator = registry
        .convert(&user, &Data::from(json!({"id": 42, "first_name": "Mark"})))
        .expect("convert user");
    let data = Data::record([
        ("id", Data::from(1)),
        ("first_name", Data::Null),
        ("bot_creator", Data::from(creator)),
    ]);
    let value = registry.convert(&bot, &data).expect("convert bot");

    let expected = "\
User.bot(
    id=int(
        value=1
    )
    first_name=null
    bot_creator=User.user(
        id=int(
            value=42
        )
        first_name=str(
            value=Mark
        )
    )
)";
    assert_eq!(value.display(&registry).to_string(), expected);
}

#[test]
fn shared_registry_across_threads() {
    init();
    let shared = SharedRegistry::new();
    let user = shared.register("User", "user", user_params()).expect("register");

    let workers: Vec<_> = (0..4i64)
        .map(|i| {
            let shared = shared.clone();
            let user = user.clone();
            std::thread::spawn(move || {
                let data = Data::from(json!({"id": i, "first_name": null}));
                shared.convert(&user, &data).map(|v| v.get("id").and_then(Value::as_int))
            })
        })
        .collect();
    for (i, worker) in workers.into_iter().enumerate() {
        let id = worker.join().expect("thread panicked").expect("convert");
        assert_eq!(id, i64::try_from(i).ok());
    }
}
