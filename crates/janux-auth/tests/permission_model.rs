//! Integration tests for the permission model.
//!
//! Tests the complete flow: catalog → registry → holder → JSON

use janux_auth::config::{AuthConfig, ConfigLoader};
use janux_auth::{
    AuthError, AuthorizationContext, AuthorizationHolder, ContextJson, ContextRegistry,
    DenialReason, ErrorCode, HolderJson,
};
use std::sync::Arc;
use tempfile::TempDir;

const CATALOG: &str = r#"
[[contexts]]
name = "PERSON"
description = "Person"
bits = ["READ", "UPDATE", "DELETE", "PURGE"]

[[contexts]]
name = "ACCOUNT"
description = "Account"
sort_order = 2
bits = ["READ", { name = "LOCK", description = "Lock an account" }]
"#;

fn registry() -> ContextRegistry {
    let config = AuthConfig::from_toml(CATALOG).expect("catalog should parse");
    ContextRegistry::from_config(&config).expect("catalog should build")
}

/// Context "PERSON" with READ at 0 and UPDATE at 1
#[test]
fn person_read_update_example() {
    let person = Arc::new(
        AuthorizationContext::with_bits("PERSON", "Person", ["READ", "UPDATE"])
            .expect("should build PERSON"),
    );
    assert_eq!(person.max_value(), 3);
    assert_eq!(person.permissions_as_number(["READ", "UPDATE"]).unwrap(), 3);

    let mut admin = AuthorizationHolder::new("admin");
    admin.grant(3_u64, &person).unwrap();
    assert!(admin.can("READ", "PERSON"));
    assert!(admin.can(["READ", "UPDATE"], "PERSON"));

    let mut reader = AuthorizationHolder::new("reader");
    reader.grant(1_u64, &person).unwrap();
    assert!(!reader.can("UPDATE", "PERSON"));
}

/// Auto positions are 0..N and the max value is 2^N - 1, for every N up to 64
#[test]
fn auto_positions_fill_the_word() {
    for n in 1..=64_u32 {
        let names: Vec<String> = (0..n).map(|i| format!("BIT_{i}")).collect();
        let ctx = AuthorizationContext::with_bits("WIDE", "", &names).unwrap();

        for (i, name) in names.iter().enumerate() {
            assert_eq!(ctx.permission_bit(name).unwrap().position() as usize, i);
        }
        let expected = if n == 64 { u64::MAX } else { (1_u64 << n) - 1 };
        assert_eq!(ctx.max_value(), expected, "max value for {n} bits");
    }
}

/// A 65th bit does not fit
#[test]
fn capacity_is_enforced_at_registration() {
    let names: Vec<String> = (0..64).map(|i| format!("BIT_{i}")).collect();
    let mut ctx = AuthorizationContext::with_bits("WIDE", "", &names).unwrap();

    let err = ctx.add_permission_bit_by_name("ONE_TOO_MANY", "", None).unwrap_err();
    assert!(matches!(err, AuthError::CapacityExceeded { limit: 64, .. }));
    assert_eq!(ctx.len(), 64);
}

/// OR semantics: repeats do not double-count
#[test]
fn combining_names_is_bitwise_or() {
    let registry = registry();
    let person = registry.get("PERSON").unwrap();

    let read = person.permission_as_number("READ").unwrap();
    let delete = person.permission_as_number("DELETE").unwrap();
    assert_eq!(
        person.permissions_as_number(["READ", "DELETE"]).unwrap(),
        read | delete
    );
    assert_eq!(person.permissions_as_number(["READ", "READ"]).unwrap(), read);
}

#[test]
fn context_json_string_round_trip() {
    let registry = registry();
    let account: &AuthorizationContext = registry.get("ACCOUNT").unwrap();

    let text = serde_json::to_string(account).unwrap();
    let back: AuthorizationContext = serde_json::from_str(&text).unwrap();

    assert_eq!(&back, account);
    assert_eq!(back.sort_order(), 2);
    assert_eq!(
        back.permission_bit("LOCK").unwrap().description(),
        "Lock an account"
    );
}

#[test]
fn context_json_with_gap_is_rejected() {
    let json: ContextJson = serde_json::from_str(
        r#"{"name":"PERSON","bit":{"READ":{"position":0},"PURGE":{"position":3}}}"#,
    )
    .unwrap();

    let err = AuthorizationContext::from_json(json).unwrap_err();
    assert_eq!(err.code(), "AUTH_NON_CONTIGUOUS_POSITIONS");
}

/// A rejected grant leaves the previous one in place
#[test]
fn overflow_keeps_existing_grant() {
    let registry = registry();
    let mut holder = AuthorizationHolder::new("clerk");
    holder.grant_by_name(["READ"], "PERSON", &registry).unwrap();

    let err = holder
        .grant_by_name(16_u64, "PERSON", &registry)
        .unwrap_err();
    assert_eq!(err.code(), "AUTH_BITMASK_OVERFLOW");
    assert_eq!(holder.granted("PERSON"), Some(1));
}

#[test]
fn zero_grant_removes_context() {
    let registry = registry();
    let mut holder = AuthorizationHolder::new("clerk");
    holder
        .grant_by_name(["READ", "UPDATE"], "PERSON", &registry)
        .unwrap()
        .grant_by_name(0_u64, "PERSON", &registry)
        .unwrap();

    assert_eq!(holder.granted("PERSON"), None);
    assert!(!holder.can("READ", "PERSON"));
    assert_eq!(
        holder.evaluate(["READ"], "PERSON").reason(),
        Some(&DenialReason::NoGrant {
            context: "PERSON".into()
        })
    );
}

#[test]
fn almighty_passes_unknown_contexts_and_names() {
    let holder = AuthorizationHolder::almighty("root");
    assert!(holder.can("ANYTHING", "NOWHERE"));
    assert!(holder.has_permissions(["A", "B"], "PERSON"));
}

#[test]
fn holder_json_round_trip_through_registry() {
    let registry = registry();
    let mut holder = AuthorizationHolder::new("ops");
    holder.add_role("OPERATOR");
    holder
        .grant_by_name(["READ", "PURGE"], "PERSON", &registry)
        .unwrap()
        .grant_by_name(["LOCK"], "ACCOUNT", &registry)
        .unwrap();

    let text = serde_json::to_string(&holder).unwrap();
    let json: HolderJson = serde_json::from_str(&text).unwrap();
    assert_eq!(json.auth_contexts.len(), 2);
    assert_eq!(json.permissions["PERSON"].deny, None);

    let back = AuthorizationHolder::from_json(json, &registry).unwrap();
    assert_eq!(back.name(), "ops");
    assert_eq!(back.roles(), ["OPERATOR".to_string()]);
    assert_eq!(back.granted("PERSON"), Some(0b1001));
    assert_eq!(back.granted_names("ACCOUNT"), vec!["LOCK"]);
    assert!(!back.is_almighty());
}

#[test]
fn holder_json_against_foreign_registry_fails() {
    let json: HolderJson = serde_json::from_str(
        r#"{"name":"ops","permissions":{"EQUIPMENT":{"grant":1}}}"#,
    )
    .unwrap();

    let err = AuthorizationHolder::from_json(json, &registry()).unwrap_err();
    assert!(matches!(err, AuthError::MissingContext { ref context, .. } if context == "EQUIPMENT"));
}

#[test]
fn loader_builds_registry_from_project_catalog() {
    let project = TempDir::new().unwrap();
    let janux_dir = project.path().join(".janux");
    std::fs::create_dir_all(&janux_dir).unwrap();
    std::fs::write(janux_dir.join("auth.toml"), CATALOG).unwrap();

    let registry = ConfigLoader::new()
        .skip_global_config()
        .with_project_root(project.path())
        .skip_env_vars()
        .load_registry()
        .expect("should load project catalog");

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["PERSON", "ACCOUNT"]);
    assert_eq!(
        registry.get("PERSON").unwrap().to_string(),
        "PERSON [READ=0, UPDATE=1, DELETE=2, PURGE=3]"
    );
}
