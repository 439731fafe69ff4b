#![allow(clippy::unwrap_used, clippy::expect_used)]

use intraops_core::accounting::{
    CreateAccountGroup, CreatePaymentTerm, GetAccountGroup, ListAccountGroups,
};
use intraops_core::errors::ExErrorKind;
use intraops_core::{ExecutionContext, ListOptions};
use intraops_engine::{AppConfig, OperatorConfig, Services};
use intraops_store::Database;
use tempfile::TempDir;

fn setup_db(dir: &TempDir) -> Database {
    let db = Database::open(dir.path().join("intraops.db")).unwrap();
    db.migrate().unwrap();
    db
}

fn group(number: &str, name: &str) -> CreateAccountGroup {
    CreateAccountGroup {
        number: number.to_string(),
        name: name.to_string(),
        description: None,
    }
}

#[test]
fn test_all_handlers_registered_with_full_pipeline() {
    let dir = TempDir::new().unwrap();
    let services = Services::build(setup_db(&dir), &AppConfig::default()).unwrap();

    let commands = services.commands.bindings();
    assert_eq!(commands.len(), 6);
    assert!(commands.iter().all(|b| b.decorators
        == vec!["logging", "cancellation", "permission", "validation", "transaction"]));

    let queries = services.queries.bindings();
    assert_eq!(queries.len(), 4);
    assert!(queries
        .iter()
        .all(|b| !b.decorators.contains(&"transaction")));
}

#[test]
fn test_operator_round_trip_through_sqlite() {
    let dir = TempDir::new().unwrap();
    let services = Services::build(setup_db(&dir), &AppConfig::default()).unwrap();
    let ctx = services.operator_context();

    let id = services
        .commands
        .dispatch(&group("4000", "Revenue"), &ctx)
        .unwrap();
    let view = services
        .queries
        .ask(&GetAccountGroup { id }, &ctx)
        .unwrap();
    assert_eq!(view.display_name, "4000 - Revenue");
}

#[test]
fn test_failed_command_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let services = Services::build(setup_db(&dir), &AppConfig::default()).unwrap();
    let ctx = services.operator_context();

    services
        .commands
        .dispatch(&group("1000", "Assets"), &ctx)
        .unwrap();
    let err = services
        .commands
        .dispatch(&group("1000", "Duplicate"), &ctx)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);

    let page = services
        .queries
        .ask(&ListAccountGroups::default(), &ctx)
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Assets");
}

#[test]
fn test_restricted_operator_is_forbidden() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        operator: OperatorConfig {
            user_id: "viewer".to_string(),
            display_name: None,
            permissions: vec!["accounting.payment_terms.read".to_string()],
        },
        ..AppConfig::default()
    };
    let services = Services::build(setup_db(&dir), &config).unwrap();

    let err = services
        .commands
        .dispatch(
            &CreatePaymentTerm {
                name: "Net 30".to_string(),
                days_until_due: 30,
                discount_days: 0,
                discount_basis_points: 0,
            },
            &services.operator_context(),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_disabled_permission_check_admits_anonymous_callers() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.pipeline.permissions = false;
    let services = Services::build(setup_db(&dir), &config).unwrap();

    let page = services
        .queries
        .ask(
            &ListAccountGroups {
                options: ListOptions::default(),
            },
            &ExecutionContext::new(),
        )
        .unwrap();
    assert!(page.items.is_empty());
    assert!(services
        .queries
        .bindings()
        .iter()
        .all(|b| !b.decorators.contains(&"permission")));
}

#[test]
fn test_configured_timeout_sets_deadline() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.pipeline.timeout_ms = Some(60_000);
    let services = Services::build(setup_db(&dir), &config).unwrap();

    assert!(services
        .operator_context()
        .cancellation()
        .deadline()
        .is_some());
    assert!(Services::build(setup_db(&TempDir::new().unwrap()), &AppConfig::default())
        .unwrap()
        .operator_context()
        .cancellation()
        .deadline()
        .is_none());
}
