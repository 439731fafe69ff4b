#![allow(clippy::unwrap_used, clippy::expect_used)]

use intraops_core::accounting::{
    AccountGroup, AccountGroupRepository, InMemoryPaymentTerms, PaymentTerm,
    PaymentTermRepository,
};
use intraops_core::errors::ExErrorKind;
use intraops_core::paging::ListOptions;
use intraops_store::{Database, SqliteAccountGroups, SqlitePaymentTerms};

fn setup_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.migrate().unwrap();
    db
}

fn group(number: &str, name: &str) -> AccountGroup {
    AccountGroup::new(number.to_string(), name.to_string(), None)
}

// ===== Account groups =====

#[test]
fn test_insert_and_get_account_group() {
    let repo = SqliteAccountGroups::new(setup_db());
    let mut g = group("4000", "Revenue");
    g.description = Some("Sales and services".to_string());
    repo.insert(&g).unwrap();

    let loaded = repo.get(&g.id).unwrap().expect("row exists");
    assert_eq!(loaded.number, "4000");
    assert_eq!(loaded.description.as_deref(), Some("Sales and services"));
    assert_eq!(
        loaded.created_at.timestamp_millis(),
        g.created_at.timestamp_millis()
    );

    assert!(repo.get("missing").unwrap().is_none());
    assert_eq!(repo.find_by_number("4000").unwrap().unwrap().id, g.id);
}

#[test]
fn test_duplicate_number_violates_constraint() {
    let repo = SqliteAccountGroups::new(setup_db());
    repo.insert(&group("1000", "Assets")).unwrap();

    let err = repo.insert(&group("1000", "Other")).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_update_and_delete_account_group() {
    let repo = SqliteAccountGroups::new(setup_db());
    let mut g = group("2000", "Liabilities");
    repo.insert(&g).unwrap();

    g.name = "Current liabilities".to_string();
    repo.update(&g).unwrap();
    assert_eq!(repo.get(&g.id).unwrap().unwrap().name, "Current liabilities");

    assert!(repo.delete(&g.id).unwrap());
    assert!(!repo.delete(&g.id).unwrap());

    let err = repo.update(&g).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_list_account_groups_keyset_pages() {
    let repo = SqliteAccountGroups::new(setup_db());
    for (number, name) in [
        ("3000", "Equity"),
        ("1000", "Assets"),
        ("5000", "Expenses"),
        ("2000", "Liabilities"),
        ("4000", "Revenue"),
    ] {
        repo.insert(&group(number, name)).unwrap();
    }

    let mut options = ListOptions {
        limit: Some(2),
        ..Default::default()
    };
    let first = repo.list(&options).unwrap();
    assert!(first.has_more);
    assert_eq!(
        first.items.iter().map(|g| g.number.as_str()).collect::<Vec<_>>(),
        vec!["1000", "2000"]
    );

    options.cursor = first.next_cursor;
    let second = repo.list(&options).unwrap();
    assert_eq!(
        second.items.iter().map(|g| g.number.as_str()).collect::<Vec<_>>(),
        vec!["3000", "4000"]
    );

    options.cursor = second.next_cursor;
    let last = repo.list(&options).unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_more);
    assert!(last.next_cursor.is_none());
}

#[test]
fn test_list_filters_by_name_case_insensitively() {
    let repo = SqliteAccountGroups::new(setup_db());
    repo.insert(&group("1000", "Current assets")).unwrap();
    repo.insert(&group("1500", "Fixed Assets")).unwrap();
    repo.insert(&group("2000", "Liabilities")).unwrap();

    let page = repo
        .list(&ListOptions {
            name_contains: Some("ASSETS".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(page.items.len(), 2);
}

#[test]
fn test_list_rejects_garbage_cursor() {
    let repo = SqliteAccountGroups::new(setup_db());
    let err = repo
        .list(&ListOptions {
            cursor: Some("%%%".to_string()),
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

// ===== Payment terms =====

#[test]
fn test_payment_term_round_trip() {
    let repo = SqlitePaymentTerms::new(setup_db());
    let term = PaymentTerm::new("2/10 net 30".to_string(), 30, 10, 200);
    repo.insert(&term).unwrap();

    let loaded = repo.find_by_name("2/10 net 30").unwrap().unwrap();
    assert_eq!(loaded.id, term.id);
    assert_eq!(loaded.days_until_due, 30);
    assert_eq!(loaded.discount_days, 10);
    assert_eq!(loaded.discount_basis_points, 200);
}

#[test]
fn test_schema_checks_guard_payment_terms() {
    let repo = SqlitePaymentTerms::new(setup_db());
    let invalid = PaymentTerm::new("Odd".to_string(), 10, 20, 0);

    let err = repo.insert(&invalid).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}

#[test]
fn test_list_payment_terms_by_name() {
    let repo = SqlitePaymentTerms::new(setup_db());
    for (name, days) in [("Net 60", 60), ("Net 30", 30), ("Cash", 0)] {
        repo.insert(&PaymentTerm::new(name.to_string(), days, 0, 0))
            .unwrap();
    }

    let page = repo.list(&ListOptions::default()).unwrap();
    let names: Vec<_> = page.items.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Cash", "Net 30", "Net 60"]);
}

#[test]
fn test_name_filter_matches_in_memory_repository() {
    let sqlite = SqlitePaymentTerms::new(setup_db());
    let memory = InMemoryPaymentTerms::new();
    for name in ["Ärzte netto", "Net 30", "NET 60", "Übernahme"] {
        let term = PaymentTerm::new(name.to_string(), 30, 0, 0);
        sqlite.insert(&term).unwrap();
        memory.insert(&term).unwrap();
    }

    let names = |repo: &dyn PaymentTermRepository, needle: &str| -> Vec<String> {
        repo.list(&ListOptions {
            name_contains: Some(needle.to_string()),
            ..Default::default()
        })
        .unwrap()
        .items
        .into_iter()
        .map(|t| t.name)
        .collect()
    };

    for needle in ["net", "ÄRZTE", "ärzte", "Ü", "ü"] {
        assert_eq!(
            names(&sqlite, needle),
            names(&memory, needle),
            "filter {:?}",
            needle
        );
    }
    assert_eq!(names(&sqlite, "ÄRZTE"), vec!["Ärzte netto".to_string()]);
    assert!(names(&sqlite, "ü").is_empty());
}
