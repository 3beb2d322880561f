//! End-to-end properties of seeding and verification on one database.

use std::sync::Arc;

use userauth_core::{sha256_hex, CredentialStore, Seeder};

struct Fixture {
    _dir: tempfile::TempDir,
    store: CredentialStore,
    seeder: Seeder,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.db");
    let store = CredentialStore::open(&path, false).unwrap();
    let seeder = Seeder::new(path, false);
    Fixture {
        _dir: dir,
        store,
        seeder,
    }
}

#[test]
fn every_seeded_user_verifies_with_increasing_ids() {
    let fx = fixture();
    fx.seeder.seed(25).unwrap();

    let mut last_id = 0;
    for i in 1..=25 {
        let mail = format!("user{i}@example.com");
        let digest = sha256_hex(&format!("password{i}"));
        let id = fx
            .store
            .lookup(&mail, &digest)
            .unwrap()
            .unwrap_or_else(|| panic!("user {i} did not verify"));
        assert!(id > last_id, "ids must increase with i");
        last_id = id;
    }
}

#[test]
fn wrong_digest_never_matches() {
    let fx = fixture();
    fx.seeder.seed(5).unwrap();

    for i in 1..=5 {
        let mail = format!("user{i}@example.com");
        let wrong = sha256_hex(&format!("not-password{i}"));
        assert_eq!(fx.store.lookup(&mail, &wrong).unwrap(), None);
    }
}

#[test]
fn lookup_scenario_after_seed_three() {
    let fx = fixture();
    fx.seeder.seed(3).unwrap();

    // Fresh table: ids are assigned 1..=3 in seed order.
    let id = fx
        .store
        .lookup("user2@example.com", &sha256_hex("password2"))
        .unwrap();
    assert_eq!(id, Some(2));

    let miss = fx
        .store
        .lookup("user2@example.com", &sha256_hex("wrongpass"))
        .unwrap();
    assert_eq!(miss, None);

    let miss = fx
        .store
        .lookup("nouser@example.com", &sha256_hex("password1"))
        .unwrap();
    assert_eq!(miss, None);
}

#[test]
fn reseeding_replaces_rather_than_appends() {
    let fx = fixture();
    fx.seeder.seed(10).unwrap();
    fx.seeder.seed(10).unwrap();

    // Row count is idempotent across runs.
    for i in 1..=10 {
        let mail = format!("user{i}@example.com");
        let digest = sha256_hex(&format!("password{i}"));
        assert!(fx.store.lookup(&mail, &digest).unwrap().is_some());
    }
    assert_eq!(
        fx.store.lookup("user11@example.com", &sha256_hex("password11")).unwrap(),
        None
    );

    // AUTOINCREMENT: identities from the second run are fresh, never reused.
    let id = fx
        .store
        .lookup("user1@example.com", &sha256_hex("password1"))
        .unwrap()
        .unwrap();
    assert!(id > 10);
}

#[test]
fn concurrent_lookups_share_the_store() {
    let fx = fixture();
    fx.seeder.seed(50).unwrap();
    let store = Arc::new(fx.store);

    std::thread::scope(|scope| {
        for t in 0..8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 1..=50 {
                    let mail = format!("user{i}@example.com");
                    let digest = sha256_hex(&format!("password{i}"));
                    let id = store.lookup(&mail, &digest).unwrap();
                    assert!(id.is_some(), "thread {t}: user {i} missing");
                }
            });
        }
    });
}
