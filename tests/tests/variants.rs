use ldapdb::{driver::Operation, Handle, Keys, Registered};
use pretty_assertions::assert_eq;
use tests::{models::Person, DbTest};

#[tokio::test]
async fn scoped_handle_creates_and_reads_under_its_base() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();
    let staff = people.scoped("ou=staff,dc=example,dc=com");

    let mut bob = staff.entry(Person::new("bob", "Bob"));
    bob.save(&db).await.unwrap();
    assert_eq!(bob.dn(), "uid=bob,ou=staff,dc=example,dc=com");

    let loaded = staff.get(&db, "bob").await.unwrap();
    assert_eq!(loaded.dn(), "uid=bob,ou=staff,dc=example,dc=com");
    assert_eq!(loaded.variant(), staff.variant());

    // Not below the unscoped base
    assert!(people.find(&db, "bob").await.unwrap().is_none());
}

#[tokio::test]
async fn bind_as_copies_base_connection_with_new_credentials() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    let as_alice = people
        .bind_as(&db, "alice", None, Some("secret"), &Keys::new().with("uid", "alice"))
        .unwrap();
    assert_eq!(as_alice.variant().bound_alias.as_deref(), Some("alice"));
    assert_eq!(people.variant().bound_alias, None);

    let config = db.registry().config("alice").unwrap();
    assert_eq!(config.url, tests::config().url);
    assert_eq!(
        config.bind_dn.as_deref(),
        Some("uid=alice,ou=people,dc=example,dc=com")
    );
    assert_eq!(config.password.as_deref(), Some("secret"));

    // The base alias is untouched
    assert_eq!(db.registry().config("default").unwrap().bind_dn, None);

    // Writes go through the bound connection
    let mut frank = as_alice.entry(Person::new("frank", "Frank"));
    frank.save(&db).await.unwrap();

    let op = test.log().pop_op().unwrap();
    assert!(matches!(op.operation, Operation::AddEntry(_)));
    assert_eq!(
        op.bind_dn.as_deref(),
        Some("uid=alice,ou=people,dc=example,dc=com")
    );
}

#[tokio::test]
async fn bind_as_explicit_dn_and_empty_password() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    people
        .bind_as(&db, "admin", Some("cn=admin,dc=example,dc=com"), None, &Keys::new())
        .unwrap();

    let config = db.registry().config("admin").unwrap();
    assert_eq!(config.bind_dn.as_deref(), Some("cn=admin,dc=example,dc=com"));
    assert_eq!(config.password.as_deref(), Some(""));
}

#[tokio::test]
async fn bind_as_reuses_registered_alias() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();
    let keys = Keys::new().with("uid", "alice");

    people.bind_as(&db, "alice", None, Some("secret"), &keys).unwrap();
    people.bind_as(&db, "alice", None, Some("secret"), &keys).unwrap();
    assert_eq!(db.registry().aliases(), ["default", "alice"]);

    // Binding again with an identical config is a no-op
    let config = db.registry().config("alice").unwrap();
    assert_eq!(db.registry().register("alice", config), Registered::Reused);

    // A new password replaces the config in place
    people.bind_as(&db, "alice", None, Some("changed"), &keys).unwrap();
    let config = db.registry().config("alice").unwrap();
    assert_eq!(config.password.as_deref(), Some("changed"));
    assert_eq!(db.registry().aliases(), ["default", "alice"]);
}

#[tokio::test]
async fn bind_as_without_keys_is_an_identity_error() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    let err = people
        .bind_as(&db, "nobody", None, None, &Keys::new())
        .unwrap_err();

    assert!(err.is_identity());
    assert!(!db.registry().contains("nobody"));
}

#[tokio::test]
async fn bound_and_scoped_variants_compose() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    let handle = people
        .scoped("ou=staff,dc=example,dc=com")
        .bind_as(&db, "bob", None, None, &Keys::new().with("uid", "bob"))
        .unwrap();

    assert_eq!(handle.base_dn(), "ou=staff,dc=example,dc=com");
    assert_eq!(
        db.registry().config("bob").unwrap().bind_dn.as_deref(),
        Some("uid=bob,ou=staff,dc=example,dc=com")
    );
}
