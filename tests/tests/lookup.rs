use ldapdb::{
    driver::{operation::FindByKey, Operation},
    Handle, SearchScope,
};
use pretty_assertions::assert_eq;
use tests::{
    models::{Group, Person, Service},
    DbTest,
};

#[tokio::test]
async fn get_loads_mapped_fields() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    people
        .entry(Person {
            mail: Some("kim@example.com".to_string()),
            uid_number: Some(1002),
            notes: "local".to_string(),
            ..Person::new("kim", "Kim")
        })
        .save(&db)
        .await
        .unwrap();
    test.log().clear();

    let kim = people.get(&db, "kim").await.unwrap();

    assert_eq!(kim.dn(), "uid=kim,ou=people,dc=example,dc=com");
    assert_eq!(
        *kim,
        Person {
            mail: Some("kim@example.com".to_string()),
            uid_number: Some(1002),
            ..Person::new("kim", "Kim")
        }
    );

    let (operation, _) = test.log().pop().unwrap();
    assert_eq!(
        operation,
        Operation::FindByKey(FindByKey {
            base_dn: "ou=people,dc=example,dc=com".to_string(),
            scope: SearchScope::Subtree,
            object_classes: vec![
                "top".to_string(),
                "person".to_string(),
                "inetOrgPerson".to_string(),
            ],
            attribute: "uid".to_string(),
            value: b"kim".to_vec(),
            attributes: vec![
                "uid".to_string(),
                "cn".to_string(),
                "mail".to_string(),
                "uidNumber".to_string(),
            ],
        })
    );
}

#[tokio::test]
async fn missing_entry() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    let err = people.get(&db, "nobody").await.unwrap_err();
    assert!(err.is_record_not_found());

    assert!(people.find(&db, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn search_scope_limits_lookup() {
    let test = DbTest::new();
    let db = test.setup_db();
    let groups = Handle::<Group>::new().unwrap();

    groups
        .scoped("ou=nested,ou=groups,dc=example,dc=com")
        .entry(Group {
            cn: "deep".to_string(),
            gid_number: 20,
            members: vec![],
        })
        .save(&db)
        .await
        .unwrap();

    // Groups search one level below their base
    assert!(groups.find(&db, "deep").await.unwrap().is_none());

    let deep = groups
        .scoped("ou=nested,ou=groups,dc=example,dc=com")
        .get(&db, "deep")
        .await
        .unwrap();
    assert_eq!(deep.gid_number, 20);
    assert!(deep.members.is_empty());
}

#[tokio::test]
async fn lookup_matches_object_classes() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();
    let services = Handle::<Service>::new().unwrap();

    people
        .entry(Person::new("alice", "Alice"))
        .save(&db)
        .await
        .unwrap();
    let mut svc = services.entry(Service {
        uid: "alice".to_string(),
        description: None,
    });
    svc.save(&db).await.unwrap();

    // The person entry is below the service base too
    let found = services.get(&db, "alice").await.unwrap();
    assert_eq!(found.dn(), "uid=alice,dc=example,dc=com");

    let alice = people.get(&db, "alice").await.unwrap();
    assert_eq!(alice.dn(), "uid=alice,ou=people,dc=example,dc=com");

    // Updates read back the right entry
    svc.save(&db).await.unwrap();
    svc.description = Some("mail relay".to_string());
    svc.save(&db).await.unwrap();

    let entry = test.directory().entry("uid=alice,dc=example,dc=com").unwrap();
    assert_eq!(
        entry.get("description"),
        Some(&vec![b"mail relay".to_vec()])
    );
    assert!(test
        .directory()
        .entry("uid=alice,ou=people,dc=example,dc=com")
        .unwrap()
        .get("description")
        .is_none());
}

#[tokio::test]
async fn unbind_drops_connection_until_next_use() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    people
        .entry(Person::new("leo", "Leo"))
        .save(&db)
        .await
        .unwrap();
    assert!(db.registry().is_connected("default"));

    db.unbind("default").await.unwrap();
    assert!(!db.registry().is_connected("default"));

    // Reconnects on demand
    let leo = people.get(&db, "leo").await.unwrap();
    assert_eq!(leo.cn, "Leo");
}
