use ldapdb::{err, Handle};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use tests::{models::Person, DbTest};

#[tokio::test]
async fn post_save_reports_created_flag() {
    let test = DbTest::new();
    let calls = Arc::new(Mutex::new(vec![]));

    let mut builder = test.builder();
    let seen = calls.clone();
    builder.on_post_save(move |signal| {
        let person = signal.record::<Person>().unwrap();
        seen.lock()
            .unwrap()
            .push((signal.dn.to_string(), person.cn.clone(), signal.created));
        Ok(())
    });
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    let mut grace = people.entry(Person::new("grace", "Grace"));
    grace.save(&db).await.unwrap();

    grace.cn = "Grace H".to_string();
    grace.save(&db).await.unwrap();

    // No changes still notifies
    grace.save(&db).await.unwrap();

    let dn = "uid=grace,ou=people,dc=example,dc=com".to_string();
    assert_eq!(
        *calls.lock().unwrap(),
        [
            (dn.clone(), "Grace".to_string(), true),
            (dn.clone(), "Grace H".to_string(), false),
            (dn, "Grace H".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn post_delete_runs_after_delete() {
    let test = DbTest::new();
    let calls = Arc::new(Mutex::new(vec![]));

    let mut builder = test.builder();
    let seen = calls.clone();
    builder.on_post_delete(move |signal| {
        seen.lock().unwrap().push(signal.dn.to_string());
        Ok(())
    });
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    let mut heidi = people.entry(Person::new("heidi", "Heidi"));
    heidi.save(&db).await.unwrap();
    assert!(calls.lock().unwrap().is_empty());

    heidi.delete(&db).await.unwrap();
    assert_eq!(
        *calls.lock().unwrap(),
        ["uid=heidi,ou=people,dc=example,dc=com"]
    );
}

#[tokio::test]
async fn failing_observer_does_not_unwind_save() {
    let test = DbTest::new();
    let calls = Arc::new(Mutex::new(0));

    let mut builder = test.builder();
    builder.on_post_save(|_| Err(err!("indexer unavailable")));
    let seen = calls.clone();
    builder.on_post_save(move |_| {
        *seen.lock().unwrap() += 1;
        Ok(())
    });
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    let mut ivan = people.entry(Person::new("ivan", "Ivan"));
    ivan.save(&db).await.unwrap();

    assert_eq!(ivan.dn(), "uid=ivan,ou=people,dc=example,dc=com");
    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(test
        .directory()
        .entry("uid=ivan,ou=people,dc=example,dc=com")
        .is_some());
}

#[tokio::test]
async fn failed_save_does_not_notify() {
    let test = DbTest::new();
    let calls = Arc::new(Mutex::new(0));

    let mut builder = test.builder();
    let seen = calls.clone();
    builder.on_post_save(move |_| {
        *seen.lock().unwrap() += 1;
        Ok(())
    });
    let db = test.build(builder);

    test.fail_when(|_| true);

    let people = Handle::<Person>::new().unwrap();
    let mut judy = people.entry(Person::new("judy", "Judy"));
    assert!(judy.save(&db).await.is_err());
    assert_eq!(*calls.lock().unwrap(), 0);
}
