use ldapdb::{schema, ConnectionConfig, Handle, Router};
use pretty_assertions::assert_eq;
use tests::{models::Person, DbTest};

fn with_credentials(bind_dn: &str) -> ConnectionConfig {
    tests::config().with_credentials(bind_dn, "secret")
}

#[tokio::test]
async fn default_alias_is_used_without_routing() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    people
        .entry(Person::new("mia", "Mia"))
        .save(&db)
        .await
        .unwrap();

    assert_eq!(test.log().pop_op().unwrap().bind_dn, None);
}

#[tokio::test]
async fn router_picks_alias() {
    let test = DbTest::new();

    let mut builder = test.builder();
    builder
        .connection("writer", with_credentials("cn=writer,dc=example,dc=com"))
        .router(|model: &schema::Model| (model.name == "Person").then(|| "writer".to_string()));
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    people
        .entry(Person::new("mia", "Mia"))
        .save(&db)
        .await
        .unwrap();

    assert_eq!(
        test.log().pop_op().unwrap().bind_dn.as_deref(),
        Some("cn=writer,dc=example,dc=com")
    );
}

#[derive(Debug)]
struct ReadReplica;

impl Router for ReadReplica {
    fn db_for_read(&self, _model: &schema::Model) -> Option<String> {
        Some("replica".to_string())
    }
}

#[tokio::test]
async fn reads_and_writes_route_separately() {
    let test = DbTest::new();

    let mut builder = test.builder();
    builder
        .connection("replica", with_credentials("cn=replica,dc=example,dc=com"))
        .router(ReadReplica);
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    people
        .entry(Person::new("noah", "Noah"))
        .save(&db)
        .await
        .unwrap();
    people.get(&db, "noah").await.unwrap();

    let mut log = test.log();
    assert_eq!(log.pop_op().unwrap().bind_dn, None);
    assert_eq!(
        log.pop_op().unwrap().bind_dn.as_deref(),
        Some("cn=replica,dc=example,dc=com")
    );
}

#[tokio::test]
async fn save_using_overrides_routing() {
    let test = DbTest::new();

    let mut builder = test.builder();
    builder.connection("admin", with_credentials("cn=admin,dc=example,dc=com"));
    let db = test.build(builder);

    let people = Handle::<Person>::new().unwrap();
    let mut olga = people.entry(Person::new("olga", "Olga"));
    olga.save_using(&db, "admin").await.unwrap();
    olga.delete_using(&db, "admin").await.unwrap();

    let mut log = test.log();
    for _ in 0..2 {
        assert_eq!(
            log.pop_op().unwrap().bind_dn.as_deref(),
            Some("cn=admin,dc=example,dc=com")
        );
    }
    assert!(log.is_empty());
}

#[tokio::test]
async fn unknown_alias_fails() {
    let test = DbTest::new();
    let db = test.setup_db();
    let people = Handle::<Person>::new().unwrap();

    let mut pat = people.entry(Person::new("pat", "Pat"));
    let err = pat.save_using(&db, "missing").await.unwrap_err();

    assert!(err.is_invalid_connection_config());
    assert_eq!(pat.dn(), "");
}

#[tokio::test]
async fn connect_selects_driver_by_scheme() {
    let mut builder = ldapdb::Db::builder();
    builder
        .connection("default", tests::config())
        .connection("other", ConnectionConfig::new("memory://other").unwrap());
    let db = builder.connect();

    let people = Handle::<Person>::new().unwrap();
    people
        .entry(Person::new("quinn", "Quinn"))
        .save(&db)
        .await
        .unwrap();

    // Every `memory://` alias of one `Db` sees the same tree
    let quinn = people
        .bind_as(&db, "other", Some("cn=other"), None, &ldapdb::Keys::new())
        .unwrap()
        .get(&db, "quinn")
        .await
        .unwrap();
    assert_eq!(quinn.dn(), "uid=quinn,ou=people,dc=example,dc=com");
}

#[tokio::test]
async fn unsupported_scheme_fails_on_first_use() {
    let mut builder = ldapdb::Db::builder();
    builder.connection("default", ConnectionConfig::new("mysql://localhost").unwrap());
    let db = builder.connect();

    let people = Handle::<Person>::new().unwrap();
    let err = people.get(&db, "anyone").await.unwrap_err();
    assert!(err.is_invalid_connection_config());
}
