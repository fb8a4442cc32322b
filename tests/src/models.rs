//! Model fixtures shared by the integration tests.

use ldapdb::{schema, Field, FieldTy, Model, Result, Value, ValueRecord};

pub const PEOPLE: &str = "ou=people,dc=example,dc=com";
pub const GROUPS: &str = "ou=groups,dc=example,dc=com";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub uid: String,
    pub cn: String,
    pub mail: Option<String>,
    pub uid_number: Option<i64>,

    /// Never stored in the directory
    pub notes: String,
}

impl Person {
    pub fn new(uid: &str, cn: &str) -> Person {
        Person {
            uid: uid.to_string(),
            cn: cn.to_string(),
            ..Person::default()
        }
    }
}

impl Model for Person {
    fn schema() -> schema::ModelBuilder {
        schema::Model::builder("Person")
            .base_dn(PEOPLE)
            .object_classes(["top", "person", "inetOrgPerson"])
            .field(Field::new("uid", FieldTy::String).primary_key())
            .field(Field::new("cn", FieldTy::String))
            .field(Field::new("mail", FieldTy::String))
            .field(Field::new("uid_number", FieldTy::Integer).attribute("uidNumber"))
            .field(Field::local("notes", FieldTy::String))
    }

    fn get(&self, index: usize) -> Value {
        match index {
            0 => Value::from(&self.uid),
            1 => Value::from(&self.cn),
            2 => Value::from(self.mail.clone()),
            3 => Value::from(self.uid_number),
            4 => Value::from(&self.notes),
            _ => Value::Null,
        }
    }

    fn load(mut record: ValueRecord) -> Result<Self> {
        Ok(Person {
            uid: record.take(0)?,
            cn: record.take(1)?,
            mail: record.take(2)?,
            uid_number: record.take(3)?,
            notes: record.take(4)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub cn: String,
    pub gid_number: i64,
    pub members: Vec<String>,
}

impl Model for Group {
    fn schema() -> schema::ModelBuilder {
        schema::Model::builder("Group")
            .base_dn(GROUPS)
            .object_classes(["top", "posixGroup"])
            .search_scope(ldapdb::SearchScope::OneLevel)
            .field(Field::new("cn", FieldTy::String).primary_key())
            .field(Field::new("gid_number", FieldTy::Integer).attribute("gidNumber"))
            .field(Field::new("members", FieldTy::List).attribute("memberUid"))
    }

    fn get(&self, index: usize) -> Value {
        match index {
            0 => Value::from(&self.cn),
            1 => Value::from(self.gid_number),
            2 => Value::from(self.members.clone()),
            _ => Value::Null,
        }
    }

    fn load(mut record: ValueRecord) -> Result<Self> {
        Ok(Group {
            cn: record.take(0)?,
            gid_number: record.take(1)?,
            members: record.take(2)?,
        })
    }
}

/// Service accounts live above `ou=people` and share the `uid` key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    pub uid: String,
    pub description: Option<String>,
}

impl Model for Service {
    fn schema() -> schema::ModelBuilder {
        schema::Model::builder("Service")
            .base_dn("dc=example,dc=com")
            .object_classes(["top", "account"])
            .field(Field::new("uid", FieldTy::String).primary_key())
            .field(Field::new("description", FieldTy::String))
    }

    fn get(&self, index: usize) -> Value {
        match index {
            0 => Value::from(&self.uid),
            1 => Value::from(self.description.clone()),
            _ => Value::Null,
        }
    }

    fn load(mut record: ValueRecord) -> Result<Self> {
        Ok(Service {
            uid: record.take(0)?,
            description: record.take(1)?,
        })
    }
}
