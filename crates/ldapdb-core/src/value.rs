use crate::{Error, Result};

/// A decoded field value.
///
/// Values are what models hand to the synchronizer and what the codec
/// produces when reading an entry back. Change detection compares values,
/// never their wire encoding.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// The field has no value. Absent attributes decode to `Null`.
    #[default]
    Null,

    Bool(bool),

    I64(i64),

    String(String),

    /// Raw octets, for binary attributes such as `jpegPhoto`.
    Bytes(Vec<u8>),

    /// A multi-valued attribute.
    List(Vec<Value>),
}

impl Value {
    /// Name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::I64(_) => "I64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` when the value must not be written to the directory.
    ///
    /// `Null`, the empty string, empty octets and the empty list are empty.
    /// `0` and `false` are values.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(value) => value.is_empty(),
            Value::Bytes(value) => value.is_empty(),
            Value::List(values) => values.is_empty(),
            Value::Bool(_) | Value::I64(_) => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I64(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::List(values.into_iter().map(Value::String).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Value::List(values.into_iter().map(Value::from).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(value) => Ok(value),
            Value::Null => Ok(String::new()),
            _ => Err(Error::type_conversion(value, "String")),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::I64(value) => Ok(value),
            _ => Err(Error::type_conversion(value, "i64")),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(value) => Ok(value),
            _ => Err(Error::type_conversion(value, "bool")),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(value) => Ok(value),
            Value::Null => Ok(Vec::new()),
            _ => Err(Error::type_conversion(value, "Vec<u8>")),
        }
    }
}

impl TryFrom<Value> for Vec<String> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::List(values) => values.into_iter().map(String::try_from).collect(),
            Value::Null => Ok(Vec::new()),
            _ => Err(Error::type_conversion(value, "Vec<String>")),
        }
    }
}

impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = Error>,
{
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::try_from(value).map(Some),
        }
    }
}

/// Decoded field values of one entry, in schema declaration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValueRecord {
    fields: Vec<Value>,
}

impl ValueRecord {
    pub fn from_vec(fields: Vec<Value>) -> ValueRecord {
        ValueRecord { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> &Value {
        &self.fields[index]
    }

    /// Moves the value at `index` out of the record and converts it.
    #[track_caller]
    pub fn take<T>(&mut self, index: usize) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(std::mem::take(&mut self.fields[index]))
    }
}

impl FromIterator<Value> for ValueRecord {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ValueRecord::from_vec(iter.into_iter().collect())
    }
}
