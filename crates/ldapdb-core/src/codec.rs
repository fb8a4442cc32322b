//! Conversion between field values and attribute values on the wire.
//!
//! The field's declared [`FieldTy`] picks the syntax. Encoding an empty
//! value yields no attribute values at all; the synchronizer never sends
//! those.

use crate::{
    schema::{Field, FieldTy},
    Error, Result, Value,
};

/// Encodes `value` as the attribute values of `field`.
pub fn encode(field: &Field, value: &Value) -> Result<Vec<Vec<u8>>> {
    if value.is_null() {
        return Ok(vec![]);
    }

    match field.ty {
        FieldTy::List => match value {
            Value::List(values) => values.iter().map(encode_string).collect(),
            value => Ok(vec![encode_string(value)?]),
        },
        FieldTy::String => Ok(vec![encode_string(value)?]),
        FieldTy::Integer => match value {
            Value::I64(value) => Ok(vec![value.to_string().into_bytes()]),
            _ => Err(Error::type_conversion(value.clone(), "INTEGER")),
        },
        FieldTy::Boolean => match value {
            Value::Bool(true) => Ok(vec![b"TRUE".to_vec()]),
            Value::Bool(false) => Ok(vec![b"FALSE".to_vec()]),
            _ => Err(Error::type_conversion(value.clone(), "BOOLEAN")),
        },
        FieldTy::Binary => match value {
            Value::Bytes(value) => Ok(vec![value.clone()]),
            _ => Err(Error::type_conversion(value.clone(), "binary")),
        },
    }
}

/// Decodes the attribute values read for `field`.
///
/// An absent attribute decodes to [`Value::Null`]. Single-valued fields keep
/// the first value when the directory returns several.
pub fn decode(field: &Field, mut values: Vec<Vec<u8>>) -> Result<Value> {
    if field.ty == FieldTy::List {
        return values
            .into_iter()
            .map(decode_string)
            .collect::<Result<Vec<_>>>()
            .map(Value::List);
    }

    if values.is_empty() {
        return Ok(Value::Null);
    }
    let raw = values.swap_remove(0);

    match field.ty {
        FieldTy::String => decode_string(raw),
        FieldTy::Integer => {
            let text = String::from_utf8_lossy(&raw);
            text.trim()
                .parse::<i64>()
                .map(Value::I64)
                .map_err(|_| Error::type_conversion(Value::String(text.into_owned()), "i64"))
        }
        FieldTy::Boolean => match &raw[..] {
            b"TRUE" | b"true" => Ok(Value::Bool(true)),
            b"FALSE" | b"false" => Ok(Value::Bool(false)),
            _ => Err(Error::type_conversion(Value::Bytes(raw), "bool")),
        },
        FieldTy::Binary => Ok(Value::Bytes(raw)),
        FieldTy::List => unreachable!(),
    }
}

fn encode_string(value: &Value) -> Result<Vec<u8>> {
    match value {
        Value::String(value) => Ok(value.as_bytes().to_vec()),
        Value::I64(value) => Ok(value.to_string().into_bytes()),
        _ => Err(Error::type_conversion(value.clone(), "directory string")),
    }
}

fn decode_string(raw: Vec<u8>) -> Result<Value> {
    String::from_utf8(raw)
        .map(Value::String)
        .map_err(|err| Error::type_conversion(Value::Bytes(err.into_bytes()), "String"))
}
