use std::fmt::Write;

use time::format_description::well_known::Rfc3339;

use super::escape;
use crate::{
    error::{Error, Result},
    value::Value,
};

/// A bind argument rendered for T-SQL: the declared parameter type and the
/// literal text, already escaped and quoted where applicable.
pub(crate) struct Literal {
    pub(crate) sql_type: String,
    pub(crate) text: String,
}

impl Literal {
    fn new(sql_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            text: text.into(),
        }
    }

    fn null(sql_type: &str) -> Self {
        Self::new(sql_type, "NULL")
    }
}

/// Maps one bind argument to its `(declared type, literal)` pair.
///
/// Numeric widths are preserved exactly (an `i8` is declared `tinyint`,
/// never widened): the declared type participates in the server's implicit
/// conversion and truncation rules. NULL-valued text/binary arguments
/// declare length 1; the server rejects zero-length declarations.
pub(crate) fn literal(value: &Value) -> Result<Literal> {
    Ok(match value {
        Value::Null => Literal::null("nvarchar (1)"),
        Value::Bool(None) => Literal::null("bit"),
        Value::Bool(Some(v)) => Literal::new("bit", if *v { "1" } else { "0" }),
        Value::I8(None) | Value::U8(None) => Literal::null("tinyint"),
        Value::I8(Some(v)) => Literal::new("tinyint", v.to_string()),
        Value::U8(Some(v)) => Literal::new("tinyint", v.to_string()),
        Value::I16(None) | Value::U16(None) => Literal::null("smallint"),
        Value::I16(Some(v)) => Literal::new("smallint", v.to_string()),
        Value::U16(Some(v)) => Literal::new("smallint", v.to_string()),
        Value::I32(None) | Value::U32(None) => Literal::null("int"),
        Value::I32(Some(v)) => Literal::new("int", v.to_string()),
        Value::U32(Some(v)) => Literal::new("int", v.to_string()),
        Value::I64(None) | Value::U64(None) => Literal::null("bigint"),
        Value::I64(Some(v)) => Literal::new("bigint", v.to_string()),
        Value::U64(Some(v)) => Literal::new("bigint", v.to_string()),
        Value::F32(None) | Value::F64(None) => Literal::null("real"),
        Value::F32(Some(v)) => Literal::new("real", v.to_string()),
        Value::F64(Some(v)) => Literal::new("real", v.to_string()),
        Value::Text(None) => Literal::null("nvarchar (1)"),
        Value::Text(Some(s)) => Literal::new(
            format!("nvarchar ({})", s.len().max(1)),
            format!("'{}'", escape::double_quotes(s)),
        ),
        Value::Bytes(None) => Literal::null("varbinary(1)"),
        Value::Bytes(Some(b)) => {
            Literal::new(format!("varbinary({})", b.len().max(1)), hex_literal(b))
        }
        Value::Timestamp(None) => Literal::null("datetimeoffset"),
        Value::Timestamp(Some(ts)) => {
            let rendered = ts
                .format(&Rfc3339)
                .map_err(|err| Error::Encoding(Box::new(err)))?;
            Literal::new(
                "datetimeoffset",
                format!("'{}'", escape::double_quotes(&rendered)),
            )
        }
    })
}

fn hex_literal(bytes: &[u8]) -> String {
    bytes.iter().fold(String::from("0x"), |mut out, byte| {
        let _ = write!(out, "{byte:02x}");
        out
    })
}
