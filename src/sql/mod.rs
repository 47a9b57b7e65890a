use crate::{
    dialect::Capabilities,
    error::{Error, Result},
    value::Value,
};

mod encode;
pub(crate) mod escape;
mod rewrite;
pub(crate) mod ser;

/// Trailing batch statement retrieving the identity value and affected-row
/// count from the same round trip.
const STATUS_ROW: &str = ";
   select cast(coalesce(scope_identity(), -1) as bigint) last_insert_id,
          cast(@@rowcount as bigint) rows_affected
";

/// Older servers lack `scope_identity()` and `bigint` casts in this
/// position; `@@IDENTITY` leaks identity values from triggers, but it is
/// all those servers offer.
const STATUS_ROW_SESSION_IDENTITY: &str = ";
   select cast(coalesce(@@IDENTITY, -1) as int) last_insert_id,
          cast(@@rowcount as int) rows_affected
";

/// Builds one executable command for the connection's dialect.
///
/// Argument-count and encodability checks run before any assembly, so an
/// error here guarantees nothing was handed to the connection.
pub(crate) fn build(caps: Capabilities, query: &str, args: &[Value]) -> Result<String> {
    if caps.parameterized {
        parameterized(caps, query, args)
    } else {
        substituted(query, args)
    }
}

/// `exec sp_executesql N'<template><status>', N'<declarations>', <assignments>`.
///
/// With zero parameters the declaration/assignment arguments are omitted
/// entirely; the server rejects empty type-declaration strings.
fn parameterized(caps: Capabilities, query: &str, args: &[Value]) -> Result<String> {
    let (template, expected) = rewrite::bind_names(query);
    check_count(expected, args.len())?;
    let literals = encode_all(args)?;

    let status = if caps.scope_identity {
        STATUS_ROW
    } else {
        STATUS_ROW_SESSION_IDENTITY
    };

    if literals.is_empty() {
        return Ok(format!("exec sp_executesql N'{template}{status}'"));
    }

    let declarations = literals
        .iter()
        .enumerate()
        .map(|(i, literal)| format!("@p{} {}", i + 1, literal.sql_type))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = literals
        .iter()
        .enumerate()
        .map(|(i, literal)| format!("@p{}={}", i + 1, literal.text))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "exec sp_executesql N'{template}{status}', N'{declarations}', {assignments}"
    ))
}

/// Pre-rendered command for servers without server-side parameterization:
/// each `?` is replaced, left to right, with the argument's encoded
/// literal. No status row; see [`Capabilities::ensure_status_row`].
fn substituted(query: &str, args: &[Value]) -> Result<String> {
    let (_, expected) = rewrite::bind_names(query);
    check_count(expected, args.len())?;

    if args.is_empty() {
        return Ok(query.to_owned());
    }

    let literals = encode_all(args)?;

    let mut iter = query.split('?');
    let mut command = String::with_capacity(query.len());
    command.push_str(iter.next().unwrap());

    for (literal, part) in literals.iter().zip(iter) {
        command.push_str(&literal.text);
        command.push_str(part);
    }

    Ok(command)
}

fn check_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::ArgumentCountMismatch { expected, actual });
    }

    Ok(())
}

fn encode_all(args: &[Value]) -> Result<Vec<encode::Literal>> {
    args.iter().map(encode::literal).collect()
}
