use crate::error::{Error, Result};

/// Protocol capabilities of a live connection.
///
/// Resolved once at connect time by interrogating the server version and
/// read-only afterwards; every command built on the connection is shaped by
/// this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the server supports server-side parameterized execution via
    /// `sp_executesql`. When `false`, arguments are substituted into the
    /// query text as pre-rendered literals.
    pub parameterized: bool,
    /// Whether `scope_identity()` and `bigint` casts are available for the
    /// trailing status row. Ignored when `parameterized` is `false`.
    pub scope_identity: bool,
}

impl Capabilities {
    /// Modern SQL Server.
    pub const fn sql_server() -> Self {
        Self {
            parameterized: true,
            scope_identity: true,
        }
    }

    /// Sybase ASE 12.5: no server-side parameterization and no way to read
    /// the identity value and affected-row count in the same round trip.
    pub const fn sybase_12_5() -> Self {
        Self {
            parameterized: false,
            scope_identity: false,
        }
    }

    /// Checks that commands built for this connection carry the trailing
    /// status row with `last_insert_id` and `rows_affected`.
    ///
    /// Callers that need either value must call this first: on the
    /// literal-substitution dialect the status row cannot be retrieved, and
    /// that is reported as [`Error::UnsupportedOperation`] instead of a
    /// wrong or stale value.
    pub fn ensure_status_row(self) -> Result<()> {
        if self.parameterized {
            Ok(())
        } else {
            Err(Error::UnsupportedOperation(
                "identity and rows-affected retrieval",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reports_status_row_support() {
        assert!(Capabilities::sql_server().ensure_status_row().is_ok());
        assert!(matches!(
            Capabilities::sybase_12_5().ensure_status_row(),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
