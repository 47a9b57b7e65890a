use std::error::Error as StdError;

use tracing::{debug, trace};

use crate::{
    dialect::Capabilities,
    error::{Error, Result},
    sql,
    value::Value,
};

/// The external execution collaborator: a live connection able to run one
/// opaque command string.
///
/// Everything else about the connection — transport, pooling, transaction
/// boundaries, result-set decoding — lives behind this trait. The engine
/// relies on one convention only: on a [parameterized](Capabilities)
/// connection, the built command ends with a trailing `select` whose single
/// row is readable as two `bigint` columns, `last_insert_id` and
/// `rows_affected`.
pub trait Executor {
    /// Whatever the connection yields for a completed round trip, typically
    /// an ordered sequence of result sets.
    type Rows;

    /// Protocol capabilities negotiated at connect time. Read-only for the
    /// lifetime of the connection.
    fn capabilities(&self) -> Capabilities;

    /// Runs one command verbatim.
    fn run(
        &mut self,
        command: &str,
    ) -> std::result::Result<Self::Rows, Box<dyn StdError + Send + Sync>>;
}

/// Builds a dialect-correct command for `query` and `args` and runs it on
/// `conn`.
///
/// Every `?` in `query` is a positional placeholder; the argument list must
/// match exactly, and a mismatch fails with
/// [`Error::ArgumentCountMismatch`] before the connection is touched.
/// Connection failures are surfaced unchanged as [`Error::Collaborator`]
/// and never retried here.
///
/// The fully rendered command embeds bound values, so it is logged only at
/// `TRACE` level under the dedicated `tds_bind::sql` target; enable that
/// target explicitly to see it.
pub fn execute<E: Executor>(conn: &mut E, query: &str, args: &[Value]) -> Result<E::Rows> {
    let caps = conn.capabilities();
    let command = sql::build(caps, query, args)?;

    debug!(
        args = args.len(),
        parameterized = caps.parameterized,
        command_len = command.len(),
        "executing"
    );
    trace!(target: "tds_bind::sql", %command, "assembled command");

    conn.run(&command).map_err(Error::Collaborator)
}
