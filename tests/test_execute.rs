use std::error::Error as StdError;

use serde::Serialize;

use tds_bind::{Capabilities, Error, Executor, Value, execute};

/// Records every command handed over by the engine instead of talking to a
/// server.
struct Recording {
    caps: Capabilities,
    commands: Vec<String>,
}

impl Recording {
    fn new(caps: Capabilities) -> Self {
        Self {
            caps,
            commands: Vec::new(),
        }
    }
}

impl Executor for Recording {
    type Rows = ();

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn run(&mut self, command: &str) -> Result<(), Box<dyn StdError + Send + Sync>> {
        self.commands.push(command.to_owned());
        Ok(())
    }
}

/// Fails every round trip, as a lost connection would.
struct Failing;

impl Executor for Failing {
    type Rows = ();

    fn capabilities(&self) -> Capabilities {
        Capabilities::sql_server()
    }

    fn run(&mut self, _command: &str) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Err("connection reset".into())
    }
}

#[test]
fn it_executes_parameterized_commands() {
    let mut conn = Recording::new(Capabilities::sql_server());

    execute(
        &mut conn,
        "select * from authors where au_fname = ? and age > ?",
        &[Value::from("John"), Value::from(30)],
    )
    .unwrap();

    let command = &conn.commands[0];
    assert!(command.starts_with(
        "exec sp_executesql N'select * from authors where au_fname = @p1 and age > @p2"
    ));
    assert!(command.contains("scope_identity()"));
    assert!(command.contains("cast(@@rowcount as bigint) rows_affected"));
    assert!(command.ends_with("N'@p1 nvarchar (4), @p2 int', @p1='John', @p2=30"));
}

#[test]
fn it_omits_parameter_arguments_for_placeholder_free_queries() {
    let mut conn = Recording::new(Capabilities::sql_server());

    execute(&mut conn, "select count(*) from authors", &[]).unwrap();

    let command = &conn.commands[0];
    assert!(command.starts_with("exec sp_executesql N'select count(*) from authors"));
    assert!(command.ends_with("'"));
    // No declaration/assignment arguments at all, not empty strings.
    assert!(!command.contains(", N'"));
    assert!(!command.contains("N''"));
}

#[test]
fn it_substitutes_literals_on_the_legacy_dialect() {
    let mut conn = Recording::new(Capabilities::sybase_12_5());

    execute(
        &mut conn,
        "insert into authors values(?, ?)",
        &[Value::from("O'Hara"), Value::from(42i32)],
    )
    .unwrap();

    assert_eq!(conn.commands[0], "insert into authors values('O''Hara', 42)");
}

#[test]
fn it_passes_legacy_queries_without_placeholders_verbatim() {
    let mut conn = Recording::new(Capabilities::sybase_12_5());

    execute(&mut conn, "select count(*) from authors", &[]).unwrap();

    assert_eq!(conn.commands[0], "select count(*) from authors");
}

#[test]
fn it_rejects_count_mismatches_without_a_round_trip() {
    for caps in [Capabilities::sql_server(), Capabilities::sybase_12_5()] {
        let mut conn = Recording::new(caps);

        let err = execute(
            &mut conn,
            "select * from authors where au_id = ?",
            &[Value::from(1i32), Value::from(2i32)],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::ArgumentCountMismatch {
                expected: 1,
                actual: 2,
            }
        ));
        assert!(conn.commands.is_empty());
    }
}

#[test]
fn it_rejects_unsupported_host_types_before_building_commands() {
    #[derive(Serialize)]
    struct Address {
        street: String,
        city: String,
    }

    let err = Value::serialized(&Address {
        street: "X".into(),
        city: "Y".into(),
    })
    .unwrap_err();

    assert!(matches!(err, Error::UnsupportedType(name) if name == "Address"));
}

#[test]
fn it_binds_serialized_values_like_native_ones() {
    #[derive(Serialize)]
    struct AuthorId(i64);

    let mut conn = Recording::new(Capabilities::sybase_12_5());
    let id = Value::serialized(&AuthorId(9_000_000_000)).unwrap();

    execute(&mut conn, "delete from authors where id = ?", &[id]).unwrap();

    assert_eq!(conn.commands[0], "delete from authors where id = 9000000000");
}

#[test]
fn it_reports_the_missing_status_row_on_the_legacy_dialect() {
    let conn = Recording::new(Capabilities::sybase_12_5());

    let err = conn.capabilities().ensure_status_row().unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));

    let conn = Recording::new(Capabilities::sql_server());
    assert!(conn.capabilities().ensure_status_row().is_ok());
}

#[test]
fn it_propagates_collaborator_failures_unchanged() {
    let err = execute(&mut Failing, "select 1", &[]).unwrap_err();

    match err {
        Error::Collaborator(source) => assert_eq!(source.to_string(), "connection reset"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn it_binds_typed_nulls_end_to_end() {
    let mut conn = Recording::new(Capabilities::sql_server());

    execute(
        &mut conn,
        "insert into t values(?, ?, ?)",
        &[
            Value::from(None::<i64>),
            Value::from(None::<&str>),
            Value::Null,
        ],
    )
    .unwrap();

    assert!(conn.commands[0].ends_with(
        "N'@p1 bigint, @p2 nvarchar (1), @p3 nvarchar (1)', @p1=NULL, @p2=NULL, @p3=NULL"
    ));
}
