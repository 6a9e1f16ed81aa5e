//! Process lifecycle: settings, connect, menu, disconnect
//!
//! `run` is the only thing `main` calls.

use std::io::{BufRead, Write};
use std::sync::Arc;

use uuid::Uuid;

use crate::db::{log_summary, ConnectionConfig, InstrumentedExecutor, PgSession};
use crate::observability::{log_event_with_fields, Event, Logger, SessionMetrics};

use super::args::Cli;
use super::config::Settings;
use super::errors::{CliError, CliResult};
use super::io::Console;
use super::session::Session;

/// Parse arguments and run one session
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_with(&cli)
}

/// Run one session for already-parsed arguments
pub fn run_with(cli: &Cli) -> CliResult<()> {
    let settings = Settings::resolve(cli)?;
    Logger::set_threshold(settings.log_level);

    let session_id = Uuid::new_v4().to_string();
    log_event_with_fields(
        Event::SessionStart,
        &[
            ("session", session_id.as_str()),
            ("user", settings.connection.user.as_str()),
        ],
    );

    let mut console = Console::stdio();
    let pg = connect(&settings.connection, &mut console, &session_id)?;
    serve(pg, console, &session_id)
}

fn connect<R: BufRead, W: Write>(
    config: &ConnectionConfig,
    console: &mut Console<R, W>,
    session_id: &str,
) -> CliResult<PgSession> {
    let url = config.display_url();
    console.say("Connecting to database...")?;
    console.line(&format!("Connection URL: {}\n", url))?;
    log_event_with_fields(
        Event::ConnectBegin,
        &[("session", session_id), ("url", url.as_str())],
    );

    match PgSession::connect(config) {
        Ok(pg) => {
            console.line("Done")?;
            log_event_with_fields(Event::Connected, &[("session", session_id)]);
            Ok(pg)
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(
                Event::ConnectFailed,
                &[
                    ("code", e.code()),
                    ("reason", reason.as_str()),
                    ("session", session_id),
                ],
            );
            eprintln!("Error - Unable to Connect to Database: {}", reason);
            console.line("Make sure you started postgres on this machine")?;
            Err(CliError::connect_failed(reason))
        }
    }
}

/// Run the menu over a connected session, then disconnect
fn serve<R: BufRead, W: Write>(
    pg: PgSession,
    console: Console<R, W>,
    session_id: &str,
) -> CliResult<()> {
    let metrics = Arc::new(SessionMetrics::new());
    let exec = InstrumentedExecutor::new(pg, metrics.clone(), session_id);
    let mut session = Session::new(exec, console, metrics.clone(), session_id);

    let served = session.run_menu();

    let (exec, mut console) = session.into_parts();
    let mut pg = exec.into_inner();
    console.say("Disconnecting from database...")?;
    let closed = pg.close();
    console.line("Done\n\nBye !")?;
    log_event_with_fields(Event::Disconnected, &[("session", session_id)]);

    log_summary(&metrics, session_id);
    log_event_with_fields(Event::SessionEnd, &[("session", session_id)]);

    served?;
    closed?;
    Ok(())
}
