//! Tracing initialization utilities.

use synclog_dispatch::OutputGate;
use tracing::{Level, Metadata};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter directive that always lets status display lines through.
pub const DISPLAY_DIRECTIVE: &str = "synclog::display=debug";

/// Maps a `-v` count to the default log level.
const fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity_level(verbosity).into())
        .from_env_lossy();
    match DISPLAY_DIRECTIVE.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Wrap `writer` so nothing is written while `gate` is closed.
fn gated<W>(writer: W, gate: OutputGate) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    writer.with_filter(move |_: &Metadata<'_>| gate.is_open())
}

/// Initialize the tracing subscriber with the given verbosity level.
///
/// The verbosity level maps to tracing levels as follows:
/// - 0: WARN
/// - 1: INFO
/// - 2: DEBUG
/// - 3+: TRACE
///
/// The `RUST_LOG` environment variable can be used to override the default
/// filter. Status display lines are let through regardless, their volume is
/// controlled by the display verbosity instead.
///
/// Output goes to stdout while the returned [`OutputGate`] is open. The
/// dashboard closes it while it owns the terminal.
///
/// # Examples
///
/// ```no_run
/// use synclog_cli::init_tracing;
///
/// let gate = init_tracing(1);
/// tracing::info!("Application started");
/// gate.close();
/// tracing::info!("Not written");
/// ```
///
/// # Panics
///
/// This function will panic if a global tracing subscriber has already been set.
/// It should only be called once at the start of the application.
pub fn init_tracing(verbosity: u8) -> OutputGate {
    let gate = OutputGate::default();
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_writer(gated(std::io::stdout, gate.clone()));
    tracing_subscriber::registry().with(build_filter(verbosity)).with(layer).init();
    gate
}
