//! Terminal ownership, drawing and key handling.

use std::{
    io,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread::JoinHandle,
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Gauge, List, Paragraph, Sparkline},
};
use synclog_dispatch::{DisplayLevel, StatusPrinter};
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::{DashState, SparkSeries};

/// How long the UI thread waits for a key press between draws.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What a key press asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Keep running.
    Continue,
    /// Tear the dashboard down.
    Quit,
}

/// Apply a key press to `state`.
pub fn handle_key(key: KeyEvent, state: &mut DashState) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c' | 'x' | 'z') if ctrl => KeyAction::Quit,
        KeyCode::Char('r') => {
            state.drop_oldest_sample();
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Keeps the terminal to the dashboard.
///
/// Status lines are silenced and log output muted until the lease is dropped.
#[derive(Debug)]
struct TerminalLease {
    printer: StatusPrinter,
    saved: DisplayLevel,
}

impl TerminalLease {
    fn acquire(printer: StatusPrinter) -> Self {
        let saved = printer.set_verbosity(DisplayLevel::Silence);
        printer.gate().close();
        Self { printer, saved }
    }
}

impl Drop for TerminalLease {
    fn drop(&mut self) {
        self.printer.gate().open();
        self.printer.set_verbosity(self.saved);
    }
}

/// The running dashboard.
///
/// Owns the UI thread. The terminal is restored and status output resumed when
/// the thread exits, whether from a quit key or [`DashUi::stop`].
#[derive(Debug)]
pub struct DashUi {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DashUi {
    /// Take over the terminal and start drawing `state`.
    ///
    /// `printer` is silenced, and its output gate closed, until the dashboard
    /// closes. Fails when the terminal cannot be initialized, for instance
    /// when stdout is not a tty.
    pub fn start(state: Arc<Mutex<DashState>>, printer: StatusPrinter) -> io::Result<Self> {
        let terminal = ratatui::try_init().inspect_err(|_| ratatui::restore())?;
        let lease = TerminalLease::acquire(printer);
        Ok(Self::spawn(move |stop| {
            if let Err(e) = ui_loop(terminal, &state, stop) {
                tracing::error!(error = %e, "Dashboard failed");
            }
            ratatui::restore();
            drop(lease);
        }))
    }

    /// Run `body` on the UI thread, handing it the stop flag.
    fn spawn(body: impl FnOnce(&AtomicBool) + Send + 'static) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            body(&thread_stop);
            thread_stop.store(true, Ordering::SeqCst);
        });
        Self { stop, handle: Some(handle) }
    }

    /// Whether the UI thread is still running.
    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::SeqCst)
    }

    /// Stop the UI thread and wait for it to restore the terminal.
    ///
    /// On a multi-threaded tokio runtime the wait happens in place, so other
    /// tasks move off the current worker meanwhile.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        let Some(handle) = self.handle.take() else {
            return;
        };
        let join = move || {
            if handle.join().is_err() {
                tracing::warn!("Dashboard thread panicked");
            }
        };
        match Handle::try_current().map(|rt| rt.runtime_flavor()) {
            Ok(RuntimeFlavor::MultiThread) => tokio::task::block_in_place(join),
            _ => join(),
        }
    }
}

impl Drop for DashUi {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ui_loop(
    mut terminal: DefaultTerminal,
    state: &Mutex<DashState>,
    stop: &AtomicBool,
) -> io::Result<()> {
    while !stop.load(Ordering::SeqCst) {
        {
            let state = state.lock().unwrap_or_else(PoisonError::into_inner);
            terminal.draw(|frame| draw(frame, &state))?;
        }
        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            if handle_key(key, &mut state) == KeyAction::Quit {
                tracing::debug!(?key, "Dashboard closed by key");
                return Ok(());
            }
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame<'_>, state: &DashState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Min(5),
        ])
        .split(frame.area());

    let gauge_color = if state.caught_up { Color::Green } else { Color::Red };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(state.header.as_str()))
        .gauge_style(Style::default().fg(gauge_color))
        .percent(state.gauge_percent.min(100))
        .label(state.gauge_label.as_str());
    frame.render_widget(gauge, chunks[0]);

    draw_import_sparklines(frame, state, chunks[1]);

    let peers = state.peers.samples.to_vec();
    let peer_spark = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .title(Line::from(state.peers.title.as_str()).blue()),
        )
        .data(&peers)
        .style(Style::default().fg(Color::Blue));
    frame.render_widget(peer_spark, chunks[2]);

    let list = List::new(state.peer_list.iter().map(String::as_str))
        .block(Block::default().borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT));
    frame.render_widget(list, chunks[3]);
}

fn draw_import_sparklines(frame: &mut Frame<'_>, state: &DashState, area: Rect) {
    let outer = Block::default().borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);
    for ((series, color), row) in [
        (&state.blocks, Color::Green),
        (&state.mgas, Color::Yellow),
        (&state.txs, Color::Magenta),
    ]
    .into_iter()
    .zip(rows.iter())
    {
        draw_series(frame, series, color, *row);
    }
}

fn draw_series(frame: &mut Frame<'_>, series: &SparkSeries, color: Color, area: Rect) {
    let [title, spark] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .areas(area);
    frame.render_widget(Paragraph::new(series.title.as_str()), title);
    let samples = series.samples.to_vec();
    frame.render_widget(
        Sparkline::default().data(&samples).style(Style::default().fg(color)),
        spark,
    );
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use rstest::rstest;
    use synclog_dispatch::{BlockDiff, MemorySink};

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[rstest]
    #[case(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit)]
    #[case(KeyCode::Esc, KeyModifiers::NONE, KeyAction::Quit)]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit)]
    #[case(KeyCode::Char('x'), KeyModifiers::CONTROL, KeyAction::Quit)]
    #[case(KeyCode::Char('z'), KeyModifiers::CONTROL, KeyAction::Quit)]
    #[case(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::Continue)]
    #[case(KeyCode::Char('p'), KeyModifiers::NONE, KeyAction::Continue)]
    fn key_actions(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] action: KeyAction,
    ) {
        let mut state = DashState::new();
        assert_eq!(handle_key(press(code, modifiers), &mut state), action);
    }

    #[test]
    fn r_drops_oldest_sample() {
        let mut state = DashState::new();
        for blocks in [3, 4, 5] {
            let diff = BlockDiff { blocks, ..Default::default() };
            state.record_insert(blocks, diff, SystemTime::now(), Duration::ZERO);
        }
        handle_key(press(KeyCode::Char('r'), KeyModifiers::NONE), &mut state);
        assert_eq!(state.blocks.samples.to_vec(), vec![4, 5]);
    }

    #[test]
    fn status_output_resumes_after_dashboard_stops() {
        let sink = MemorySink::new();
        let printer = StatusPrinter::new(Arc::new(sink.clone()), DisplayLevel::Info);
        let lease = TerminalLease::acquire(printer.clone());
        let mut dash = DashUi::spawn(move |stop| {
            while !stop.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(1));
            }
            drop(lease);
        });

        assert!(dash.is_running());
        assert!(!printer.info("while open"));
        assert!(!printer.gate().is_open());

        dash.stop();
        assert!(!dash.is_running());
        assert!(printer.gate().is_open());
        assert!(printer.info("after close"));
        assert_eq!(sink.lines(), vec!["after close".to_string()]);
    }

    #[test]
    fn quitting_from_the_ui_thread_resumes_output() {
        let printer = StatusPrinter::new(Arc::new(MemorySink::new()), DisplayLevel::Warn);
        let lease = TerminalLease::acquire(printer.clone());
        let mut dash = DashUi::spawn(move |_| drop(lease));
        while dash.is_running() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(printer.verbosity(), DisplayLevel::Warn);
        assert!(printer.gate().is_open());
        dash.stop();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stop_on_a_multi_thread_runtime() {
        let mut dash = DashUi::spawn(|stop| {
            while !stop.load(Ordering::SeqCst) {
                std::thread::sleep(Duration::from_millis(1));
            }
        });
        dash.stop();
        assert!(!dash.is_running());
    }

    #[tokio::test]
    async fn stop_on_a_current_thread_runtime() {
        let mut dash = DashUi::spawn(|_| {});
        dash.stop();
        dash.stop();
        assert!(!dash.is_running());
    }

    #[test]
    fn releases_are_ignored() {
        let mut state = DashState::new();
        let mut key = press(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key(key, &mut state), KeyAction::Continue);
    }

    #[test]
    fn draws_into_test_backend() {
        let mut state = DashState::new();
        state.header = "Import | local_head ◼ n=7".to_string();
        state.set_sync_height(7, 7);
        let diff = BlockDiff { blocks: 2, txs: 9, mgas: 1 };
        state.record_insert(7, diff, SystemTime::now(), Duration::ZERO);

        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &state)).unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("local_head"));
        assert!(rendered.contains("∑ txs=  9/   2blks"));
        assert!(rendered.contains("Peers (0)"));
    }
}
