//! Input handling for Folio TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::debug;

use folio_engine::{App, ContactField, InputMode, SectionId, SubmitOutcome};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Terminals without bracketed paste deliver a paste as a burst of key
/// events. While a burst is active, Enter never submits the form.
const PASTE_INTER_KEY_THRESHOLD: Duration = Duration::from_millis(20);
const PASTE_IDLE_TIMEOUT: Duration = Duration::from_millis(75);
const PASTE_QUEUE_THRESHOLD: usize = 32;

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Timing heuristic for paste bursts.
#[derive(Debug)]
struct PasteDetector {
    last_key_time: Instant,
    active_until: Instant,
}

impl PasteDetector {
    fn new(now: Instant) -> Self {
        Self {
            last_key_time: now,
            active_until: now,
        }
    }

    fn reset(&mut self, now: Instant) {
        self.last_key_time = now;
        self.active_until = now;
    }

    fn update(&mut self, now: Instant, backlog: usize, event: &Event) -> bool {
        // Only key press + repeat events participate in detection.
        let is_key_event = matches!(
            event,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            })
        );

        let was_active = now < self.active_until;
        let backlog_high = backlog >= PASTE_QUEUE_THRESHOLD;
        let rapid =
            is_key_event && now.duration_since(self.last_key_time) < PASTE_INTER_KEY_THRESHOLD;

        let active = was_active || backlog_high || rapid;

        if is_key_event {
            if active {
                self.active_until = now + PASTE_IDLE_TIMEOUT;
            }
            self.last_key_time = now;
        }

        active
    }
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
    paste: PasteDetector,
}

impl InputPump {
    /// Start reading terminal events on a blocking thread. Must be called
    /// from within a tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
            paste: PasteDetector::new(Instant::now()),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Apply queued terminal events. Returns true when the app should exit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        let now = Instant::now();
        let paste_active = if app.input_mode() == InputMode::Contact {
            input.paste.update(now, input.rx.len(), &ev)
        } else {
            input.paste.reset(now);
            false
        };
        if paste_active {
            debug!("Input paste detection active (fallback heuristics)");
        }

        if apply_event(app, ev, paste_active) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

fn apply_event(app: &mut App, event: Event, paste_active: bool) -> bool {
    match event {
        Event::Key(key) => {
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                app.request_quit();
                return true;
            }

            match app.input_mode() {
                InputMode::Normal => handle_normal_mode(app, key),
                InputMode::Contact => handle_contact_mode(app, key, paste_active),
                InputMode::PathPrompt => handle_path_prompt_mode(app, key),
            }
        }
        Event::Paste(text) => match app.input_mode() {
            InputMode::Contact => app.contact_paste(&normalize_line_endings(&text)),
            InputMode::PathPrompt => {
                for c in text.chars() {
                    app.path_prompt_push(c);
                }
            }
            InputMode::Normal => {}
        },
        _ => {}
    }
    app.should_quit()
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => app.request_quit(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(item) = App::nav_item_for_key(c) {
                app.navigate(item.path());
            }
        }
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('/') => app.open_path_prompt(),
        KeyCode::Char('c') => app.focus_contact(),
        KeyCode::Char('a') => app.jump_to_section(SectionId::About),
        KeyCode::Char('p') => app.jump_to_section(SectionId::Projects),
        KeyCode::Char('u') if ctrl => app.scroll_page(-1),
        KeyCode::Char('d') if ctrl => app.scroll_page(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_by(-1),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_by(1),
        KeyCode::PageUp => app.scroll_page(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_page(1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll_by(i32::from(u16::MAX)),
        _ => {}
    }
}

fn handle_contact_mode(app: &mut App, key: KeyEvent, paste_active: bool) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Esc => app.enter_normal_mode(),
        KeyCode::Char('s') if ctrl => submit(app),
        KeyCode::Enter if (ctrl || alt) && !paste_active => submit(app),
        KeyCode::Enter => {
            if app.contact_focus() == ContactField::Message {
                app.contact_type('\n');
            } else if !paste_active {
                app.focus_next_field();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev_field(),
        KeyCode::Backspace => app.contact_backspace(),
        KeyCode::Char(c) if !ctrl => app.contact_type(c),
        _ => {}
    }
}

fn submit(app: &mut App) {
    // Mirrors the disabled send button.
    if !app.can_submit() {
        return;
    }
    match app.submit_contact() {
        SubmitOutcome::Started => debug!("Contact submission started"),
        SubmitOutcome::Rejected(reason) => debug!("Contact submission rejected: {reason}"),
        SubmitOutcome::Ignored => {}
    }
}

fn handle_path_prompt_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.enter_normal_mode(),
        KeyCode::Enter => app.commit_path_prompt(),
        KeyCode::Backspace => app.path_prompt_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.path_prompt_push(c);
        }
        _ => {}
    }
}
