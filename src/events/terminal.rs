use crate::state::{Direction, Mode, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{
        Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};
use tui_textarea::CursorMove;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => {
                        let next = match event::read() {
                            Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                            Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                            Ok(CrosstermEvent::Resize(_, _)) => Some(Event::Resize),
                            Ok(_) => None,
                            Err(e) => {
                                error!("Failed to read terminal event: {}", e);
                                None
                            }
                        };
                        if let Some(next) = next {
                            if tx_clone.send(next).is_err() {
                                break;
                            }
                        }
                    }
                    Ok(false) => (),
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Key(key) => Ok(handle_key(key, state)),
            Event::Mouse(mouse) => {
                handle_mouse(mouse, state);
                Ok(true)
            }
            Event::Resize | Event::Tick => Ok(true),
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Route a key press according to the current mode. Returns false if exit
/// was requested.
///
pub fn handle_key(event: KeyEvent, state: &mut State) -> bool {
    if event.kind != KeyEventKind::Press {
        return true;
    }
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }
    match state.mode() {
        Mode::Board => return handle_board_key(event, state),
        Mode::Search => handle_search_key(event, state),
        Mode::Compose => handle_compose_key(event, state),
        Mode::ConfirmDelete => handle_confirm_key(event, state),
    }
    true
}

fn handle_board_key(event: KeyEvent, state: &mut State) -> bool {
    state.clear_status();
    match event.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyCode::Esc => {
            if state.is_dragging() {
                state.cancel_drag();
            } else if !state.search_query().is_empty() {
                debug!("Processing clear search event '{:?}'...", event);
                state.clear_search();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            state.navigate(Direction::Left);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            state.navigate(Direction::Right);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.navigate(Direction::Up);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.navigate(Direction::Down);
        }
        KeyCode::Char('H') => {
            debug!("Processing move card left event '{:?}'...", event);
            state.move_selected(Direction::Left);
        }
        KeyCode::Char('L') => {
            debug!("Processing move card right event '{:?}'...", event);
            state.move_selected(Direction::Right);
        }
        KeyCode::Char('K') => {
            debug!("Processing move card up event '{:?}'...", event);
            state.move_selected(Direction::Up);
        }
        KeyCode::Char('J') => {
            debug!("Processing move card down event '{:?}'...", event);
            state.move_selected(Direction::Down);
        }
        KeyCode::Char('n') => {
            debug!("Processing create task event '{:?}'...", event);
            state.open_create();
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            debug!("Processing edit task event '{:?}'...", event);
            state.open_edit();
        }
        KeyCode::Char('d') => {
            debug!("Processing delete task event '{:?}'...", event);
            state.request_delete();
        }
        KeyCode::Char('/') => {
            debug!("Processing search event '{:?}'...", event);
            state.enter_search();
        }
        KeyCode::Char('t') => {
            state.toggle_theme();
        }
        KeyCode::Char('`') => {
            state.toggle_log();
        }
        _ => (),
    }
    true
}

fn handle_search_key(event: KeyEvent, state: &mut State) {
    match event.code {
        KeyCode::Esc => {
            state.clear_search();
        }
        KeyCode::Enter => {
            state.finish_search();
        }
        KeyCode::Backspace => {
            state.pop_search_char();
        }
        KeyCode::Char(c) => {
            state.push_search_char(c);
        }
        _ => (),
    }
}

fn handle_compose_key(event: KeyEvent, state: &mut State) {
    match event.code {
        KeyCode::Esc => {
            state.cancel_composer();
            return;
        }
        KeyCode::Enter if !event.modifiers.contains(KeyModifiers::ALT) => {
            debug!("Processing submit composer event '{:?}'...", event);
            state.submit_composer();
            return;
        }
        _ => (),
    }
    let composer = match state.composer_mut() {
        Some(composer) => composer,
        None => return,
    };
    match event.code {
        KeyCode::Char(c) => {
            composer.insert_char(c);
        }
        KeyCode::Enter => {
            composer.insert_newline();
        }
        KeyCode::Backspace => {
            composer.backspace();
        }
        KeyCode::Delete => {
            composer.delete();
        }
        KeyCode::Left => {
            composer.move_cursor(CursorMove::Back);
        }
        KeyCode::Right => {
            composer.move_cursor(CursorMove::Forward);
        }
        KeyCode::Home => {
            composer.move_cursor(CursorMove::Head);
        }
        KeyCode::End => {
            composer.move_cursor(CursorMove::End);
        }
        _ => (),
    }
}

fn handle_confirm_key(event: KeyEvent, state: &mut State) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            debug!("Processing confirm delete event '{:?}'...", event);
            state.confirm_delete();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            state.cancel_delete();
        }
        _ => (),
    }
}

/// Route left-button mouse events into the drag lifecycle.
///
pub fn handle_mouse(event: MouseEvent, state: &mut State) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.pointer_down(event.column, event.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.pointer_drag(event.column, event.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.pointer_up(event.column, event.row);
        }
        _ => (),
    }
}
