use crate::board::Store;
use crate::config::Config;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::persistence::{load_board, spawn_saver, FileSink};
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, Stdout};
use std::path::PathBuf;

pub type ConfigSaveSender = std::sync::mpsc::Sender<String>;
type ConfigSaveReceiver = std::sync::mpsc::Receiver<String>;

/// Options taken from the command line.
///
#[derive(Debug, Default, Clone)]
pub struct StartOptions {
    /// Board file to use instead of the configured one
    pub board: Option<PathBuf>,
    /// Ignore the stored board and start from the seed board
    pub reset: bool,
}

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, options: StartOptions) -> Result<()> {
        let logs = LogBuffer::new();
        CustomLogger::init(logs.clone(), config.level_filter()?)?;

        info!("Starting application...");
        let board_path = match options.board {
            Some(path) => path,
            None => config.board_path()?,
        };
        let initial = if options.reset {
            info!("Reset requested, ignoring stored board.");
            None
        } else {
            match load_board(&board_path) {
                Ok(board) => board,
                Err(e) => {
                    error!("Failed to load board, starting from the seed board: {}", e);
                    None
                }
            }
        };
        let store = Store::from_initial(initial);

        let (saver, saver_handle) = spawn_saver(FileSink::new(board_path), config.save_window());
        if options.reset {
            saver.schedule(store.board().clone());
        }

        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using the default.", config.theme_name);
            Theme::default()
        });
        let (config_save_tx, config_save_rx) = std::sync::mpsc::channel::<String>();
        let mut app = App {
            state: State::new(store, Some(saver), Some(config_save_tx), theme, logs),
            config,
        };
        app.start_config_saver(config_save_rx);
        let result = app.start_ui().await;

        // Dropping the state drops the last saver handle, which flushes the
        // pending snapshot.
        drop(app);
        if let Err(e) = saver_handle.await {
            error!("Board saver did not shut down cleanly: {}", e);
        }

        info!("Exiting application...");
        result
    }

    /// Start a thread to handle config save requests.
    ///
    fn start_config_saver(&self, receiver: ConfigSaveReceiver) {
        let mut config = self.config.clone();
        std::thread::spawn(move || {
            while let Ok(theme_name) = receiver.recv() {
                config.theme_name = theme_name;
                if let Err(e) = config.save() {
                    error!("Failed to save config: {}", e);
                }
            }
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal);

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            if let Ok(size) = terminal.size() {
                self.state.set_terminal_size(size);
            };
            terminal.draw(|frame| crate::ui::render(frame, &mut self.state))?;
            if !terminal_event_handler.handle_next(&mut self.state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
