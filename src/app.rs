use crate::config::Config;
use crate::events::back::{self, BackButton, BackSender};
use crate::events::terminal::{Event as TerminalEvent, Handler as TerminalEventHandler};
use crate::logger::{CustomLogger, LogBuffer};
use crate::state::{MarkerLog, Navigator, Notice, SharedNavigator};
use crate::ui::Screen;
use crate::workspace::{FsWorkspace, NoteStore};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;

/// Oversees navigation, event processing and terminal output.
///
pub struct App {
    config: Config,
    navigator: SharedNavigator,
    screen: Screen,
}

impl App {
    /// Start a new application according to the given configuration, using
    /// `workspace` instead of the configured root if provided. Returns the
    /// result of the application execution.
    ///
    pub async fn start(config: Config, workspace: Option<&str>) -> Result<()> {
        let logs = LogBuffer::default();
        CustomLogger::new(logs.clone(), config.level_filter()?).init()?;

        info!("Starting application...");
        let root = config.resolve_workspace(workspace)?;
        info!("Opening workspace {}.", root.display());
        let store: Arc<dyn NoteStore> = Arc::new(FsWorkspace::new(root.clone()));
        let mut navigator = Navigator::with_note_hooks(store, Box::new(MarkerLog::new()));
        navigator.initialize();

        let screen = Screen::new(config.sort_by, logs, root)
            .with_git(config.git_remote.clone(), config.git_user.clone());
        let mut app = App {
            config,
            navigator: navigator.into_shared(),
            screen,
        };
        app.start_ui().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Set up the terminal, spawn the back button task and run the render
    /// loop until exit. The terminal is restored even if the loop fails.
    ///
    async fn start_ui(&mut self) -> Result<()> {
        debug!("Starting user interface...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let mut events = TerminalEventHandler::new();
        let (back_tx, back_rx) = back::channel();
        let exit_tx = events.sender();
        let back_task = tokio::spawn(BackButton::new(Arc::clone(&self.navigator)).run(
            back_rx,
            move || {
                let _ = exit_tx.send(TerminalEvent::Exit);
            },
        ));

        let result = self.run(&mut terminal, &mut events, &back_tx).await;

        back_task.abort();
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    }

    async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut TerminalEventHandler,
        back: &BackSender,
    ) -> Result<()> {
        loop {
            self.refresh_listing().await;
            {
                let navigator = self.navigator.lock().await;
                terminal.draw(|frame| crate::ui::render(frame, &mut self.screen, &navigator))?;
            }
            if !events
                .handle_next(&mut self.screen, &self.navigator, back, &mut self.config)
                .await?
            {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }

    /// Refetch the listing of the current view when the view changed.
    ///
    async fn refresh_listing(&mut self) {
        let (view, store) = {
            let navigator = self.navigator.lock().await;
            (navigator.current_view(), navigator.store())
        };
        if !self.screen.observe(view) {
            return;
        }
        if let Err(e) = self.screen.refresh(view, store.as_ref()).await {
            error!("Failed to refresh {}: {}", view.name(), e);
            self.navigator
                .lock()
                .await
                .notify(Notice::error(e.to_string()));
        }
    }
}
