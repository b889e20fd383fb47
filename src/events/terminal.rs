use super::back::{BackSender, BackSignal};
use crate::config::Config;
use crate::state::{Navigator, Notice, SharedNavigator, ViewId};
use crate::ui::{Prompt, PromptAction, Screen};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{thread, time::Duration};
use tokio::sync::mpsc;

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
    Exit,
}

pub type EventSender = mpsc::UnboundedSender<Event<KeyEvent>>;

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::UnboundedReceiver<Event<KeyEvent>>,
    tx: EventSender,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let input_tx = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if input_tx.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if input_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, tx }
    }

    /// Return a sender for injecting events, such as an exit request.
    ///
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub async fn handle_next(
        &mut self,
        screen: &mut Screen,
        navigator: &SharedNavigator,
        back: &BackSender,
        config: &mut Config,
    ) -> Result<bool> {
        match self.rx.recv().await {
            Some(Event::Input(key)) => handle_key(key, screen, navigator, back, config).await,
            Some(Event::Tick) => Ok(true),
            Some(Event::Exit) | None => {
                debug!("Received exit event.");
                Ok(false)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

fn send_back(back: &BackSender) {
    if back.send(BackSignal).is_err() {
        warn!("Back signal dropped, no one is listening.");
    }
}

/// Handle a single key press. Returns false if exit was requested.
///
pub async fn handle_key(
    key: KeyEvent,
    screen: &mut Screen,
    navigator: &SharedNavigator,
    back: &BackSender,
    config: &mut Config,
) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return Ok(false);
    }

    let mut nav = navigator.lock().await;
    let view = nav.current_view();

    if screen.prompt().is_some() {
        handle_prompt_key(key, screen, &mut nav).await;
        return Ok(true);
    }

    if view == ViewId::NoteEdit {
        match key.code {
            KeyCode::Esc => {
                drop(nav);
                send_back(back);
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                debug!("Processing save terminal event...");
                if let Err(e) = nav.save_note().await {
                    error!("{}", e);
                    nav.notify(Notice::error(e.to_string()));
                }
            }
            _ => {
                if screen.edit(key) {
                    nav.set_editable_content(screen.editor_content());
                }
            }
        }
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", key);
            return Ok(false);
        }
        KeyCode::Esc | KeyCode::Backspace => {
            drop(nav);
            send_back(back);
        }
        KeyCode::Down | KeyCode::Char('j') => screen.select_next(view),
        KeyCode::Up | KeyCode::Char('k') => screen.select_previous(view),
        KeyCode::Tab => {
            let count = nav
                .view_state()
                .rendered()
                .map(|r| r.links.len())
                .unwrap_or(0);
            screen.cycle_link(count);
        }
        KeyCode::Enter => open_selected(&mut nav, screen).await,
        KeyCode::Char('e') => {
            if nav.toggle_edit_mode().await && nav.current_view() == ViewId::NoteEdit {
                screen.load_editor(nav.view_state().content());
            }
        }
        KeyCode::Char('t') => {
            nav.navigate_to(ViewId::TaskList);
        }
        KeyCode::Char('g') => {
            nav.navigate_to(ViewId::GitConfig);
        }
        KeyCode::Char('o') if view == ViewId::FileList => {
            let sort = screen.cycle_sort();
            config.sort_by = sort;
            if let Err(e) = config.save() {
                warn!("Failed to save sort order: {}", e);
            }
            nav.notify(Notice::info(format!("Sorted by {}", sort.label())));
        }
        KeyCode::Char('n') if view == ViewId::FileList => {
            screen.open_prompt(Prompt::new(PromptAction::Create, ""));
        }
        KeyCode::Char('r') if view == ViewId::FileList => {
            if let Some(file) = screen.selected_file() {
                let action = PromptAction::Rename {
                    path: file.path.clone(),
                };
                let prompt = Prompt::new(action, file.name.clone());
                screen.open_prompt(prompt);
            }
        }
        KeyCode::Char('d') => {
            let path = match view {
                ViewId::FileList => screen.selected_file().map(|f| f.path.clone()),
                ViewId::NoteView => nav.view_state().note().map(|n| n.path.clone()),
                _ => None,
            };
            if let Some(path) = path {
                screen.open_prompt(Prompt::new(PromptAction::Delete { path }, ""));
            }
        }
        KeyCode::Char('x') if view.shows_note() => {
            nav.close();
            screen.invalidate();
        }
        _ => {}
    }
    Ok(true)
}

/// Feed a key to the open prompt. A delete prompt takes `y` to confirm and
/// anything else to cancel; the others edit text until `Enter` or `Esc`.
///
async fn handle_prompt_key(key: KeyEvent, screen: &mut Screen, nav: &mut Navigator) {
    let deleting = matches!(
        screen.prompt().map(|p| &p.action),
        Some(PromptAction::Delete { .. })
    );
    match key.code {
        KeyCode::Esc => {
            screen.take_prompt();
        }
        KeyCode::Char('y') if deleting => submit_prompt(screen, nav).await,
        _ if deleting => {
            screen.take_prompt();
        }
        KeyCode::Enter => submit_prompt(screen, nav).await,
        _ => {
            screen.prompt_input(key);
        }
    }
}

/// Run the note operation of the open prompt. Blank names cancel.
///
async fn submit_prompt(screen: &mut Screen, nav: &mut Navigator) {
    let Some(prompt) = screen.take_prompt() else {
        return;
    };
    let input = prompt.input.trim();
    debug!("Processing prompt {:?}...", prompt.action);
    let result = match &prompt.action {
        PromptAction::Create | PromptAction::Rename { .. } if input.is_empty() => return,
        PromptAction::Create => nav.create_note(input).await.map(|_| ()),
        PromptAction::Rename { path } => nav.rename_note(path, input).await.map(|_| ()),
        PromptAction::Delete { path } => nav.delete_note(path).await,
    };
    screen.invalidate();
    if let Err(e) = result {
        error!("{}", e);
        nav.notify(Notice::error(e.to_string()));
    }
}

/// Open whatever the current view has selected: a file, a task's note or a
/// link of the open note.
///
async fn open_selected(nav: &mut Navigator, screen: &mut Screen) {
    let path = match nav.current_view() {
        ViewId::FileList => screen.selected_file().map(|f| f.path.clone()),
        ViewId::TaskList => screen.selected_task().map(|t| t.file_path.clone()),
        ViewId::NoteView => match screen.selected_link(nav.view_state()) {
            Some(link) if link.is_external => {
                let message = format!("External link: {}", link.target);
                nav.notify(Notice::info(message));
                None
            }
            Some(link) => link.note_path(),
            None => None,
        },
        _ => None,
    };
    let Some(path) = path else {
        return;
    };
    if let Err(e) = nav.open_note(&path).await {
        nav.notify(Notice::error(e.to_string()));
    }
    screen.reset_link();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::back::{channel, BackReceiver};
    use crate::logger::LogBuffer;
    use crate::state::{MarkerLog, NoticeLevel};
    use crate::workspace::{MemoryWorkspace, SortOrder};
    use std::path::PathBuf;
    use std::sync::Arc;

    struct Fixture {
        store: Arc<MemoryWorkspace>,
        navigator: SharedNavigator,
        screen: Screen,
        back: BackSender,
        back_rx: BackReceiver,
        config: Config,
    }

    impl Fixture {
        async fn new() -> Self {
            let store = Arc::new(
                MemoryWorkspace::new()
                    .with_note("a.pn", "A links to [b] and [site https://example.com]")
                    .with_note("b.pn", "{@task status=todo} B task"),
            );
            let mut navigator = Navigator::with_note_hooks(store.clone(), Box::new(MarkerLog::new()));
            navigator.initialize();
            let mut screen = Screen::new(SortOrder::Alphabetical, LogBuffer::default(), PathBuf::new());
            screen
                .refresh(ViewId::FileList, store.as_ref())
                .await
                .unwrap();
            let (back, back_rx) = channel();
            Fixture {
                store,
                navigator: navigator.into_shared(),
                screen,
                back,
                back_rx,
                config: Config::new(),
            }
        }

        async fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
            handle_key(
                KeyEvent::new(code, modifiers),
                &mut self.screen,
                &self.navigator,
                &self.back,
                &mut self.config,
            )
            .await
            .unwrap()
        }

        async fn key(&mut self, c: char) -> bool {
            self.press(KeyCode::Char(c), KeyModifiers::NONE).await
        }

        async fn view(&self) -> ViewId {
            self.navigator.lock().await.current_view()
        }
    }

    #[tokio::test]
    async fn quit_keys_stop_the_loop() {
        let mut fixture = Fixture::new().await;
        assert!(!fixture.key('q').await);
        assert!(!fixture.press(KeyCode::Char('c'), KeyModifiers::CONTROL).await);
        assert!(fixture.key('j').await);
    }

    #[tokio::test]
    async fn enter_opens_selected_file() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(
            navigator.view_state().note().map(|n| n.path.as_str()),
            Some("a.pn")
        );
    }

    #[tokio::test]
    async fn tab_and_enter_follow_internal_link() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Tab, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.depth(), 3);
        assert_eq!(
            navigator.view_state().note().map(|n| n.path.as_str()),
            Some("b.pn")
        );
    }

    #[tokio::test]
    async fn external_link_only_notifies() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Tab, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Tab, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.depth(), 2);
        let notice = navigator.view_state().notice().unwrap();
        assert!(notice.message.contains("https://example.com"));
    }

    #[tokio::test]
    async fn typing_in_edit_mode_updates_content() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.key('e').await;
        assert_eq!(fixture.view().await, ViewId::NoteEdit);
        // in edit mode letters are text, not commands
        fixture.key('q').await;
        fixture.key('t').await;
        assert_eq!(fixture.view().await, ViewId::NoteEdit);
        let navigator = fixture.navigator.lock().await;
        assert!(navigator.view_state().content().starts_with("qtA links"));
    }

    #[tokio::test]
    async fn ctrl_s_saves_without_leaving() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.key('e').await;
        fixture.key('!').await;
        fixture.press(KeyCode::Char('s'), KeyModifiers::CONTROL).await;
        assert_eq!(fixture.view().await, ViewId::NoteEdit);
        assert_eq!(fixture.store.persist_calls().len(), 1);
        assert!(fixture
            .store
            .content("a.pn")
            .unwrap()
            .starts_with("!A links"));
    }

    #[tokio::test]
    async fn escape_sends_back_signal() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Esc, KeyModifiers::NONE).await;
        fixture.press(KeyCode::Backspace, KeyModifiers::NONE).await;
        assert_eq!(fixture.back_rx.try_recv(), Ok(BackSignal));
        assert_eq!(fixture.back_rx.try_recv(), Ok(BackSignal));
        assert_eq!(fixture.view().await, ViewId::FileList);
    }

    #[tokio::test]
    async fn view_keys_navigate_forward() {
        let mut fixture = Fixture::new().await;
        fixture.key('t').await;
        assert_eq!(fixture.view().await, ViewId::TaskList);
        fixture.key('t').await;
        fixture.key('g').await;
        assert_eq!(fixture.view().await, ViewId::GitConfig);
        assert_eq!(fixture.navigator.lock().await.depth(), 3);
    }

    #[tokio::test]
    async fn sort_key_cycles_order() {
        let mut fixture = Fixture::new().await;
        fixture.key('o').await;
        assert_eq!(fixture.screen.sort(), SortOrder::LastModified);
        assert_eq!(fixture.config.sort_by, SortOrder::LastModified);
        let navigator = fixture.navigator.lock().await;
        assert_eq!(
            navigator.view_state().notice().map(|n| n.level),
            Some(NoticeLevel::Info)
        );
    }

    #[tokio::test]
    async fn new_note_prompt_creates_and_opens() {
        let mut fixture = Fixture::new().await;
        fixture.key('n').await;
        // prompt text is not read as commands
        for c in ['q', 't'] {
            assert!(fixture.key(c).await);
        }
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        assert_eq!(fixture.screen.prompt(), None);
        assert_eq!(fixture.store.content("qt.pn").as_deref(), Some(""));
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(
            navigator.view_state().note().map(|n| n.path.as_str()),
            Some("qt.pn")
        );
    }

    #[tokio::test]
    async fn existing_name_reports_error() {
        let mut fixture = Fixture::new().await;
        fixture.key('n').await;
        fixture.key('b').await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.current_view(), ViewId::FileList);
        assert_eq!(
            navigator.view_state().notice().map(|n| n.level),
            Some(NoticeLevel::Error)
        );
    }

    #[tokio::test]
    async fn rename_prompt_starts_from_current_name() {
        let mut fixture = Fixture::new().await;
        fixture.key('r').await;
        assert_eq!(fixture.screen.prompt().map(|p| p.input.as_str()), Some("a"));
        fixture.press(KeyCode::Backspace, KeyModifiers::NONE).await;
        fixture.key('z').await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        assert_eq!(fixture.store.content("a.pn"), None);
        assert!(fixture.store.content("z.pn").is_some());
    }

    #[tokio::test]
    async fn escape_cancels_prompt_without_going_back() {
        let mut fixture = Fixture::new().await;
        fixture.key('n').await;
        fixture.press(KeyCode::Esc, KeyModifiers::NONE).await;
        assert_eq!(fixture.screen.prompt(), None);
        assert!(fixture.back_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn delete_needs_confirmation() {
        let mut fixture = Fixture::new().await;
        fixture.key('d').await;
        fixture.key('n').await;
        assert_eq!(fixture.screen.prompt(), None);
        assert!(fixture.store.content("a.pn").is_some());

        fixture.key('d').await;
        fixture.key('y').await;
        assert_eq!(fixture.store.content("a.pn"), None);
    }

    #[tokio::test]
    async fn deleting_open_note_returns_to_root() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.key('d').await;
        fixture.key('y').await;
        assert_eq!(fixture.store.content("a.pn"), None);
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.view_state().note(), None);
    }

    #[tokio::test]
    async fn close_key_returns_to_root() {
        let mut fixture = Fixture::new().await;
        fixture.press(KeyCode::Enter, KeyModifiers::NONE).await;
        fixture.key('x').await;
        let navigator = fixture.navigator.lock().await;
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.view_state().note(), None);
    }
}
