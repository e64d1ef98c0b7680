//! Top-level app: sign-in screen, sidebar navigation and the event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use campus_lib::CampusClient;
use campus_lib::api::Resource;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use log::{debug, info, warn};
use tablekit::buffer::Buffer;
use tablekit::layout::Rect;
use tablekit::pagination::DEFAULT_PAGE_SIZE;
use tablekit::paint::frame;
use tablekit::terminal::Terminal;
use tablekit::text::display_width;
use tablekit::text_input::{TextEditResult, TextInputData};
use tablekit::theme::{Brush, TextStyle, Theme};
use tablekit::{EventResult, Key, Modifiers};
use tokio::sync::mpsc;

use crate::credentials::StoredTokenProvider;
use crate::error::AppError;
use crate::pages::{self, Completion, Effect, Mutation, PageController, Request};
use crate::store::Store;
use crate::toast::{Toasts, paint_toasts};

const SIDEBAR_WIDTH: u16 = 22;
const TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Students,
    Teachers,
}

impl PageId {
    pub const ALL: [PageId; 2] = [PageId::Students, PageId::Teachers];

    pub fn label(self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Teachers => "Teachers",
        }
    }

    /// Ctrl+<char> switches to the page.
    pub fn shortcut(self) -> char {
        match self {
            Self::Students => 's',
            Self::Teachers => 't',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    Records,
}

/// A finished request, addressed to the page that issued it.
pub type PageCompletion = (PageId, Completion);

pub struct App {
    store: Store,
    credentials: Arc<StoredTokenProvider>,
    client: CampusClient,
    screen: Screen,
    active: PageId,
    students: PageController,
    teachers: PageController,
    token_input: TextInputData,
    sign_in_error: Option<String>,
    toasts: Toasts,
    theme: Theme,
    tick: usize,
    quit: bool,
    completions: mpsc::UnboundedSender<PageCompletion>,
}

impl App {
    /// Build the app; page sizes come from the store.
    ///
    /// Request results arrive on the returned receiver, which [`App::run`]
    /// drains.
    pub async fn new(
        store: Store,
        credentials: Arc<StoredTokenProvider>,
        client: CampusClient,
    ) -> (Self, mpsc::UnboundedReceiver<PageCompletion>) {
        let students = pages::students();
        let teachers = pages::teachers();
        let students_size = saved_page_size(&store, &students.resource).await;
        let teachers_size = saved_page_size(&store, &teachers.resource).await;

        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            store,
            credentials,
            client,
            screen: Screen::SignIn,
            active: PageId::Students,
            students: PageController::new(students, students_size),
            teachers: PageController::new(teachers, teachers_size),
            token_input: TextInputData::default(),
            sign_in_error: None,
            toasts: Toasts::new(),
            theme: Theme::default(),
            tick: 0,
            quit: false,
            completions: tx,
        };
        (app, rx)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn page(&self, id: PageId) -> &PageController {
        match id {
            PageId::Students => &self.students,
            PageId::Teachers => &self.teachers,
        }
    }

    fn page_mut(&mut self, id: PageId) -> &mut PageController {
        match id {
            PageId::Students => &mut self.students,
            PageId::Teachers => &mut self.teachers,
        }
    }

    /// Show the records if a token is stored, else the sign-in screen.
    pub async fn start(&mut self) {
        match self.credentials.is_authenticated().await {
            Ok(true) => self.enter_records().await,
            Ok(false) => self.screen = Screen::SignIn,
            Err(e) => {
                warn!("Could not read stored token: {}", e);
                self.screen = Screen::SignIn;
            }
        }
    }

    async fn enter_records(&mut self) {
        info!("Showing records");
        self.screen = Screen::Records;
        self.sign_in_error = None;
        for id in PageId::ALL {
            let effects = self.page_mut(id).start();
            self.apply(id, effects).await;
        }
    }

    fn show_sign_in(&mut self, message: Option<&str>) {
        self.screen = Screen::SignIn;
        self.token_input = TextInputData::default();
        self.sign_in_error = message.map(str::to_string);
    }

    pub async fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        if modifiers.ctrl && matches!(key, Key::Char('q') | Key::Char('c')) {
            info!("Quit requested");
            self.quit = true;
            return;
        }
        match self.screen {
            Screen::SignIn => self.sign_in_key(key, modifiers).await,
            Screen::Records => self.records_key(key, modifiers).await,
        }
    }

    /// Pasted text goes to the token input.
    pub fn handle_paste(&mut self, text: &str) {
        if self.screen == Screen::SignIn {
            let mut token = std::mem::take(&mut self.token_input.text);
            token.push_str(text.trim());
            self.token_input.set(token);
        }
    }

    async fn sign_in_key(&mut self, key: Key, modifiers: Modifiers) {
        if key == Key::Enter {
            match self.credentials.sign_in(&self.token_input.text).await {
                Ok(true) => self.enter_records().await,
                Ok(false) => self.sign_in_error = Some("Paste a token first".to_string()),
                Err(e) => {
                    warn!("Could not store token: {}", e);
                    self.sign_in_error = Some(format!("Could not store token: {e}"));
                }
            }
            return;
        }
        if self.token_input.handle_key(key, modifiers) == TextEditResult::Changed {
            self.sign_in_error = None;
        }
    }

    async fn records_key(&mut self, key: Key, modifiers: Modifiers) {
        let active = self.active;
        if modifiers.ctrl && !self.page(active).has_modal() {
            if let Some(id) = PageId::ALL
                .into_iter()
                .find(|id| key == Key::Char(id.shortcut()))
            {
                debug!("Switching to {}", id.label());
                self.active = id;
                return;
            }
            match key {
                Key::Char('n') => {
                    self.page_mut(active).open_create();
                    return;
                }
                Key::Char('l') => {
                    self.sign_out().await;
                    return;
                }
                _ => {}
            }
        }

        if let EventResult::Event(effects) = self.page_mut(active).handle_key(key, modifiers) {
            self.apply(active, effects).await;
        }
    }

    async fn sign_out(&mut self) {
        if let Err(e) = self.credentials.sign_out().await {
            warn!("Could not clear token: {}", e);
        }
        self.show_sign_in(None);
    }

    /// Route a finished request to its page.
    pub async fn complete(&mut self, page: PageId, completion: Completion) {
        let effects = self.page_mut(page).complete(completion);
        self.apply(page, effects).await;
    }

    async fn apply(&mut self, page: PageId, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Request(request) => self.spawn(page, request),
                Effect::Toast(toast) => self.toasts.push(toast, Instant::now()),
                Effect::PersistPageSize(size) => {
                    let resource = self.page(page).spec().resource.name().to_string();
                    if let Err(e) = self.store.set_page_size(&resource, size).await {
                        warn!("Could not save page size for {}: {}", resource, e);
                    }
                }
                Effect::Unauthorized => {
                    info!("Token rejected, returning to sign-in");
                    self.show_sign_in(Some("Your session has expired. Sign in again."));
                }
            }
        }
    }

    fn spawn(&self, page: PageId, request: Request) {
        let client = self.client.clone();
        let resource = self.page(page).spec().resource.clone();
        let tx = self.completions.clone();
        tokio::spawn(async move {
            let completion = execute(&client, &resource, request).await;
            if tx.send((page, completion)).is_err() {
                debug!("App closed before {} request finished", resource.name());
            }
        });
    }

    /// Advance animations and expire toasts.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.toasts.expire(Instant::now());
    }

    /// Run until quit.
    pub async fn run(
        mut self,
        terminal: &mut Terminal,
        mut completions: mpsc::UnboundedReceiver<PageCompletion>,
    ) -> Result<(), AppError> {
        self.start().await;

        let mut events = EventStream::new();
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        while !self.quit {
            terminal.draw(|buf| self.paint(buf))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind != KeyEventKind::Release => {
                        self.handle_key(key.code.into(), key.modifiers.into()).await;
                    }
                    Some(Ok(Event::Paste(text))) => self.handle_paste(&text),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some((page, completion)) = completions.recv() => {
                    self.complete(page, completion).await;
                }
                _ = ticker.tick() => self.on_tick(),
            }
        }

        info!("Event loop finished");
        Ok(())
    }

    pub fn paint(&self, buf: &mut Buffer) {
        let area = buf.area();
        buf.fill(area, self.theme.background);

        match self.screen {
            Screen::SignIn => self.paint_sign_in(buf, area),
            Screen::Records => {
                let (sidebar, main) = area.split_left(SIDEBAR_WIDTH.min(area.width));
                self.paint_sidebar(buf, sidebar);
                self.paint_page(buf, main.shrink(1, 1, 0, 2));
            }
        }
        paint_toasts(buf, area, &self.toasts, &self.theme);
    }

    fn paint_sign_in(&self, buf: &mut Buffer, area: Rect) {
        let theme = &self.theme;
        let inner = frame(buf, area.centered(60, 9), "Sign in", theme);
        let muted = Brush::new(theme.muted, theme.surface);
        let text = Brush::new(theme.text, theme.surface);

        let prompt = "Paste an API token and press Enter.";
        buf.write_str(inner.x, inner.y + 1, inner.right(), prompt, muted);
        let masked: String = "•".repeat(self.token_input.text.chars().count());
        let field = if masked.is_empty() { "Token...".to_string() } else { masked };
        let style = TextStyle::new().underline();
        buf.write_str(inner.x, inner.y + 3, inner.right(), &field, text.style(style));
        if let Some(error) = &self.sign_in_error {
            let danger = Brush::new(theme.danger, theme.surface);
            buf.write_str(inner.x, inner.y + 5, inner.right(), error, danger);
        }
    }

    fn paint_sidebar(&self, buf: &mut Buffer, area: Rect) {
        let theme = &self.theme;
        buf.fill(area, theme.surface);
        let bold = TextStyle::new().bold();
        let brand = Brush::new(theme.primary, theme.surface).style(bold);
        buf.write_str(area.x + 2, area.y + 1, area.right(), "Campus", brand);

        for (i, id) in PageId::ALL.into_iter().enumerate() {
            let y = area.y + 3 + i as u16;
            let label = format!(" {:<10} ^{}", id.label(), id.shortcut().to_ascii_uppercase());
            let brush = if id == self.active {
                Brush::new(theme.text, theme.primary).style(bold)
            } else {
                Brush::new(theme.muted, theme.surface)
            };
            buf.write_str(area.x + 1, y, area.right().saturating_sub(1), &label, brush);
        }

        let hints = ["^N new record", "^L sign out", "^Q quit"];
        let muted = Brush::new(theme.muted, theme.surface);
        for (i, hint) in hints.iter().enumerate() {
            let y = area.bottom().saturating_sub(hints.len() as u16 + 1) + i as u16;
            buf.write_str(area.x + 2, y, area.right(), hint, muted);
        }
    }

    fn paint_page(&self, buf: &mut Buffer, area: Rect) {
        let theme = &self.theme;
        let page = self.page(self.active);
        let spec = page.spec();
        let (header, body) = area.split_top(3);

        let title = Brush::new(theme.text, theme.background).style(TextStyle::new().bold());
        buf.write_str(header.x, header.y, header.right(), spec.title, title);
        let muted = Brush::new(theme.muted, theme.background);
        buf.write_str(header.x, header.y + 1, header.right(), spec.subtitle, muted);

        let add = format!("[^N Add {}]", spec.kind);
        let x = header.right().saturating_sub(display_width(&add) as u16);
        let primary = Brush::new(theme.primary, theme.background).style(TextStyle::new().bold());
        buf.write_str(x, header.y, header.right(), &add, primary);

        page.paint(buf, body, theme, self.tick);
    }
}

/// Run one request against the API.
pub async fn execute(client: &CampusClient, resource: &Resource, request: Request) -> Completion {
    match request {
        Request::Fetch { generation, query } => Completion::Fetched {
            generation,
            result: client.list(resource, &query).await,
        },
        Request::Create(record) => Completion::Mutated {
            mutation: Mutation::Create,
            result: client.create(resource, &record).await,
        },
        Request::Update { id, payload } => Completion::Mutated {
            mutation: Mutation::Update,
            result: client.update(resource, &id, &payload).await,
        },
        Request::Delete { id } => Completion::Mutated {
            mutation: Mutation::Delete,
            result: client.delete(resource, &id).await,
        },
    }
}

async fn saved_page_size(store: &Store, resource: &Resource) -> usize {
    match store.page_size(resource.name()).await {
        Ok(Some(size)) => size,
        Ok(None) => DEFAULT_PAGE_SIZE,
        Err(e) => {
            warn!("Could not read page size for {}: {}", resource.name(), e);
            DEFAULT_PAGE_SIZE
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_lib::model::Record;

    use super::*;
    use crate::store::keys;

    async fn app() -> (App, mpsc::UnboundedReceiver<PageCompletion>) {
        let store = Store::in_memory();
        let credentials = Arc::new(StoredTokenProvider::new(store.clone()));
        let client = CampusClient::builder()
            .url("http://127.0.0.1:9")
            .shared_token_provider(credentials.clone())
            .build()
            .unwrap();
        App::new(store, credentials, client).await
    }

    #[tokio::test]
    async fn test_starts_on_sign_in_without_token() {
        let (mut app, _rx) = app().await;
        app.start().await;
        assert_eq!(app.screen(), Screen::SignIn);
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected() {
        let (mut app, _rx) = app().await;
        app.start().await;
        app.handle_key(Key::Enter, Modifiers::new()).await;
        assert_eq!(app.screen(), Screen::SignIn);
        assert!(app.sign_in_error.is_some());
    }

    #[tokio::test]
    async fn test_ctrl_q_quits_anywhere() {
        let (mut app, _rx) = app().await;
        app.handle_key(Key::Char('q'), Modifiers::ctrl()).await;
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_page_switch_and_saved_page_size() {
        let store = Store::in_memory();
        store.set_page_size("teachers", 50).await.unwrap();
        let credentials = Arc::new(StoredTokenProvider::new(store.clone()));
        let client = CampusClient::builder()
            .url("http://127.0.0.1:9")
            .shared_token_provider(credentials.clone())
            .build()
            .unwrap();
        let (mut app, _rx) = App::new(store, credentials, client).await;
        app.screen = Screen::Records;

        app.handle_key(Key::Char('t'), Modifiers::ctrl()).await;
        assert_eq!(app.active(), PageId::Teachers);
        assert_eq!(app.page(PageId::Teachers).pagination().page_size, 50);
        assert_eq!(app.page(PageId::Students).pagination().page_size, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_unauthorized_completion_returns_to_sign_in() {
        let (mut app, _rx) = app().await;
        app.store.set(keys::AUTH_TOKEN, &"abc".to_string()).await.unwrap();
        app.screen = Screen::Records;
        let effects = app.students.start();
        assert_eq!(effects.len(), 1);

        let error = campus_lib::error::ApiError::from_body(401, "");
        app.complete(
            PageId::Students,
            Completion::Fetched {
                generation: 1,
                result: Err(error.into()),
            },
        )
        .await;
        assert_eq!(app.screen(), Screen::SignIn);
        assert!(app.sign_in_error.is_some());
    }

    #[tokio::test]
    async fn test_paint_shows_active_page() {
        let (mut app, _rx) = app().await;
        app.screen = Screen::Records;
        app.students.start();
        app.students.complete(Completion::Fetched {
            generation: 1,
            result: Ok(vec![Record::new().set("name", "Ada")]),
        });
        let mut buf = Buffer::new(120, 30);
        app.paint(&mut buf);
        let screen: String = (0..buf.height()).map(|y| buf.row_text(y)).collect();
        assert!(screen.contains("Manage student records"));
        assert!(screen.contains("Ada"));
        assert!(screen.contains("[^N Add Student]"));
    }
}
