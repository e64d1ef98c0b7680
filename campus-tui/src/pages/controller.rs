//! Page controller: owns one page's records, filters, pagination and modals.
//!
//! The controller never performs I/O. Key presses and request completions
//! go in, [`Effect`]s come out; the app runs the requests and feeds the
//! results back through [`PageController::complete`].

use campus_lib::api::Query;
use campus_lib::error::Error;
use campus_lib::model::{Record, Value};
use log::{debug, info, warn};
use tablekit::buffer::Buffer;
use tablekit::confirm::{ConfirmDialog, ConfirmEvent};
use tablekit::detail::DetailModal;
use tablekit::filter::FilterState;
use tablekit::form::{FormEvent, FormModal};
use tablekit::layout::Rect;
use tablekit::pagination::Pagination;
use tablekit::paint::{paint_confirm, paint_detail, paint_form, paint_table};
use tablekit::table::{Table, TableEvent, TableProps};
use tablekit::theme::Theme;
use tablekit::{EventResult, Key, Modifiers};

use super::PageSpec;
use crate::toast::Toast;

/// An API call the app must run for this page.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// List records. The generation comes back with the result.
    Fetch { generation: u64, query: Query },
    Create(Record),
    /// Update the record at `id`; the payload never carries the identifier.
    Update { id: Value, payload: Record },
    Delete { id: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Delete => "deleted",
        }
    }
}

/// Result of a [`Request`].
#[derive(Debug)]
pub enum Completion {
    Fetched {
        generation: u64,
        result: Result<Vec<Record>, Error>,
    },
    Mutated {
        mutation: Mutation,
        result: Result<(), Error>,
    },
}

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(Request),
    Toast(Toast),
    /// Save the page size for the next run.
    PersistPageSize(usize),
    /// The API rejected the stored token; show sign-in.
    Unauthorized,
}

pub struct PageController {
    spec: PageSpec,
    records: Vec<Record>,
    /// A fetch is in flight.
    loading: bool,
    /// A create/update/delete is in flight.
    submitting: bool,
    filters: FilterState,
    pagination: Pagination,
    /// Latest fetch generation issued.
    generation: u64,
    table: Table,
    create_form: FormModal,
    edit_form: FormModal,
    /// Record whose edit form is open.
    editing: Option<Record>,
    detail: DetailModal,
    confirm: ConfirmDialog,
    /// Record awaiting delete confirmation.
    deleting: Option<Record>,
}

impl PageController {
    pub fn new(spec: PageSpec, page_size: usize) -> Self {
        let create_form = FormModal::new(spec.create_title(), spec.create_fields.clone());
        let edit_form = FormModal::new(spec.edit_title(), spec.edit_fields());
        let detail = DetailModal::new(spec.detail_title(), spec.labels.clone());
        Self {
            spec,
            records: Vec::new(),
            loading: true,
            submitting: false,
            filters: FilterState::new(),
            pagination: Pagination::new(1, page_size),
            generation: 0,
            table: Table::new().with_filter_actions(),
            create_form,
            edit_form,
            editing: None,
            detail,
            confirm: ConfirmDialog::new(),
            deleting: None,
        }
    }

    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn create_form(&self) -> &FormModal {
        &self.create_form
    }

    pub fn edit_form(&self) -> &FormModal {
        &self.edit_form
    }

    pub fn detail(&self) -> &DetailModal {
        &self.detail
    }

    pub fn confirm(&self) -> &ConfirmDialog {
        &self.confirm
    }

    /// Returns `true` if any modal is open.
    pub fn has_modal(&self) -> bool {
        self.confirm.is_open()
            || self.create_form.is_open()
            || self.edit_form.is_open()
            || self.detail.is_open()
    }

    /// Initial load: every record, no filters.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.fetch(Query::new())]
    }

    /// Reload with the current filter text.
    pub fn refresh(&mut self) -> Vec<Effect> {
        vec![self.fetch(self.current_query())]
    }

    /// Open the empty create form.
    pub fn open_create(&mut self) {
        if self.has_modal() {
            return;
        }
        self.create_form.open(None);
    }

    pub fn table_props(&self) -> TableProps<'_> {
        TableProps {
            columns: &self.spec.columns,
            records: &self.records,
            loading: self.loading,
            filters: &self.filters,
            pagination: self.pagination,
        }
    }

    /// Route a key to the topmost modal, else the table.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> EventResult<Vec<Effect>> {
        if self.confirm.is_open() {
            return match self.confirm.handle_key(key, modifiers, self.submitting) {
                EventResult::Event(ConfirmEvent::Confirm) => self.confirm_delete(),
                EventResult::Event(ConfirmEvent::Cancel) => {
                    self.confirm.close();
                    self.deleting = None;
                    EventResult::Consumed
                }
                other => other.absorb(),
            };
        }

        if self.create_form.is_open() {
            return match self.create_form.handle_key(key, modifiers, self.submitting) {
                EventResult::Event(FormEvent::Submit(payload)) => {
                    self.submitting = true;
                    info!("Creating {}", self.spec.kind);
                    EventResult::Event(vec![Effect::Request(Request::Create(payload))])
                }
                EventResult::Event(FormEvent::Cancel) => {
                    self.create_form.close();
                    EventResult::Consumed
                }
                other => other.absorb(),
            };
        }

        if self.edit_form.is_open() {
            return match self.edit_form.handle_key(key, modifiers, self.submitting) {
                EventResult::Event(FormEvent::Submit(payload)) => self.submit_update(payload),
                EventResult::Event(FormEvent::Cancel) => {
                    self.edit_form.close();
                    self.editing = None;
                    EventResult::Consumed
                }
                other => other.absorb(),
            };
        }

        if self.detail.is_open() {
            return self.detail.handle_key(key, modifiers).absorb();
        }

        let props = TableProps {
            columns: &self.spec.columns,
            records: &self.records,
            loading: self.loading,
            filters: &self.filters,
            pagination: self.pagination,
        };
        match self.table.handle_key(key, modifiers, &props) {
            EventResult::Event(event) => EventResult::Event(self.on_table_event(event)),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        }
    }

    fn on_table_event(&mut self, event: TableEvent) -> Vec<Effect> {
        match event {
            TableEvent::FilterChanged { key, value } => {
                self.filters.set(key, value);
                Vec::new()
            }
            TableEvent::ApplyFilters => {
                self.pagination.page = 1;
                vec![self.fetch(self.current_query())]
            }
            TableEvent::ClearFilters => {
                self.filters.clear();
                self.pagination.page = 1;
                vec![self.fetch(Query::new())]
            }
            TableEvent::PageChanged(page) => {
                self.pagination.page = page;
                Vec::new()
            }
            TableEvent::PageSizeChanged(size) => {
                self.pagination.page_size = size;
                self.pagination.clamp(self.records.len());
                vec![Effect::PersistPageSize(size)]
            }
            TableEvent::View(index) => {
                if let Some(record) = self.records.get(index) {
                    self.detail.open(record.clone());
                }
                Vec::new()
            }
            TableEvent::Edit(index) => {
                if let Some(record) = self.records.get(index).cloned() {
                    self.edit_form.open(Some(&record));
                    self.editing = Some(record);
                }
                Vec::new()
            }
            TableEvent::Delete(index) => {
                if let Some(record) = self.records.get(index).cloned() {
                    let name = record.value(self.spec.name_key).to_string();
                    self.confirm
                        .open(self.spec.delete_title(), self.spec.delete_description(&name));
                    self.deleting = Some(record);
                }
                Vec::new()
            }
        }
    }

    fn submit_update(&mut self, payload: Record) -> EventResult<Vec<Effect>> {
        let Some(editing) = &self.editing else {
            return EventResult::Consumed;
        };
        let id_field = self.spec.resource.id_field();
        let id = editing.value(id_field).clone();
        self.submitting = true;
        info!("Updating {} {}", self.spec.kind, id);
        EventResult::Event(vec![Effect::Request(Request::Update {
            id,
            payload: payload.without(id_field),
        })])
    }

    fn confirm_delete(&mut self) -> EventResult<Vec<Effect>> {
        let Some(deleting) = &self.deleting else {
            self.confirm.close();
            return EventResult::Consumed;
        };
        let id = deleting.value(self.spec.resource.id_field()).clone();
        self.submitting = true;
        info!("Deleting {} {}", self.spec.kind, id);
        EventResult::Event(vec![Effect::Request(Request::Delete { id })])
    }

    /// Apply a finished request.
    pub fn complete(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::Fetched { generation, result } => self.on_fetched(generation, result),
            Completion::Mutated { mutation, result } => self.on_mutated(mutation, result),
        }
    }

    fn on_fetched(&mut self, generation: u64, result: Result<Vec<Record>, Error>) -> Vec<Effect> {
        if generation != self.generation {
            debug!(
                "Discarding stale {} fetch (generation {}, latest {})",
                self.spec.records(),
                generation,
                self.generation
            );
            return Vec::new();
        }
        self.loading = false;

        match result {
            Ok(records) => {
                debug!("Fetched {} {}", records.len(), self.spec.records());
                self.records = records;
                if self.pagination.clamp(self.records.len()) {
                    debug!("Moved back to page {}", self.pagination.page);
                }
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", self.spec.records(), e);
                let mut effects = vec![Effect::Toast(Toast::error(format!(
                    "Failed to fetch {}",
                    self.spec.records()
                )))];
                if e.is_unauthorized() {
                    effects.push(Effect::Unauthorized);
                }
                effects
            }
        }
    }

    fn on_mutated(&mut self, mutation: Mutation, result: Result<(), Error>) -> Vec<Effect> {
        self.submitting = false;

        if let Err(e) = result {
            warn!("Failed to {} {}: {}", mutation.verb(), self.spec.kind, e);
            let message = e.server_message().map(str::to_string).unwrap_or_else(|| {
                format!(
                    "Failed to {} {}",
                    mutation.verb(),
                    self.spec.kind.to_lowercase()
                )
            });
            let mut effects = vec![Effect::Toast(Toast::error(message))];
            if e.is_unauthorized() {
                effects.push(Effect::Unauthorized);
            }
            return effects;
        }

        info!("{} {}", self.spec.kind, mutation.past());
        let toast = Effect::Toast(Toast::success(format!(
            "{} {}",
            self.spec.kind,
            mutation.past()
        )));
        self.pagination.page = 1;
        let fetch = match mutation {
            Mutation::Create => {
                self.create_form.close();
                self.fetch(Query::new())
            }
            Mutation::Update => {
                self.edit_form.close();
                self.editing = None;
                self.fetch(self.current_query())
            }
            Mutation::Delete => {
                self.confirm.close();
                self.deleting = None;
                self.fetch(self.current_query())
            }
        };
        vec![toast, fetch]
    }

    fn current_query(&self) -> Query {
        Query::from_filters(self.filters.active())
    }

    /// Issue a fetch tagged with a fresh generation.
    fn fetch(&mut self, query: Query) -> Effect {
        self.generation += 1;
        self.loading = true;
        debug!(
            "Fetching {} (generation {}, {} filters)",
            self.spec.records(),
            self.generation,
            query.params().len()
        );
        Effect::Request(Request::Fetch {
            generation: self.generation,
            query,
        })
    }

    /// Draw the table and whichever modal is open.
    pub fn paint(&self, buf: &mut Buffer, area: Rect, theme: &Theme, tick: usize) {
        let view = self.table.view(&self.table_props());
        paint_table(buf, area, &view, theme, tick);

        if let Some(view) = self.detail.view() {
            paint_detail(buf, area, &view, theme);
        }
        for form in [&self.create_form, &self.edit_form] {
            if let Some(view) = form.view(self.submitting) {
                paint_form(buf, area, &view, theme, tick);
            }
        }
        if let Some(view) = self.confirm.view(self.submitting) {
            paint_confirm(buf, area, &view, theme, tick);
        }
    }
}

trait Absorb {
    fn absorb(self) -> EventResult<Vec<Effect>>;
}

impl<E> Absorb for EventResult<E> {
    /// Events the controller has no use for count as consumed.
    fn absorb(self) -> EventResult<Vec<Effect>> {
        match self {
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_lib::error::ApiError;

    use super::*;
    use crate::pages::students;

    fn loaded(records: Vec<Record>) -> PageController {
        let mut page = PageController::new(students(), 10);
        page.start();
        page.complete(Completion::Fetched {
            generation: 1,
            result: Ok(records),
        });
        page
    }

    fn ada() -> Record {
        Record::new()
            .set("name", "Ada")
            .set("email", "ada@example.com")
            .set("department", "CSE")
            .set("registrationId", 7)
            .set("age", 30)
    }

    fn press(page: &mut PageController, key: Key) -> Vec<Effect> {
        page.handle_key(key, Modifiers::new()).into_event().unwrap_or_default()
    }

    #[test]
    fn test_start_fetches_unfiltered() {
        let mut page = PageController::new(students(), 10);
        assert_eq!(
            page.start(),
            vec![Effect::Request(Request::Fetch {
                generation: 1,
                query: Query::new()
            })]
        );
        assert!(page.is_loading());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut page = PageController::new(students(), 10);
        page.start();
        page.refresh();
        page.complete(Completion::Fetched {
            generation: 2,
            result: Ok(vec![ada()]),
        });
        page.complete(Completion::Fetched {
            generation: 1,
            result: Ok(Vec::new()),
        });
        assert_eq!(page.records().len(), 1);
        assert!(!page.is_loading());
    }

    #[test]
    fn test_fetch_failure_keeps_records() {
        let mut page = loaded(vec![ada()]);
        page.refresh();
        let effects = page.complete(Completion::Fetched {
            generation: 2,
            result: Err(ApiError::from_body(500, "boom").into()),
        });
        assert_eq!(
            effects,
            vec![Effect::Toast(Toast::error("Failed to fetch students"))]
        );
        assert_eq!(page.records().len(), 1);
        assert!(!page.is_loading());
    }

    #[test]
    fn test_unauthorized_fetch_signs_out() {
        let mut page = PageController::new(students(), 10);
        page.start();
        let effects = page.complete(Completion::Fetched {
            generation: 1,
            result: Err(ApiError::from_body(401, "").into()),
        });
        assert!(effects.contains(&Effect::Unauthorized));
    }

    #[test]
    fn test_delete_prompt_names_record() {
        let mut page = loaded(vec![ada()]);
        press(&mut page, Key::Char('d'));
        let view = page.confirm().view(false).expect("confirm open");
        assert_eq!(view.title, "Delete Student");
        assert_eq!(
            view.description,
            "Are you sure you want to delete \"Ada\"? This action cannot be undone."
        );

        let effects = press(&mut page, Key::Char('y'));
        assert_eq!(
            effects,
            vec![Effect::Request(Request::Delete { id: Value::Int(7) })]
        );
        assert!(page.is_submitting());
        // a second confirmation is swallowed while the first is in flight
        assert!(press(&mut page, Key::Char('y')).is_empty());
    }

    #[test]
    fn test_update_payload_drops_identifier() {
        let mut page = loaded(vec![ada()]);
        press(&mut page, Key::Char('e'));
        assert!(page.edit_form().is_open());

        let effects = page
            .handle_key(Key::Char('s'), Modifiers::ctrl())
            .into_event()
            .expect("valid edit submits");
        match &effects[..] {
            [Effect::Request(Request::Update { id, payload })] => {
                assert_eq!(id, &Value::Int(7));
                assert!(!payload.contains("registrationId"));
                assert_eq!(payload.value("name"), &Value::from("Ada"));
            }
            other => panic!("unexpected effects {other:?}"),
        }
    }

    #[test]
    fn test_create_success_resets_and_refetches_unfiltered() {
        let mut page = loaded(vec![ada()]);
        page.filters.set("name", "ad");
        page.pagination.page = 3;
        page.open_create();
        page.submitting = true;

        let effects = page.complete(Completion::Mutated {
            mutation: Mutation::Create,
            result: Ok(()),
        });
        assert_eq!(
            effects,
            vec![
                Effect::Toast(Toast::success("Student created")),
                Effect::Request(Request::Fetch {
                    generation: 2,
                    query: Query::new()
                }),
            ]
        );
        assert!(!page.create_form().is_open());
        assert_eq!(page.pagination().page, 1);
        assert!(!page.is_submitting());
    }

    #[test]
    fn test_mutation_failure_uses_server_message_and_keeps_modal() {
        let mut page = loaded(vec![ada()]);
        page.open_create();
        page.submitting = true;

        let effects = page.complete(Completion::Mutated {
            mutation: Mutation::Create,
            result: Err(ApiError::from_body(400, r#"{"error":"Email already exists"}"#).into()),
        });
        assert_eq!(
            effects,
            vec![Effect::Toast(Toast::error("Email already exists"))]
        );
        assert!(page.create_form().is_open());
        assert!(!page.is_submitting());

        let effects = page.complete(Completion::Mutated {
            mutation: Mutation::Create,
            result: Err(ApiError::from_body(500, "").into()),
        });
        assert_eq!(
            effects,
            vec![Effect::Toast(Toast::error("Failed to create student"))]
        );
    }

    #[test]
    fn test_page_size_change_persists() {
        let mut page = loaded(vec![ada()]);
        assert_eq!(
            page.on_table_event(TableEvent::PageSizeChanged(20)),
            vec![Effect::PersistPageSize(20)]
        );
        assert_eq!(page.pagination().page_size, 20);
    }

    #[test]
    fn test_apply_and_clear_filters() {
        let mut page = loaded(vec![ada()]);
        page.on_table_event(TableEvent::FilterChanged {
            key: "name".into(),
            value: " ad ".into(),
        });
        page.pagination.page = 2;
        let effects = page.on_table_event(TableEvent::ApplyFilters);
        assert_eq!(
            effects,
            vec![Effect::Request(Request::Fetch {
                generation: 2,
                query: Query::new().filter("name", "ad")
            })]
        );
        assert_eq!(page.pagination().page, 1);

        let effects = page.on_table_event(TableEvent::ClearFilters);
        assert!(page.filters().is_empty());
        assert_eq!(
            effects,
            vec![Effect::Request(Request::Fetch {
                generation: 3,
                query: Query::new()
            })]
        );
    }
}
