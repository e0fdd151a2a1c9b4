use booktracker_store::api::{BookId, BookStatus};
use booktracker_store::client::BookTrackerStoreClient;

use crate::alerts::Alerts;
use crate::books_api::BooksApi;
use crate::form::BookForm;
use crate::render::{render, ConsoleView};
use crate::state::{CategoryFilter, ConsoleState, StatusFilter};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// User intents the console reacts to
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Intent {
    Load,
    Add(BookForm),
    Delete(BookId),
    MarkRead(BookId),
    SetStatusFilter(StatusFilter),
    SetCategoryFilter(CategoryFilter),
}

/// Owns the working copy of the collection and keeps the rendered view in step with it.
///
/// Each intent runs at most one request against the store. On success the local
/// collection is patched with the response, on failure an alert is raised and the
/// state is left as it was. Either way the view is rendered once afterwards.
pub struct Console<A, N> {
    api: A,
    alerts: N,
    state: ConsoleState,
    view: ConsoleView,
}

impl<N: Alerts> Console<BookTrackerStoreClient, N> {
    /// Console talking to a store reachable at `base_url`
    pub fn connect(base_url: &str, alerts: N) -> anyhow::Result<Self> {
        Ok(Self::new(BookTrackerStoreClient::new(base_url)?, alerts))
    }
}

impl<A: BooksApi, N: Alerts> Console<A, N> {
    pub fn new(api: A, alerts: N) -> Self {
        let state = ConsoleState::default();
        let view = render(&state);
        Self {
            api,
            alerts,
            state,
            view,
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn alerts(&self) -> &N {
        &self.alerts
    }

    pub async fn dispatch(&mut self, intent: Intent) {
        tracing::debug!(?intent, "Dispatching intent");
        match intent {
            Intent::Load => self.load().await,
            Intent::Add(form) => self.add(form).await,
            Intent::Delete(book_id) => self.delete(book_id).await,
            Intent::MarkRead(book_id) => self.mark_read(book_id).await,
            Intent::SetStatusFilter(filter) => self.state.status_filter = filter,
            Intent::SetCategoryFilter(filter) => self.state.select_category(filter),
        }
        self.view = render(&self.state);
    }

    async fn load(&mut self) {
        match self.api.fetch_books().await {
            Ok(books) => self.state.replace_books(books),
            Err(err) => self.fail("Error loading books.", err),
        }
    }

    async fn add(&mut self, form: BookForm) {
        let new_book = match form.into_new_book() {
            Ok(new_book) => new_book,
            Err(err) => {
                self.alerts.alert(&err.to_string());
                return;
            }
        };

        match self.api.add_book(&new_book).await {
            Ok(created) => self.state.push_book(created),
            Err(err) => self.fail("Error saving book.", err),
        }
    }

    async fn delete(&mut self, book_id: BookId) {
        match self.api.delete_book(book_id).await {
            Ok(()) => self.state.remove_book(book_id),
            Err(err) => self.fail("Error deleting book.", err),
        }
    }

    async fn mark_read(&mut self, book_id: BookId) {
        match self.state.find_book(book_id) {
            Some(book) if !book.status.is_read() => {}
            _ => return,
        }

        match self.api.update_status(book_id, BookStatus::Read).await {
            Ok(updated) => self.state.replace_book(updated),
            Err(err) => self.fail("Error updating book.", err),
        }
    }

    fn fail(&self, message: &str, err: anyhow::Error) {
        tracing::warn!("{}: {:#}", message, err);
        self.alerts.alert(message);
    }
}
