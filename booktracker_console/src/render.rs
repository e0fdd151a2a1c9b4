use booktracker_store::api::{Book, BookId, BookStatus};

use crate::state::{ConsoleState, StatusFilter, ALL_CATEGORIES};

pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub cover_image_url: Option<String>,
    pub is_read: bool,
}

impl BookCard {
    fn from_book(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            cover_image_url: book.cover_image_url.clone(),
            is_read: book.status.is_read(),
        }
    }

    /// Only books not yet read offer the mark-as-read control
    pub fn can_mark_read(&self) -> bool {
        !self.is_read
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct Counters {
    pub total: usize,
    pub read: usize,
    pub to_read: usize,
}

impl Counters {
    pub fn count(books: &[Book]) -> Self {
        Self {
            total: books.len(),
            read: books
                .iter()
                .filter(|book| book.status == BookStatus::Read)
                .count(),
            to_read: books
                .iter()
                .filter(|book| book.status == BookStatus::ToRead)
                .count(),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusFilterButton {
    pub filter: StatusFilter,
    pub label: &'static str,
    pub active: bool,
}

/// Everything the page shows, derived from a [`ConsoleState`]
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ConsoleView {
    pub cards: Vec<BookCard>,
    pub counters: Counters,
    pub category_options: Vec<CategoryOption>,
    pub status_filters: Vec<StatusFilterButton>,
}

pub fn render(state: &ConsoleState) -> ConsoleView {
    let cards = state
        .books()
        .iter()
        .filter(|book| state.status_filter.matches(&book.status))
        .filter(|book| state.category_filter.matches(&book.category))
        .map(BookCard::from_book)
        .collect();

    let selected_category = state.category_filter.value();
    let category_options = std::iter::once(CategoryOption {
        value: ALL_CATEGORIES.to_string(),
        label: ALL_CATEGORIES_LABEL.to_string(),
        selected: selected_category == ALL_CATEGORIES,
    })
    .chain(state.categories().iter().map(|category| CategoryOption {
        value: category.clone(),
        label: category.clone(),
        selected: selected_category == category,
    }))
    .collect();

    let status_filters = StatusFilter::ALL_FILTERS
        .into_iter()
        .map(|filter| StatusFilterButton {
            filter,
            label: filter.label(),
            active: filter == state.status_filter,
        })
        .collect();

    ConsoleView {
        cards,
        counters: Counters::count(state.books()),
        category_options,
        status_filters,
    }
}

#[cfg(test)]
mod render_tests {
    use booktracker_store::api::BookStatus;

    use crate::render::{render, Counters};
    use crate::state::{CategoryFilter, ConsoleState, StatusFilter};
    use crate::test_support::book;

    fn state_with_two_categories() -> ConsoleState {
        let mut state = ConsoleState::default();
        state.replace_books(vec![
            book(1, "A", BookStatus::Read),
            book(2, "B", BookStatus::ToRead),
            book(3, "B", BookStatus::Read),
            book(4, "A", BookStatus::ToRead),
        ]);
        state
    }

    fn card_ids(state: &ConsoleState) -> Vec<i32> {
        render(state).cards.iter().map(|card| card.id).collect()
    }

    #[test]
    fn test_category_filter_narrows_cards_for_every_status_filter() {
        let mut state = state_with_two_categories();
        state.category_filter = CategoryFilter::Exact("B".to_string());

        state.status_filter = StatusFilter::All;
        assert_eq!(card_ids(&state), vec![2, 3]);

        state.status_filter = StatusFilter::Read;
        assert_eq!(card_ids(&state), vec![3]);

        state.status_filter = StatusFilter::ToRead;
        assert_eq!(card_ids(&state), vec![2]);

        let view = render(&state);
        assert!(view.cards.iter().all(|card| card.category == "B"));
    }

    #[test]
    fn test_counters_ignore_filters() {
        let mut state = state_with_two_categories();
        let mut books = state.books().to_vec();
        books.push(book(5, "A", BookStatus::from("Lent")));
        state.replace_books(books);
        state.category_filter = CategoryFilter::Exact("A".to_string());
        state.status_filter = StatusFilter::Read;

        assert_eq!(
            render(&state).counters,
            Counters {
                total: 5,
                read: 2,
                to_read: 2,
            }
        );
    }

    #[test]
    fn test_options_and_buttons_reflect_selection() {
        let mut state = state_with_two_categories();
        state.category_filter = CategoryFilter::Exact("B".to_string());
        state.status_filter = StatusFilter::ToRead;

        let view = render(&state);
        let options: Vec<(&str, bool)> = view
            .category_options
            .iter()
            .map(|option| (option.value.as_str(), option.selected))
            .collect();
        assert_eq!(
            options,
            vec![("all_categories", false), ("A", false), ("B", true)]
        );
        assert_eq!(view.category_options[0].label, "All Categories");

        let active: Vec<&str> = view
            .status_filters
            .iter()
            .filter(|button| button.active)
            .map(|button| button.label)
            .collect();
        assert_eq!(active, vec!["To Read"]);
        assert_eq!(view.status_filters.len(), 3);
    }

    #[test]
    fn test_cards_expose_read_state() {
        let view = render(&state_with_two_categories());
        let first = &view.cards[0];
        assert!(first.is_read);
        assert!(!first.can_mark_read());
        assert!(view.cards[1].can_mark_read());
    }
}
