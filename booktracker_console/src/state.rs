//! Client-side working copy of the book collection and the active filters.
//!
//! The collection is only ever changed through the methods below, which keep
//! the derived category list and the category selection in step with it.

use booktracker_store::api::{Book, BookId, BookStatus};

pub const ALL_CATEGORIES: &str = "all_categories";

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum StatusFilter {
    #[default]
    All,
    Read,
    ToRead,
}

impl StatusFilter {
    pub const ALL_FILTERS: [StatusFilter; 3] =
        [StatusFilter::All, StatusFilter::Read, StatusFilter::ToRead];

    /// Maps a filter button caption; anything unrecognized means all books
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "read" => StatusFilter::Read,
            "to read" => StatusFilter::ToRead,
            _ => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Read => "Read",
            StatusFilter::ToRead => "To Read",
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Read => "read",
            StatusFilter::ToRead => "to_read",
        }
    }

    pub fn matches(&self, status: &BookStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Read => *status == BookStatus::Read,
            StatusFilter::ToRead => *status == BookStatus::ToRead,
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Maps a dropdown value, empty or `all_categories` meaning no restriction
    pub fn from_value(value: &str) -> Self {
        match value {
            "" | ALL_CATEGORIES => CategoryFilter::All,
            category => CategoryFilter::Exact(category.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Exact(category) => category,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(selected) => selected == category,
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ConsoleState {
    books: Vec<Book>,
    categories: Vec<String>,
    pub status_filter: StatusFilter,
    pub category_filter: CategoryFilter,
}

impl ConsoleState {
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Distinct categories across all books, in order of first appearance
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn find_book(&self, book_id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == book_id)
    }

    pub fn replace_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.rebuild_categories();
    }

    pub fn push_book(&mut self, book: Book) {
        self.books.push(book);
        self.rebuild_categories();
    }

    pub fn remove_book(&mut self, book_id: BookId) {
        self.books.retain(|book| book.id != book_id);
        self.rebuild_categories();
    }

    /// Swaps the local record with the same id for the given one
    pub fn replace_book(&mut self, updated: Book) {
        for book in self.books.iter_mut().filter(|book| book.id == updated.id) {
            *book = updated.clone();
        }
        self.rebuild_categories();
    }

    /// Selects a category, falling back to all categories when no book has it
    pub fn select_category(&mut self, filter: CategoryFilter) {
        self.category_filter = match filter {
            CategoryFilter::Exact(category) if self.categories.contains(&category) => {
                CategoryFilter::Exact(category)
            }
            _ => CategoryFilter::All,
        };
    }

    fn rebuild_categories(&mut self) {
        let mut categories: Vec<String> = vec![];
        for book in &self.books {
            if !categories.contains(&book.category) {
                categories.push(book.category.clone());
            }
        }
        self.categories = categories;

        if let CategoryFilter::Exact(selected) = &self.category_filter {
            if !self.categories.contains(selected) {
                self.category_filter = CategoryFilter::All;
            }
        }
    }
}
