//! Client-side logic of the book tracker: a working copy of the collection,
//! typed filters, and a pure render step producing what the page displays.

pub mod alerts;
pub mod books_api;
pub mod console;
pub mod form;
pub mod render;
pub mod state;

#[cfg(test)]
mod test_support;

pub use console::{Console, Intent, DEFAULT_API_BASE_URL};
