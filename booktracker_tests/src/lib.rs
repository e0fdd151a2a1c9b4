//! Tests against a running booktracker_store, e.g. started with
//! `BOOKTRACKER__DATABASE__USE_IN_MEMORY=true cargo run -p booktracker_store --features server`


/// Base url of the store under test, `BOOKTRACKER_URL` overrides the local default
#[cfg(any(feature = "system_tests", feature = "load_tests"))]
fn store_url() -> String {
    std::env::var("BOOKTRACKER_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}
