//! Shared setup for integration tests.

pub mod end_to_end_test;
pub mod round_trip_test;

use curl_template::{CandidateField, LocationPath};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Finds the candidate at a rendered location path.
pub fn candidate<'a>(candidates: &'a [CandidateField], path: &str) -> &'a CandidateField {
    let wanted: LocationPath = path.parse().expect("valid location path");
    candidates
        .iter()
        .find(|c| c.location_path == wanted)
        .unwrap_or_else(|| panic!("no candidate at {}", path))
}
