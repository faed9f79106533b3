//! Client side of the chess ratings browser.
//!
//! Search input is debounced before the Query Service is called, and the full
//! result set is paginated locally. All UI state lives in [`browser::BrowserState`]
//! and only changes through [`browser::reduce`].

use std::time::Duration;

pub mod api;
pub mod browser;
pub mod command;
pub mod debounce;
pub mod pagination;
pub mod session;
pub mod view;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

pub const PAGE_SIZE: usize = 20;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to load chess players. Please try again later.";
