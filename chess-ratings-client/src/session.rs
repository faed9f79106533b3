use std::{sync::Arc, time::Duration};

use log::error;
use tokio::sync::watch;

use crate::{
    api::ArcPlayerSource,
    browser::{BrowserEvent, BrowserState, reduce},
    debounce::Debouncer,
};

fn dispatch(state: &watch::Sender<BrowserState>, event: BrowserEvent) {
    state.send_modify(|state| {
        let current = std::mem::take(state);
        *state = reduce(current, event);
    });
}

/// Drives one browsing session: debounced searches against a [`PlayerSource`]
/// and local page navigation.
///
/// Requests are never aborted once issued, so a slow response may land after a
/// newer one and overwrite it.
///
/// [`PlayerSource`]: crate::api::PlayerSource
pub struct SearchSession {
    state: Arc<watch::Sender<BrowserState>>,
    source: ArcPlayerSource,
    debouncer: Debouncer,
}

impl SearchSession {
    pub fn new(source: ArcPlayerSource, delay: Duration) -> Self {
        let (state, _) = watch::channel(BrowserState::default());
        Self {
            state: Arc::new(state),
            source,
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    /// Schedules the first fetch for the current (empty) search text.
    pub fn start(&mut self) {
        let query = self.state.borrow().search_query.clone();
        self.arm_fetch(query);
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        dispatch(&self.state, BrowserEvent::InputChanged(query.clone()));
        self.arm_fetch(query);
    }

    pub fn next_page(&self) {
        dispatch(&self.state, BrowserEvent::NextPage);
    }

    pub fn previous_page(&self) {
        dispatch(&self.state, BrowserEvent::PreviousPage);
    }

    pub fn select_page(&self, page: usize) {
        dispatch(&self.state, BrowserEvent::PageSelected(page));
    }

    fn arm_fetch(&mut self, query: String) {
        let state = self.state.clone();
        let source = self.source.clone();
        self.debouncer.arm(move || async move {
            dispatch(&state, BrowserEvent::FetchStarted);
            match source.fetch_players(&query).await {
                Ok(players) => dispatch(&state, BrowserEvent::FetchSucceeded(players)),
                Err(e) => {
                    error!("Error fetching chess players: {}", e);
                    dispatch(&state, BrowserEvent::FetchFailed);
                }
            }
        });
    }
}
