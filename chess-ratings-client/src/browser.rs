use chess_ratings_domain::player::PlayerRecord;

use crate::{FETCH_ERROR_MESSAGE, PAGE_SIZE, pagination::PageWindow};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Debouncing,
    Fetching,
    Settled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub search_query: String,
    pub players: Vec<PlayerRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub current_page: usize,
    pub phase: FetchPhase,
}

impl Default for BrowserState {
    /// The state before the first response: loading, nothing to show yet.
    fn default() -> Self {
        Self {
            search_query: String::new(),
            players: Vec::new(),
            loading: true,
            error: None,
            current_page: 1,
            phase: FetchPhase::Idle,
        }
    }
}

impl BrowserState {
    pub fn page_window(&self) -> PageWindow {
        PageWindow::new(self.current_page, PAGE_SIZE, self.players.len())
    }

    pub fn current_players(&self) -> &[PlayerRecord] {
        self.page_window().slice(&self.players)
    }

    pub fn total_pages(&self) -> usize {
        self.page_window().total_pages()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    InputChanged(String),
    FetchStarted,
    FetchSucceeded(Vec<PlayerRecord>),
    FetchFailed,
    PageSelected(usize),
    NextPage,
    PreviousPage,
}

fn settle(phase: FetchPhase) -> FetchPhase {
    // a newer input re-armed the timer while the request was in flight
    if phase == FetchPhase::Debouncing {
        FetchPhase::Debouncing
    } else {
        FetchPhase::Settled
    }
}

pub fn reduce(state: BrowserState, event: BrowserEvent) -> BrowserState {
    match event {
        BrowserEvent::InputChanged(search_query) => BrowserState {
            search_query,
            phase: FetchPhase::Debouncing,
            ..state
        },
        BrowserEvent::FetchStarted => BrowserState {
            loading: true,
            phase: FetchPhase::Fetching,
            ..state
        },
        BrowserEvent::FetchSucceeded(players) => BrowserState {
            players,
            current_page: 1,
            error: None,
            loading: false,
            phase: settle(state.phase),
            ..state
        },
        BrowserEvent::FetchFailed => BrowserState {
            players: Vec::new(),
            current_page: 1,
            error: Some(FETCH_ERROR_MESSAGE.to_string()),
            loading: false,
            phase: settle(state.phase),
            ..state
        },
        BrowserEvent::PageSelected(page) => {
            if state.page_window().contains_page(page) {
                BrowserState {
                    current_page: page,
                    ..state
                }
            } else {
                state
            }
        }
        BrowserEvent::NextPage => {
            if state.current_page < state.total_pages() {
                BrowserState {
                    current_page: state.current_page + 1,
                    ..state
                }
            } else {
                state
            }
        }
        BrowserEvent::PreviousPage => {
            if state.current_page > 1 {
                BrowserState {
                    current_page: state.current_page - 1,
                    ..state
                }
            } else {
                state
            }
        }
    }
}
