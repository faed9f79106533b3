use std::fmt;

use chess_ratings_domain::player::PlayerRecord;

use crate::browser::BrowserState;

pub const HEADING: &str = "Chess Players Information";

pub const NO_RESULTS: &str = "No chess players found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub pages: Vec<PageButton>,
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserView {
    pub search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<PlayerRecord>,
    pub no_results: bool,
    pub pagination: Option<PaginationControls>,
    pub summary: Option<String>,
}

impl From<&BrowserState> for BrowserView {
    fn from(state: &BrowserState) -> Self {
        let window = state.page_window();
        let cards = state.current_players().to_vec();
        let has_players = !state.players.is_empty();

        let pagination = has_players.then(|| PaginationControls {
            previous_disabled: window.previous_disabled(),
            next_disabled: window.next_disabled(),
            pages: window
                .page_numbers()
                .map(|number| PageButton {
                    number,
                    active: number == state.current_page,
                })
                .collect(),
        });

        Self {
            search_query: state.search_query.clone(),
            loading: state.loading,
            error: state.error.clone(),
            no_results: cards.is_empty() && !state.loading,
            cards,
            pagination,
            summary: has_players.then(|| window.summary()),
        }
    }
}

fn write_card(f: &mut fmt::Formatter<'_>, player: &PlayerRecord) -> fmt::Result {
    writeln!(f, "{}", player.name)?;
    writeln!(f, "  Indian Rank: {}", player.indian_rank)?;
    writeln!(f, "  Title: {}", player.title)?;
    writeln!(f, "  Federation: {}", player.federation)?;
    writeln!(f, "  Rating: {}", player.rating)?;
    writeln!(f, "  Birth Year: {}", player.birth_year)
}

fn button(label: &str, disabled: bool) -> String {
    if disabled {
        format!("({})", label)
    } else {
        format!("[{}]", label)
    }
}

impl fmt::Display for BrowserView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADING)?;
        writeln!(f, "Search: {}", self.search_query)?;
        if self.loading {
            writeln!(f, "Loading...")?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "{}", error)?;
        }
        for player in &self.cards {
            writeln!(f)?;
            write_card(f, player)?;
        }
        if self.no_results {
            writeln!(f, "{}", NO_RESULTS)?;
        }
        if let Some(pagination) = &self.pagination {
            let pages: Vec<String> = pagination
                .pages
                .iter()
                .map(|page| {
                    if page.active {
                        format!("<{}>", page.number)
                    } else {
                        page.number.to_string()
                    }
                })
                .collect();
            writeln!(f)?;
            writeln!(
                f,
                "{} {} {}",
                button("Previous", pagination.previous_disabled),
                pages.join(" "),
                button("Next", pagination.next_disabled)
            )?;
        }
        if let Some(summary) = &self.summary {
            writeln!(f, "{}", summary)?;
        }
        Ok(())
    }
}
