use std::{process::ExitCode, sync::Arc};

use chess_ratings_client::{
    DEBOUNCE_DELAY, DEFAULT_API_URL,
    api::PlayersApiClient,
    browser::{BrowserState, FetchPhase},
    command::{Command, parse},
    session::SearchSession,
    view::BrowserView,
};
use log::{LevelFilter, error};
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::watch,
};

fn init_logger() -> Result<(), String> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn))
        .map_err(|e| e.to_string())?;
    log4rs::init_config(config).map_err(|e| e.to_string())?;
    Ok(())
}

fn render(state: &BrowserState) {
    // typing alone does not redraw; the fetch that follows will
    if state.phase == FetchPhase::Debouncing && !state.loading {
        return;
    }
    println!("{}", BrowserView::from(state));
}

async fn render_loop(mut updates: watch::Receiver<BrowserState>) {
    loop {
        let state = updates.borrow_and_update().clone();
        render(&state);
        if updates.changed().await.is_err() {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    if let Err(e) = init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let api_url = std::env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let source = Arc::new(PlayersApiClient::new(api_url));
    let mut session = SearchSession::new(source, DEBOUNCE_DELAY);
    let renderer = tokio::spawn(render_loop(session.subscribe()));
    session.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read input: {}", e);
                break;
            }
        };
        match parse(&line) {
            Ok(Command::Search(query)) => session.set_query(query),
            Ok(Command::Next) => session.next_page(),
            Ok(Command::Previous) => session.previous_page(),
            Ok(Command::Page(page)) => session.select_page(page),
            Ok(Command::Quit) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    drop(session);
    renderer.abort();
    ExitCode::SUCCESS
}
