// src/main.rs
//
// Terminal front end. Wires config → database → services → AppState, then
// reads one command per line from stdin.

use std::sync::Arc;

use anyhow::Context;
use log::info;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use movienight::application::commands::*;
use movienight::application::{dto::MovieDto, AppState, ErrorResponse};
use movienight::config::AppConfig;
use movienight::db::{
    create_connection_pool, get_connection, get_database_path, get_database_stats,
    initialize_database, verify_database_integrity,
};
use movienight::domain::{LotteryPhase, LotteryTiming, Session, StdRandom};
use movienight::events::{DrawHighlightMoved, WinnerAnnounced};
use movienight::infrastructure::TokioTicker;
use movienight::integrations::GeminiClient;

const HELP: &str = "\
commands:
  nick <name>        enter your nickname
  logout             forget the nickname
  add <movie>        suggest a movie
  vote <n>           toggle your vote on movie n
  delete <n>         remove movie n
  date <YYYY-MM-DD>  toggle your availability on a date
  movies             show the board
  dates              show the date poll
  draw               let fate decide
  close              close the result
  help               this text
  quit               leave";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION & LOGGING
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load();

    // 2. INFRASTRUCTURE
    let db_path = get_database_path(config.database_path.as_deref())?;
    let pool = Arc::new(
        create_connection_pool(&db_path)
            .with_context(|| format!("opening {}", db_path.display()))?,
    );

    // Initialize schema (idempotent)
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        info!(
            "Database {} ready ({} records, {} bytes)",
            db_path.display(),
            stats.record_count,
            stats.size_bytes
        );
    }

    let provider = Arc::new(GeminiClient::new(&config.lookup)?);

    // 3. APPLICATION STATE
    let app_state = AppState::assemble(
        pool,
        provider,
        Arc::new(TokioTicker),
        Box::new(StdRandom::from_entropy()),
        LotteryTiming::default(),
    );

    // 4. EVENT HANDLER REGISTRATION (rendering)
    app_state.event_bus.subscribe::<DrawHighlightMoved, _>(|event| {
        let marker = match event.phase {
            LotteryPhase::Settling => "★",
            _ => "·",
        };
        println!("  {} {}", marker, event.title);
    });
    app_state.event_bus.subscribe::<WinnerAnnounced, _>(|event| {
        println!("\n🎉 Tonight we watch: {}", event.title);
        println!("   Where: {}\n", event.platform);
    });

    // 5. TERMINAL LOOP
    run(&app_state).await
}

async fn run(state: &AppState) -> anyhow::Result<()> {
    let mut session: Option<Session> = current_session(state)
        .await
        .ok()
        .flatten()
        .and_then(|dto| Session::new(&dto.nickname).ok());

    match &session {
        Some(s) => println!("Welcome back, {}! Type `help` for commands.", s),
        None => println!("Enter `nick <name>` to start. Type `help` for commands."),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim().to_string();
        let me = session.as_ref();

        match command {
            "" => {}
            "help" => println!("{HELP}"),
            "quit" | "exit" => break,

            "nick" => match set_nickname(state, arg).await {
                Ok(s) => {
                    println!("Hi, {}!", s);
                    session = Some(s);
                }
                Err(e) => report(&e),
            },
            "logout" => {
                clear_nickname(state).await.ok();
                session = None;
                println!("Nickname cleared.");
            }

            "add" => {
                println!("Looking up \"{}\"...", arg);
                match add_movie(state, me, arg).await {
                    Ok(movie) => print_movie(0, &movie),
                    Err(e) => report(&e),
                }
            }
            "vote" | "delete" => {
                let Some(movie) = movie_at(state, me, &arg).await else {
                    println!("No movie #{}. Try `movies`.", arg);
                    continue;
                };
                let result = if command == "vote" {
                    vote_movie(state, me, movie.id).await
                } else {
                    delete_movie(state, me, movie.id).await
                };
                match result {
                    Ok(movie) if command == "vote" => {
                        println!("{} now has {} votes", movie.title, movie.vote_count)
                    }
                    Ok(movie) => println!("Removed {}", movie.title),
                    Err(e) => report(&e),
                }
            }
            "movies" => match list_movies(state, me).await {
                Ok(movies) if movies.is_empty() => println!("No suggestions yet."),
                Ok(movies) => {
                    for (idx, movie) in movies.iter().enumerate() {
                        print_movie(idx + 1, movie);
                    }
                }
                Err(e) => report(&e),
            },

            "date" => match toggle_date_vote(state, me, arg).await {
                Ok(vote) => println!("Date vote {}", vote.outcome),
                Err(e) => report(&e),
            },
            "dates" => match list_dates(state, me).await {
                Ok(dates) if dates.is_empty() => println!("No dates proposed yet."),
                Ok(dates) => {
                    for date in dates {
                        println!(
                            "{} {} {} ({}) {}",
                            if date.is_leading { "👑" } else { "  " },
                            if date.voted_by_me { "✔" } else { " " },
                            date.date,
                            date.vote_count,
                            date.votes.join(", ")
                        );
                    }
                }
                Err(e) => report(&e),
            },

            "draw" => match start_draw(state, me).await {
                Ok(result) if result.outcome == "no_candidates" => {
                    println!("Add some movies first.")
                }
                Ok(result) if result.outcome == "already_running" => {
                    println!("A draw is already running.")
                }
                Ok(_) => {}
                Err(e) => report(&e),
            },
            "close" => {
                close_result(state, me).await.ok();
            }

            other => println!("Unknown command `{}`. Type `help`.", other),
        }
    }

    Ok(())
}

/// Movie by its 1-based position on the board
async fn movie_at(state: &AppState, me: Option<&Session>, arg: &str) -> Option<MovieDto> {
    let idx: usize = arg.parse().ok()?;
    let movies = list_movies(state, me).await.ok()?;
    movies.into_iter().nth(idx.checked_sub(1)?)
}

fn print_movie(position: usize, movie: &MovieDto) {
    let mine = if movie.voted_by_me { "♥" } else { " " };
    let more = match movie.hidden_voters {
        0 => String::new(),
        n => format!(" +{}", n),
    };
    if position > 0 {
        print!("{:>2}. ", position);
    }
    println!(
        "{} {} {} ({}) [{}] {} votes: {}{}",
        mine,
        movie.emoji,
        movie.title,
        movie.year,
        movie.platforms.join(" / "),
        movie.vote_count,
        movie.voter_preview.join(", "),
        more
    );
}

fn report(raw: &str) {
    match serde_json::from_str::<ErrorResponse>(raw) {
        Ok(error) => println!("✗ {}", error.details.unwrap_or(error.message)),
        Err(_) => println!("✗ {}", raw),
    }
}
