use std::sync::Arc;

use client::entrypoint::{run_match, ClientConfig};
use client::model::events::UiEvent;
use client::service::draft::DraftFlow;
use client::service::swap::SwapFlow;
use client::service::{session, MatchContext};
use common::api::{GameApi, HttpGameApi};
use common::error::Result;
use common::model::game::{MatchResult, TeamSlots};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::Level;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_line_number(true)
        .with_file(true)
        .with_max_level(Level::INFO)
        .init();

    let config = ClientConfig {
        server_url: std::env::var("DRAFT_SERVER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_owned()),
        ..ClientConfig::default()
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let username = loop {
        println!("enter your name:");
        let Some(line) = next_line(&mut lines).await else {
            return;
        };
        let name = line.trim().to_owned();
        if !name.is_empty() {
            break name;
        }
    };

    let api: Arc<dyn GameApi> = Arc::new(HttpGameApi::new(&config.server_url));

    // Room establishment. A failed attempt is terminal; the player decides
    // whether to try again.
    let session = loop {
        println!("type 'create' to open a room, or 'join <CODE>':");
        let Some(line) = next_line(&mut lines).await else {
            return;
        };
        let input = line.trim();
        let attempt = if input.eq_ignore_ascii_case("create") {
            session::create_room(api.as_ref(), &username).await
        } else if let Some(code) = input.strip_prefix("join ") {
            session::join_room(api.as_ref(), code, &username).await
        } else {
            println!("unrecognized command");
            continue;
        };
        match attempt {
            Ok(session) => break session,
            Err(error) => println!("{error}"),
        }
    };
    println!("room {} - you are team {}", session.room, session.team);

    let (events, mut event_rx) = mpsc::channel(100);
    let ctx = MatchContext::new(api, session, events);

    // Render UI events as terminal lines. Turn and team repeat every tick, so
    // only changes are printed.
    let printer = tokio::spawn(async move {
        let mut last_turn = None;
        let mut last_team = None;
        while let Some(event) = event_rx.recv().await {
            render(event, &mut last_turn, &mut last_team);
        }
    });

    let mut match_task = tokio::spawn(run_match(ctx.clone(), config));

    // Player commands, the interactive half of the frontend.
    loop {
        tokio::select! {
            _ = &mut match_task => break,
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                if handle_command(line.trim(), &ctx).await {
                    match_task.abort();
                    break;
                }
            }
        }
    }
    drop(ctx);
    let _ = printer.await;
}

async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    lines.next_line().await.ok().flatten()
}

// Returns true when the player asked to quit.
async fn handle_command(input: &str, ctx: &MatchContext) -> bool {
    let mut parts = input.split_whitespace();
    match parts.next() {
        Some("draw") => report(DraftFlow::new(ctx.clone()).draw().await),
        Some("assign") => match parse_slot(parts.next()) {
            Some(slot) => report(DraftFlow::new(ctx.clone()).assign(slot).await),
            None => println!("usage: assign <0-5>"),
        },
        Some("discard") => report(DraftFlow::new(ctx.clone()).skip_draw().await),
        Some("pick") => match parse_slot(parts.next()) {
            Some(slot) => match SwapFlow::new(ctx.clone()).select(slot).await {
                Ok(true) => println!("picked slot {slot}"),
                Ok(false) => println!("pick ignored"),
                Err(error) => println!("{error}"),
            },
            None => println!("usage: pick <0-5>"),
        },
        Some("swap") => report(SwapFlow::new(ctx.clone()).confirm().await),
        Some("keep") => report(SwapFlow::new(ctx.clone()).skip().await),
        Some("quit") => return true,
        _ => {
            println!("commands: draw | assign <slot> | discard | pick <slot> | swap | keep | quit")
        }
    }
    false
}

// Every rejection becomes one printed line, in the service's own words.
fn report(outcome: Result<()>) {
    if let Err(error) = outcome {
        println!("{error}");
    }
}

fn parse_slot(arg: Option<&str>) -> Option<usize> {
    arg.and_then(|raw| raw.parse::<usize>().ok())
}

fn render(event: UiEvent, last_turn: &mut Option<bool>, last_team: &mut Option<TeamSlots>) {
    match event {
        UiEvent::WaitingForOpponent => println!("waiting for an opponent..."),
        UiEvent::OpponentJoined { username } => match username {
            Some(name) => println!("{name} joined"),
            None => println!("opponent joined"),
        },
        UiEvent::CountdownTick { seconds_left } => println!("Starting in: {seconds_left}"),
        UiEvent::MatchStarted => println!("draft started"),
        UiEvent::TurnStatus { your_turn } => {
            if last_turn.replace(your_turn) != Some(your_turn) {
                if your_turn {
                    println!("Your Turn - Draw a Card");
                } else {
                    println!("Opponent's Turn");
                }
            }
        }
        UiEvent::TeamUpdated { slots } => {
            if last_team.as_ref() != Some(&slots) {
                print_team(&slots);
                *last_team = Some(slots);
            }
        }
        UiEvent::CardDrawn { card } => println!("you drew {}", card.name),
        UiEvent::CardAssigned { slot } => println!("card placed in slot {slot}"),
        UiEvent::DrawDiscarded => println!("card thrown back"),
        UiEvent::SwapPrompt { slots } => {
            println!("optional swap: 'pick <slot>' twice then 'swap', or 'keep'");
            print_team(&slots);
        }
        UiEvent::SwapClosed { skipped } => {
            if skipped {
                println!("keeping the drafted order");
            } else {
                println!("swap submitted");
            }
        }
        UiEvent::MatchFinished { result } => print_result(&result),
        UiEvent::Notice { message } => println!("! {message}"),
    }
}

fn print_team(slots: &TeamSlots) {
    for (role, card) in slots.iter() {
        match card {
            Some(card) => println!("  {role:<9} {}", card.name),
            None => println!("  {role:<9} (empty)"),
        }
    }
}

fn print_result(result: &MatchResult) {
    for round in &result.rounds {
        println!(
            "{}: {} ({}) vs {} ({}) -> {}",
            round.role, round.a_name, round.a_power, round.b_name, round.b_power, round.winner
        );
    }
    println!("Final winner: {}", result.final_winner);
}
