//! Hot-seat terminal host for the gem trading game.
mod commands;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{parse_command, purchase_source, reserve_source, Command};
use gemhall_core::{ActionError, GameEngine, GameStatus, PlayerConfig, Snapshot};
use gemhall_data::{builtin_card_set, builtin_rules, load_card_set, load_rules};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_SEED: u64 = 0x6E4D_5EED;

/// Play a gem trading card game at one keyboard
#[derive(Parser, Debug)]
#[command(name = "gemhall")]
#[command(about = "Hot-seat gem trading card game for 2-4 players", long_about = None)]
struct Args {
    /// Player name; repeat once per seat
    #[arg(long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// Points that start the final round
    #[arg(long)]
    target: Option<u32>,

    /// Shuffle seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Rules table to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Card catalogue to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    cards: Option<PathBuf>,

    /// Log filter applied when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let rules = match &args.rules {
        Some(path) => load_rules(path)?,
        None => builtin_rules()?,
    };
    let cards = match &args.cards {
        Some(path) => load_card_set(path, &rules)?,
        None => builtin_card_set()?,
    };
    let seed = args.seed.unwrap_or_else(clock_seed);
    tracing::info!(seed, cards = cards.cards.len(), "starting");

    let players = seat_players(&args.players);
    let mut engine = GameEngine::with_seed(cards, rules, seed);
    let state = engine
        .setup(players.clone(), args.target)
        .context("start game")?;
    engine.drain_events();
    println!("seed {seed}");
    render::print_help();
    render::print_state(&state);
    run_repl(&mut engine, &players, args.target)
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}

fn seat_players(names: &[String]) -> Vec<PlayerConfig> {
    if names.is_empty() {
        return vec![
            PlayerConfig::new("p1", "Player 1"),
            PlayerConfig::new("p2", "Player 2"),
        ];
    }
    names
        .iter()
        .enumerate()
        .map(|(seat, name)| PlayerConfig::new(format!("p{}", seat + 1), name.clone()))
        .collect()
}

fn run_repl(engine: &mut GameEngine, players: &[PlayerConfig], target: Option<u32>) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let state = engine.snapshot();
        render::print_prompt_header(&state);
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        let acting = state.current_player().map(|player| player.id.clone());
        let result = match command {
            Command::Quit => break,
            Command::Help => {
                render::print_help();
                continue;
            }
            Command::Board => {
                render::print_board(&state);
                continue;
            }
            Command::State { json: true } => {
                println!("{}", serde_json::to_string_pretty(&*state)?);
                continue;
            }
            Command::State { json: false } => {
                render::print_state(&state);
                continue;
            }
            Command::Log => {
                render::print_log(&state);
                continue;
            }
            Command::Hint => {
                render::print_hint(&state);
                continue;
            }
            Command::Reset => {
                engine.reset();
                engine.drain_events();
                println!("game reset; type 'new' to deal again");
                continue;
            }
            Command::NewGame => engine.setup(players.to_vec(), target),
            Command::Take { take, returns } => {
                let Some(player_id) = acting else {
                    println!("no game in progress");
                    continue;
                };
                engine.take_tokens(&player_id, take, returns)
            }
            Command::Reserve {
                target: reserve_target,
                returns,
            } => {
                let Some(player_id) = acting else {
                    println!("no game in progress");
                    continue;
                };
                match reserve_source(&state, &reserve_target) {
                    Ok(source) => engine.reserve_card(&player_id, source, returns),
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
            }
            Command::Buy { card_id } => {
                let Some(player_id) = acting else {
                    println!("no game in progress");
                    continue;
                };
                match purchase_source(&state, &player_id, &card_id) {
                    Ok(source) => engine.purchase_card(&player_id, source),
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                }
            }
        };
        report(engine, result);
    }
    Ok(())
}

fn report(engine: &mut GameEngine, result: Result<Snapshot, ActionError>) {
    match result {
        Ok(state) => {
            for event in engine.drain_events() {
                if let Some(line) = render::describe_event(&state, &event) {
                    println!("* {line}");
                }
            }
            if let Some(entry) = state.logs.first() {
                println!("{}", entry.message);
            }
            if state.status == GameStatus::Finished {
                render::print_state(&state);
            }
        }
        Err(err) => println!("rejected: {err}"),
    }
}
