use anyhow::Context;
use connect_x::core::{PlayerId, PlayerKind, PlayerSlot};
use connect_x::game::{log as game_log, GameSession, LogSource};
use connect_x::network::{BotClient, DEFAULT_SERVER};
use connect_x::player::{BotController, RandomBot, RemoteBot};
use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

struct Options {
    kinds: [Option<PlayerKind>; 2],
    server: String,
    local: bool,
    replay: Option<PathBuf>,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut opts = Options {
        kinds: [None, None],
        server: DEFAULT_SERVER.to_string(),
        local: false,
        replay: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            // Invalid or missing values fall back to Human
            "--player1" => {
                opts.kinds[0] = Some(PlayerKind::from_param(&args.next().unwrap_or_default()))
            }
            "--player2" => {
                opts.kinds[1] = Some(PlayerKind::from_param(&args.next().unwrap_or_default()))
            }
            "--server" => opts.server = args.next().context("--server needs a URL")?,
            "--local" => opts.local = true,
            "--replay" => {
                opts.replay = Some(PathBuf::from(args.next().context("--replay needs a file")?))
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {} (try --help)", other),
        }
    }
    Ok(opts)
}

fn print_usage() {
    println!("connect-x [options]");
    println!();
    println!("  --player1 <human|bot>   slot 1 kind (default: human)");
    println!("  --player2 <human|bot>   slot 2 kind (default: human)");
    println!("  --server <url>          bot service base URL (default: {DEFAULT_SERVER})");
    println!("  --local                 use the built-in random bot instead of the service");
    println!("  --replay <file>         replay a saved game log");
    println!();
    println!("With no player flags, an interactive pairing menu is shown.");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(opts).await;

    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

async fn run(opts: Options) -> anyhow::Result<()> {
    let kinds = if opts.replay.is_some() {
        // A replayed log drives both slots
        [PlayerKind::Bot, PlayerKind::Bot]
    } else if opts.kinds == [None, None] {
        match select_players()? {
            Some(kinds) => kinds,
            None => return Ok(()),
        }
    } else {
        [
            opts.kinds[0].unwrap_or_default(),
            opts.kinds[1].unwrap_or_default(),
        ]
    };

    let slots = [
        PlayerSlot::new(PlayerId::Player1, kinds[0]),
        PlayerSlot::new(PlayerId::Player2, kinds[1]),
    ];

    let needs_client = !opts.local && opts.replay.is_none() && kinds.contains(&PlayerKind::Bot);
    let client = if needs_client {
        Some(BotClient::new(&opts.server)?)
    } else {
        None
    };

    let mut bots: [Option<Box<dyn BotController>>; 2] = [None, None];
    if opts.replay.is_none() {
        for player in [PlayerId::Player1, PlayerId::Player2] {
            if kinds[player.index()] != PlayerKind::Bot {
                continue;
            }
            let name = format!("{} (bot)", player.label());
            bots[player.index()] = Some(match &client {
                Some(client) => Box::new(RemoteBot::new(player, &name, client.clone()))
                    as Box<dyn BotController>,
                None => Box::new(RandomBot::new(&name)),
            });
        }
    }

    let log_source = if let Some(path) = &opts.replay {
        let moves = game_log::load_game_log(path)
            .with_context(|| format!("cannot load game log {}", path.display()))?;
        Some(LogSource::File(moves))
    } else if kinds == [PlayerKind::Bot, PlayerKind::Bot] {
        Some(match client {
            Some(client) => LogSource::Service(client),
            None => LogSource::LocalSim,
        })
    } else {
        None
    };

    let mut session = GameSession::new(slots, bots, log_source);
    session.run().await
}

fn select_players() -> anyhow::Result<Option<[PlayerKind; 2]>> {
    use PlayerKind::{Bot, Human};

    print!("=== Connect X ===\r\n");
    print!("\r\nSelect players:\r\n");
    print!("1. Human vs Human\r\n");
    print!("2. Human vs Bot\r\n");
    print!("3. Bot vs Human\r\n");
    print!("4. Bot vs Bot\r\n");
    print!("\r\n[q] quit\r\n");

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') => return Ok(Some([Human, Human])),
                    KeyCode::Char('2') => return Ok(Some([Human, Bot])),
                    KeyCode::Char('3') => return Ok(Some([Bot, Human])),
                    KeyCode::Char('4') => return Ok(Some([Bot, Bot])),
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    _ => {}
                }
            }
        }
    }
}
