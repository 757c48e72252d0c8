use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gridplay::{
    render_session, DemoPlayer, GameSession, SessionConfig, SessionRegistry, Tick, VariantKind,
};
use gridplay_console::{load_or_default, load_recording, Console, Flow, Recorder};
use tracing::{debug, info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// File the open games are loaded from and saved to
    #[arg(long, default_value = "gridplay.save")]
    save_file: PathBuf,

    /// Ignore the save file and start with fresh games
    #[arg(long, default_value_t = false)]
    no_load: bool,

    /// How many boards each new game has
    #[arg(short, long, default_value_t = 1)]
    boards: usize,

    /// Name of the player moving first
    #[arg(long, default_value = "Player1")]
    player1: String,

    /// Name of the player moving second
    #[arg(long, default_value = "Player2")]
    player2: String,

    /// Watch a scripted gomoku game instead of playing
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Play back a recording instead of reading commands from stdin. Starts
    /// from fresh games and leaves the save file alone
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Milliseconds between moves of the demo or the replay
    #[arg(long, default_value_t = 1500)]
    tick_ms: u64,

    /// Record every command as JSON into this directory
    #[arg(short, long)]
    record_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let tick = Duration::from_millis(args.tick_ms);
    if args.demo {
        run_demo(tick);
        return Ok(());
    }

    let config = SessionConfig {
        boards: args.boards.max(1),
        player_names: [args.player1.clone(), args.player2.clone()],
    };
    let recorder = if let Some(dir_path) = args.record_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };
    let replaying = args.replay.is_some();
    let registry = if args.no_load || replaying {
        SessionRegistry::with_defaults(config)
    } else {
        load_or_default(&args.save_file, &config)
    };
    let mut console = Console::new(registry, recorder);

    if let Some(path) = &args.replay {
        run_replay(&mut console, path, tick)?;
    } else {
        run_interactive(&mut console)?;
    }
    console.finish((!replaying).then_some(args.save_file.as_path()));
    Ok(())
}

fn run_interactive(console: &mut Console) -> anyhow::Result<()> {
    println!("{}", console.render());
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            debug!("End of input");
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = console.dispatch(&line);
        if reply.flow == Flow::Quit {
            return Ok(());
        }
        println!("{}\n", reply.message);
        if reply.accepted {
            println!("{}", console.render());
        }
    }
}

fn run_replay(console: &mut Console, path: &std::path::Path, tick: Duration) -> anyhow::Result<()> {
    let commands = load_recording(path)?;
    info!(path = %path.display(), commands = commands.len(), "Replaying");
    println!("{}", console.render());
    for command in commands {
        std::thread::sleep(tick);
        println!("> {}", command.input);
        let reply = console.dispatch(&command.input);
        if reply.accepted != command.accepted {
            warn!(input = %command.input, "Replay diverges from the recording");
        }
        if reply.flow == Flow::Quit {
            break;
        }
        println!("{}\n", reply.message);
        println!("{}", console.render());
    }
    Ok(())
}

fn run_demo(tick: Duration) {
    let config = SessionConfig {
        boards: 1,
        player_names: [String::from("Demo Black"), String::from("Demo White")],
    };
    let mut session = GameSession::new(VariantKind::Gomoku, 1, &config);
    let mut demo = DemoPlayer::gomoku();
    println!("{}", render_session(&session));
    loop {
        std::thread::sleep(tick);
        match demo.tick(&mut session) {
            Tick::Played { input, result } => {
                match result {
                    Ok(_) => println!("> {}", input),
                    Err(err) => {
                        warn!(input = %input, "Demo move rejected: {}", err);
                        demo.cancel();
                    }
                }
                println!("{}", render_session(&session));
            }
            Tick::Finished => {
                info!("Demo finished");
                break;
            }
            Tick::Cancelled => {
                info!("Demo cancelled");
                break;
            }
        }
    }
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
