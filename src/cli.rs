use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::core::game::{validate_guess_text, Session, MAX_NUMBER, MIN_NUMBER};
use crate::core::GameRng;
use crate::hints;
use crate::server::{self, ServerConfig, DEFAULT_ADDR, DEFAULT_SESSION_TTL_SECS};

#[derive(Parser)]
#[command(name = "numguess")]
#[command(about = "🎯 Number guessing game server with range-narrowing hints")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server settings used when no subcommand is given
    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP game server
    Serve(ServeArgs),
    /// Play a game in this terminal
    Play {
        /// Fixed seed for the secret and hint choice
        #[arg(long)]
        seed: Option<u64>,

        /// Show a hint after every wrong guess
        #[arg(long)]
        hints: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind the server to
    #[arg(short, long, env = "NUMGUESS_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Fixed seed for secrets and hint selection
    #[arg(long, env = "NUMGUESS_SEED")]
    pub seed: Option<u64>,

    /// Idle seconds before a session is forgotten
    #[arg(long, env = "NUMGUESS_SESSION_TTL_SECS", default_value_t = DEFAULT_SESSION_TTL_SECS)]
    pub session_ttl_secs: u64,

    /// Origin allowed to make credentialed requests (e.g. "http://localhost:3000")
    #[arg(long, env = "NUMGUESS_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Return the secret number from /start (debugging only)
    #[arg(long)]
    pub reveal_secret: bool,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            addr: args.addr,
            seed: args.seed,
            session_ttl: Duration::from_secs(args.session_ttl_secs),
            cors_origin: args.cors_origin,
            reveal_secret: args.reveal_secret,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve(args)) => server::run(args.into()).await,
        Some(Commands::Play { seed, hints }) => {
            let stdin = io::stdin();
            play(GameRng::new(seed), hints, stdin.lock(), io::stdout())
        }
        None => server::run(cli.serve.into()).await,
    }
}

/// Line-oriented game loop over any reader/writer pair.
pub fn play<R: BufRead, W: Write>(
    mut rng: GameRng,
    show_hints: bool,
    input: R,
    mut out: W,
) -> Result<()> {
    let mut session = Session::start(&mut rng);
    writeln!(
        out,
        "Guess a number between {} and {} ('q' to quit).",
        MIN_NUMBER, MAX_NUMBER
    )?;

    for line in input.lines() {
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            writeln!(out, "👋 The number was {}.", session.secret_number())?;
            return Ok(());
        }

        let guess = match validate_guess_text(&line) {
            Ok(guess) => guess,
            Err(e) => {
                writeln!(out, "❌ {}", e)?;
                continue;
            }
        };

        let result = session.record_guess(guess)?;
        writeln!(out, "{}", result.message)?;
        if result.correct {
            writeln!(
                out,
                "🎉 Congratulations! You found the number in {} attempts!",
                session.attempts()
            )?;
            return Ok(());
        }
        if show_hints {
            let hint =
                hints::generate_hint(guess, session.secret_number(), session.guesses(), &mut rng);
            writeln!(out, "💡 {}", hint)?;
        }
    }

    Ok(())
}
