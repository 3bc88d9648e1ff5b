use std::io::Write;
use std::sync::Arc;

use clap::Args;
use pomotick_core::{
    Config, Event, Intent, RuntimeOptions, SessionType, TimerEngine, TimerRuntime, TimerSnapshot,
    TimerState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::notifiers;
use crate::render;

const HELP: &str = "\
commands:
  t, toggle     start / pause / resume
  s, start      start the countdown
  p, pause      pause the countdown
  r, resume     resume a paused countdown
  x, reset      reset the current session
  w, work       select a focus session
  sb, short     select a short break
  lb, long      select a long break
  a, auto       toggle auto-advance
  ?, status     print the current state
  h, help       show this help
  q, quit       exit";

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Session to begin with (work, short_break, long_break)
    #[arg(long, short)]
    pub session: Option<SessionType>,
    /// Start the countdown immediately
    #[arg(long)]
    pub start: bool,
    /// Stay on a finished session instead of switching automatically
    #[arg(long)]
    pub no_auto_advance: bool,
    /// Start the next session as soon as auto-advance switches to it
    #[arg(long)]
    pub auto_start: bool,
    /// Emit events and snapshots as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    ToggleAutoAdvance,
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let command = match line.trim().to_lowercase().as_str() {
        "" | "t" | "toggle" => Command::Intent(Intent::TogglePause),
        "s" | "start" => Command::Intent(Intent::Start),
        "p" | "pause" => Command::Intent(Intent::Pause),
        "r" | "resume" => Command::Intent(Intent::Resume),
        "x" | "reset" => Command::Intent(Intent::Reset),
        "w" | "work" | "focus" => Command::Intent(Intent::SelectSession(SessionType::Work)),
        "sb" | "short" => Command::Intent(Intent::SelectSession(SessionType::ShortBreak)),
        "lb" | "long" => Command::Intent(Intent::SelectSession(SessionType::LongBreak)),
        "a" | "auto" => Command::ToggleAutoAdvance,
        "?" | "status" => Command::Status,
        "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (type 'help')")),
    };
    Ok(command)
}

struct Output {
    json: bool,
    bar_width: usize,
}

impl Output {
    fn snapshot(&self, snapshot: &TimerSnapshot) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = std::io::stdout().lock();
        if self.json {
            writeln!(stdout, "{}", serde_json::to_string(snapshot)?)?;
        } else {
            write!(
                stdout,
                "\r\x1b[2K{}",
                render::status_line(snapshot, self.bar_width)
            )?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn event(
        &self,
        event: &Event,
        snapshot: &TimerSnapshot,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        if let Some(message) = render::event_message(event) {
            println!("\r\x1b[2K{message}");
        }
        self.snapshot(snapshot)
    }

    fn notice(&self, message: &str) {
        if self.json {
            eprintln!("{message}");
        } else {
            println!("\r\x1b[2K{message}");
        }
    }
}

/// Nothing left for the timer to do without further input.
fn is_finished(timer: &TimerRuntime) -> bool {
    timer.snapshot().timer_state != TimerState::Running && !timer.is_settling()
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(args, config));
    // A pending stdin read would otherwise hold the runtime open.
    runtime.shutdown_background();
    result
}

async fn run_loop(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new();
    engine.set_auto_advance(config.timer.auto_advance && !args.no_auto_advance);
    if let Some(session) = args.session {
        engine.select_session(session);
    }
    let options = RuntimeOptions {
        auto_start: config.timer.auto_start || args.auto_start,
        ..RuntimeOptions::default()
    };
    let timer = TimerRuntime::new(
        engine,
        Arc::new(notifiers::from_config(&config)),
        options,
    );
    let output = Output {
        json: args.json,
        bar_width: config.display.bar_width as usize,
    };

    let mut events = timer.events();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    if !args.json {
        output.notice("type 'help' for commands");
    }
    output.snapshot(&timer.snapshot())?;
    if args.start {
        timer.start();
    }

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    if is_finished(&timer) {
                        debug!("stdin closed with the timer idle, exiting");
                        break;
                    }
                    debug!("stdin closed, timer keeps running until the session ends");
                    continue;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => output.notice(HELP),
                    Ok(Command::Status) => output.snapshot(&timer.snapshot())?,
                    Ok(Command::ToggleAutoAdvance) => {
                        let enabled = !timer.snapshot().auto_advance;
                        timer.set_auto_advance(enabled);
                    }
                    Ok(Command::Intent(intent)) => {
                        if timer.dispatch(intent).is_none() {
                            output.notice(&format!("ignored: {intent:?} is not allowed right now"));
                            output.snapshot(&timer.snapshot())?;
                        }
                    }
                    Err(message) => output.notice(&message),
                }
            }
            event = events.recv() => match event {
                Ok(event) => {
                    output.event(&event, &timer.snapshot())?;
                    if !stdin_open && is_finished(&timer) {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "display fell behind the timer");
                    output.snapshot(&timer.snapshot())?;
                }
                Err(RecvError::Closed) => break,
            },
            _ = &mut ctrl_c => break,
        }
    }

    timer.shutdown();
    if !args.json {
        println!();
    }
    Ok(())
}
