use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{EffectEvent, EffectKind, QuizSettingsDraft, option_label};
use services::{
    Clock, EffectEmitter, Intent, QuestionBank, QuizLoopService, QuizSession, SessionPhase,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

const DEFAULT_FPS: u64 = 30;
/// Above this the frame period rounds down to zero milliseconds.
const MAX_FPS: u64 = 1000;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: &str) -> Result<T, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

/// `none`/`all` lift the cap, anything else must be a count.
fn parse_cap(flag: &'static str, raw: &str) -> Result<Option<usize>, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "none" | "all" => Ok(None),
        _ => parse_number(flag, raw).map(Some),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bank <csv>             question bank (default: built-in arithmetic)");
    eprintln!("  --question-time <secs>   seconds per question (default: 15)");
    eprintln!("  --delay <ms>             pause after each answer (default: 800)");
    eprintln!("  --max-questions <n|all>  cap on questions per run (default: all)");
    eprintln!("  --fps <n>                frame rate of the tick loop, 1-1000 (default: 30)");
    eprintln!("  --json                   print effect events as JSON lines");
    eprintln!();
    eprintln!("Keys (type and press Enter):");
    eprintln!("  <Enter> start / restart, a-d or 1-4 answer, r restart, q quit");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_QUESTION_TIME_SECS, QUIZ_RESOLUTION_DELAY_MS, QUIZ_MAX_QUESTIONS");
}

#[derive(Debug, Clone)]
struct Args {
    bank: Option<PathBuf>,
    settings: QuizSettingsDraft,
    fps: u64,
    json: bool,
}

#[derive(Debug)]
enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Environment first, flags override.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut settings = QuizSettingsDraft::new();
        let mut bank = env("QUIZ_BANK").filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        if let Some(raw) = env("QUIZ_QUESTION_TIME_SECS") {
            settings.question_time_secs = Some(parse_number("QUIZ_QUESTION_TIME_SECS", &raw)?);
        }
        if let Some(raw) = env("QUIZ_RESOLUTION_DELAY_MS") {
            settings.resolution_delay_ms = Some(parse_number("QUIZ_RESOLUTION_DELAY_MS", &raw)?);
        }
        if let Some(raw) = env("QUIZ_MAX_QUESTIONS") {
            settings.max_questions = parse_cap("QUIZ_MAX_QUESTIONS", &raw)?;
        }
        let mut fps = DEFAULT_FPS;
        let mut json = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => bank = Some(PathBuf::from(require_value(args, "--bank")?)),
                "--question-time" => {
                    let value = require_value(args, "--question-time")?;
                    settings.question_time_secs = Some(parse_number("--question-time", &value)?);
                }
                "--delay" => {
                    let value = require_value(args, "--delay")?;
                    settings.resolution_delay_ms = Some(parse_number("--delay", &value)?);
                }
                "--max-questions" => {
                    let value = require_value(args, "--max-questions")?;
                    settings.max_questions = parse_cap("--max-questions", &value)?;
                }
                "--fps" => {
                    let value = require_value(args, "--fps")?;
                    fps = parse_number("--fps", &value)?;
                    if !(1..=MAX_FPS).contains(&fps) {
                        return Err(ArgsError::InvalidNumber {
                            flag: "--fps",
                            raw: value,
                        });
                    }
                }
                "--json" => json = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self {
            bank,
            settings,
            fps,
            json,
        }))
    }
}

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Intent(Intent),
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "" => Input::Intent(Intent::Confirm),
        "q" | "quit" | "exit" => Input::Quit,
        "r" | "restart" => Input::Intent(Intent::Restart),
        "s" | "start" => Input::Intent(Intent::Start),
        "a" | "1" => Input::Intent(Intent::Select(0)),
        "b" | "2" => Input::Intent(Intent::Select(1)),
        "c" | "3" => Input::Intent(Intent::Select(2)),
        "d" | "4" => Input::Intent(Intent::Select(3)),
        _ => Input::Unknown(trimmed),
    }
}

/// Feeds stdin lines into the loop's queue until EOF or the loop hangs up.
async fn read_input(tx: mpsc::UnboundedSender<Input>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(parse_input(&line)).is_err() {
                    break;
                }
            }
            Ok(None) => {
                let _ = tx.send(Input::Quit);
                break;
            }
            Err(err) => {
                log::warn!("stdin closed: {err}");
                let _ = tx.send(Input::Quit);
                break;
            }
        }
    }
}

//
// ─── EFFECTS ───────────────────────────────────────────────────────────────────
//

/// Short text feedback standing in for particles, flash and shake.
struct ConsoleEmitter;

impl EffectEmitter for ConsoleEmitter {
    fn emit(&self, event: EffectEvent) {
        match event.kind {
            EffectKind::Correct => println!("  ✓ correct!"),
            EffectKind::Incorrect => println!("  ✗ wrong"),
            EffectKind::Timeout => println!("  ⏰ time's up"),
            EffectKind::SessionEnd(_) => {}
        }
    }
}

/// One JSON object per event on stdout.
struct JsonEmitter;

impl EffectEmitter for JsonEmitter {
    fn emit(&self, event: EffectEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{line}"),
            Err(err) => log::warn!("failed to encode effect {:?}: {err}", event.kind),
        }
    }
}

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// Seconds at which the countdown is called out.
const COUNTDOWN_CALLOUTS: [i64; 5] = [5, 4, 3, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    phase: SessionPhase,
    index: usize,
    locked: bool,
    countdown: i64,
    generation: u64,
}

/// Redraws only what changed since the previous frame.
#[derive(Debug, Default)]
struct Screen {
    last: Option<Frame>,
}

impl Screen {
    fn draw(&mut self, quiz: &QuizLoopService) -> Option<String> {
        let progress = quiz.progress();
        let session = quiz.session();
        let frame = Frame {
            phase: progress.phase,
            index: progress.current_index,
            locked: progress.input_locked,
            countdown: progress.countdown_secs(),
            generation: session.generation().value(),
        };
        let previous = self.last.replace(frame);
        if previous == Some(frame) {
            return None;
        }
        let new_view = previous.is_none_or(|p| {
            p.phase != frame.phase || p.index != frame.index || p.generation != frame.generation
        });

        match frame.phase {
            SessionPhase::Idle if new_view => Some(format!(
                "\n=== Quiz ===\n{} questions, {} s each. Press Enter to start.",
                progress.total,
                progress.question_time.num_seconds()
            )),
            SessionPhase::Active if new_view => {
                let question = session.current_question()?;
                let mut out = format!(
                    "\nQuestion {} / {}{:>12}{}\n{}\n",
                    progress.question_number(),
                    progress.total,
                    "Score: ",
                    progress.score,
                    question.prompt()
                );
                for (index, option) in question.options().iter().enumerate() {
                    out.push_str(&format!("  {}. {option}\n", option_label(index)));
                }
                out.push_str(&format!("  [{}s]", frame.countdown));
                Some(out)
            }
            SessionPhase::Active
                if !frame.locked && COUNTDOWN_CALLOUTS.contains(&frame.countdown) =>
            {
                Some(format!("  [{}s]", frame.countdown))
            }
            SessionPhase::Finished if new_view => {
                let summary = session.summary()?;
                Some(format!(
                    "\n=== Done ===\nYour score: {} %  ({}/{})\n{}\nPress Enter to play again, q to quit.",
                    summary.percent(),
                    summary.score,
                    summary.total,
                    summary.remark().as_str()
                ))
            }
            _ => None,
        }
    }
}

//
// ─── LOOP ──────────────────────────────────────────────────────────────────────
//

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let args = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    let bank = match &args.bank {
        Some(path) => QuestionBank::from_path(path)?,
        None => QuestionBank::builtin(),
    };
    let settings = args.settings.clone().validate()?;
    let emitter: Arc<dyn EffectEmitter> = if args.json {
        Arc::new(JsonEmitter)
    } else {
        Arc::new(ConsoleEmitter)
    };
    let session = QuizSession::new(bank, settings, emitter)?;
    let mut quiz = QuizLoopService::new(Clock::default_clock(), session);

    // The loop task is the only writer of session state; input reaches it
    // through this queue.
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(read_input(tx));

    let mut frames = tokio::time::interval(Duration::from_millis(1000 / args.fps));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut screen = Screen::default();

    loop {
        tokio::select! {
            _ = frames.tick() => {
                if let Some(transition) = quiz.tick() {
                    log::debug!("tick: {transition:?}");
                }
            }
            input = rx.recv() => match input {
                Some(Input::Intent(intent)) => {
                    if let Some(transition) = quiz.apply(intent)? {
                        log::debug!("{intent:?}: {transition:?}");
                    }
                }
                Some(Input::Unknown(raw)) => log::debug!("ignoring input {raw:?}"),
                Some(Input::Quit) | None => break,
            },
        }

        if let Some(text) = screen.draw(&quiz) {
            if args.json {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
