use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};

use termfireworks::color;
use termfireworks::config::{Config, Preset};
use termfireworks::error::{Error, Result};
use termfireworks::fireworks::show::Show as FireworksShow;
use termfireworks::scheduler::Scheduler;
use termfireworks::surface::Surface;
use termfireworks::surface::canvas::Canvas;
use termfireworks::surface::terminal::TerminalPresenter;

// Upper bound on how long the loop blocks waiting for input while idle
const IDLE_POLL: Duration = Duration::from_millis(100);

fn print_usage() {
    eprintln!("termfireworks - Autonomous fireworks for the terminal");
    eprintln!();
    eprintln!("Usage: termfireworks [PRESET] [OPTIONS]");
    eprintln!();
    eprintln!("Presets:");
    eprintln!("  columns   Rockets rise in two side columns, bursts stay in their column (default)");
    eprintln!("  panels    Two side-by-side panels with glowing rockets on a light sky");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Sky colour that frames fade towards (e.g., --bg-color 1a1b26)");
    eprintln!("  --fps N            Display refresh rate (default 60)");
    eprintln!("  --max N            Maximum rockets in flight per panel");
    eprintln!("  --burst N          Particles per burst");
    eprintln!("  --scale F          Logical pixels per terminal pixel (default 4)");
    eprintln!("  --log-file PATH    Write logs to PATH");
    eprintln!("  --verbose          Log launches and bursts as well");
    eprintln!();
    eprintln!("Press space to pause, 'q', ESC, or Ctrl+C to exit");
}

#[derive(Debug)]
struct Options {
    config: Config,
    log_file: Option<PathBuf>,
    verbose: bool,
}

#[derive(Debug)]
enum Command {
    Run(Options),
    Help,
}

fn option_value(args: &[String], i: usize) -> Result<&str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| Error::InvalidArgument(format!("{} requires a value", args[i])))
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::InvalidArgument(format!("Invalid value for {flag}: {value}")))
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut preset = Preset::Columns;
    let mut bg_color = None;
    let mut fps = None;
    let mut max_active = None;
    let mut burst = None;
    let mut scale = None;
    let mut log_file = None;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--bg-color" => {
                let value = option_value(args, i)?;
                let color = color::parse_hex(value).ok_or_else(|| {
                    Error::InvalidArgument(format!(
                        "Invalid hex color: {value}\nExpected format: RRGGBB (e.g., 1a1b26)"
                    ))
                })?;
                bg_color = Some(color);
                i += 2;
            }
            "--fps" => {
                fps = Some(parse_number::<u32>("--fps", option_value(args, i)?)?);
                i += 2;
            }
            "--max" => {
                max_active = Some(parse_number::<usize>("--max", option_value(args, i)?)?);
                i += 2;
            }
            "--burst" => {
                burst = Some(parse_number::<usize>("--burst", option_value(args, i)?)?);
                i += 2;
            }
            "--scale" => {
                let value: f32 = parse_number("--scale", option_value(args, i)?)?;
                if !(value > 0.0) {
                    return Err(Error::InvalidArgument(format!("--scale must be positive, got {value}")));
                }
                scale = Some(value);
                i += 2;
            }
            "--log-file" => {
                log_file = Some(PathBuf::from(option_value(args, i)?));
                i += 2;
            }
            "--verbose" | "-v" => {
                verbose = true;
                i += 1;
            }
            "help" | "--help" | "-h" => return Ok(Command::Help),
            arg => {
                if arg.starts_with('-') {
                    return Err(Error::InvalidArgument(format!("Unknown option: {arg}")));
                }
                preset = Preset::from_name(arg)
                    .ok_or_else(|| Error::InvalidArgument(format!("Unknown preset: {arg}")))?;
                i += 1;
            }
        }
    }

    // Overrides apply on top of whichever preset was named, wherever it appeared
    let mut config = Config::preset(preset);
    if let Some(color) = bg_color {
        config.fade.color = color;
    }
    if let Some(fps) = fps {
        config.fps = fps.max(1);
    }
    if let Some(max_active) = max_active {
        config.spawn.max_active = max_active;
    }
    if let Some(count) = burst {
        config.burst.count = count;
    }
    if let Some(scale) = scale {
        config.pixel_scale = scale;
    }

    Ok(Command::Run(Options { config, log_file, verbose }))
}

fn init_logging(path: &Path, verbose: bool) -> Result<()> {
    let file = File::create(path)?;
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}

fn run(config: Config) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        return Err(Error::NotATerminal);
    }
    let (cols, rows) = terminal::size()?;
    if cols == 0 || rows == 0 {
        return Err(Error::SurfaceUnavailable { width: cols, height: rows });
    }

    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let result = event_loop(&mut stdout, config, cols, rows);

    // Always hand the terminal back, even when the loop failed
    let restored = execute!(stdout, Show, LeaveAlternateScreen)
        .and_then(|_| terminal::disable_raw_mode());
    if let Err(err) = &restored {
        warn!(%err, "failed to restore terminal");
    }
    result.and(restored.map_err(Error::from))
}

fn event_loop<W: Write>(out: &mut W, config: Config, cols: u16, rows: u16) -> Result<()> {
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2, config.pixel_scale, config.fade.color);
    let mut presenter = TerminalPresenter::new();
    let mut scheduler = Scheduler::new(config.fps);
    let mut show = FireworksShow::new(config, canvas.width(), canvas.height(), fastrand::Rng::new());

    info!(
        cols,
        rows,
        width = canvas.width(),
        height = canvas.height(),
        "surface ready"
    );
    show.start(&mut scheduler);

    loop {
        let timeout = scheduler.time_until_frame().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key_event) => {
                    if key_event.code == KeyCode::Char('q')
                        || key_event.code == KeyCode::Esc
                        || (key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL))
                    {
                        break;
                    }
                    if key_event.code == KeyCode::Char(' ') {
                        if show.is_running() {
                            show.stop(&mut scheduler);
                        } else {
                            show.start(&mut scheduler);
                        }
                    }
                }
                Event::Resize(cols, rows) => {
                    canvas.resize(cols as usize, rows as usize * 2);
                    show.resize(canvas.width(), canvas.height());
                    execute!(out, Clear(ClearType::All))?;
                    presenter.present(&canvas, out)?;
                }
                _ => {}
            }
        }

        if let Some(timestamp) = scheduler.take_frame() {
            if show.frame(timestamp, &mut canvas, &mut scheduler) {
                presenter.present(&canvas, out)?;
            }
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Some(path) = &options.log_file {
        if let Err(err) = init_logging(path, options.verbose) {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }

    if let Err(err) = run(options.config) {
        eprintln!("termfireworks: {err}");
        std::process::exit(1);
    }
}
