//! Trajectory CLI - inspect, replay and reformat trajectory files headlessly.

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;

use trajectory_player::persist;
use trajectory_player::player::{Player, Settings};

/// Flags that take a value, so their value is not a positional argument.
const VALUE_FLAGS: &[&str] = &["--seconds", "--dt", "--speed", "--x", "--y"];

/// Upper bound on headless ticks per replay.
const MAX_STEPS: f32 = 10_000_000.0;

fn main() {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("trajectory-cli");

    // Parse global flags
    let mut level = LevelFilter::INFO;
    let mut config: Option<String> = None;
    let mut filtered_args: Vec<&str> = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-v" | "--verbose" => level = LevelFilter::DEBUG,
            "-vv" | "--trace" => level = LevelFilter::TRACE,
            "-q" | "--quiet" => level = LevelFilter::WARN,
            "--config" => config = iter.next().cloned(),
            _ => filtered_args.push(arg),
        }
    }

    let _trace_guard = init_tracing(level);

    if filtered_args.is_empty() {
        print_usage(prog);
        return;
    }

    if let Err(e) = run(prog, &filtered_args, config.as_deref()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(prog: &str, args: &[&str], config: Option<&str>) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path))?,
        None => Settings::load(),
    };

    match args[0] {
        "info" | "i" => {
            let file = positional(args, 1, "info <file>")?;
            cmd_info(file)
        }
        "play" | "p" => {
            let file = positional(args, 1, "play <file> [--seconds S] [--dt D] [--speed V]")?;
            let replay = Replay {
                seconds: flag_f32(args, "--seconds")?.unwrap_or(1.0),
                dt: flag_f32(args, "--dt")?.unwrap_or(1.0 / 60.0),
                speed: flag_f32(args, "--speed")?,
            };
            cmd_play(settings, file, replay)
        }
        "pick" => {
            let file = positional(args, 1, "pick <file> [--seconds S] [--speed V] [--x PX --y PY]")?;
            let replay = Replay {
                seconds: flag_f32(args, "--seconds")?.unwrap_or(0.0),
                dt: 1.0 / 60.0,
                speed: flag_f32(args, "--speed")?,
            };
            let x = flag_f32(args, "--x")?;
            let y = flag_f32(args, "--y")?;
            cmd_pick(settings, file, replay, x, y)
        }
        "format" | "f" => {
            let input = positional(args, 1, "format <in> <out>")?;
            let output = positional(args, 2, "format <in> <out>")?;
            cmd_format(input, output)
        }
        "settings" | "s" => cmd_settings(&settings, args.contains(&"--init")),
        "version" | "-V" | "--version" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_usage(prog);
            Ok(())
        }
        other => {
            // Assume it's a file path
            if Path::new(other).exists() {
                cmd_info(other)
            } else {
                print_usage(prog);
                bail!("unknown command: {}", other)
            }
        }
    }
}

fn print_usage(prog: &str) {
    println!("Trajectory CLI - inspect and replay trajectory files");
    println!();
    println!("Usage: {} [options] <command> ...", prog);
    println!();
    println!("Commands:");
    println!("  i, info <file>                      Objects, waypoint counts and loop lengths");
    println!("  p, play <file> [--seconds S] [--dt D] [--speed V]");
    println!("                                      Replay headlessly and print final positions");
    println!("  pick <file> [--seconds S] [--speed V] [--x PX --y PY]");
    println!("                                      Replay, then pick from the default camera");
    println!("  f, format <in> <out>                Load and re-save in canonical form");
    println!("  s, settings [--init]                Show settings (write defaults with --init)");
    println!("  version                             Show version and build date");
    println!("  h, help                             Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose        Debug output");
    println!("  -vv, --trace         Trace output (very verbose)");
    println!("  -q, --quiet          Warnings and errors only");
    println!("  --config <file>      Use this settings file instead of the user config");
}

fn print_version() {
    println!(
        "{} {} ({} build, {})",
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("TRAJECTORY_BUILD_PROFILE"),
        env!("TRAJECTORY_BUILD_TIME")
    );
}

fn cmd_info(path: &str) -> Result<()> {
    tracing::debug!("Opening trajectory file: {}", path);
    let lists = persist::load(path).with_context(|| format!("reading {}", path))?;

    println!("File: {}", path);
    println!("Objects: {}", lists.len());
    println!();

    let mut total = 0;
    for (index, list) in lists.iter().enumerate() {
        let traj = trajectory_player::trajectory::Trajectory::with_waypoints(
            list.first().copied().unwrap_or_default(),
            list.clone(),
        );
        total += list.len();
        if list.is_empty() {
            println!("  [{}] empty", index);
        } else {
            println!(
                "  [{}] {} waypoints, loop length {:.3}",
                index,
                list.len(),
                traj.loop_length()
            );
        }
    }
    println!();
    println!("Total waypoints: {}", total);
    Ok(())
}

fn cmd_play(settings: Settings, path: &str, replay: Replay) -> Result<()> {
    let player = replay.run(settings, path)?;

    println!("After {:.3}s:", replay.seconds);
    for (index, traj) in player.trajectories().iter().enumerate() {
        let p = traj.current;
        println!(
            "  [{}] ({:.4}, {:.4}, {:.4}) cursor {}/{}",
            index,
            p.x,
            p.y,
            p.z,
            traj.cursor(),
            traj.waypoints().len()
        );
    }
    Ok(())
}

fn cmd_pick(
    settings: Settings,
    path: &str,
    replay: Replay,
    x: Option<f32>,
    y: Option<f32>,
) -> Result<()> {
    let (w, h) = (settings.window_width, settings.window_height);
    let mut player = replay.run(settings, path)?;

    let (px, py) = (x.unwrap_or(w * 0.5), y.unwrap_or(h * 0.5));
    match player.click_pixel(px, py) {
        Some(index) => {
            let p = player.trajectories()[index].current;
            println!(
                "Hit object {} at ({:.4}, {:.4}, {:.4})",
                index, p.x, p.y, p.z
            );
        }
        None => println!("No object under ({}, {})", px, py),
    }
    Ok(())
}

fn cmd_format(input: &str, output: &str) -> Result<()> {
    let lists = persist::load(input).with_context(|| format!("reading {}", input))?;
    persist::save(output, &lists).with_context(|| format!("writing {}", output))?;
    println!(
        "Wrote {} objects, {} waypoints to {}",
        lists.len(),
        lists.iter().map(Vec::len).sum::<usize>(),
        output
    );
    Ok(())
}

fn cmd_settings(settings: &Settings, init: bool) -> Result<()> {
    if init {
        let path = Settings::default().save().context("writing default settings")?;
        println!("Wrote defaults to {}", path.display());
        return Ok(());
    }

    match Settings::path() {
        Some(p) => println!("Settings file: {}", p.display()),
        None => println!("Settings file: (no config directory)"),
    }
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// Headless playback parameters shared by `play` and `pick`.
#[derive(Debug, Clone, Copy)]
struct Replay {
    seconds: f32,
    dt: f32,
    /// Overrides the travel speed of every object
    speed: Option<f32>,
}

impl Replay {
    /// Fresh player with `path` loaded, ticked for `seconds` in steps of `dt`.
    fn run(&self, settings: Settings, path: &str) -> Result<Player> {
        let Replay { seconds, dt, speed } = *self;
        if !(dt > 0.0) {
            bail!("--dt must be positive");
        }
        if !(seconds >= 0.0) {
            bail!("--seconds must not be negative");
        }
        let steps = (seconds / dt).floor();
        if !(steps <= MAX_STEPS) {
            bail!(
                "--seconds {} at --dt {} needs more than {} ticks",
                seconds,
                dt,
                MAX_STEPS
            );
        }
        let steps = steps as usize;

        let mut player = Player::new(settings);
        player.load(path).with_context(|| format!("reading {}", path))?;
        if let Some(speed) = speed {
            if !(speed >= 0.0 && speed.is_finite()) {
                bail!("--speed must be a finite, non-negative number");
            }
            for index in 0..player.trajectories().len() {
                player.set_speed(index, speed)?;
            }
        }

        let _span = tracing::info_span!("replay", seconds, dt).entered();
        for _ in 0..steps {
            player.tick(dt);
        }
        let rest = seconds - steps as f32 * dt;
        if rest > 0.0 {
            player.tick(rest);
        }
        tracing::debug!("replayed {} steps of {}s", steps, dt);
        Ok(player)
    }
}

fn positional<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str> {
    let mut found = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            if VALUE_FLAGS.contains(arg) {
                iter.next();
            }
            continue;
        }
        found.push(*arg);
    }
    found
        .get(index - 1)
        .copied()
        .with_context(|| format!("usage: {}", usage))
}

fn flag_f32(args: &[&str], name: &str) -> Result<Option<f32>> {
    let Some(pos) = args.iter().position(|a| *a == name) else {
        return Ok(None);
    };
    let value = args
        .get(pos + 1)
        .with_context(|| format!("{} needs a value", name))?;
    let parsed = value
        .parse::<f32>()
        .with_context(|| format!("{} expects a number, got {}", name, value))?;
    Ok(Some(parsed))
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

#[cfg(not(feature = "chrome-trace"))]
fn init_tracing(level: LevelFilter) {
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt)
        .try_init();
}

/// Also records a Chrome trace to `trace.json` when `TRAJECTORY_TRACE=1`.
#[cfg(feature = "chrome-trace")]
fn init_tracing(level: LevelFilter) -> Option<tracing_chrome::FlushGuard> {
    let fmt = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt);

    if std::env::var("TRAJECTORY_TRACE").ok().as_deref() != Some("1") {
        let _ = registry.try_init();
        return None;
    }

    let (chrome_layer, guard) = tracing_chrome::ChromeLayerBuilder::new()
        .file("trace.json")
        .build();
    registry.with(chrome_layer).try_init().ok().map(|_| guard)
}
