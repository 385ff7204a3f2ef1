//! scene-numeric CLI - inspect numeric kinds and evaluate keyframe tracks.

use anyhow::{bail, Context, Result};
use scene_numeric::interp::Track;
use scene_numeric::util::AttributeLayout;
use scene_numeric::NumericKind;
use std::env;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the log filter.
const LOG_ENV: &str = "SCENE_NUMERIC_LOG";

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut level = "warn";
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = "debug",
            "-vv" | "--trace" => level = "trace",
            "-q" | "--quiet" => level = "error",
            _ => filtered_args.push(arg),
        }
    }
    init_logging(level);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    let outcome = match filtered_args[0] {
        "kinds" | "k" => {
            cmd_kinds();
            Ok(())
        }
        "sample" | "s" => cmd_sample(&filtered_args[1..]),
        "sweep" | "w" => cmd_sweep(&filtered_args[1..]),
        "version" | "-V" | "--version" => {
            print_version();
            Ok(())
        }
        "help" | "h" | "-h" | "--help" => {
            print_help();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_version() {
    println!(
        "scene-numeric {} (built {} {})",
        env!("CARGO_PKG_VERSION"),
        env!("SCENE_NUMERIC_BUILD_DATE"),
        env!("SCENE_NUMERIC_BUILD_TIME"),
    );
}

fn print_help() {
    println!("scene-numeric - attribute kinds and keyframe track evaluation");
    println!();
    println!("USAGE:");
    println!("    scene-numeric [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    k, kinds                                List numeric kinds and common layouts");
    println!("    s, sample <track.json> <time>...        Evaluate a track at the given times");
    println!("    w, sweep  <track.json> <start> <end> <steps>");
    println!("                                            Evaluate evenly spaced times (inclusive)");
    println!("    version                                 Show version and build stamp");
    println!("    h, help                                 Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (interval searches)");
    println!("    -q, --quiet      Only show errors");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}    tracing filter, overrides -v/-q (e.g. scene_numeric=trace)", LOG_ENV);
    println!();
    println!("TRACK FILE:");
    println!(r#"    {{ "times": [0, 1, 2], "values": [10, 20, 30], "value_size": 1, "mode": "linear" }}"#);
    println!("    mode: discrete | linear | cubic | quaternion");
}

fn cmd_kinds() {
    println!("{:<14} {:>5}  {}", "KIND", "BYTES", "CLASS");
    for kind in NumericKind::ALL {
        let class = if kind.is_float() { "float" } else { "integer" };
        println!("{:<14} {:>5}  {}", kind.name(), kind.byte_width(), class);
    }
    println!();
    println!("{:<14} {:<14} {:>5}", "LAYOUT", "TYPE", "BYTES");
    let layouts = [
        ("position", AttributeLayout::POSITION),
        ("normal", AttributeLayout::NORMAL),
        ("color", AttributeLayout::COLOR),
        ("uv", AttributeLayout::UV),
        ("tangent", AttributeLayout::TANGENT),
        ("skin_index", AttributeLayout::SKIN_INDEX),
        ("skin_weight", AttributeLayout::SKIN_WEIGHT),
        ("index16", AttributeLayout::INDEX16),
        ("index32", AttributeLayout::INDEX32),
    ];
    for (name, layout) in layouts {
        println!("{:<14} {:<14} {:>5}", name, layout.to_string(), layout.item_bytes());
    }
}

fn parse_time(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("invalid time '{}'", s))
}

fn load_track(path: &str) -> Result<Track> {
    Track::load(path).with_context(|| format!("failed to load track {}", path))
}

fn cmd_sample(args: &[&str]) -> Result<()> {
    let Some((&path, times)) = args.split_first() else {
        bail!("missing track argument\nUsage: scene-numeric sample <track.json> <time>...");
    };
    if times.is_empty() {
        bail!("missing time arguments\nUsage: scene-numeric sample <track.json> <time>...");
    }

    let track = load_track(path)?;
    let mut interp = track.interpolant()?;
    for &t in times {
        let t = parse_time(t)?;
        let value = interp.evaluate(t)?;
        println!("{}\t{}", t, format_values(value));
    }
    Ok(())
}

fn cmd_sweep(args: &[&str]) -> Result<()> {
    let [path, start, end, steps] = args else {
        bail!("expected 4 arguments\nUsage: scene-numeric sweep <track.json> <start> <end> <steps>");
    };
    let start = parse_time(start)?;
    let end = parse_time(end)?;
    let steps: usize = steps
        .parse()
        .with_context(|| format!("invalid step count '{}'", steps))?;
    if steps < 2 {
        bail!("step count must be at least 2");
    }

    let track = load_track(path)?;
    let mut interp = track.interpolant()?;
    let span = end - start;
    for i in 0..steps {
        let t = start + span * (i as f64) / ((steps - 1) as f64);
        let value = interp.evaluate(t)?;
        println!("{:.6}\t{}", t, format_values(value));
    }
    tracing::debug!(cached_index = interp.cached_index(), "sweep finished");
    Ok(())
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{}", v))
        .collect::<Vec<_>>()
        .join(" ")
}
