//! Interactive Temperature Converter
//!
//! A terminal stand-in for the three-slider screen. Each slider is drawn as a
//! text bar and redrawn whenever the model announces a change.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive -- --prefs temperature_prefs.json
//! ```
//!
//! # Commands
//!
//! - `c <value>` / `f <value>` / `k <value>` - Drag a slider to a value
//! - `nudge <scale> <delta>` - Move a slider relative to its current value
//! - `show` - Redraw the sliders
//! - `refs` - List reference temperatures
//! - `about` - Show the about dialog
//! - `help` - Show available commands
//! - `quit` - Save and exit

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use temp_converter_core::core_types::REFERENCE_POINTS;
use temp_converter_core::{
    load_model, panel, save_model, JsonFilePreferences, Scale, SliderSpec, TemperatureModel,
    TemperatureReading, ABOUT,
};
use tracing_subscriber::EnvFilter;

/// Width of a drawn slider track in characters
const TRACK_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "temp-sliders")]
#[command(about = "Three linked temperature sliders in the terminal", long_about = None)]
struct Args {
    /// JSON preference file holding the last Celsius reading
    #[arg(short, long, default_value = "temperature_prefs.json")]
    prefs: PathBuf,
}

/// A parsed REPL line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Set(Scale, f64),
    Nudge(Scale, f64),
    Show,
    References,
    About,
    Help,
    Quit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║                 Temperature Converter                     ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    // Screen created: restore the last reading
    let mut store = open_preferences(&args.prefs);
    let mut model = load_model(&store).unwrap_or_else(|e| {
        tracing::warn!("Could not restore temperature: {}", e);
        TemperatureModel::default()
    });

    model.subscribe(draw_sliders);
    draw_sliders(&model.reading());

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create readline: {}", e);
            return;
        }
    };

    println!("\nType 'help' for available commands.\n");

    loop {
        match rl.readline("temp> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => run_command(&mut model, command),
                    Err(usage) => println!("{}", usage),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    // Screen hidden: remember the reading
    match save_model(&model, &mut store) {
        Ok(()) => println!("Saved {:.2} °C to {}", model.celsius(), store.path().display()),
        Err(e) => eprintln!("Failed to save: {}", e),
    }
}

/// Open the preference file, starting over with an empty one if it cannot be
/// read. The next save then replaces the unreadable file.
fn open_preferences(path: &Path) -> JsonFilePreferences {
    JsonFilePreferences::open(path).unwrap_or_else(|e| {
        tracing::warn!("Replacing unreadable preference file {}: {}", path.display(), e);
        JsonFilePreferences::empty(path)
    })
}

fn run_command(model: &mut TemperatureModel, command: Command) {
    match command {
        Command::Set(scale, value) => drag(model, scale, value),
        Command::Nudge(scale, delta) => drag(model, scale, model.value(scale) + delta),
        Command::Show => draw_sliders(&model.reading()),
        Command::References => show_references(),
        Command::About => show_about(),
        Command::Help => show_help(),
        Command::Quit => {}
    }
}

/// Push a user-driven slider change into the model, clamped to the track.
fn drag(model: &mut TemperatureModel, scale: Scale, value: f64) {
    let spec = SliderSpec::for_scale(scale);
    let clamped = spec.clamp_input(value);
    if !spec.bounds.contains(value) {
        println!("{} slider stops at {}", scale, clamped);
    }
    model.set(scale, clamped);
}

fn parse_command(line: &str) -> Result<Command, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return Err("Type 'help' for available commands.".to_string());
    };
    let number = |idx: usize| parts.get(idx).and_then(|s| s.parse::<f64>().ok());

    match first.to_lowercase().as_str() {
        "show" | "s" => Ok(Command::Show),
        "refs" | "r" => Ok(Command::References),
        "about" | "a" => Ok(Command::About),
        "help" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "nudge" | "n" => {
            let scale = parts.get(1).and_then(|s| s.parse::<Scale>().ok());
            match (scale, number(2)) {
                (Some(scale), Some(delta)) => Ok(Command::Nudge(scale, delta)),
                _ => Err("Usage: nudge <c|f|k> <delta>".to_string()),
            }
        }
        other => match other.parse::<Scale>() {
            Ok(scale) => number(1)
                .map(|value| Command::Set(scale, value))
                .ok_or_else(|| format!("Usage: {} <value>", other)),
            Err(_) => Err(format!("Unknown command '{}'. Type 'help'.", first)),
        },
    }
}

/// Render one slider as a text track with a thumb.
fn slider_bar(fraction: f64) -> String {
    let thumb = (fraction * (TRACK_WIDTH - 1) as f64).round() as usize;
    let thumb = thumb.min(TRACK_WIDTH - 1);
    (0..TRACK_WIDTH)
        .map(|i| if i == thumb { '●' } else { '─' })
        .collect()
}

fn draw_sliders(reading: &TemperatureReading) {
    for slider in panel(reading) {
        println!(
            "  {:<11} {:>6} [{}] {:>6} {:<2}",
            slider.spec.label,
            slider.spec.bounds.min,
            slider_bar(slider.fraction),
            slider.position,
            slider.spec.unit
        );
    }
    println!();
}

fn show_references() {
    println!("\n═══════════════ REFERENCE POINTS ═══════════════");
    for point in REFERENCE_POINTS {
        let reading = TemperatureReading::from_fahrenheit(point.temperature);
        println!(
            "  {:<42} {} / {} / {}",
            point.name,
            reading.celsius(),
            reading.fahrenheit(),
            reading.kelvin()
        );
    }
    println!();
}

fn show_about() {
    println!("\n── {} ──", ABOUT.title);
    println!("{}", ABOUT.message);
    println!("[{}]\n", ABOUT.dismiss_label);
}

fn show_help() {
    println!("\n═══════════════ AVAILABLE COMMANDS ═══════════════");
    println!("  c <value>              - Set Celsius");
    println!("  f <value>              - Set Fahrenheit");
    println!("  k <value>              - Set Kelvin");
    println!("  nudge, n <scale> <d>   - Move a slider by d");
    println!("  show, s                - Redraw the sliders");
    println!("  refs, r                - List reference temperatures");
    println!("  about, a               - About this app");
    println!("  help, ?                - Show this help");
    println!("  quit, q                - Save and exit");
    println!("══════════════════════════════════════════════════\n");
}
