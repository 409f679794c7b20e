use clap::Parser;
use std::path::PathBuf;
use temp_converter_core::core_types::REFERENCE_POINTS;
use temp_converter_core::{
    load_model, panel, save_model, JsonFilePreferences, Scale, TemperatureModel,
    TemperatureReading,
};
use tracing_subscriber::EnvFilter;

/// One-shot temperature conversion with optional saved preference
#[derive(Parser, Debug)]
#[command(name = "temp-convert")]
#[command(about = "Convert a temperature between Celsius, Fahrenheit and Kelvin", long_about = None)]
struct Args {
    /// Scale of the input value (celsius, fahrenheit, kelvin or c/f/k)
    #[arg(short, long, default_value = "celsius")]
    scale: Scale,

    /// Value to convert; omit to show the restored (or default) reading
    #[arg(short, long, allow_hyphen_values = true)]
    value: Option<f64>,

    /// JSON preference file to restore from and save to
    #[arg(short, long)]
    prefs: Option<PathBuf>,

    /// Print the reference temperature table
    #[arg(short, long)]
    references: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // An unreadable file is replaced by the save below
    let mut store = args.prefs.as_ref().map(|path| {
        JsonFilePreferences::open(path).unwrap_or_else(|e| {
            tracing::warn!("Replacing unreadable preference file {}: {}", path.display(), e);
            JsonFilePreferences::empty(path)
        })
    });

    let mut model = match &store {
        Some(store) => load_model(store).unwrap_or_else(|e| {
            tracing::warn!("Could not restore temperature: {}", e);
            TemperatureModel::default()
        }),
        None => TemperatureModel::default(),
    };

    if let Some(value) = args.value {
        model.set(args.scale, value);
    }

    print_reading(&model.reading());

    if args.references {
        println!();
        print_references();
    }

    if let Some(store) = store.as_mut() {
        match save_model(&model, store) {
            Ok(()) => println!("\nSaved to {}", store.path().display()),
            Err(e) => eprintln!("\nFailed to save: {}", e),
        }
    }
}

fn print_reading(reading: &TemperatureReading) {
    for slider in panel(reading) {
        let value = reading.value(slider.spec.scale);
        println!(
            "{:<11} {:>12.2} {:<2}  (slider {:>5} of [{}, {}])",
            slider.spec.label,
            value,
            slider.spec.unit,
            slider.position,
            slider.spec.bounds.min,
            slider.spec.bounds.max
        );
    }
}

fn print_references() {
    println!("{:<42} {:>9} {:>9} {:>9}", "Reference", "°C", "°F", "K");
    for point in REFERENCE_POINTS {
        let reading = TemperatureReading::from_fahrenheit(point.temperature);
        println!(
            "{:<42} {:>9.2} {:>9.2} {:>9.2}",
            point.name,
            reading.value(Scale::Celsius),
            reading.value(Scale::Fahrenheit),
            reading.value(Scale::Kelvin)
        );
    }
}
