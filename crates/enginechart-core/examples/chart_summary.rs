use anyhow::Context;
use enginechart_core::prelude::*;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: chart_summary <engine_file> [boost]");
        return Ok(());
    }

    let path = &args[1];
    let settings = ChartSettings::default_path()
        .map(ChartSettings::load_or_default)
        .unwrap_or_default();

    let mut series = SampleSeries::with_settings(&settings);
    series
        .load_file(path)
        .with_context(|| format!("failed to load {}", path))?;

    if let Some(boost) = args.get(2) {
        let boost: i32 = boost.parse().context("boost must be an integer")?;
        series.set_actual_boost(boost)?;
    }

    println!("File: {}", series.source_name().unwrap_or(path));
    println!("Samples: {}", series.len());
    println!("Table keys: {}", series.table().len());

    let boost = series.boost();
    if boost.is_configured() {
        println!(
            "Boost: {} (max {}), wear x{:.3}",
            boost.actual_boost(),
            boost.max_boost_setting(),
            boost.wear_factor()
        );
    }

    if let Some(line) = series.max_power_summary() {
        println!("Max power:  {}", line);
    }
    if let Some(line) = series.max_torque_summary() {
        println!("Max torque: {}", line);
    }

    let units = series.units();
    let ranges = series.ranges();
    println!(
        "Power axis:  {:.1} .. {:.1} {}",
        ranges.power.min,
        ranges.power.max,
        units.power.label()
    );
    println!(
        "Torque axis: {:.1} .. {:.1} {}",
        ranges.torque.min,
        ranges.torque.max,
        units.torque.label()
    );
    println!("Fuel axis:   {:.4} .. {:.4}", ranges.fuel.min, ranges.fuel.max);

    Ok(())
}
