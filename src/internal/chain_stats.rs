#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

use chainmap::{ChainedHashTable, ConfigError, TableConfig, logger::initialize_logger};
use log::info;
use plotters::prelude::*;
use rand::Rng;

// Keys drawn for every run
const TOTAL_KEYS: usize = 100_000;
// Number of points sampled along each run
const NUM_CHECKPOINTS: usize = 10;
// Every run starts from the same bucket count so the rehash counts compare
const INITIAL_CAPACITY: usize = 16;

// Growth thresholds to compare
const LOAD_FACTORS: [f64; 4] = [0.5, 0.75, 1.0, 2.0];

const FONT_FAMILY: &str = "sans-serif";
const COLORS: [RGBColor; 4] = [
    RGBColor(220, 50, 50),  // Bright red
    RGBColor(50, 90, 220),  // Bright blue
    RGBColor(50, 180, 50),  // Bright green
    RGBColor(180, 50, 180), // Bright magenta
];
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: i32 = 4;
const TEXT_SIZE: i32 = 16;
const TITLE_SIZE: i32 = 35;

// Measurements of one run, one value per checkpoint
#[derive(Debug, Default)]
struct Series {
    average_scan: Vec<f64>,
    longest_chain: Vec<f64>,
    rehashes: Vec<f64>,
}

// Mean number of key comparisons for a successful lookup: the i-th entry of a
// chain is found after i comparisons.
fn average_scan_length(table: &ChainedHashTable<u64, u64>) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let comparisons: usize = table.chain_lengths().map(|len| len * (len + 1) / 2).sum();
    comparisons as f64 / table.len() as f64
}

fn simulate(
    max_load_factor: f64,
    keys: &[u64],
    checkpoints: &[usize],
) -> Result<Series, ConfigError> {
    let config = TableConfig::default()
        .with_initial_capacity(INITIAL_CAPACITY)
        .with_max_load_factor(max_load_factor);
    let mut table = ChainedHashTable::with_config(config)?;
    let mut series = Series::default();
    let mut rehashes = 0usize;
    let mut inserted = 0;

    for &checkpoint in checkpoints {
        for &key in &keys[inserted..checkpoint] {
            let capacity = table.capacity();
            table.insert(key, key);
            if table.capacity() != capacity {
                rehashes += 1;
            }
        }
        inserted = checkpoint;

        let average = average_scan_length(&table);
        series.average_scan.push(average);
        series.longest_chain.push(table.longest_chain() as f64);
        series.rehashes.push(rehashes as f64);

        info!(
            "  factor {max_load_factor}: {checkpoint} keys, {} buckets, avg scan = {average:.3}, \
             longest chain = {}, rehashes = {rehashes}",
            table.capacity(),
            table.longest_chain()
        );
    }

    Ok(series)
}

fn plot(
    path: &str,
    caption: &str,
    y_desc: &str,
    checkpoints: &[usize],
    values: &[Vec<f64>],
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = values.iter().flatten().fold(0.0_f64, |max, &x| max.max(x)) * 1.1; // Add 10% margin
    let max_y = if max_y > 0.0 { max_y } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..checkpoints.len(), 0.0..max_y)?;

    let x_labels: Vec<String> = checkpoints.iter().map(ToString::to_string).collect();

    chart
        .configure_mesh()
        .x_labels(checkpoints.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, TEXT_SIZE))
        .draw()?;

    for (idx, (factor, series)) in LOAD_FACTORS.iter().zip(values).enumerate() {
        let color = &COLORS[idx % COLORS.len()];
        let line_style = ShapeStyle::from(color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(
                series.iter().enumerate().map(|(i, &y)| (i, y)),
                line_style,
            ))?
            .label(format!("max load factor {factor}"))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            series.iter().enumerate().map(|(i, &y)| Circle::new((i, y), MARKER_SIZE, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();

    let checkpoints: Vec<usize> =
        (1..=NUM_CHECKPOINTS).map(|i| TOTAL_KEYS * i / NUM_CHECKPOINTS).collect();
    info!("Load factors: {LOAD_FACTORS:?}");
    info!("Checkpoints: {checkpoints:?}");

    // Same keys for every run to ensure fair comparison
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TOTAL_KEYS).map(|_| rng.random()).collect();

    let mut results = Vec::with_capacity(LOAD_FACTORS.len());
    for &factor in &LOAD_FACTORS {
        info!("Running with max load factor {factor}");
        results.push(simulate(factor, &keys, &checkpoints)?);
    }

    let average: Vec<Vec<f64>> = results.iter().map(|s| s.average_scan.clone()).collect();
    let longest: Vec<Vec<f64>> = results.iter().map(|s| s.longest_chain.clone()).collect();
    let rehashes: Vec<Vec<f64>> = results.iter().map(|s| s.rehashes.clone()).collect();

    plot(
        "average_scan_length.png",
        "Average Comparisons per Successful Lookup",
        "Key Comparisons",
        &checkpoints,
        &average,
    )?;
    plot("longest_chain.png", "Longest Bucket Chain", "Entries in Chain", &checkpoints, &longest)?;
    plot("rehash_count.png", "Cumulative Rehashes", "Rehashes", &checkpoints, &rehashes)?;

    info!("Generated plot images: average_scan_length.png, longest_chain.png, rehash_count.png");

    Ok(())
}
