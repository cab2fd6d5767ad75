use std::{error::Error, fs, path::PathBuf, process::exit};

use clap::Parser;
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};
use tracing_subscriber::filter::LevelFilter;

use cashflow_charts::{
    ChartConfig, Granularity, Padding, SeriesFilter, aggregate,
    aggregation::DEFAULT_TREND_THRESHOLD,
    input::{MovementFormat, parse_movements},
    logging, render,
    svg::chart_svg,
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Draws a line chart of money in and money out from a file of account movements.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to a CSV (`timestamp,amount,kind`) or JSON file of movements.
    #[arg(long, short)]
    input: PathBuf,

    /// The format of the input file. Guessed from the file extension if omitted.
    #[arg(long, value_enum)]
    format: Option<MovementFormat>,

    /// File path to write the chart to. Writes to stdout if omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write the chart geometry and the aggregated buckets as JSON instead of SVG.
    #[arg(long)]
    json: bool,

    /// The calendar unit of each point on the chart.
    #[arg(long, short, value_enum, default_value_t = Granularity::Day)]
    granularity: Granularity,

    /// How many days, weeks or months to show.
    #[arg(long, short, default_value_t = 7)]
    periods: u32,

    /// The last date to show, as YYYY-MM-DD. Defaults to today.
    #[arg(long, value_parser = parse_date)]
    end_date: Option<Date>,

    /// Which series to draw.
    #[arg(long, short, value_enum, default_value_t = SeriesFilter::Both)]
    series: SeriesFilter,

    /// The canonical timezone whose midnight starts each day, e.g. "Pacific/Auckland".
    #[arg(long, env = "CHART_TIMEZONE", default_value = "UTC")]
    timezone: String,

    /// The relative change needed to call a series rising or falling.
    #[arg(long, default_value_t = DEFAULT_TREND_THRESHOLD)]
    trend_threshold: Decimal,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 400.0)]
    height: f64,

    /// Space between the edge of the chart and the graph, on every side.
    /// Uses room for the axis labels if omitted.
    #[arg(long)]
    padding: Option<f64>,

    /// Log debug output to stderr.
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            granularity: self.granularity,
            periods: self.periods,
            end_date: self.end_date,
            series: self.series,
            width: self.width,
            height: self.height,
            padding: self.padding.map(Padding::uniform).unwrap_or_default(),
            timezone: self.timezone.clone(),
            trend_threshold: self.trend_threshold,
        }
    }
}

fn parse_date(text: &str) -> Result<Date, String> {
    Date::parse(text, DATE_FORMAT).map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    logging::init(if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    });

    let Some(format) = args
        .format
        .or_else(|| MovementFormat::from_path(&args.input))
    else {
        eprintln!(
            "Could not tell the format of {:#?}, use --format csv or --format json.",
            args.input
        );
        exit(1);
    };

    let config = args.chart_config();
    let options = config.aggregation_options(OffsetDateTime::now_utc())?;
    let canvas = config.canvas()?;

    let text = fs::read_to_string(&args.input)?;
    let movements = parse_movements(&text, format, &options.timezone)?;

    tracing::info!(
        "Charting {} movements from {} to {}",
        movements.len(),
        options.window.start(),
        options.window.end()
    );

    let result = aggregate(&movements, &options)?;
    let geometry = render(&result, config.series, &canvas);

    let output = if args.json {
        serde_json::to_string_pretty(&serde_json::json!({
            "aggregation": result,
            "geometry": geometry,
        }))
        .map_err(|error| cashflow_charts::Error::JsonSerialization(error.to_string()))?
    } else {
        chart_svg(&geometry).into_string()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            tracing::info!("Wrote chart to {path:#?}");
        }
        None => println!("{output}"),
    }

    Ok(())
}
