use std::fs::File;
use std::io;
use std::process;

use clap::{App, Arg};
use log::{error, info};

use linescreen::{
    analyze, ingest, report, CoordOrder, DegreeFormat, Error, PlotBundle, Result,
    DEFAULT_THRESHOLD_M,
};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        error!("fatal error: {}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let default_threshold = DEFAULT_THRESHOLD_M.to_string();
    let matches = App::new("linescreen")
        .about("Screens a pipeline against a powerline for crossings and proximity")
        .arg(
            Arg::with_name("powerline")
                .long("powerline")
                .value_name("FILE")
                .help("Powerline polyline file (header line, then one coordinate pair per line)")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("pipeline")
                .long("pipeline")
                .value_name("FILE")
                .help("Pipeline polyline file")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("threshold")
                .long("threshold")
                .value_name("METERS")
                .help("Proximity threshold in meters")
                .default_value(&default_threshold)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("order")
                .long("order")
                .value_name("ORDER")
                .help("Coordinate column order of the input files")
                .possible_values(&["auto", "lonlat", "latlon"])
                .default_value("auto")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dms")
                .long("dms")
                .help("Report coordinates in degree-minute-second notation"),
        )
        .arg(
            Arg::with_name("csv-out")
                .long("csv-out")
                .value_name("FILE")
                .help("Write both result sets as CSV")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("plot-out")
                .long("plot-out")
                .value_name("FILE")
                .help("Write a JSON plot bundle for an external plotting tool")
                .takes_value(true),
        )
        .get_matches();

    let threshold: f64 = matches
        .value_of("threshold")
        .unwrap()
        .parse()
        .map_err(|_| Error::InvalidInput("threshold is not a number".to_string()))?;

    let order = match matches.value_of("order").unwrap() {
        "lonlat" => CoordOrder::LonLat,
        "latlon" => CoordOrder::LatLon,
        _ => CoordOrder::Auto,
    };

    let powerline = ingest::read_polyline(matches.value_of("powerline").unwrap(), order)?;
    let pipeline = ingest::read_polyline(matches.value_of("pipeline").unwrap(), order)?;
    info!(
        "loaded {} powerline and {} pipeline vertices, threshold {} m",
        powerline.len(),
        pipeline.len(),
        threshold
    );

    let result = analyze(&powerline, &pipeline, threshold)?;

    let format = if matches.is_present("dms") {
        DegreeFormat::Dms
    } else {
        DegreeFormat::Decimal
    };
    report::write_report(&mut io::stdout().lock(), &result, format)?;

    if let Some(path) = matches.value_of("csv-out") {
        report::write_csv(File::create(path)?, &result)?;
        info!("results written to {}", path);
    }
    if let Some(path) = matches.value_of("plot-out") {
        PlotBundle::new(&powerline, &pipeline, threshold, &result).write_json(path)?;
        info!("plot bundle written to {}", path);
    }

    Ok(())
}
