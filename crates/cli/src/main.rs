use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hyperrect::api::{Compact, GridCursor, Logger, Region, Vector, DEFAULT_ACCURACY};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod report;

#[derive(Parser)]
#[command(name = "hyperrect-cli")]
#[command(about = "Boxes, lattice walks and box algebra from the command line")]
struct Cmd {
    /// Write diagnostic sink records to this file (truncated on open)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print the lattice points of a box as a JSON array
    Grid {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        low: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        high: Vec<f64>,
        #[arg(long, value_delimiter = ',', required = true)]
        step: Vec<f64>,
        /// Axis priority, fastest axis first (default 0,1,..)
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<usize>>,
        /// Walk from the high corner towards the low corner
        #[arg(long)]
        backward: bool,
        #[arg(long, default_value_t = DEFAULT_ACCURACY)]
        accuracy: f64,
        /// Stop after this many points
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Combine two boxes and print the result as JSON
    Combine {
        #[arg(long, value_enum)]
        op: Op,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        a_low: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        a_high: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        b_low: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        b_high: Vec<f64>,
        #[arg(long, default_value_t = DEFAULT_ACCURACY)]
        accuracy: f64,
    },
    /// Print whether a point lies in the closed box
    Contains {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        low: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        high: Vec<f64>,
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        point: Vec<f64>,
    },
    /// Print version, code revision and default configuration
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Op {
    Union,
    Intersection,
    Convex,
}

#[derive(Debug, Serialize, PartialEq)]
struct BoxOut {
    low: Vec<f64>,
    high: Vec<f64>,
}

impl From<&Compact> for BoxOut {
    fn from(c: &Compact) -> Self {
        Self {
            low: c.low().to_vec(),
            high: c.high().to_vec(),
        }
    }
}

fn main() -> Result<()> {
    // stdout carries the JSON result
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let out = run(cmd)?;
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

fn run(cmd: Cmd) -> Result<serde_json::Value> {
    let logger = Logger::new();
    // keeps the sink open for the whole command
    let _session = logger.register();
    if let Some(path) = &cmd.log_file {
        logger
            .set_log_file(path)
            .with_context(|| format!("redirecting diagnostics to {}", path.display()))?;
    }
    let out = match cmd.action {
        Action::Grid {
            low,
            high,
            step,
            order,
            backward,
            accuracy,
            limit,
        } => {
            let pts = grid(&logger, &low, &high, &step, order, backward, accuracy, limit)?;
            serde_json::to_value(pts)?
        }
        Action::Combine {
            op,
            a_low,
            a_high,
            b_low,
            b_high,
            accuracy,
        } => {
            let a = make_box(&logger, &a_low, &a_high, accuracy).context("box a")?;
            let b = make_box(&logger, &b_low, &b_high, accuracy).context("box b")?;
            serde_json::to_value(combine(&logger, op, &a, &b, accuracy)?)?
        }
        Action::Contains { low, high, point } => {
            let c = make_box(&logger, &low, &high, DEFAULT_ACCURACY)?;
            let p = Vector::new(&point).context("point")?;
            serde_json::Value::Bool(c.contains(&p)?)
        }
        Action::Report => serde_json::to_value(report::Report::collect())?,
    };
    logger.flush();
    Ok(out)
}

fn make_box(logger: &Logger, low: &[f64], high: &[f64], accuracy: f64) -> Result<Compact> {
    let low = Vector::new(low).context("low corner")?;
    let high = Vector::new(high).context("high corner")?;
    Compact::new(&low, &high, accuracy, Some(logger)).with_context(|| format!("box {low} - {high}"))
}

#[allow(clippy::too_many_arguments)]
fn grid(
    logger: &Logger,
    low: &[f64],
    high: &[f64],
    step: &[f64],
    order: Option<Vec<usize>>,
    backward: bool,
    accuracy: f64,
    limit: Option<usize>,
) -> Result<Vec<Vec<f64>>> {
    let c = make_box(logger, low, high, accuracy)?;
    let step = Vector::new(step).context("step")?;
    let mut it = if backward {
        c.end_iter(&step)?
    } else {
        c.begin_iter(&step)?
    };
    if let Some(order) = order {
        it.set_direction(&order).context("axis order")?;
    }
    let limit = limit.unwrap_or(usize::MAX);
    if limit == 0 {
        bail!("--limit must be positive");
    }
    tracing::info!(points = c.lattice_len(&step)?, backward, "grid");
    Ok(it.into_points().take(limit).map(|p| p.to_vec()).collect())
}

fn combine(logger: &Logger, op: Op, a: &Compact, b: &Compact, accuracy: f64) -> Result<BoxOut> {
    let r = match op {
        Op::Union => Compact::union(a, b, accuracy, Some(logger)),
        Op::Intersection => Compact::intersection(a, b, accuracy, Some(logger)),
        Op::Convex => Compact::convex(a, b, accuracy, Some(logger)),
    };
    let c = r.with_context(|| format!("{op:?} of {a} and {b}"))?;
    Ok(BoxOut::from(&c))
}
