//! Command-line interface
//!
//! ```text
//! ngn-dimensioning [--config PATH] [--log-level LEVEL] [--json-logs] <COMMAND>
//!
//!   serve   [--bind ADDR]                  run the HTTP service
//!   size    --subscribers N --ratio R ...  size circuits and bandwidth
//!   mos     --latency MS --jitter MS ...   estimate call quality
//!   codecs                                 list supported codecs
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use ngn_dimensioning_core::wire::{
    DimensioningRequestDto, DimensioningResponseDto, QosRequestDto, QosResponseDto,
    codec_catalog_dto, reported_quality, round_to,
};
use ngn_dimensioning_core::{
    CodecListing, DimensioningRequest, DimensioningResult, DimensioningService, QosRequest,
    QosResult, QualityLevel,
};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api;
use crate::config::ServerConfig;
use crate::logging::{log_welcome, parse_log_level, setup_logging};

#[derive(Parser, Debug)]
#[command(
    name = "ngn-dimensioning",
    about = "Erlang B trunk sizing and E-model voice quality for NGN/VoIP networks",
    version
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Listen address, e.g. 0.0.0.0:5000
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Size circuits, trunks and bandwidth for a subscriber population
    Size(SizeArgs),

    /// Estimate MOS and R-factor from network impairments
    Mos(MosArgs),

    /// List supported codecs
    Codecs {
        /// Print the JSON body the HTTP service would return
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Number of subscribers
    #[arg(long)]
    pub subscribers: i64,

    /// Busy-hour fraction of subscribers calling, in (0, 1]
    #[arg(long)]
    pub ratio: f64,

    /// Mean call duration in seconds
    #[arg(long)]
    pub duration: f64,

    /// Codec name (G.711, G.729, G.722, Opus)
    #[arg(long, default_value = "G.711")]
    pub codec: String,

    /// Available link capacity in Mbps
    #[arg(long)]
    pub bandwidth: f64,

    /// Target blocking probability, in (0, 1)
    #[arg(long, default_value_t = 0.01)]
    pub gos: f64,

    /// Print the JSON body the HTTP service would return
    #[arg(long)]
    pub json: bool,
}

impl From<&SizeArgs> for DimensioningRequestDto {
    fn from(args: &SizeArgs) -> Self {
        Self {
            subscribers: args.subscribers,
            concurrent_ratio: args.ratio,
            avg_call_duration_s: args.duration,
            codec: args.codec.clone(),
            available_bandwidth_mbps: args.bandwidth,
            target_gos: args.gos,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MosArgs {
    /// One-way latency in ms
    #[arg(long)]
    pub latency: f64,

    /// Jitter in ms
    #[arg(long, default_value_t = 0.0)]
    pub jitter: f64,

    /// Packet loss ratio, in [0, 1)
    #[arg(long, default_value_t = 0.0)]
    pub loss: f64,

    /// Codec name (G.711, G.729, G.722, Opus)
    #[arg(long, default_value = "G.711")]
    pub codec: String,

    /// Print the JSON body the HTTP service would return
    #[arg(long)]
    pub json: bool,
}

impl From<&MosArgs> for QosRequestDto {
    fn from(args: &MosArgs) -> Self {
        Self {
            latency_ms: args.latency,
            jitter_ms: args.jitter,
            loss_ratio: args.loss,
            codec: args.codec.clone(),
        }
    }
}

/// Execute the parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(level) = &cli.log_level {
        parse_log_level(level)?;
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.json = true;
    }

    let logging = config.logging.to_logging_config("ngn-dimensioning")?;
    setup_logging(&logging)?;

    let service = DimensioningService::new(config.engine.clone()).context("building engine")?;

    match cli.command {
        Command::Serve { bind } => {
            log_welcome(&logging.app_name, env!("CARGO_PKG_VERSION"));
            tracing::info!(
                "Circuit ceiling {}, trunk unit {} circuits",
                service.sizer().max_circuits(),
                service.sizer().trunk_unit()
            );
            let bind = bind.unwrap_or(config.bind_address);
            api::serve(&bind, service)
                .await
                .with_context(|| format!("serving on {}", bind))?;
        }
        Command::Size(args) => {
            let request = DimensioningRequest::try_from(&DimensioningRequestDto::from(&args))?;
            let result = service.dimension(&request)?;
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&DimensioningResponseDto::from(&result))?
                );
            } else {
                println!("{}", render_dimensioning(&request, &result));
            }
        }
        Command::Mos(args) => {
            let request = QosRequest::try_from(&QosRequestDto::from(&args))?;
            let result = service.estimate_quality(&request)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&QosResponseDto::from(&result))?);
            } else {
                println!("{}", render_quality(&request, &result));
            }
        }
        Command::Codecs { json } => {
            let listings = service.codecs();
            if json {
                println!("{}", serde_json::to_string_pretty(&codec_catalog_dto(&listings))?);
            } else {
                println!("{}", render_codecs(&listings));
            }
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    metric: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

fn row(metric: &'static str, value: impl ToString) -> MetricRow {
    MetricRow {
        metric,
        value: value.to_string(),
    }
}

#[derive(Tabled)]
struct CodecRow {
    #[tabled(rename = "CODEC")]
    codec: String,
    #[tabled(rename = "VOICE (kbps)")]
    bitrate: String,
    #[tabled(rename = "PER CALL (kbps)")]
    per_call: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

/// Table view of a sizing result
pub fn render_dimensioning(request: &DimensioningRequest, result: &DimensioningResult) -> String {
    let verdict = if result.capacity_sufficient {
        "yes".green().bold()
    } else {
        "NO".red().bold()
    };
    let rows = vec![
        row("Codec", request.codec()),
        row("Offered traffic", result.traffic),
        row(
            "Busy-hour calls",
            round_to(result.details.concurrent_calls, 0),
        ),
        row("Required circuits", result.required_circuits),
        row(
            "Recommended trunks",
            format!(
                "{} ({} groups)",
                result.recommended_trunks, result.details.trunk_groups
            ),
        ),
        row("Achieved GOS", format!("{:.6}", result.achieved_gos)),
        row(
            "Per-call bandwidth",
            format!("{} kbps", round_to(result.details.per_call_bandwidth_kbps, 2)),
        ),
        row(
            "Consumed bandwidth",
            format!("{:.2} Mbps", result.consumed_bandwidth_mbps),
        ),
        row(
            "Available bandwidth",
            format!("{} Mbps", result.details.available_bandwidth_mbps),
        ),
        row(
            "Headroom",
            format!("{:.2} Mbps", result.details.headroom_mbps),
        ),
        row("Capacity sufficient", verdict),
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Table view of a quality estimate
pub fn render_quality(request: &QosRequest, result: &QosResult) -> String {
    let (r_factor, level) = reported_quality(result);
    let rows = vec![
        row("Codec", request.codec()),
        row(
            "Impairments",
            format!(
                "{} ms latency, {} ms jitter, {}% loss",
                request.latency_ms(),
                request.jitter_ms(),
                round_to(request.loss_ratio() * 100.0, 2)
            ),
        ),
        row("R-factor", format!("{:.1}", r_factor)),
        row("MOS", format!("{:.2}", result.mos)),
        row("Quality", paint_level(level)),
        row("", level.description()),
    ];
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Table view of the codec catalog
pub fn render_codecs(listings: &[CodecListing]) -> String {
    let rows: Vec<CodecRow> = listings
        .iter()
        .map(|listing| CodecRow {
            codec: listing.codec.to_string(),
            bitrate: listing.bitrate_kbps.to_string(),
            per_call: round_to(listing.per_call_bandwidth_kbps, 2).to_string(),
            description: listing.description.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

fn paint_level(level: QualityLevel) -> ColoredString {
    let label = format!("{} ({})", level, level.wire_label());
    match level {
        QualityLevel::Excellent | QualityLevel::Good => label.green().bold(),
        QualityLevel::Fair => label.yellow(),
        QualityLevel::Poor | QualityLevel::Bad => label.red().bold(),
    }
}
