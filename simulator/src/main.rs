use anyhow::Context;
use clap::Parser;
use generator::profile::{build_pickup_trace_from_config, TraceConfig};
use host::{CountingSink, InMemoryCounterStore, IntervalSource, LogNotifier, StaticPermissionGate};
use http_bridge::bridge::MonitorBridge;
use http_bridge::model::MonitorModel;
use log::warn;
use pickupcore::detector::MonitoringSession;
use pickupcore::host_interface::Sample;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::MonitorConfig;
use workflow::runner::Runner;

mod generator;
mod host;
mod http_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Rust-facing pickup-monitor driver")]
struct Args {
    /// Run a single offline trace and emit a monitoring summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a monitor config from YAML
    #[arg(long)]
    monitor: Option<PathBuf>,
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,
    #[arg(long, default_value_t = 600)]
    samples: usize,
    #[arg(long, default_value_t = 3)]
    pickups: usize,
    /// Directory holding the persisted daily pickup counter
    #[arg(long)]
    counter_dir: Option<PathBuf>,
    /// Keep the HTTP bridge alive for incoming live traces
    #[arg(long, default_value_t = false)]
    serve: bool,
}

/// Serve-mode demo feed: a resting phone lifted every thirty seconds,
/// classified live off the interval subscription and notified through the
/// log. The counter is held in memory so it never races bridge runs.
fn start_live_feed(config: &MonitorConfig) {
    let config = config.clone();
    thread::spawn(move || {
        let mut session =
            MonitoringSession::new(config.to_detector_config(), config.interval_ms);
        let gate = StaticPermissionGate::new(config.permission_granted);

        let mut tick: u64 = 0;
        let mut source = IntervalSource::new(move || {
            tick += 1;
            if tick % 300 < 6 {
                Sample::new(3.0, 0.0, 2.0)
            } else {
                Sample::new(0.0, 0.0, 9.81)
            }
        });
        let mut sink = CountingSink::new(
            Box::new(InMemoryCounterStore::new()),
            Box::new(LogNotifier::new()),
        );

        match session.start(&gate, &mut source) {
            Ok(()) => {
                session.drain(&mut sink);
            }
            Err(err) => warn!("live feed not started: {}", err),
        }
    });
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let monitor_config = if let Some(path) = args.monitor {
        MonitorConfig::load(path)?
    } else {
        MonitorConfig::from_args(args.interval_ms, args.counter_dir.clone())
    };

    let runner = Runner::new(monitor_config.clone());
    let bridge = MonitorBridge::new(Arc::new(runner.clone()));
    let trace_config = TraceConfig {
        samples: args.samples,
        interval_ms: monitor_config.interval_ms,
        pickups: args.pickups,
        ..Default::default()
    };
    let trace = build_pickup_trace_from_config(&trace_config)?;

    if args.offline {
        let report = runner.execute(&trace)?;

        println!(
            "Offline run -> pickups {}, daily count {}, samples {}",
            report.events, report.pickup_count, report.samples_processed
        );

        let model = MonitorModel {
            samples_processed: report.samples_processed,
            events: report.events,
            pickup_count: report.pickup_count,
            notes: report.notes.clone(),
        };

        bridge.publish(&model)?;
        bridge.publish_status("Offline monitoring results ready.");

        let summary = format!(
            "pickups={} count={} samples={} notes={:?}\n",
            report.events, report.pickup_count, report.samples_processed, report.notes
        );
        let report_path = PathBuf::from("tools/data/offline_monitor.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(summary.as_bytes())?;
    }
    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        start_live_feed(&monitor_config);
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
