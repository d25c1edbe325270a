use crate::generator::profile::{build_pickup_trace_from_config, TraceConfig};
use crate::http_bridge::model::MonitorModel;
use crate::workflow::runner::{MonitorReport, Runner};
use anyhow::Result;
use pickupcore::host_interface::Sample;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

fn model_from_report(report: &MonitorReport) -> MonitorModel {
    MonitorModel {
        samples_processed: report.samples_processed,
        events: report.events,
        pickup_count: report.pickup_count,
        notes: report.notes.clone(),
    }
}

/// Bridge that hosts the monitoring HTTP endpoint and runs incoming traces.
pub struct MonitorBridge {
    state: Arc<RwLock<MonitorModel>>,
}

impl MonitorBridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(MonitorModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("status")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<MonitorModel>>| warp::reply::json(&*state.read().unwrap()));

        let post_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |trace: Vec<Sample>,
                 state: Arc<RwLock<MonitorModel>>,
                 runner: Arc<Runner>| async move {
                    let outcome =
                        tokio::task::spawn_blocking(move || runner.execute(&trace)).await;
                    match outcome {
                        Ok(Ok(report)) => {
                            let mut guard = state.write().unwrap();
                            *guard = model_from_report(&report);
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "pickups": report.events,
                                    "count": report.pickup_count
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Ok(Err(err)) => {
                            eprintln!("ingest error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                        Err(err) => {
                            eprintln!("ingest task error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        let generator_route = warp::path("ingest-config")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter)
            .and(runner_filter)
            .and_then(
                |config: TraceConfig,
                 state: Arc<RwLock<MonitorModel>>,
                 runner: Arc<Runner>| async move {
                    let config_for_run = config.clone();
                    let outcome = tokio::task::spawn_blocking(move || {
                        build_pickup_trace_from_config(&config_for_run)
                            .and_then(|trace| runner.execute(&trace))
                    })
                    .await;
                    match outcome {
                        Ok(Ok(report)) => {
                            let mut guard = state.write().unwrap();
                            *guard = model_from_report(&report);
                            if let Some(name) = config.scenario.as_ref() {
                                println!(
                                    "[BRIDGE] Scenario {} -> pickups {}",
                                    name, report.events
                                );
                            }
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "pickups": report.events,
                                    "count": report.pickup_count,
                                    "description": config.description.clone().unwrap_or_default()
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Ok(Err(err)) => {
                            eprintln!("ingest-config error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                        Err(err) => {
                            eprintln!("ingest-config task error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(post_route).or(generator_route);
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address()).await;
            });
        });

        Self { state }
    }

    pub fn publish(&self, model: &MonitorModel) -> Result<()> {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[BRIDGE] samples: {}, pickups: {}, daily count: {}",
            guard.samples_processed, guard.events, guard.pickup_count
        );
        Ok(())
    }

    pub fn publish_status(&self, message: &str) {
        println!("[BRIDGE] {}", message);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> MonitorModel {
        self.state.read().unwrap().clone()
    }
}
