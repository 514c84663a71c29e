use crate::bridge::model::DigitizeModel;
use crate::generator::profile::{build_chart_frame, corner_calibration, SyntheticChartConfig};
use crate::workflow::runner::Runner;
use curvecore::extract::ImageFrame;
use serde::Deserialize;
use serde_json::json;
use std::{
    net::SocketAddr,
    sync::{Arc, RwLock},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9100))
}

#[derive(Debug)]
struct BridgeError;

impl warp::reject::Reject for BridgeError {}

/// Raw frame posted by an external capture surface.
#[derive(Debug, Deserialize)]
struct IngestPayload {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

/// Bridge hosting the dataset endpoint and processing incoming frames.
pub struct Bridge {
    state: Arc<RwLock<DigitizeModel>>,
}

impl Bridge {
    pub fn new(runner: Arc<Runner>) -> Self {
        let state = Arc::new(RwLock::new(DigitizeModel::default()));
        let state_for_filter = state.clone();
        let state_filter = warp::any().map(move || state_for_filter.clone());
        let runner_filter = warp::any().map(move || runner.clone());

        let get_route = warp::path("dataset")
            .and(warp::get())
            .and(state_filter.clone())
            .map(|state: Arc<RwLock<DigitizeModel>>| warp::reply::json(&*state.read().unwrap()));

        let ingest_route = warp::path("ingest")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |payload: IngestPayload,
                 state: Arc<RwLock<DigitizeModel>>,
                 runner: Arc<Runner>| async move {
                    match ImageFrame::from_rgba(payload.width, payload.height, payload.rgba)
                        .map_err(anyhow::Error::from)
                        .and_then(|frame| runner.execute(&frame))
                    {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = DigitizeModel {
                                points: result.points.clone(),
                                raw_count: result.raw_count,
                                kept_count: result.kept_count,
                                notes: result.notes.clone(),
                            };
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "kept": result.kept_count,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("ingest error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        let synthetic_route = warp::path("synthetic")
            .and(warp::post())
            .and(warp::body::json())
            .and(state_filter.clone())
            .and(runner_filter.clone())
            .and_then(
                |config: SyntheticChartConfig,
                 state: Arc<RwLock<DigitizeModel>>,
                 runner: Arc<Runner>| async move {
                    match build_chart_frame(&config).and_then(|frame| {
                        let calibration = corner_calibration(&config)?;
                        runner.execute_calibrated(&frame, &calibration)
                    }) {
                        Ok(result) => {
                            let mut guard = state.write().unwrap();
                            *guard = DigitizeModel {
                                points: result.points.clone(),
                                raw_count: result.raw_count,
                                kept_count: result.kept_count,
                                notes: result.notes.clone(),
                            };
                            Ok::<_, warp::Rejection>(warp::reply::with_status(
                                warp::reply::json(&json!({
                                    "status": "ok",
                                    "raw": result.raw_count,
                                    "kept": result.kept_count,
                                })),
                                StatusCode::OK,
                            ))
                        }
                        Err(err) => {
                            eprintln!("synthetic error: {}", err);
                            Err(warp::reject::custom(BridgeError))
                        }
                    }
                },
            );

        thread::spawn(move || {
            let routes = get_route.or(ingest_route).or(synthetic_route);
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

    pub fn publish(&self, model: &DigitizeModel) {
        let mut guard = self.state.write().unwrap();
        *guard = model.clone();
        println!(
            "[bridge] points: {}, raw: {}, kept: {}",
            guard.points.len(),
            guard.raw_count,
            guard.kept_count
        );
    }

    pub fn publish_status(&self, message: &str) {
        println!("[bridge] {}", message);
    }
}
