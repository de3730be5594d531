use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::post};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use torus_life::config::Params;
use torus_life::render::{encode_png, render_frame};
use torus_life::{Bounds, LifeError, LiveSet};

#[derive(Serialize)]
struct RunResponse {
    frames: Vec<Frame>,
    timings: Vec<TimingEntry>,
    width: usize,
    height: usize,
}

#[derive(Serialize)]
struct Frame {
    generation: u64,
    population: usize,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

#[derive(Deserialize)]
struct StepRequest {
    #[serde(flatten)]
    bounds: Bounds,
    live: LiveSet,
}

#[derive(Serialize)]
struct StepResponse {
    population: usize,
    live: LiveSet,
}

struct ApiError(StatusCode, String);

impl From<LifeError> for ApiError {
    fn from(e: LifeError) -> Self {
        let status = match e {
            LifeError::Image(_) | LifeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        ApiError(status, e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.0, error = %self.1, "request failed");
        (self.0, self.1).into_response()
    }
}

fn data_url(png: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(png);
    format!("data:image/png;base64,{}", b64)
}

async fn run_handler(Json(params): Json<Params>) -> Result<Json<RunResponse>, ApiError> {
    let response = tokio::task::spawn_blocking(move || -> Result<RunResponse, LifeError> {
        let bounds = params.bounds()?;
        let (generations, timings) = torus_life::simulate(&params)?;

        let frames = generations
            .iter()
            .enumerate()
            .map(|(generation, live)| {
                let png = encode_png(&render_frame(live, bounds), bounds)?;
                Ok(Frame {
                    generation: generation as u64,
                    population: live.population(),
                    data_url: data_url(&png),
                })
            })
            .collect::<Result<Vec<_>, LifeError>>()?;

        let timing_entries = timings
            .iter()
            .map(|t| TimingEntry {
                name: t.name.to_string(),
                ms: t.ms,
            })
            .collect();

        Ok(RunResponse {
            frames,
            timings: timing_entries,
            width: bounds.width(),
            height: bounds.height(),
        })
    })
    .await
    .map_err(|e| ApiError(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))??;

    Ok(Json(response))
}

async fn step_handler(Json(req): Json<StepRequest>) -> Result<Json<StepResponse>, ApiError> {
    let live = torus_life::step(&req.live, req.bounds)?;
    Ok(Json(StepResponse {
        population: live.population(),
        live,
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("torus_life=info".parse()?),
        )
        .init();

    let frontend = ServeDir::new("frontend");

    let app = Router::new()
        .route("/api/run", post(run_handler))
        .route("/api/step", post(step_handler))
        .fallback_service(frontend)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("torus-life server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
