use anyhow::{Context, Result};
use apuesta::api::*;
use apuesta::db::{self, QuestionSource, SQLite, StaticQuestions};
use apuesta::gesture::{GestureState, NoListeners};
use apuesta::listener::LogListener;
use apuesta::settings::{self, Variant};
use apuesta::Apuesta;
use axum::extract::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use axum_macros::debug_handler;
use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::{debug, error, info, trace, warn, LevelFilter};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

async fn get_current(State(state): State<Arc<RwLock<Apuesta>>>) -> Json<Option<Question>> {
    let backend = state.read().await;
    Json(backend.current_question().cloned())
}
async fn get_featured(State(state): State<Arc<RwLock<Apuesta>>>) -> Json<Vec<Question>> {
    let backend = state.read().await;
    Json(backend.featured().to_vec())
}
async fn get_coupon(State(state): State<Arc<RwLock<Apuesta>>>) -> Json<CouponSummary> {
    let backend = state.read().await;
    Json(backend.summary())
}
async fn get_gesture(State(state): State<Arc<RwLock<Apuesta>>>) -> Json<Option<GestureState>> {
    let backend = state.read().await;
    Json(backend.gesture().copied())
}
#[debug_handler]
async fn begin_drag(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<DragRequest>,
) -> Json<bool> {
    let mut backend = state.write().await;
    let started = backend.begin_drag(request.x);
    trace!("Pointer down at {}: started {}", request.x, started);
    Json(started)
}
async fn move_drag(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<DragRequest>,
) -> Json<Option<GestureState>> {
    let mut backend = state.write().await;
    Json(backend.drag_to(request.x))
}
async fn cancel_drag(State(state): State<Arc<RwLock<Apuesta>>>) {
    let mut backend = state.write().await;
    backend.cancel_drag();
}
#[debug_handler]
async fn release_drag(
    State(state): State<Arc<RwLock<Apuesta>>>,
) -> Result<Json<Outcome>, (StatusCode, String)> {
    let mut backend = state.write().await;
    let outcome = backend.release().map_err(map_engine_err)?;
    Ok(Json(outcome))
}
async fn swipe(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<SwipeRequest>,
) -> Result<Json<Outcome>, (StatusCode, String)> {
    let mut backend = state.write().await;
    debug!("Swiping along {:?}", request.path);
    let outcome = backend
        .swipe(&mut NoListeners, &request.path)
        .map_err(map_engine_err)?;
    Ok(Json(outcome))
}
async fn press(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<PressRequest>,
) -> Result<Json<Outcome>, (StatusCode, String)> {
    let mut backend = state.write().await;
    debug!("Pressed {}", request.vote);
    let outcome = backend.press(request.vote).map_err(map_engine_err)?;
    Ok(Json(outcome))
}
async fn remove(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<RemoveRequest>,
) -> Json<bool> {
    let mut backend = state.write().await;
    Json(backend.remove(request.question))
}
async fn clear(State(state): State<Arc<RwLock<Apuesta>>>) -> Json<CouponSummary> {
    let mut backend = state.write().await;
    backend.clear();
    Json(backend.summary())
}
async fn set_stake(
    State(state): State<Arc<RwLock<Apuesta>>>,
    Json(request): Json<StakeRequest>,
) -> Json<Credits> {
    let mut backend = state.write().await;
    Json(backend.set_stake(&request.stake))
}
async fn create_coupon(
    State(state): State<Arc<RwLock<Apuesta>>>,
) -> Result<(StatusCode, Json<CouponReceipt>), (StatusCode, String)> {
    let mut backend = state.write().await;
    let receipt = backend.create_coupon().map_err(map_engine_err)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

#[derive(Parser)]
struct Args {
    #[arg(short, long, default_value_t = 8081)]
    port: u16,
    /// Settings file (toml, json or yaml)
    #[arg(short, long)]
    config: Option<String>,
    /// classic, neo or elegant
    #[arg(short, long)]
    variant: Option<String>,
    /// sqlx SQLite url, questions are kept in memory without it
    #[arg(short, long)]
    db: Option<String>,
    /// JSON file with questions to import at startup
    #[arg(short, long)]
    questions: Option<String>,
    #[arg(short, long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Args::parse();
    Builder::default()
        .filter_level(LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Debug))
        .write_style(WriteStyle::Always)
        .init();
    let variant = cli
        .variant
        .as_deref()
        .map(Variant::from_str)
        .transpose()?;
    let config = settings::load(cli.config.as_deref(), variant).map_err(|e| {
        error!("Invalid settings: {}", e);
        e
    })?;
    let db: Box<dyn QuestionSource + Send + Sync> = match cli.db {
        Some(url) => Box::new(SQLite::new(Some(url)).await?),
        None => Box::new(StaticQuestions::default()),
    };
    if let Some(path) = cli.questions {
        let contents = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("couldn't read {}", path))?;
        let count = db::import(db.as_ref(), &contents).await?;
        info!("Imported {} questions from {}", count, path);
    }
    let questions = db.get_questions().await?;
    let featured = db.get_featured().await?;
    if questions.is_empty() {
        warn!("No questions loaded, the feed starts out complete");
    }
    let engine = Apuesta::new(config, questions, featured, Box::new(LogListener));
    let (_port, handle) = run_server(Some(cli.port), engine).await?;
    handle.await?;
    Ok(())
}

async fn run_server(port: Option<u16>, engine: Apuesta) -> Result<(u16, JoinHandle<()>)> {
    let state = Arc::new(RwLock::new(engine));
    let app = Router::new()
        .route("/current", get(get_current))
        .route("/featured", get(get_featured))
        .route("/coupon", get(get_coupon))
        .route("/gesture", get(get_gesture))
        .route("/drag/begin", post(begin_drag))
        .route("/drag/move", post(move_drag))
        .route("/drag/cancel", post(cancel_drag))
        .route("/drag/release", post(release_drag))
        .route("/swipe", post(swipe))
        .route("/press", post(press))
        .route("/remove", post(remove))
        .route("/clear", post(clear))
        .route("/stake", post(set_stake))
        .route("/create_coupon", post(create_coupon))
        .with_state(state);

    let addr: SocketAddr = ("127.0.0.1:".to_string() + port.unwrap_or(0).to_string().as_str())
        .parse()
        .context("invalid listen address")?;
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let port = server.local_addr().port();
    debug!("Listening on {}", server.local_addr());
    let handle = tokio::spawn(async move {
        if let Err(e) = server.await {
            error!("Server stopped: {}", e);
        }
    });
    Ok((port, handle))
}
