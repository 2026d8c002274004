use actix_files::{Files, NamedFile};
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::dashboard::DashboardAggregator;
use crate::error::ApiError;
use crate::session::{ProfileUpdate, SessionService};
use crate::store::SessionStore;

pub struct AppState {
    pub service: SessionService,
    pub static_dir: PathBuf,
}

#[derive(Deserialize)]
pub struct NameRequest {
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct UserQuery {
    user: Option<String>,
}

type ApiResult = Result<HttpResponse, ApiError>;

// Session endpoint
async fn get_session(state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.session()?))
}

// Dashboard endpoint
async fn get_dashboard(query: web::Query<UserQuery>, state: web::Data<AppState>) -> ApiResult {
    let mut rng = rand::thread_rng();
    let dashboard = state.service.dashboard(&mut rng, query.user.as_deref())?;
    Ok(HttpResponse::Ok().json(dashboard))
}

async fn join_session(req: web::Json<NameRequest>, state: web::Data<AppState>) -> ApiResult {
    let mut rng = rand::thread_rng();
    let joined = state.service.join(&mut rng, req.name.as_deref())?;
    Ok(HttpResponse::Ok().json(joined))
}

async fn leave_session(req: web::Json<NameRequest>, state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.leave(req.name.as_deref())?))
}

async fn get_profile(query: web::Query<UserQuery>, state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.profile(query.user.as_deref())?))
}

async fn update_profile(req: web::Json<ProfileUpdate>, state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.update_profile(req.into_inner())?))
}

async fn reset_session(state: web::Data<AppState>) -> ApiResult {
    Ok(HttpResponse::Ok().json(state.service.reset()?))
}

// Landing page
async fn index(state: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open(state.static_dir.join("index.html"))?)
}

/// Bad or missing JSON bodies get the same `{error}` shape as validation failures.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(format!("Invalid JSON body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(format!("Invalid query: {}", err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(Files::new("/static", static_dir))
        .route("/", web::get().to(index))
        .route("/api/session", web::get().to(get_session))
        .route("/api/dashboard", web::get().to(get_dashboard))
        .route("/api/join", web::post().to(join_session))
        .route("/api/leave", web::post().to(leave_session))
        .service(
            web::resource("/api/profile")
                .route(web::get().to(get_profile))
                .route(web::post().to(update_profile)),
        )
        .route("/api/reset", web::post().to(reset_session));
}

pub fn app_state(config: &Config) -> AppState {
    let store = SessionStore::new(&config.data_file, config.host.clone(), config.cutoff_hour);
    AppState {
        service: SessionService::new(store, DashboardAggregator::new(config.sort_teams_by_wins)),
        static_dir: config.static_dir.clone(),
    }
}

pub async fn start_server(config: Config, port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(app_state(&config));
    let static_dir = config.static_dir.clone();

    app_state
        .service
        .store()
        .init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    log::info!(
        "Session data in {}, static files from {}",
        app_state.service.store().path().display(),
        static_dir.display()
    );

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(move |cfg| configure(cfg, &static_dir))
    })
    .bind((config.bind_addr.as_str(), port))?
    .run()
    .await
}
