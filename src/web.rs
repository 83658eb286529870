use std::sync::{Mutex, MutexGuard};

use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use log::{info, warn};

use crate::display::PlanReport;
use crate::parser::load_catalog_reader;
use crate::schedule::{plan_attendance, SchedulerConfig};

// Only the latest plan is kept, in memory
pub struct AppState {
    pub last_plan: Mutex<Option<PlanReport>>,
    pub scheduler: SchedulerConfig,
}

impl AppState {
    pub fn new(scheduler: SchedulerConfig) -> Self {
        AppState {
            last_plan: Mutex::new(None),
            scheduler,
        }
    }

    fn last_plan(&self) -> MutexGuard<'_, Option<PlanReport>> {
        // A panicked handler cannot leave a half-written report behind
        self.last_plan.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// Catalog upload endpoint: body is the catalog text
async fn upload_catalog(body: String, state: web::Data<AppState>) -> Result<HttpResponse> {
    match load_catalog_reader(body.as_bytes()) {
        Ok(catalog) => {
            let plan = plan_attendance(catalog.into_shows(), state.scheduler);
            let report = PlanReport::from_plan(&plan);
            info!("Planned {} of {} uploaded shows", report.scheduled, report.total);
            *state.last_plan() = Some(report.clone());
            Ok(HttpResponse::Ok().json(report))
        }
        Err(e) => {
            warn!("Rejected catalog upload: {}", e);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to process catalog: {}", e)
            })))
        }
    }
}

// Last plan endpoint
async fn get_plan(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.last_plan().as_ref() {
        Some(report) => Ok(HttpResponse::Ok().json(report)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No plan available"}))),
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/plan", web::post().to(upload_catalog))
        .route("/api/plan", web::get().to(get_plan))
        .route("/api/health", web::get().to(health));
}

pub async fn start_server(port: u16, scheduler: SchedulerConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(scheduler));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
