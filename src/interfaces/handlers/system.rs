use actix_web::{web, HttpResponse, Responder};
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

use crate::{constants::START_TIME, AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthCheckResponse {
    status: &'static str,
    version: &'static str,
    uptime: String,
    timestamp: String,
    started_at: String,
    storage: String,
    storage_status: &'static str,
    memory_usage: String,
}

fn process_memory_usage() -> String {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return "Unknown".to_string();
    };

    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );

    sys.process(pid).map_or("Unknown".to_string(), |p| {
        format!("{:.2} MB", p.memory() as f64 / 1024.0 / 1024.0)
    })
}

/// Liveness plus storage reachability. Degraded storage still answers 200
/// with `status: "degraded"` so the endpoint stays usable for diagnosis.
#[tracing::instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = chrono::Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let storage_ok = match state.admin_repo().check_connection().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Storage health check failed: {}", e);
            false
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: if storage_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime: human_uptime.to_string(),
        timestamp: now_utc.to_rfc3339(),
        started_at: START_TIME.to_rfc3339(),
        storage: state.storage.to_string(),
        storage_status: if storage_ok { "OK" } else { "Unavailable" },
        memory_usage: process_memory_usage(),
    })
}
