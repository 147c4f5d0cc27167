use std::sync::Once;

use aerorhythm_core::actor::Actor;
use aerorhythm_core::config::persistence::Persistence;
use aerorhythm_persistence::crew::Rank;
use aerorhythm_persistence::{crew, flight, Storage};
use aerorhythm_roster::crew::repository::NewCrew;
use aerorhythm_roster::flight::repository::NewFlight;
use chrono::{DateTime, Duration, TimeZone, Utc};

static LOG_INIT_ONCE: Once = Once::new();

#[allow(dead_code)]
pub fn init_basic_logging() {
    LOG_INIT_ONCE.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[allow(dead_code)]
pub fn make_persistence_config() -> Persistence {
    Persistence {
        // Every pooled connection to `sqlite::memory:` opens a fresh database.
        database_connection_string: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: None,
        connect_timeout_millis: 5_000,
        acquire_timeout_millis: 5_000,
        operation_timeout_millis: 10_000,
        sqlx_logging: false,
        apply_migrations: true,
    }
}

#[allow(dead_code)]
pub async fn make_storage() -> anyhow::Result<Storage> {
    init_basic_logging();

    let storage = Storage::connect(&make_persistence_config()).await?;
    storage.apply_migrations().await?;

    Ok(storage)
}

#[allow(dead_code)]
pub fn admin() -> Actor {
    Actor::privileged("ops-admin")
}

/// 2025-07-01T00:00:00Z plus `hours`.
#[allow(dead_code)]
pub fn at(hours: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
}

#[allow(dead_code)]
pub async fn seed_crew(
    repo: &aerorhythm_roster::crew::Repository,
    employee_id: &str,
    seniority_number: i32,
) -> anyhow::Result<crew::Model> {
    let mut input = NewCrew::new(employee_id, "Test", employee_id, Rank::FirstOfficer);
    input.seniority_number = seniority_number;
    input.base_airport = Some("DEL".to_string());

    Ok(repo.create(&admin(), input).await?)
}

/// Two hour flight departing `departure_hour` hours after 2025-07-01T00:00:00Z.
#[allow(dead_code)]
pub async fn seed_flight(
    repo: &aerorhythm_roster::flight::Repository,
    id: &str,
    departure_hour: i64,
) -> anyhow::Result<flight::Model> {
    let input = NewFlight::new(
        id,
        id,
        "DEL",
        "BOM",
        at(departure_hour),
        at(departure_hour + 2),
    );

    Ok(repo.create(&admin(), input).await?)
}
