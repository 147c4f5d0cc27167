use aerorhythm_roster::coverage::{coverage, Coverage};
use aerorhythm_roster::query::Window;
use aerorhythm_roster::roster_assignment::repository::NewAssignment;
use aerorhythm_roster::{crew, flight, roster_assignment};

mod setup;
use setup::*;

#[tokio::test]
async fn counts_flights_without_assignments() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let crews = crew::service::Service::new(storage.clone());
    let flights = flight::service::Service::new(storage.clone());
    let assignments = roster_assignment::service::Service::new(storage.clone());

    let a = seed_crew(&crews, "E001", 1).await?;
    let b = seed_crew(&crews, "E002", 2).await?;

    let covered = seed_flight(&flights, "AI101-20250701", 6).await?;
    let also_covered = seed_flight(&flights, "AI102-20250701", 10).await?;
    seed_flight(&flights, "AI103-20250701", 14).await?;
    let next_day = seed_flight(&flights, "AI104-20250702", 30).await?;

    let pair = |crew_id: i64, f: &aerorhythm_persistence::flight::Model| {
        NewAssignment::new(crew_id, f.id.clone(), f.departure, f.arrival)
    };

    assignments
        .bulk_create(vec![
            pair(a.id, &covered),
            pair(b.id, &covered),
            pair(a.id, &also_covered),
            pair(b.id, &next_day),
        ])
        .await?;

    let first_day = coverage(&storage, &Window::between(at(0), at(24))).await?;
    assert_eq!(
        first_day,
        Coverage {
            total_flights: 3,
            uncovered_flights: 1,
            total_assignments: 3,
        }
    );
    assert_eq!(first_day.covered_flights(), 2);

    let everything = coverage(&storage, &Window::unbounded()).await?;
    assert_eq!(everything.total_flights, 4);
    assert_eq!(everything.uncovered_flights, 1);
    assert_eq!(everything.total_assignments, 4);
    assert_eq!(everything.covered_flights(), 3);

    Ok(())
}

#[tokio::test]
async fn empty_store_has_no_coverage() -> anyhow::Result<()> {
    let storage = make_storage().await?;

    assert_eq!(
        coverage(&storage, &Window::unbounded()).await?,
        Coverage::default()
    );
    assert!(coverage(&storage, &Window::between(at(5), at(1)))
        .await
        .is_err());

    Ok(())
}
