use aerorhythm_core::errors::Error;
use aerorhythm_persistence::{crew as crew_entity, flight as flight_entity};
use aerorhythm_roster::query::{Page, Window};
use aerorhythm_roster::roster_assignment::repository::{
    AssignmentFilter, AssignmentPatch, NewAssignment,
};
use aerorhythm_roster::{crew, flight, roster_assignment};
use serde_json::json;

mod setup;
use setup::*;

struct Fixture {
    crews: Vec<crew_entity::Model>,
    flights: Vec<flight_entity::Model>,
    assignments: roster_assignment::Repository,
    crew_repo: crew::Repository,
    flight_repo: flight::Repository,
}

impl Fixture {
    async fn new(crew_count: usize, flight_count: usize) -> anyhow::Result<Self> {
        let storage = make_storage().await?;
        let crew_repo = crew::service::Service::new(storage.clone());
        let flight_repo = flight::service::Service::new(storage.clone());

        let mut crews = vec![];
        for i in 0..crew_count {
            crews.push(seed_crew(&crew_repo, &format!("E{:03}", i + 1), i as i32 + 1).await?);
        }

        let mut flights = vec![];
        for i in 0..flight_count {
            let id = format!("AI{}-20250701", 101 + i);
            flights.push(seed_flight(&flight_repo, &id, 2 + 3 * i as i64).await?);
        }

        Ok(Self {
            crews,
            flights,
            assignments: roster_assignment::service::Service::new(storage),
            crew_repo,
            flight_repo,
        })
    }

    fn pair(&self, crew: usize, flight: usize) -> NewAssignment {
        let f = &self.flights[flight];
        NewAssignment::new(self.crews[crew].id, f.id.clone(), f.departure, f.arrival)
    }

    async fn count(&self) -> anyhow::Result<usize> {
        Ok(self
            .assignments
            .list(&AssignmentFilter::default(), Page::all())
            .await?
            .len())
    }
}

#[tokio::test]
async fn duplicate_pair_is_rejected_without_side_effects() -> anyhow::Result<()> {
    let fx = Fixture::new(1, 1).await?;

    fx.assignments.create(fx.pair(0, 0)).await?;

    let err = fx.assignments.create(fx.pair(0, 0)).await.unwrap_err();

    match err {
        Error::DuplicateKey { kind, field } => {
            assert_eq!(kind, "RosterAssignment");
            assert_eq!(field, "crew_id,flight_id");
        }
        other => panic!("expected duplicate key, got {:?}", other),
    }

    assert_eq!(fx.count().await?, 1);
    assert_eq!(fx.crew_repo.get(fx.crews[0].id).await?, Some(fx.crews[0].clone()));
    assert_eq!(
        fx.flight_repo.get(&fx.flights[0].id).await?,
        Some(fx.flights[0].clone())
    );

    Ok(())
}

#[tokio::test]
async fn missing_crew_or_flight_is_not_found() -> anyhow::Result<()> {
    let fx = Fixture::new(1, 1).await?;

    let mut ghost_crew = fx.pair(0, 0);
    ghost_crew.crew_id = 9_999;

    match fx.assignments.create(ghost_crew).await.unwrap_err() {
        Error::NotFound { kind, .. } => assert_eq!(kind, "Crew"),
        other => panic!("expected not found, got {:?}", other),
    }

    let mut ghost_flight = fx.pair(0, 0);
    ghost_flight.flight_id = "XX000-20250701".to_string();

    match fx.assignments.create(ghost_flight).await.unwrap_err() {
        Error::NotFound { kind, .. } => assert_eq!(kind, "Flight"),
        other => panic!("expected not found, got {:?}", other),
    }

    assert_eq!(fx.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn duty_window_must_be_positive() -> anyhow::Result<()> {
    let fx = Fixture::new(1, 1).await?;

    let mut inverted = fx.pair(0, 0);
    inverted.end = inverted.start;

    let err = fx.assignments.create(inverted).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    Ok(())
}

#[tokio::test]
async fn bulk_create_is_all_or_nothing_against_existing_rows() -> anyhow::Result<()> {
    let fx = Fixture::new(3, 3).await?;

    fx.assignments.create(fx.pair(0, 0)).await?;

    let batch = vec![
        fx.pair(0, 1),
        fx.pair(0, 2),
        fx.pair(1, 0),
        fx.pair(1, 1),
        fx.pair(2, 2),
        fx.pair(0, 0),
    ];

    let err = fx.assignments.bulk_create(batch).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { .. }));

    assert_eq!(fx.count().await?, 1);

    Ok(())
}

#[tokio::test]
async fn bulk_create_rejects_duplicates_inside_the_batch() -> anyhow::Result<()> {
    let fx = Fixture::new(2, 2).await?;

    let batch = vec![fx.pair(0, 0), fx.pair(1, 1), fx.pair(0, 0)];

    let err = fx.assignments.bulk_create(batch).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { .. }));
    assert_eq!(fx.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn bulk_create_rolls_back_on_missing_reference() -> anyhow::Result<()> {
    let fx = Fixture::new(2, 2).await?;

    let mut ghost = fx.pair(1, 1);
    ghost.flight_id = "XX000-20250701".to_string();

    let err = fx
        .assignments
        .bulk_create(vec![fx.pair(0, 0), fx.pair(0, 1), ghost])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(fx.count().await?, 0);

    Ok(())
}

#[tokio::test]
async fn bulk_create_returns_rows_in_input_order() -> anyhow::Result<()> {
    let fx = Fixture::new(2, 2).await?;

    let created = fx
        .assignments
        .bulk_create(vec![fx.pair(1, 0), fx.pair(0, 1), fx.pair(0, 0)])
        .await?;

    assert_eq!(created.len(), 3);
    assert_eq!(created[0].crew_id, fx.crews[1].id);
    assert_eq!(created[1].flight_id, fx.flights[1].id);
    assert!(created.windows(2).all(|x| x[0].id < x[1].id));
    assert_eq!(fx.count().await?, 3);

    assert!(fx.assignments.bulk_create(vec![]).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn list_filters_by_overlap_and_orders_by_start() -> anyhow::Result<()> {
    // Flights depart at hours 2, 5 and 8, each lasting two hours.
    let fx = Fixture::new(2, 3).await?;

    fx.assignments
        .bulk_create(vec![
            fx.pair(0, 2),
            fx.pair(0, 0),
            fx.pair(1, 1),
            fx.pair(0, 1),
        ])
        .await?;

    let overlapping = AssignmentFilter {
        window: Window::between(at(3), at(6)),
        ..Default::default()
    };
    let result = fx.assignments.list(&overlapping, Page::all()).await?;
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|x| x.flight_id != fx.flights[2].id));
    assert!(result.windows(2).all(|x| (x[0].start, x[0].id) < (x[1].start, x[1].id)));

    // Touching the end of a duty window is not an overlap.
    let touching = AssignmentFilter {
        window: Window::between(at(4), at(5)),
        ..Default::default()
    };
    assert!(fx.assignments.list(&touching, Page::all()).await?.is_empty());

    let mine = fx.assignments.list_for_crew(fx.crews[0].id).await?;
    let starts: Vec<_> = mine.iter().map(|x| x.start).collect();
    assert_eq!(starts, vec![at(2), at(5), at(8)]);

    let by_flight = AssignmentFilter {
        flight_id: Some(fx.flights[1].id.clone()),
        ..Default::default()
    };
    assert_eq!(fx.assignments.list(&by_flight, Page::all()).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn update_and_delete() -> anyhow::Result<()> {
    let fx = Fixture::new(1, 1).await?;

    let created = fx.assignments.create(fx.pair(0, 0)).await?;

    let patch = AssignmentPatch {
        position: Some(Some("CPT".to_string())),
        attributes: Some(json!({"note": "swap approved"})),
        ..Default::default()
    };
    let updated = fx
        .assignments
        .update(created.id, patch)
        .await?
        .expect("assignment should exist");

    assert_eq!(updated.position.as_deref(), Some("CPT"));
    assert_eq!(updated.attributes["note"], json!("swap approved"));
    assert_eq!(updated.start, created.start);

    let shrink_to_nothing = AssignmentPatch {
        end: Some(created.start),
        ..Default::default()
    };
    let err = fx
        .assignments
        .update(created.id, shrink_to_nothing)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    assert!(fx.assignments.delete(created.id).await?);
    assert!(!fx.assignments.delete(created.id).await?);
    assert_eq!(fx.assignments.get(created.id).await?, None);

    Ok(())
}
