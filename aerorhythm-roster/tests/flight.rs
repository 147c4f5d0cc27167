use aerorhythm_core::actor::Actor;
use aerorhythm_core::errors::Error;
use aerorhythm_roster::flight::repository::{FlightFilter, FlightPatch, NewFlight};
use aerorhythm_roster::query::{Page, Window};
use aerorhythm_roster::roster_assignment::repository::NewAssignment;
use aerorhythm_roster::{crew, flight, roster_assignment};
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

mod setup;
use setup::*;

#[tokio::test]
async fn duplicate_flight_id_leaves_original_untouched() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    let original = seed_flight(&repo, "AI101-20250701", 6).await?;

    let mut clash = NewFlight::new("AI101-20250701", "AI999", "BLR", "MAA", at(20), at(21));
    clash.aircraft = Some("A320".to_string());

    let err = repo.create(&admin(), clash).await.unwrap_err();

    match err {
        Error::DuplicateKey { kind, field } => {
            assert_eq!(kind, "Flight");
            assert_eq!(field, "id");
        }
        other => panic!("expected duplicate key, got {:?}", other),
    }

    assert_eq!(repo.get("AI101-20250701").await?, Some(original));

    Ok(())
}

#[tokio::test]
async fn arrival_must_follow_departure() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    let same_instant = NewFlight::new("AI101-20250701", "AI101", "DEL", "BOM", at(6), at(6));
    let err = repo.create(&admin(), same_instant).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    let mut not_an_object = NewFlight::new("AI101-20250701", "AI101", "DEL", "BOM", at(6), at(8));
    not_an_object.attributes = json!(["gate", "12"]);
    let err = repo.create(&admin(), not_an_object).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    assert!(repo
        .list(&FlightFilter::default(), Page::all())
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn unprivileged_actor_cannot_write() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    let input = NewFlight::new("AI101-20250701", "AI101", "DEL", "BOM", at(6), at(8));
    let err = repo
        .create(&Actor::unprivileged("ops-viewer"), input)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Unauthorized { .. }));
    assert_eq!(repo.get("AI101-20250701").await?, None);

    Ok(())
}

#[tokio::test]
async fn pages_cover_every_flight_once_in_departure_order() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    for (id, hour) in [("F3", 9), ("F1", 1), ("F5", 17), ("F2", 5), ("F4", 13)] {
        seed_flight(&repo, id, hour).await?;
    }

    let mut paged = vec![];
    for skip in [0, 2, 4] {
        let page = repo.list(&FlightFilter::default(), Page::new(skip, 2)).await?;
        paged.extend(page.into_iter().map(|x| x.id));
    }

    assert_eq!(paged, vec!["F1", "F2", "F3", "F4", "F5"]);

    Ok(())
}

#[tokio::test]
async fn window_keeps_flights_departing_and_arriving_inside() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    seed_flight(&repo, "EARLY", 4).await?;
    seed_flight(&repo, "INSIDE", 6).await?;
    seed_flight(&repo, "EDGE", 10).await?;
    seed_flight(&repo, "LATE", 11).await?;

    let filter = FlightFilter::within(Window::between(at(6), at(12)));
    let result = repo.list(&filter, Page::all()).await?;

    let ids: Vec<_> = result.into_iter().map(|x| x.id).collect();
    assert_eq!(ids, vec!["INSIDE", "EDGE"]);

    let from_origin = FlightFilter {
        origin: Some("BLR".to_string()),
        ..Default::default()
    };
    assert!(repo.list(&from_origin, Page::all()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn timestamps_round_trip_to_the_second() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    let departure = Utc.with_ymd_and_hms(2025, 12, 31, 23, 45, 17).unwrap();
    let arrival = departure + Duration::minutes(135);

    repo.create(
        &admin(),
        NewFlight::new("AI777-20251231", "AI777", "DEL", "JFK", departure, arrival),
    )
    .await?;

    let loaded = repo.get("AI777-20251231").await?.expect("flight should exist");

    assert_eq!(loaded.departure, departure);
    assert_eq!(loaded.arrival, arrival);
    assert_eq!(loaded.block_time(), Duration::minutes(135));

    Ok(())
}

#[tokio::test]
async fn update_is_checked_against_stored_times() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = flight::service::Service::new(storage);

    let original = seed_flight(&repo, "AI101-20250701", 6).await?;

    let past_arrival = FlightPatch {
        departure: Some(at(9)),
        ..Default::default()
    };
    let err = repo
        .update(&admin(), &original.id, past_arrival)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    let delayed = FlightPatch {
        departure: Some(at(9)),
        arrival: Some(at(11)),
        aircraft: Some(Some("B787".to_string())),
        ..Default::default()
    };
    let updated = repo
        .update(&admin(), &original.id, delayed)
        .await?
        .expect("flight should exist");

    assert_eq!(updated.departure, at(9));
    assert_eq!(updated.arrival, at(11));
    assert_eq!(updated.aircraft.as_deref(), Some("B787"));
    assert_eq!(updated.origin, original.origin);

    assert_eq!(
        repo.update(&admin(), "MISSING", FlightPatch::default())
            .await?,
        None
    );

    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_its_assignments() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let crews = crew::service::Service::new(storage.clone());
    let flights = flight::service::Service::new(storage.clone());
    let assignments = roster_assignment::service::Service::new(storage);

    let member = seed_crew(&crews, "E001", 1).await?;
    let gone = seed_flight(&flights, "AI101-20250701", 6).await?;
    let kept = seed_flight(&flights, "AI102-20250701", 10).await?;

    assignments
        .create(NewAssignment::new(member.id, gone.id.clone(), gone.departure, gone.arrival))
        .await?;
    let survivor = assignments
        .create(NewAssignment::new(member.id, kept.id.clone(), kept.departure, kept.arrival))
        .await?;

    assert!(flights.delete(&admin(), &gone.id).await?);
    assert!(!flights.delete(&admin(), &gone.id).await?);

    assert_eq!(assignments.list_for_crew(member.id).await?, vec![survivor]);
    assert!(crews.get(member.id).await?.is_some());

    Ok(())
}
