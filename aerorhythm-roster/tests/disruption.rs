use aerorhythm_core::errors::Error;
use aerorhythm_persistence::disruption::{DisruptionKind, Severity};
use aerorhythm_roster::disruption;
use aerorhythm_roster::disruption::repository::{
    DisruptionFilter, DisruptionPatch, NewDisruption,
};
use aerorhythm_roster::query::Page;
use serde_json::json;

mod setup;
use setup::*;

#[tokio::test]
async fn create_and_get_keeps_open_kind() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = disruption::service::Service::new(storage);

    let mut input = NewDisruption::new(
        DisruptionKind::Other("volcanic_ash".to_string()),
        Severity::Critical,
    );
    input.affected = json!({"flights": ["AI101-20250701"], "crew": [1, 2]});

    let created = repo.create(input).await?;
    let loaded = repo.get(created.id).await?.expect("disruption should exist");

    assert_eq!(loaded, created);
    assert_eq!(loaded.kind(), DisruptionKind::Other("volcanic_ash".to_string()));
    assert_eq!(loaded.affected["crew"], json!([1, 2]));

    Ok(())
}

#[tokio::test]
async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = disruption::service::Service::new(storage);

    let blank = NewDisruption::new(DisruptionKind::Other("  ".to_string()), Severity::Low);
    let err = repo.create(blank).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    let mut listed = NewDisruption::new(DisruptionKind::WeatherDelay, Severity::Low);
    listed.affected = json!(["AI101-20250701"]);
    let err = repo.create(listed).await.unwrap_err();
    assert!(matches!(err, Error::ValidationError { .. }));

    assert!(repo
        .list(&DisruptionFilter::default(), Page::all())
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_filterable() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = disruption::service::Service::new(storage);

    let first = repo
        .create(NewDisruption::new(DisruptionKind::CrewIllness, Severity::High))
        .await?;
    let second = repo
        .create(NewDisruption::new(DisruptionKind::WeatherDelay, Severity::Medium))
        .await?;
    let third = repo
        .create(NewDisruption::new(DisruptionKind::CrewIllness, Severity::Medium))
        .await?;

    let all = repo.list(&DisruptionFilter::default(), Page::all()).await?;
    let ids: Vec<_> = all.iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let illness = DisruptionFilter {
        kind: Some(DisruptionKind::CrewIllness),
        ..Default::default()
    };
    let ids: Vec<_> = repo
        .list(&illness, Page::all())
        .await?
        .iter()
        .map(|x| x.id)
        .collect();
    assert_eq!(ids, vec![third.id, first.id]);

    let medium_illness = DisruptionFilter {
        severity: Some(Severity::Medium),
        ..illness
    };
    let result = repo.list(&medium_illness, Page::all()).await?;
    assert_eq!(result, vec![third]);

    let newest = repo.list(&DisruptionFilter::default(), Page::new(0, 1)).await?;
    assert_eq!(newest.len(), 1);
    assert_eq!(newest[0].id, ids[0]);

    Ok(())
}

#[tokio::test]
async fn update_and_delete() -> anyhow::Result<()> {
    let storage = make_storage().await?;
    let repo = disruption::service::Service::new(storage);

    let created = repo
        .create(NewDisruption::new(
            DisruptionKind::AircraftMaintenance,
            Severity::Low,
        ))
        .await?;

    let patch = DisruptionPatch {
        severity: Some(Severity::High),
        ..Default::default()
    };
    let updated = repo
        .update(created.id, patch)
        .await?
        .expect("disruption should exist");

    assert_eq!(updated.severity, Severity::High);
    assert_eq!(updated.kind(), DisruptionKind::AircraftMaintenance);
    assert_eq!(updated.created_at, created.created_at);

    assert_eq!(repo.update(9_999, DisruptionPatch::default()).await?, None);

    assert!(repo.delete(created.id).await?);
    assert!(!repo.delete(created.id).await?);

    Ok(())
}
