use lazy_static::lazy_static;
use prometheus::{IntCounterVec, Opts};

lazy_static! {
    static ref STORAGE_UNAVAILABLE_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("storage_unavailable_count", "Storage Unavailable Count")
            .namespace("aerorhythm_core"),
        &["operation"]
    )
    .expect("failed to initialize metric: STORAGE_UNAVAILABLE_COUNT");
    static ref CONSTRAINT_VIOLATION_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("constraint_violation_count", "Constraint Violation Count")
            .namespace("aerorhythm_core"),
        &["kind"]
    )
    .expect("failed to initialize metric: CONSTRAINT_VIOLATION_COUNT");
}

pub fn storage_unavailable_count_metric() -> &'static IntCounterVec {
    &STORAGE_UNAVAILABLE_COUNT
}

pub fn constraint_violation_count_metric() -> &'static IntCounterVec {
    &CONSTRAINT_VIOLATION_COUNT
}
