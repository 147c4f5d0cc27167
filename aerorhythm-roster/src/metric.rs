use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

lazy_static! {
    static ref JOB_SUBMISSION_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("job_submission_count", "Job Submission Count").namespace("aerorhythm_roster"),
        &["job_type"]
    )
    .expect("failed to initialize metric: JOB_SUBMISSION_COUNT");
    static ref JOB_COMPLETION_COUNT: IntCounterVec = IntCounterVec::new(
        Opts::new("job_completion_count", "Job Completion Count").namespace("aerorhythm_roster"),
        &["job_type", "status"]
    )
    .expect("failed to initialize metric: JOB_COMPLETION_COUNT");
    static ref JOB_RUN_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new("job_run_duration", "Job Run Duration").namespace("aerorhythm_roster"),
        &["job_type"]
    )
    .expect("failed to initialize metric: JOB_RUN_DURATION");
    static ref GENERATED_ASSIGNMENT_COUNT: HistogramVec = HistogramVec::new(
        HistogramOpts::new("generated_assignment_count", "Generated Assignment Count")
            .namespace("aerorhythm_roster"),
        &["strategy"]
    )
    .expect("failed to initialize metric: GENERATED_ASSIGNMENT_COUNT");
}

pub fn job_submission_count_metric() -> &'static IntCounterVec {
    &JOB_SUBMISSION_COUNT
}

pub fn job_completion_count_metric() -> &'static IntCounterVec {
    &JOB_COMPLETION_COUNT
}

pub fn job_run_duration_metric() -> &'static HistogramVec {
    &JOB_RUN_DURATION
}

pub fn generated_assignment_count_metric() -> &'static HistogramVec {
    &GENERATED_ASSIGNMENT_COUNT
}
