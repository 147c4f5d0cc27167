#[derive(strum_macros::Display)]
pub enum Constants {
    #[strum(serialize = "start")]
    WindowStartParameter,

    #[strum(serialize = "end")]
    WindowEndParameter,

    #[strum(serialize = "assignmentIds")]
    ResultAssignmentIds,

    #[strum(serialize = "totalAssignments")]
    ResultTotalAssignments,

    #[strum(serialize = "confidence")]
    ResultConfidence,

    #[strum(serialize = "generatedAt")]
    ResultGeneratedAt,

    #[strum(serialize = "metrics")]
    ResultMetrics,

    #[strum(serialize = "window")]
    ResultWindow,

    #[strum(serialize = "source")]
    AssignmentSource,

    #[strum(serialize = "confidence")]
    AssignmentConfidence,
}
