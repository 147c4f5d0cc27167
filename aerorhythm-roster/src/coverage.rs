use aerorhythm_core::types;
use aerorhythm_persistence::{flight, roster_assignment, Storage};
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::query::Window;

/// How well the flights of a window are staffed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Coverage {
    pub total_flights: u64,
    /// Flights in the window without a single assignment.
    pub uncovered_flights: u64,
    /// Assignments whose duty window lies entirely inside the window.
    pub total_assignments: u64,
}

impl Coverage {
    pub fn covered_flights(&self) -> u64 {
        self.total_flights.saturating_sub(self.uncovered_flights)
    }
}

pub async fn coverage(storage: &Storage, window: &Window) -> types::Result<Coverage> {
    window.validate()?;

    let mut flights = flight::Entity::find();
    let mut assignments = roster_assignment::Entity::find();

    if let Some(start) = window.start {
        flights = flights.filter(flight::Column::Departure.gte(start));
        assignments = assignments.filter(roster_assignment::Column::Start.gte(start));
    }

    if let Some(end) = window.end {
        flights = flights.filter(flight::Column::Arrival.lte(end));
        assignments = assignments.filter(roster_assignment::Column::End.lte(end));
    }

    let uncovered = flights.clone().filter(
        flight::Column::Id.not_in_subquery(
            Query::select()
                .column(roster_assignment::Column::FlightId)
                .from(roster_assignment::Entity)
                .to_owned(),
        ),
    );

    storage
        .bounded("coverage", async {
            let tx = storage.connection().begin().await?;

            let report = Coverage {
                total_flights: flights.count(&tx).await?,
                uncovered_flights: uncovered.count(&tx).await?,
                total_assignments: assignments.count(&tx).await?,
            };

            tx.commit().await?;

            Ok(report)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::Coverage;

    #[test]
    fn covered_flights_never_underflow() {
        let report = Coverage {
            total_flights: 2,
            uncovered_flights: 3,
            total_assignments: 0,
        };

        assert_eq!(report.covered_flights(), 0);
    }
}
