//! Financial movements, the raw input to the aggregator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ValidationError;

/// Whether money came into or went out of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Money received, e.g. a salary payment.
    Inflow,
    /// Money spent, e.g. a grocery bill.
    Outflow,
}

impl MovementKind {
    /// The human readable name of the series made up of this kind of movement.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inflow => "Income",
            Self::Outflow => "Expenses",
        }
    }

    /// The lowercase name used for CSS classes and query values.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
        }
    }
}

/// A single, immutable movement of money.
///
/// `amount` is always non-negative, the direction is given by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    /// The size of the movement.
    pub amount: Decimal,
    /// The direction of the movement.
    pub kind: MovementKind,
    /// When the movement happened.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Movement {
    /// Create a movement of money into an account.
    pub fn inflow(amount: Decimal, timestamp: OffsetDateTime) -> Self {
        Self {
            amount,
            kind: MovementKind::Inflow,
            timestamp,
        }
    }

    /// Create a movement of money out of an account.
    pub fn outflow(amount: Decimal, timestamp: OffsetDateTime) -> Self {
        Self {
            amount,
            kind: MovementKind::Outflow,
            timestamp,
        }
    }
}

/// Which of the two series to include.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesFilter {
    /// Only movements into an account.
    Inflow,
    /// Only movements out of an account.
    Outflow,
    /// Both directions.
    #[default]
    Both,
}

impl SeriesFilter {
    /// Whether movements of `kind` are part of the filtered series.
    pub fn includes(self, kind: MovementKind) -> bool {
        matches!(
            (self, kind),
            (Self::Both, _)
                | (Self::Inflow, MovementKind::Inflow)
                | (Self::Outflow, MovementKind::Outflow)
        )
    }

    /// The visible series, inflow first.
    pub fn kinds(self) -> Vec<MovementKind> {
        [MovementKind::Inflow, MovementKind::Outflow]
            .into_iter()
            .filter(|&kind| self.includes(kind))
            .collect()
    }
}

/// Checks that every movement is well formed.
///
/// # Errors
/// Returns a [ValidationError] naming the first offending movement and field.
pub fn validate_movements(movements: &[Movement]) -> Result<(), ValidationError> {
    for (index, movement) in movements.iter().enumerate() {
        if movement.amount < Decimal::ZERO {
            tracing::warn!("Rejecting movement {index} with negative amount {}", movement.amount);
            return Err(ValidationError::movement(
                index,
                "amount",
                format!("must not be negative, got {}", movement.amount),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use super::{Movement, MovementKind, SeriesFilter, validate_movements};

    #[test]
    fn series_filter_includes_matching_kinds() {
        assert!(SeriesFilter::Both.includes(MovementKind::Inflow));
        assert!(SeriesFilter::Both.includes(MovementKind::Outflow));
        assert!(SeriesFilter::Inflow.includes(MovementKind::Inflow));
        assert!(!SeriesFilter::Inflow.includes(MovementKind::Outflow));
        assert!(!SeriesFilter::Outflow.includes(MovementKind::Inflow));
        assert!(SeriesFilter::Outflow.includes(MovementKind::Outflow));
    }

    #[test]
    fn series_filter_kinds_lists_inflow_first() {
        assert_eq!(
            SeriesFilter::Both.kinds(),
            vec![MovementKind::Inflow, MovementKind::Outflow]
        );
        assert_eq!(SeriesFilter::Outflow.kinds(), vec![MovementKind::Outflow]);
    }

    #[test]
    fn validate_accepts_zero_amount() {
        let movements = vec![Movement::inflow(dec!(0), datetime!(2025-01-01 12:00 UTC))];

        assert_eq!(validate_movements(&movements), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let movements = vec![
            Movement::inflow(dec!(10), datetime!(2025-01-01 12:00 UTC)),
            Movement::outflow(dec!(-5.50), datetime!(2025-01-02 12:00 UTC)),
        ];

        let error = validate_movements(&movements).unwrap_err();

        assert_eq!(error.field, "movements[1].amount");
    }

    #[test]
    fn movement_deserializes_from_json() {
        let json = r#"{"amount": "12.50", "kind": "outflow", "timestamp": "2025-03-04T10:00:00+13:00"}"#;

        let movement: Movement = serde_json::from_str(json).unwrap();

        assert_eq!(
            movement,
            Movement::outflow(dec!(12.50), datetime!(2025-03-04 10:00 +13))
        );
    }
}
