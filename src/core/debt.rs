use crate::core::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A consolidated directed debt: `from` owes `to` exactly `amount`.
///
/// Debts are the engine's output. Every amount is positive, at least one
/// cent, and rounded to two decimal places; `from` and `to` are always
/// distinct participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Decimal,
}

impl Debt {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Decimal) -> Self {
        Self { from, to, amount }
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} {}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debt_display() {
        let debt = Debt::new(ParticipantId::new("ben"), ParticipantId::new("ana"), dec!(45));
        assert_eq!(format!("{}", debt), "ben owes ana 45");
    }
}
