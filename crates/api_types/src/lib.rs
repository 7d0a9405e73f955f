use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

pub mod split {
    use super::*;

    /// Split type names as the expense screen sends them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitType {
        Equal,
        Amount,
        Percentage,
        Shares,
    }

    /// One row of a computed split.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub id: String,
        pub name: String,
        /// Strategy-dependent input (amount, percentage or weight).
        pub value: f64,
        /// Amount owed, in major units rounded to 2 decimals.
        pub share: f64,
    }

    /// A computed split together with its save status.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitView {
        pub split_type: SplitType,
        pub currency: Currency,
        pub total: f64,
        pub payer: Option<String>,
        pub participants: Vec<ShareView>,
        /// Whether the shares add up to `total`.
        pub conserves: bool,
        /// Why the expense cannot be saved yet, if anything blocks it.
        pub issue: Option<String>,
    }
}

pub mod transaction {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ParticipantRef {
        pub id: String,
    }

    /// Request body of `createTransaction`.
    ///
    /// Field names follow the remote API (camelCase); amounts are major units.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateTransaction {
        pub participants: Vec<ParticipantRef>,
        /// Participant id → share of the total.
        pub how_much_each_participant_needs_to_pay: BTreeMap<String, f64>,
        /// Participant id of whoever paid.
        pub who_paid_the_total_sum: String,
        pub total_sum_paid: f64,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::transaction::{CreateTransaction, ParticipantRef};

    #[test]
    fn create_transaction_uses_remote_field_names() {
        let body = CreateTransaction {
            participants: vec![ParticipantRef {
                id: "me".to_string(),
            }],
            how_much_each_participant_needs_to_pay: BTreeMap::from([("me".to_string(), 12.5)]),
            who_paid_the_total_sum: "me".to_string(),
            total_sum_paid: 12.5,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "participants": [{"id": "me"}],
                "howMuchEachParticipantNeedsToPay": {"me": 12.5},
                "whoPaidTheTotalSum": "me",
                "totalSumPaid": 12.5
            })
        );
    }
}
