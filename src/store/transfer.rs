//! Transfer engine
//!
//! Moves money between two accounts as one all-or-nothing unit of work:
//! one transfer record, two signed entries, two locked balance updates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use utoipa::ToSchema;

use super::error::StoreError;
use super::models::{Account, Entry, Transfer};
use super::queries::{AccountQueries, EntryQueries, TransferQueries};
use super::{SqlStore, TransferStore};

/// Input of a transfer transaction. `amount` is the positive magnitude moved
/// from `from_account_id` to `to_account_id`; positivity, currency match and
/// account distinctness are the caller's responsibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransferTxParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Everything a successful transfer produced or mutated.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

/// The two balance updates of a transfer as (account id, signed delta),
/// in the order they must be applied.
///
/// The account with the lower id always comes first, no matter which side of
/// this particular transfer it is on. Both of two opposing concurrent
/// transfers (A->B and B->A) therefore acquire their row locks in the same
/// order, which rules out the circular wait that would otherwise deadlock
/// them. This ordering is the correctness mechanism, not a style choice.
fn balance_update_order(params: &TransferTxParams) -> [(i64, i64); 2] {
    if params.from_account_id < params.to_account_id {
        [
            (params.from_account_id, -params.amount),
            (params.to_account_id, params.amount),
        ]
    } else {
        [
            (params.to_account_id, params.amount),
            (params.from_account_id, -params.amount),
        ]
    }
}

/// Lock the account row, then write back `balance + delta`. The read and the
/// write happen on the same transaction-scoped connection, so the value can
/// never be stale.
async fn apply_balance_delta(
    conn: &mut PgConnection,
    account_id: i64,
    delta: i64,
) -> Result<Account, StoreError> {
    let account = AccountQueries::get_for_update(&mut *conn, account_id).await?;
    let updated =
        AccountQueries::update_balance(&mut *conn, account_id, account.balance + delta).await?;
    Ok(updated)
}

#[async_trait]
impl TransferStore for SqlStore {
    /// Perform a money transfer inside a single database transaction:
    ///
    /// 1. insert the transfer record
    /// 2. insert the debit entry (-amount) and the credit entry (+amount)
    /// 3. update both balances under row locks, lower account id first
    ///
    /// Any failure rolls the whole transaction back; no partial state is ever
    /// observable. The engine never retries - a failed attempt is reported
    /// once and the caller decides.
    async fn transfer_tx(&self, params: TransferTxParams) -> Result<TransferTxResult, StoreError> {
        self.exec_tx(move |conn| {
            Box::pin(async move {
                let transfer = TransferQueries::create(
                    &mut *conn,
                    params.from_account_id,
                    params.to_account_id,
                    params.amount,
                )
                .await?;

                let from_entry =
                    EntryQueries::create(&mut *conn, params.from_account_id, -params.amount)
                        .await?;
                let to_entry =
                    EntryQueries::create(&mut *conn, params.to_account_id, params.amount).await?;

                let [first, second] = balance_update_order(&params);
                let first_account = apply_balance_delta(&mut *conn, first.0, first.1).await?;
                let second_account = apply_balance_delta(&mut *conn, second.0, second.1).await?;

                let (from_account, to_account) = if first_account.id == params.from_account_id {
                    (first_account, second_account)
                } else {
                    (second_account, first_account)
                };

                Ok(TransferTxResult {
                    transfer,
                    from_account,
                    to_account,
                    from_entry,
                    to_entry,
                })
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(from: i64, to: i64, amount: i64) -> TransferTxParams {
        TransferTxParams {
            from_account_id: from,
            to_account_id: to,
            amount,
        }
    }

    #[test]
    fn test_lower_id_locked_first_when_sending_upward() {
        let order = balance_update_order(&params(1, 2, 100));
        assert_eq!(order, [(1, -100), (2, 100)]);
    }

    #[test]
    fn test_lower_id_locked_first_when_sending_downward() {
        // Same account pair, opposite direction: lock order must not change.
        let order = balance_update_order(&params(2, 1, 100));
        assert_eq!(order, [(1, 100), (2, -100)]);
    }

    #[test]
    fn test_opposing_transfers_share_lock_order() {
        let forward = balance_update_order(&params(7, 42, 5));
        let backward = balance_update_order(&params(42, 7, 5));
        let forward_ids: Vec<i64> = forward.iter().map(|(id, _)| *id).collect();
        let backward_ids: Vec<i64> = backward.iter().map(|(id, _)| *id).collect();
        assert_eq!(forward_ids, backward_ids);
    }

    #[test]
    fn test_deltas_sum_to_zero() {
        let order = balance_update_order(&params(9, 3, 250));
        assert_eq!(order[0].1 + order[1].1, 0);
    }
}
