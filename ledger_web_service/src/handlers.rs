//! Handler functions
//!
//! Every handler calls exactly one synchronous ledger operation and never awaits while
//! the ledger's lock is held. If the client goes away, the handler's future is dropped
//! either before or after that call, never in the middle of it, so a transfer is
//! always fully committed or not at all.

use crate::errors::{WebServiceLedgerError, WebServiceNotFound};
use ledger_common::errors::LedgerError;
use ledger_common::{Ledger, TransferRequest, TransferResponse};
use std::sync::Arc;
use warp::{Rejection, Reply};

/// The `list_accounts` handler
///
/// Responds with all accounts and their balances.
///
/// GET /accounts
pub async fn list_accounts(ledger: Arc<Ledger>) -> Result<impl Reply, Rejection> {
    log::debug!("list_accounts");

    match ledger.snapshot() {
        Ok(accounts) => Ok(warp::reply::json(&accounts)),
        Err(err) => Err(warp::reject::custom(WebServiceLedgerError(err))),
    }
}

/// The `account` handler
///
/// Responds with a single account.
///
/// GET /accounts/{id}
pub async fn account(id: String, ledger: Arc<Ledger>) -> Result<impl Reply, Rejection> {
    log::debug!("account; id = {:?}", id);

    match ledger.account(&id) {
        Ok(account) => Ok(warp::reply::json(&account)),
        Err(err @ LedgerError::UnknownAccount(_)) => {
            Err(warp::reject::custom(WebServiceNotFound(err)))
        }
        Err(err) => Err(warp::reject::custom(WebServiceLedgerError(err))),
    }
}

/// The `transfer` handler
///
/// A body that doesn't decode into a [`TransferRequest`] never reaches this handler;
/// it is rejected by the route's JSON filter.
///
/// POST /transfer
pub async fn transfer(
    request: TransferRequest,
    ledger: Arc<Ledger>,
) -> Result<impl Reply, Rejection> {
    log::debug!("transfer; request = {:?}", request);

    match ledger.transfer(&request.from, &request.to, &request.amount) {
        Ok(()) => {
            log::info!(
                "transferred {} from \"{}\" to \"{}\"",
                request.amount.trim(),
                request.from,
                request.to
            );
            Ok(warp::reply::json(&TransferResponse::successful()))
        }
        Err(err) => Err(warp::reject::custom(WebServiceLedgerError(err))),
    }
}
