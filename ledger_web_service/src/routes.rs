//! The service's routes

use crate::errors::handle_rejection;
use crate::handlers;
use ledger_common::Ledger;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Reply};

/// Maximum accepted request body size, in bytes
pub const BODY_LIMIT: u64 = 1024 * 16;

/// Hands a clone of the shared ledger handle to every request.
fn with_ledger(
    ledger: Arc<Ledger>,
) -> impl Filter<Extract = (Arc<Ledger>,), Error = Infallible> + Clone {
    warp::any().map(move || ledger.clone())
}

/// **All routes of the service, with rejections already turned into responses**
///
/// - GET /accounts
/// - GET /accounts/{id}
/// - POST /transfer
pub fn routes(
    ledger: Arc<Ledger>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let list_accounts = warp::path!("accounts")
        .and(warp::get())
        .and(with_ledger(ledger.clone()))
        .and_then(handlers::list_accounts);

    let account = warp::path!("accounts" / String)
        .and(warp::get())
        .and(with_ledger(ledger.clone()))
        .and_then(handlers::account);

    let transfer = warp::path!("transfer")
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_ledger(ledger))
        .and_then(handlers::transfer);

    list_accounts
        .or(account)
        .or(transfer)
        .recover(handle_rejection)
}
