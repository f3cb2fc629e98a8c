use ledger_common::errors::LedgerError;
use ledger_common::ErrorResponse;
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::reject::{
    InvalidHeader, LengthRequired, MethodNotAllowed, MissingHeader, PayloadTooLarge, Reject,
    UnsupportedMediaType,
};
use warp::{Rejection, Reply};

/// A ledger operation failed.
#[derive(Debug)]
pub struct WebServiceLedgerError(pub LedgerError);

impl Reject for WebServiceLedgerError {}

/// A single-account lookup missed.
#[derive(Debug)]
pub struct WebServiceNotFound(pub LedgerError);

impl Reject for WebServiceNotFound {}

/// Client-caused ledger errors are 400, everything else is 500.
fn status_of(err: &LedgerError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// **Turns every rejection into a JSON error response**
///
/// - ledger errors: 400, or 500 for internal faults;
/// - a body that doesn't decode into the expected request: 400, `MalformedRequest`;
/// - unknown single account: 404;
/// - a required header missing or unparsable: 400, `MalformedRequest`;
/// - body without a `Content-Length`, such as a chunked one: 411;
/// - body over the size limit: 413;
/// - no route: 404; wrong method: 405;
/// - anything else: 500.
pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if let Some(WebServiceLedgerError(err)) =
        rejection.find::<WebServiceLedgerError>()
    {
        (status_of(err), ErrorResponse::from(err))
    } else if let Some(WebServiceNotFound(err)) = rejection.find::<WebServiceNotFound>() {
        (StatusCode::NOT_FOUND, ErrorResponse::from(err))
    } else if let Some(err) = rejection.find::<BodyDeserializeError>() {
        let err = LedgerError::MalformedRequest(err.to_string());
        (StatusCode::BAD_REQUEST, ErrorResponse::from(&err))
    } else if let Some(err) = rejection.find::<UnsupportedMediaType>() {
        let err = LedgerError::MalformedRequest(err.to_string());
        (StatusCode::BAD_REQUEST, ErrorResponse::from(&err))
    } else if let Some(err) = rejection.find::<MissingHeader>() {
        let err = LedgerError::MalformedRequest(err.to_string());
        (StatusCode::BAD_REQUEST, ErrorResponse::from(&err))
    } else if let Some(err) = rejection.find::<InvalidHeader>() {
        let err = LedgerError::MalformedRequest(err.to_string());
        (StatusCode::BAD_REQUEST, ErrorResponse::from(&err))
    } else if rejection.find::<LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            ErrorResponse::new("LengthRequired", "A Content-Length header is required"),
        )
    } else if rejection.find::<PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::new("PayloadTooLarge", "The request body is too large"),
        )
    } else if rejection.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorResponse::new("NotFound", "No such route"),
        )
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("MethodNotAllowed", "Method not allowed"),
        )
    } else {
        log::error!("unhandled rejection: {:?}", rejection);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("InternalFault", "Unexpected internal fault"),
        )
    };

    if status.is_server_error() {
        log::error!("{} {}", status, body.message);
    } else {
        log::warn!("{} {}", status, body.message);
    }

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::Filter;

    /// A route that needs a numeric header, with rejections handled.
    fn counted() -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
        warp::path!("count")
            .and(warp::header::<u64>("x-count"))
            .map(|count: u64| count.to_string())
            .recover(handle_rejection)
    }

    fn error_kind(body: &[u8]) -> String {
        let body: serde_json::Value = serde_json::from_slice(body).unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[test]
    fn client_errors_are_bad_requests() {
        assert_eq!(
            StatusCode::BAD_REQUEST,
            status_of(&LedgerError::InvalidAmount("0".to_string()))
        );
        assert_eq!(
            StatusCode::BAD_REQUEST,
            status_of(&LedgerError::UnknownAccount("Z".to_string()))
        );
    }

    #[test]
    fn internal_faults_are_server_errors() {
        assert_eq!(
            StatusCode::INTERNAL_SERVER_ERROR,
            status_of(&LedgerError::Internal("poisoned".to_string()))
        );
    }

    #[tokio::test]
    async fn missing_header_is_400() {
        let res = warp::test::request().path("/count").reply(&counted()).await;

        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        assert_eq!("MalformedRequest", error_kind(res.body()));
    }

    #[tokio::test]
    async fn invalid_header_is_400() {
        let res = warp::test::request()
            .path("/count")
            .header("x-count", "many")
            .reply(&counted())
            .await;

        assert_eq!(StatusCode::BAD_REQUEST, res.status());
        assert_eq!("MalformedRequest", error_kind(res.body()));
    }

    #[tokio::test]
    async fn valid_header_passes() {
        let res = warp::test::request()
            .path("/count")
            .header("x-count", "3")
            .reply(&counted())
            .await;

        assert_eq!(StatusCode::OK, res.status());
        assert_eq!("3", std::str::from_utf8(res.body()).unwrap());
    }
}
