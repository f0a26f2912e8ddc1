use bytes::Bytes;
use http::StatusCode;

/// What a connection answers with before it closes.
///
/// The variants carry no more than the encoder needs: the status is implied by
/// the variant and only a successful lookup has a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    BadRequest,
    NotFound,
    Ok(Bytes),
}

impl ResponseOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            ResponseOutcome::BadRequest => StatusCode::BAD_REQUEST,
            ResponseOutcome::NotFound => StatusCode::NOT_FOUND,
            ResponseOutcome::Ok(_) => StatusCode::OK,
        }
    }

    pub fn body(&self) -> Option<&Bytes> {
        match self {
            ResponseOutcome::Ok(body) => Some(body),
            _ => None,
        }
    }
}
