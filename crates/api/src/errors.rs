use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dohgate_domain::GatewayError;
use tracing::error;

pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GatewayError::InvalidQueryEncoding(_)
            | GatewayError::MissingQueryParameter
            | GatewayError::MissingBody
            | GatewayError::InvalidLengthHeader(_)
            | GatewayError::MessageTooLarge(_) => StatusCode::BAD_REQUEST,

            GatewayError::MissingLengthHeader => StatusCode::LENGTH_REQUIRED,

            GatewayError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,

            GatewayError::ConnectFailed { .. }
            | GatewayError::EmptyUpstreamResponse
            | GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "DNS query pipeline failed");
        }

        (status, self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_client_statuses() {
        let cases = [
            (GatewayError::MissingQueryParameter, StatusCode::BAD_REQUEST),
            (
                GatewayError::InvalidQueryEncoding("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (GatewayError::MissingBody, StatusCode::BAD_REQUEST),
            (
                GatewayError::MissingLengthHeader,
                StatusCode::LENGTH_REQUIRED,
            ),
            (
                GatewayError::InvalidLengthHeader("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::UnsupportedMethod("DELETE".into()),
                StatusCode::METHOD_NOT_ALLOWED,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }

    #[test]
    fn pipeline_errors_are_internal() {
        for err in [
            GatewayError::EmptyUpstreamResponse,
            GatewayError::ConnectFailed {
                server: "one.one.one.one:53".into(),
                reason: "refused".into(),
            },
            GatewayError::Io("broken pipe".into()),
        ] {
            assert_eq!(
                ApiError(err).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
