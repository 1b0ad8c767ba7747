// HTTP response utilities with optional Brotli encoding
use async_compression::tokio::bufread::BrotliEncoder;
use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Response, StatusCode, header},
};
use serde::Serialize;
use tokio::io::AsyncReadExt;

/// True when the client lists `br` in `Accept-Encoding`.
pub fn accepts_brotli(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false)
}

async fn brotli(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let mut encoder = BrotliEncoder::new(std::io::Cursor::new(bytes));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed).await?;
    Ok(compressed)
}

/// Builds a response with `body`, Brotli-compressed when `compress` is set.
pub async fn encoded_response(
    status: StatusCode,
    content_type: &str,
    body: Vec<u8>,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let (body_bytes, content_encoding) = if compress {
        let original = body.len();
        let compressed = brotli(body).await.map_err(|e| {
            tracing::error!(error = %e, "Brotli compression failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        tracing::trace!(original, compressed = compressed.len(), "Compressed response");
        (compressed, Some("br"))
    } else {
        (body, None)
    };

    let content_type = HeaderValue::from_str(content_type).map_err(|e| {
        tracing::error!(error = %e, "Invalid content type");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let mut response_builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body_bytes.len())
        .header(header::VARY, "accept-encoding");

    if let Some(encoding) = content_encoding {
        response_builder = response_builder.header(header::CONTENT_ENCODING, encoding);
    }

    response_builder.body(Body::from(body_bytes)).map_err(|e| {
        tracing::error!(error = %e, "Response build error");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn markup_response(
    status: StatusCode,
    content_type: &str,
    markup: String,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    encoded_response(status, content_type, markup.into_bytes(), compress).await
}

pub async fn json_response<T: Serialize>(
    status: StatusCode,
    data: &T,
    compress: bool,
) -> Result<Response<Body>, StatusCode> {
    let bytes = serde_json::to_vec(data).map_err(|e| {
        tracing::error!(error = %e, "JSON serialization error");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    encoded_response(status, "application/json", bytes, compress).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::bufread::BrotliDecoder;

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_accepts_brotli() {
        let mut headers = HeaderMap::new();
        assert!(!accepts_brotli(&headers));
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
        assert!(accepts_brotli(&headers));
    }

    #[tokio::test]
    async fn test_uncompressed_markup() {
        let response = markup_response(StatusCode::OK, "image/svg+xml", "<svg></svg>".to_string(), false)
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
        assert_eq!(body_bytes(response).await, b"<svg></svg>");
    }

    #[tokio::test]
    async fn test_brotli_round_trip() {
        let markup = "<svg>".to_string() + &"<circle r=\"3\"/>".repeat(200) + "</svg>";
        let response = markup_response(StatusCode::OK, "image/svg+xml", markup.clone(), true)
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");

        let compressed = body_bytes(response).await;
        assert!(compressed.len() < markup.len());

        let mut decoder = BrotliDecoder::new(std::io::Cursor::new(compressed));
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).await.unwrap();
        assert_eq!(decoded, markup);
    }

    #[tokio::test]
    async fn test_json_response_status() {
        let response = json_response(StatusCode::ACCEPTED, &serde_json::json!({ "accepted": true }), false)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_bytes(response).await, br#"{"accepted":true}"#);
    }
}
