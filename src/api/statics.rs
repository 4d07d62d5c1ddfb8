use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::{AppError, Result};
use crate::AppState;

/// Percent-decodes the request path and returns it relative to the static
/// root, or an error if any decoded segment walks up a directory.
pub fn relative_asset_path(request_path: &str) -> Result<String> {
    let rel = request_path.strip_prefix('/').unwrap_or(request_path);
    let decoded = percent_decode_str(rel)
        .decode_utf8()
        .map_err(|_| AppError::ValidationError(format!("Path is not valid UTF-8: {}", request_path)))?;

    if decoded.contains('\0') || decoded.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(AppError::PathTraversalRejected(format!(
            "Attempt to traverse outside of static folders: {}",
            request_path
        )));
    }
    Ok(decoded.into_owned())
}

pub async fn static_file(State(state): State<AppState>, req: Request) -> Result<Response> {
    let rel = relative_asset_path(req.uri().path()).inspect_err(|e| log::warn!("{}", e))?;

    log::info!("Serving static file {}", rel);
    let path = state.config.static_root.join(&rel);
    match ServeFile::new(path).oneshot(req).await {
        Ok(res) => Ok(res.into_response()),
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_is_stripped() {
        assert_eq!(relative_asset_path("/css/site.css").unwrap(), "css/site.css");
    }

    #[test]
    fn any_parent_segment_is_rejected() {
        for bad in ["/../../etc/passwd", "/css/../../secret", "/js/..", "/out/..\\x"] {
            assert!(
                matches!(relative_asset_path(bad), Err(AppError::PathTraversalRejected(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn encoded_parent_segment_is_rejected() {
        for bad in ["/css/%2e%2e/secret", "/out/%2E%2E%2Fsecret", "/js/..%5Cx"] {
            assert!(
                matches!(relative_asset_path(bad), Err(AppError::PathTraversalRejected(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn escaped_names_are_decoded() {
        assert_eq!(
            relative_asset_path("/out/1/my%20app%23b.min.js").unwrap(),
            "out/1/my app#b.min.js"
        );
        assert_eq!(relative_asset_path("/css/a+b.css").unwrap(), "css/a+b.css");
    }

    #[test]
    fn rejection_names_the_offending_path() {
        let err = relative_asset_path("/js/../x").unwrap_err();
        assert!(err.to_string().contains("/js/../x"));
    }

    #[test]
    fn dotted_file_names_are_fine() {
        assert!(relative_asset_path("/js/app..min.js").is_ok());
    }
}
