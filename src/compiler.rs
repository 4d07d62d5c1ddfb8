use reqwest::Client;
use crate::error::{AppError, Result};
use crate::sources::SourceList;

/// Builds the form parameters for the remote compiler: the fixed settings
/// followed by one `code_url` per source, in order.
pub fn compile_query(sources: &SourceList) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("compilation_level", "SIMPLE_OPTIMIZATIONS".to_string()),
        ("output_format", "text".to_string()),
        ("output_info", "compiled_code".to_string()),
    ];
    params.extend(sources.iter().map(|url| ("code_url", url.to_string())));
    params
}

/// POSTs the source URLs to the compiler endpoint and returns the compiled text.
pub async fn compile(client: &Client, endpoint: &str, sources: &SourceList) -> Result<String> {
    if sources.is_empty() {
        return Err(AppError::ValidationError("No source URLs to compile".to_string()));
    }

    let params = compile_query(sources);
    let res = client
        .post(endpoint)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::CompileServiceError(format!("Compiler request failed: {}", e)))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| AppError::CompileServiceError(format!("Couldn't read compiler response: {}", e)))?;

    if !status.is_success() {
        return Err(AppError::CompileServiceError(format!("Compiler returned {}", status)));
    }

    // The service answers with a single character when compilation fails.
    if body.chars().count() == 1 {
        return Err(AppError::CompileServiceError(
            "Something went wrong with the Closure Compiler".to_string(),
        ));
    }

    Ok(body)
}
