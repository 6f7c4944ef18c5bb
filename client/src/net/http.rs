//! Shared `gloo-net` request glue.

use gloo_net::http::Request;

/// Status and body of a completed request.
pub(crate) struct Reply {
    pub status: u16,
    pub ok: bool,
    pub body: String,
}

/// Send a built request and read the body as text. Only transport failures
/// are errors; non-2xx statuses come back as a `Reply` with `ok == false`.
pub(crate) async fn send(request: Result<Request, gloo_net::Error>) -> Result<Reply, String> {
    let response = request.map_err(|e| e.to_string())?.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    let ok = response.ok();
    let body = response.text().await.map_err(|e| e.to_string())?;
    Ok(Reply { status, ok, body })
}
