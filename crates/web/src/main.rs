use serde::{Deserialize, Serialize};
use stackshuffle_core::{Mode, Outcome, Pool, Role, Session, EXPORT_FILE_NAME};
use stackshuffle_data::resolve_config;
use std::io::Read;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ADDR_ENV: &str = "STACKSHUFFLE_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const LOG_ENV: &str = "STACKSHUFFLE_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("stackshuffle=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = resolve_config(None)?;
    let session = config.session()?;
    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let server = Server::http(&addr).map_err(|err| anyhow::anyhow!("bind {addr}: {err}"))?;
    tracing::info!(seed = session.seed(), "StackShuffle web server on http://{addr}");
    let state = Arc::new(Mutex::new(session));
    for request in server.incoming_requests() {
        if let Err(err) = handle_request(request, &state) {
            tracing::warn!("request error: {err}");
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: UiState,
}

#[derive(Serialize)]
struct UiState {
    mode: Mode,
    team_count: u32,
    seed: u64,
    combinations: usize,
    pool: Pool,
    outcome: Option<Outcome>,
}

#[derive(Deserialize, Default)]
struct GenerateRequest {
    #[serde(default)]
    mode: Option<Mode>,
    #[serde(default)]
    team_count: Option<i64>,
}

#[derive(Deserialize)]
struct AddItemRequest {
    role: Role,
    name: String,
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Deserialize)]
struct RemoveItemRequest {
    role: Role,
    name: String,
}

#[derive(Debug)]
struct Reply {
    status: u16,
    content_type: &'static str,
    attachment: Option<&'static str>,
    body: Vec<u8>,
}

impl Reply {
    fn json(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "application/json",
            attachment: None,
            body,
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            attachment: None,
            body: Vec::new(),
        }
    }
}

fn handle_request(
    mut request: tiny_http::Request,
    state: &Arc<Mutex<Session>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let method = request.method().clone();
    let url = request.url().to_string();
    let mut body = String::new();
    request.as_reader().read_to_string(&mut body)?;
    let reply = {
        let mut session = state.lock().map_err(|_| "session lock poisoned")?;
        route(&mut session, &method, &url, &body)?
    };
    tracing::debug!(method = ?method, %url, status = reply.status, "handled request");
    respond(request, reply)
}

fn respond(request: tiny_http::Request, reply: Reply) -> Result<(), Box<dyn std::error::Error>> {
    let content_type = Header::from_bytes(&b"Content-Type"[..], reply.content_type)
        .map_err(|_| "invalid content type header")?;
    let mut response = Response::from_data(reply.body)
        .with_status_code(StatusCode(reply.status))
        .with_header(content_type);
    if let Some(name) = reply.attachment {
        let value = format!("attachment; filename=\"{name}\"");
        let disposition = Header::from_bytes(&b"Content-Disposition"[..], value.as_str())
            .map_err(|_| "invalid content disposition header")?;
        response = response.with_header(disposition);
    }
    request.respond(response)?;
    Ok(())
}

fn route(
    session: &mut Session,
    method: &Method,
    url: &str,
    body: &str,
) -> Result<Reply, serde_json::Error> {
    let path = url.split('?').next().unwrap_or(url);
    let reply = match (method, path) {
        (&Method::Get, "/api/state") => state_reply(session, None)?,
        (&Method::Post, "/api/generate") => {
            let request = if body.trim().is_empty() {
                GenerateRequest::default()
            } else {
                match parse_body(body) {
                    Ok(request) => request,
                    Err(err) => return error_reply(session, 400, err),
                }
            };
            if let Some(mode) = request.mode {
                session.set_mode(mode);
            }
            if let Some(count) = request.team_count {
                session.set_team_count(count);
            }
            let generated = session.generate().map(|_| ());
            match generated {
                Ok(()) => state_reply(session, None)?,
                Err(err) => return error_reply(session, 422, err.to_string()),
            }
        }
        (&Method::Post, "/api/pool/add") => {
            let request: AddItemRequest = match parse_body(body) {
                Ok(request) => request,
                Err(err) => return error_reply(session, 400, err),
            };
            match session.add_item(request.role, &request.name, request.icon.as_deref()) {
                Ok(_) => state_reply(session, None)?,
                Err(err) => return error_reply(session, 422, err.to_string()),
            }
        }
        (&Method::Post, "/api/pool/remove") => {
            let request: RemoveItemRequest = match parse_body(body) {
                Ok(request) => request,
                Err(err) => return error_reply(session, 400, err),
            };
            match session.remove_item(request.role, &request.name) {
                Ok(_) => state_reply(session, None)?,
                Err(err) => return error_reply(session, 404, err.to_string()),
            }
        }
        (&Method::Post, "/api/reset") => {
            session.reset();
            state_reply(session, None)?
        }
        (&Method::Get, "/api/export") => match session.export() {
            Ok(text) => Reply {
                status: 200,
                content_type: "text/plain; charset=utf-8",
                attachment: Some(EXPORT_FILE_NAME),
                body: text.into_bytes(),
            },
            Err(err) => return error_reply(session, 409, err.to_string()),
        },
        _ => Reply::empty(404),
    };
    Ok(reply)
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, String> {
    serde_json::from_str(body).map_err(|err| format!("invalid request body: {err}"))
}

fn error_reply(session: &Session, status: u16, error: String) -> Result<Reply, serde_json::Error> {
    tracing::warn!(status, "{error}");
    let mut reply = state_reply(session, Some(error))?;
    reply.status = status;
    Ok(reply)
}

fn state_reply(session: &Session, error: Option<String>) -> Result<Reply, serde_json::Error> {
    let response = ApiResponse {
        ok: error.is_none(),
        error,
        state: snapshot_state(session),
    };
    Ok(Reply::json(200, serde_json::to_vec_pretty(&response)?))
}

fn snapshot_state(session: &Session) -> UiState {
    UiState {
        mode: session.mode(),
        team_count: session.team_count(),
        seed: session.seed(),
        combinations: session.pool.combination_count(),
        pool: session.pool.clone(),
        outcome: session.outcome().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use stackshuffle_core::RngState;

    fn session() -> Session {
        Session::new(Pool::default(), RngState::from_seed(5))
    }

    fn call(session: &mut Session, method: Method, url: &str, body: &str) -> (u16, Value) {
        let reply = route(session, &method, url, body).expect("route");
        let value = serde_json::from_slice(&reply.body).unwrap_or(Value::Null);
        (reply.status, value)
    }

    #[test]
    fn generates_teams_with_clamped_count() {
        let mut session = session();
        let (status, value) = call(
            &mut session,
            Method::Post,
            "/api/generate",
            r#"{"mode":"team","team_count":50}"#,
        );
        assert_eq!(status, 200);
        assert_eq!(value["ok"], true);
        assert_eq!(value["state"]["team_count"], 20);
        assert_eq!(value["state"]["outcome"]["mode"], "team");
        let teams = value["state"]["outcome"]["teams"]
            .as_array()
            .expect("teams");
        assert_eq!(teams.len(), 20);
        assert_eq!(teams[0]["team_number"], 1);
    }

    #[test]
    fn empty_body_generates_in_current_mode() {
        let mut session = session();
        let (status, value) = call(&mut session, Method::Post, "/api/generate", "");
        assert_eq!(status, 200);
        assert_eq!(value["state"]["outcome"]["mode"], "single");
        assert!(value["state"]["outcome"]["stack"]["frontend"]["name"].is_string());
    }

    #[test]
    fn pool_edits_and_errors() {
        let mut session = session();
        let (status, value) = call(
            &mut session,
            Method::Post,
            "/api/pool/add",
            r#"{"role":"backend","name":"  Axum "}"#,
        );
        assert_eq!(status, 200);
        assert_eq!(value["state"]["pool"]["backend"]["items"][8]["name"], "Axum");
        assert_eq!(value["state"]["pool"]["backend"]["items"][8]["icon"], "🔧");
        assert_eq!(value["state"]["combinations"], 576);

        let (status, value) = call(
            &mut session,
            Method::Post,
            "/api/pool/add",
            r#"{"role":"backend","name":"Axum"}"#,
        );
        assert_eq!(status, 422);
        assert_eq!(value["ok"], false);

        let (status, _) = call(
            &mut session,
            Method::Post,
            "/api/pool/remove",
            r#"{"role":"database","name":"Oracle"}"#,
        );
        assert_eq!(status, 404);

        let (status, _) = call(&mut session, Method::Post, "/api/pool/add", "{not json");
        assert_eq!(status, 400);
    }

    #[test]
    fn export_needs_results() {
        let mut session = session();
        let reply = route(&mut session, &Method::Get, "/api/export", "").expect("route");
        assert_eq!(reply.status, 409);

        call(&mut session, Method::Post, "/api/generate", "");
        let reply = route(&mut session, &Method::Get, "/api/export", "").expect("route");
        assert_eq!(reply.status, 200);
        assert_eq!(reply.attachment, Some(EXPORT_FILE_NAME));
        let text = String::from_utf8(reply.body).expect("utf8");
        assert!(text.contains("Your Stack"));
    }

    #[test]
    fn reset_and_unknown_routes() {
        let mut session = session();
        call(&mut session, Method::Post, "/api/generate", "");
        let (_, value) = call(&mut session, Method::Post, "/api/reset", "");
        assert!(value["state"]["outcome"].is_null());
        let reply = route(&mut session, &Method::Get, "/nope", "").expect("route");
        assert_eq!(reply.status, 404);
    }
}
