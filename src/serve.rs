//! Development server.
//!
//! ```text
//! ┌─────────────────────┐        ┌──────────────────┐
//! │  Main Thread        │        │  Watcher Thread  │
//! │  (tiny_http loop)   │        │  (notify)        │
//! └─────────┬───────────┘        └────────┬─────────┘
//!           │                             │
//!   GET /?name=..&sort=..          reload_config()
//!   ──► MemoryLocation             reload_resources()
//!   ──► ResourceTable::mount               │
//!   ──► render_page              ┌─────────▼─────────┐
//!           │                    │ cfg() resources() │
//!           └───────────────────►│     (ArcSwap)     │
//!                                └───────────────────┘
//! ```
//!
//! The page is rendered per request from the query string, so filtered and
//! sorted links work as real URLs. Everything else is served from the build
//! output directory.
//!
//! `GET /table/<op>?<state>&<params>` applies one interaction server-side
//! and redirects to the page URL holding the new state:
//!
//! ```text
//! /table/toggle?category=Sports&column=name  ──303──►  /?category=Sports&sort=name:asc
//! /table/clear-filters?name=x&sort=name:asc  ──303──►  /?sort=name:asc
//! ```

use crate::{
    build::build_site,
    config::{SiteConfig, cfg, init_config},
    data::{ResourceStore, resources},
    log,
    render::render_page,
    table::{Interaction, MemoryLocation, ResourceTable, parse_query, serialize_query},
    utils::minify::{MinifyType, minify},
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

/// Ports tried after the configured one is taken.
const MAX_PORT_RETRIES: u16 = 10;

/// Path prefix of interaction requests.
const INTERACTION_PREFIX: &str = "table/";

// ============================================================================
// Server Entry Point
// ============================================================================

/// Bind, build with the bound address as site URL, then serve until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let c = cfg();
    let interface: IpAddr = c
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid [serve.interface] `{}`", c.serve.interface))?;

    let (server, addr) = try_bind_port(interface, c.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let mut bound = (*c).clone();
    bound.bind_to(addr);
    init_config(bound);
    build_site(&cfg())?;

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if c.serve.watch {
        std::thread::spawn(|| {
            if let Err(err) = watch_for_changes_blocking() {
                log!("error"; "watcher stopped: {err:#}");
            }
        });
    }

    for request in server.incoming_requests() {
        // Reloaded per request to pick up watcher changes.
        if let Err(e) = handle_request(request, &cfg()) {
            log!("error"; "request failed: {e:#}");
        }
    }

    Ok(())
}

fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind {interface} on ports {base_port}..{}: {}",
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map_or_else(|| "no port available".to_string(), |e| e.to_string())
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// What a request URL resolves to.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    /// The resource page, rendered from the query string.
    Page,
    /// `/table/<op>`: apply an interaction and redirect.
    Interaction(String),
    /// A file under the output directory.
    File(PathBuf),
    NotFound,
}

/// Resolve a request URL (path + optional query) against `output`.
fn resolve(url: &str, output: &Path) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = urlencoding::decode(path).map_or_else(|_| path.to_string(), |p| p.into_owned());
    let relative = path.trim_start_matches('/');

    if relative.is_empty() || relative == "index.html" {
        return Route::Page;
    }
    if let Some(op) = relative.strip_prefix(INTERACTION_PREFIX) {
        return Route::Interaction(op.to_string());
    }

    // No escaping the output directory.
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Route::NotFound;
    }

    let local = output.join(relative);
    if local.is_file() {
        Route::File(local)
    } else if local.join("index.html").is_file() {
        Route::File(local.join("index.html"))
    } else {
        Route::NotFound
    }
}

fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    if !matches!(request.method(), Method::Get | Method::Head) {
        return serve_status(request, 405, "405 Method Not Allowed");
    }

    match resolve(request.url(), &config.build.output) {
        Route::Page => {
            let html = render_request_page(request.url(), config);
            serve_bytes(request, html, "text/html; charset=utf-8")
        }
        Route::Interaction(op) => match apply_interaction(request.url(), &op, &resources()) {
            Some(href) => serve_redirect(request, &href),
            None => serve_status(request, 400, "400 Bad Request"),
        },
        Route::File(path) => {
            let content =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            serve_bytes(request, content, guess_content_type(&path))
        }
        Route::NotFound => serve_status(request, 404, "404 Not Found"),
    }
}

/// Render the page for a request URL.
///
/// The location is owned by this request only; the table reads it on mount
/// and never writes back during rendering.
fn render_request_page(url: &str, config: &SiteConfig) -> Vec<u8> {
    let location = MemoryLocation::from_request_url(url);
    let store = resources();
    let table = ResourceTable::mount(store.as_ref().clone(), Some(location));

    let html = render_page(config, &table);
    minify(MinifyType::Html(html.as_bytes()), config).into_owned()
}

/// Apply a `/table/<op>` request to a table mounted on the request's state.
///
/// Returns the page URL holding the new state, or `None` for an unknown
/// operation or invalid parameters. Interaction parameters never leak into
/// the resulting URL.
fn apply_interaction(url: &str, op: &str, store: &ResourceStore) -> Option<String> {
    let query = url.split_once('?').map_or("", |(_, query)| query);
    let interaction = Interaction::parse(op, query)?;

    let state = serialize_query(&parse_query(query));
    let location = MemoryLocation::new("/", state);
    let mut table = ResourceTable::mount(store.clone(), Some(location));
    table.apply(interaction);

    table.into_location().map(|location| location.href())
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("Invalid header {name}: {value}"))
}

fn serve_bytes(request: Request, content: Vec<u8>, content_type: &str) -> Result<()> {
    let response = Response::from_data(content)
        .with_header(header("Content-Type", content_type)?)
        .with_header(header("Cache-Control", "no-cache")?);
    request.respond(response).context("Failed to respond")
}

fn serve_status(request: Request, status: u16, body: &str) -> Result<()> {
    let response = Response::new(
        StatusCode(status),
        vec![header("Content-Type", "text/plain; charset=utf-8")?],
        Cursor::new(body.as_bytes().to_vec()),
        Some(body.len()),
        None,
    );
    request.respond(response).context("Failed to respond")
}

/// `303 See Other` to `location`, so the follow-up request is a GET.
fn serve_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::empty(StatusCode(303)).with_header(header("Location", location)?);
    request.respond(response).context("Failed to respond")
}

/// MIME type from file extension, `application/octet-stream` otherwise.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Resource;
    use tempfile::TempDir;

    fn output() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/logo.png"), b"png").unwrap();
        fs::write(dir.path().join("resources.json"), b"[]").unwrap();
        dir
    }

    #[test]
    fn test_resolve_page_routes() {
        let dir = output();
        for url in ["/", "/?name=basket", "/index.html", "/index.html?sort=name:desc", "/#info"] {
            assert_eq!(resolve(url, dir.path()), Route::Page, "{url}");
        }
    }

    #[test]
    fn test_resolve_files() {
        let dir = output();
        assert_eq!(
            resolve("/img/logo.png?v=2", dir.path()),
            Route::File(dir.path().join("img/logo.png"))
        );
        assert_eq!(
            resolve("/resources.json", dir.path()),
            Route::File(dir.path().join("resources.json"))
        );
    }

    #[test]
    fn test_resolve_not_found() {
        let dir = output();
        assert_eq!(resolve("/missing.css", dir.path()), Route::NotFound);
        assert_eq!(resolve("/img", dir.path()), Route::NotFound);
        assert_eq!(resolve("/../secret", dir.path()), Route::NotFound);
        assert_eq!(resolve("/%2e%2e/secret", dir.path()), Route::NotFound);
    }

    #[test]
    fn test_resolve_interaction() {
        let dir = output();
        assert_eq!(
            resolve("/table/toggle?column=name", dir.path()),
            Route::Interaction("toggle".into())
        );
        assert_eq!(
            resolve("/table/clear-filters", dir.path()),
            Route::Interaction("clear-filters".into())
        );
    }

    fn interaction_store() -> ResourceStore {
        let resource = |name: &str, category: &str| Resource {
            name: name.into(),
            category: category.into(),
            sport: "Basketball".into(),
            url: "https://example.com".into(),
            description: String::new(),
        };
        ResourceStore::new(vec![resource("Court Vision", "Sports"), resource("Aim Lab", "Esports")])
    }

    #[test]
    fn test_apply_interaction_toggle() {
        let store = interaction_store();
        let href = apply_interaction("/table/toggle?category=Sports&column=name", "toggle", &store);
        assert_eq!(href.as_deref(), Some("/?category=Sports&sort=name:asc"));

        let href = apply_interaction("/table/toggle?sort=name:desc&column=name", "toggle", &store);
        assert_eq!(href.as_deref(), Some("/"));
    }

    #[test]
    fn test_apply_interaction_filters_and_sort() {
        let store = interaction_store();

        let href = apply_interaction(
            "/table/filter?sort=name:asc&field=name&value=Court+Vision",
            "filter",
            &store,
        );
        assert_eq!(href.as_deref(), Some("/?name=Court%20Vision&sort=name:asc"));

        let href = apply_interaction(
            "/table/clear-filters?name=x&sport=Golf&sort=sport:desc",
            "clear-filters",
            &store,
        );
        assert_eq!(href.as_deref(), Some("/?sort=sport:desc"));

        let href = apply_interaction(
            "/table/sort?column=category&direction=desc",
            "sort",
            &store,
        );
        assert_eq!(href.as_deref(), Some("/?sort=category:desc"));

        let href = apply_interaction("/table/clear-sort?name=a&sort=name:asc", "clear-sort", &store);
        assert_eq!(href.as_deref(), Some("/?name=a"));
    }

    #[test]
    fn test_apply_interaction_noop_drops_params() {
        let store = interaction_store();
        let href = apply_interaction("/table/toggle?utm=1&column=url&name=a", "toggle", &store);
        assert_eq!(href.as_deref(), Some("/?name=a"));
    }

    #[test]
    fn test_apply_interaction_rejects_bad_requests() {
        let store = interaction_store();
        assert_eq!(apply_interaction("/table/explode", "explode", &store), None);
        assert_eq!(apply_interaction("/table/toggle", "toggle", &store), None);
        assert_eq!(apply_interaction("/table/filter?field=url", "filter", &store), None);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.json")), "application/json; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("logo.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }

    #[test]
    fn test_try_bind_port_skips_taken_port() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let (first, _) = try_bind_port(localhost, 0, 1).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();

        let (_second, addr) = try_bind_port(localhost, taken, 3).unwrap();
        assert_ne!(addr.port(), taken);
    }

    #[test]
    fn test_try_bind_port_without_retries() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let err = try_bind_port(localhost, 4000, 0).err().expect("expected bind failure");
        assert!(err.to_string().contains("no port available"));
    }
}
