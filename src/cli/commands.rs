use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use http::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
};
use http::{Method, StatusCode};
use serde::Serialize;
use tracing::info;

use crate::handler::{handler_fn, Handler, HandlerRequest, RequestContext, ResponseWriter};
use crate::middleware::{skip_fn, CorsConfig, CorsMiddleware, Middleware};

/// Command-line interface for the CORS filter
#[derive(Parser)]
#[command(name = "cors-filter")]
#[command(about = "Evaluate CORS policies against synthetic requests", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one request through the filter and print the resulting response as JSON
    Evaluate {
        /// CORS policy file (YAML or JSON); defaults apply when omitted
        #[arg(short, long, env = "CORS_CONFIG")]
        config: Option<PathBuf>,

        /// Request method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path
        #[arg(short, long, default_value = "/")]
        path: String,

        /// `Origin` header value
        #[arg(short, long)]
        origin: Option<String>,

        /// `Access-Control-Request-Headers` header value
        #[arg(long)]
        request_headers: Option<String>,

        /// `Access-Control-Request-Method` header value
        #[arg(long)]
        request_method: Option<String>,

        /// Paths that bypass CORS processing (repeatable)
        #[arg(long = "skip-path")]
        skip_paths: Vec<String>,
    },
    /// Print the default policy as YAML
    Defaults,
}

/// A synthetic request for [`evaluate`].
#[derive(Debug, Clone, Default)]
pub struct Probe {
    pub method: String,
    pub path: String,
    pub origin: Option<String>,
    pub request_headers: Option<String>,
    pub request_method: Option<String>,
    pub skip_paths: Vec<String>,
}

impl Probe {
    fn to_request(&self) -> anyhow::Result<HandlerRequest> {
        let method = Method::from_bytes(self.method.as_bytes())
            .with_context(|| format!("invalid method '{}'", self.method))?;
        let mut req = HandlerRequest::new(method, self.path.clone());
        let headers: [(HeaderName, &Option<String>); 3] = [
            (ORIGIN, &self.origin),
            (ACCESS_CONTROL_REQUEST_HEADERS, &self.request_headers),
            (ACCESS_CONTROL_REQUEST_METHOD, &self.request_method),
        ];
        for (name, value) in headers {
            if let Some(value) = value {
                let value = HeaderValue::from_str(value)
                    .with_context(|| format!("invalid value for {name}"))?;
                req.headers.insert(name, value);
            }
        }
        Ok(req)
    }
}

/// What the filter produced for a [`Probe`].
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub status: u16,
    /// Response headers; repeated values are joined with `, `
    pub headers: BTreeMap<String, String>,
    pub body_len: usize,
    pub handler_invoked: bool,
}

/// Run `probe` through a filter built from `config`, wrapping a stub handler
/// that answers `200 {"ok":true}`.
///
/// # Errors
///
/// Fails on an unparsable method or header value, or if the filter fails to
/// write a header.
pub fn evaluate(config: Option<CorsConfig>, probe: &Probe) -> anyhow::Result<Evaluation> {
    let req = probe.to_request()?;
    let invoked = Arc::new(AtomicBool::new(false));
    let seen = Arc::clone(&invoked);
    let stub = handler_fn(move |_ctx, rw: &mut ResponseWriter, _req| {
        seen.store(true, Ordering::SeqCst);
        rw.write_json(StatusCode::OK, &serde_json::json!({ "ok": true }))
    });

    let skip_paths = probe.skip_paths.clone();
    let cors = CorsMiddleware::with_config(config)
        .with_skipper(skip_fn(move |_ctx, req: &HandlerRequest| {
            skip_paths.iter().any(|p| p == &req.path)
        }));
    let filter = cors.wrap(stub);

    let ctx = RequestContext::for_request(&req);
    let mut rw = ResponseWriter::new();
    filter.call(&ctx, &mut rw, &req)?;

    let mut headers: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in rw.headers() {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        headers
            .entry(name.as_str().to_string())
            .and_modify(|v| {
                v.push_str(", ");
                v.push_str(&value);
            })
            .or_insert(value);
    }

    Ok(Evaluation {
        status: rw.status().as_u16(),
        headers,
        body_len: rw.body().len(),
        handler_invoked: invoked.load(Ordering::SeqCst),
    })
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Propagates config loading, evaluation and serialization failures.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Evaluate {
            config,
            method,
            path,
            origin,
            request_headers,
            request_method,
            skip_paths,
        } => {
            let config = config.map(CorsConfig::load).transpose()?;
            let probe = Probe {
                method,
                path,
                origin,
                request_headers,
                request_method,
                skip_paths,
            };
            let evaluation = evaluate(config, &probe)?;
            info!(
                status = evaluation.status,
                handler_invoked = evaluation.handler_invoked,
                "evaluated request"
            );
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
        Commands::Defaults => {
            print!("{}", CorsConfig::resolve(None).to_yaml_string()?);
        }
    }
    Ok(())
}
