// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-process kind host and recording mock clients.

use crate::clients::{CredentialsClient, HelmfileClient, KindClient};
use crate::error::{ExtensionError, Result};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type Responses = Arc<Mutex<HashMap<String, Vec<(u16, String)>>>>;
type Hits = Arc<Mutex<HashMap<String, usize>>>;

/// A fake kind host serving scripted responses per path.
///
/// Responses registered for the same path are returned in order; the last one repeats.
#[derive(Clone, Default)]
pub struct MockKindHost {
    responses: Responses,
}

impl MockKindHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push((status, body.to_string()));
        self
    }

    pub async fn start(self) -> RunningMockKindHost {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let responses = self.responses;
        let hits: Hits = Arc::new(Mutex::new(HashMap::new()));

        let server_hits = hits.clone();
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let responses = responses.clone();
                let hits = server_hits.clone();
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let response = respond(&responses, &hits, req.uri().path());
                        async move { Ok::<_, Infallible>(response) }
                    });
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        RunningMockKindHost { addr, hits, handle }
    }
}

fn respond(responses: &Responses, hits: &Hits, path: &str) -> Response<Full<Bytes>> {
    let index = {
        let mut hits = hits.lock().unwrap();
        let count = hits.entry(path.to_string()).or_insert(0);
        *count += 1;
        *count - 1
    };

    let responses = responses.lock().unwrap();
    let (status, body) = match responses.get(path) {
        Some(scripted) if !scripted.is_empty() => scripted[index.min(scripted.len() - 1)].clone(),
        _ => (404, "not found".to_string()),
    };

    Response::builder()
        .status(status)
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

pub struct RunningMockKindHost {
    addr: SocketAddr,
    hits: Hits,
    handle: JoinHandle<()>,
}

impl RunningMockKindHost {
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Number of requests received for a path
    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

impl Drop for RunningMockKindHost {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Shared log of the calls made on the mock clients, in order
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn record(&self, call: &str) {
        self.0.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// Mock client that records every call and fails the ones listed in `failing`
#[derive(Clone, Default)]
pub struct MockClient {
    log: CallLog,
    failing: Vec<&'static str>,
}

impl MockClient {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            failing: Vec::new(),
        }
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.failing.push(call);
        self
    }

    fn call(&self, name: &str) -> Result<()> {
        self.log.record(name);
        if self.failing.iter().any(|f| *f == name) {
            return Err(ExtensionError::Credentials(format!("{} failed", name)));
        }
        Ok(())
    }
}

impl CredentialsClient for MockClient {
    async fn init(&self) -> Result<()> {
        self.call("credentials.init")
    }
}

impl KindClient for MockClient {
    async fn wait_for_readiness(&self, _timeout: Option<Duration>) -> Result<()> {
        self.call("kind.wait_for_readiness")
    }

    async fn prepare_kube_config(&self) -> Result<()> {
        self.call("kind.prepare_kube_config")
    }
}

impl HelmfileClient for MockClient {
    async fn lint(&self) -> Result<()> {
        self.call("helmfile.lint")
    }

    async fn diff(&self) -> Result<()> {
        self.call("helmfile.diff")
    }

    async fn apply(&self) -> Result<()> {
        self.call("helmfile.apply")
    }
}
