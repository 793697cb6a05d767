#![allow(dead_code)]

use std::{collections::VecDeque, path::Path, sync::Mutex};

use async_trait::async_trait;
use scrobblecli::{
    Error, Res,
    config::Config,
    lastfm::{Params, Transport},
};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub verb: Verb,
    pub params: Params,
}

/// Replays queued responses in order and records every request.
///
/// When the queue runs dry the last response is repeated.
pub struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value, String>>>,
    last: Mutex<Option<Result<Value, String>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_responses(responses: Vec<Value>) -> Self {
        let fake = Self::new();
        for response in responses {
            fake.push(Ok(response));
        }
        fake
    }

    /// Queues a response; `Err` is returned as a transport failure.
    pub fn push(&self, response: Result<Value, String>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn respond(&self, verb: Verb, params: &Params) -> Res<Value> {
        self.calls.lock().unwrap().push(Call {
            verb,
            params: params.clone(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        let response = match next {
            Some(response) => {
                *self.last.lock().unwrap() = Some(response.clone());
                response
            }
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Err("no response queued".to_string())),
        };
        response.map_err(Error::Transport)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, params: &Params) -> Res<Value> {
        self.respond(Verb::Get, params)
    }

    async fn post(&self, params: &Params) -> Res<Value> {
        self.respond(Verb::Post, params)
    }
}

pub fn test_config(dir: &Path) -> Config {
    let mut config = Config::new("test-key", "test-secret");
    config.session_file = dir.join("lastfm_session.txt");
    config
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
