// Shared scripted engine for the legacy-layer integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use wdcompat_core::WaitConfig;
use wdcompat_interfaces::{
    ApiError, Arg, CommandContext, CommandEngine, ElementHandle, Method, Reply, SessionInfo,
    Target, default_strategies,
};
use wdcompat_legacy::poll::{CONDITION_SCRIPT, VISIBILITY_SCRIPT};
use wdcompat_legacy::{
    AliasRegistry, CommandPrototype, DeprecationEvent, DeprecationNotifier, LegacyCommand,
    MethodTable,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub target: Target,
    pub args: Vec<Arg>,
}

#[derive(Debug)]
struct State {
    elements: HashMap<(String, String), ElementHandle>,
    displayed: HashMap<String, bool>,
    visible_after: HashMap<String, Duration>,
    page_indexes: HashMap<String, Value>,
    condition_after: Option<Duration>,
    visible_text: String,
    find_timeout: u64,
    failures: HashMap<Method, ApiError>,
    element_failures: HashMap<(String, Method), ApiError>,
    late_failures: HashMap<Method, (usize, ApiError)>,
    calls: Vec<Call>,
    context: CommandContext,
    session: SessionInfo,
}

/// A `CommandEngine` whose answers are set up by the test.
///
/// Unscripted commands echo their name and arguments back as a JSON value, so
/// two calls with the same method and arguments always produce the same reply.
#[derive(Debug)]
pub struct FakeEngine {
    started: Instant,
    state: Mutex<State>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Instant::now(),
            state: Mutex::new(State {
                elements: HashMap::new(),
                displayed: HashMap::new(),
                visible_after: HashMap::new(),
                page_indexes: HashMap::new(),
                condition_after: None,
                visible_text: String::new(),
                find_timeout: 0,
                failures: HashMap::new(),
                element_failures: HashMap::new(),
                late_failures: HashMap::new(),
                calls: Vec::new(),
                context: CommandContext::default(),
                session: SessionInfo {
                    session_id: "session-1".to_string(),
                    capabilities: json!({ "browserName": "fake" }),
                },
            }),
        })
    }

    /// Makes `(using, value)` resolve to an element called `id`.
    pub fn with_element(&self, using: &str, value: &str, id: &str) -> ElementHandle {
        let element = ElementHandle::new(id);
        self.state
            .lock()
            .elements
            .insert((using.to_string(), value.to_string()), element.clone());
        element
    }

    pub fn set_displayed(&self, id: &str, displayed: bool) {
        self.state.lock().displayed.insert(id.to_string(), displayed);
    }

    /// The element gets a rendered size `delay` after the engine was created.
    pub fn visible_after(&self, id: &str, delay: Duration) {
        self.state.lock().visible_after.insert(id.to_string(), delay);
    }

    pub fn set_page_index(&self, id: &str, index: u64) {
        self.state.lock().page_indexes.insert(id.to_string(), json!(index));
    }

    /// Every condition script turns truthy `delay` after the engine was created.
    pub fn condition_after(&self, delay: Duration) {
        self.state.lock().condition_after = Some(delay);
    }

    pub fn set_visible_text(&self, text: &str) {
        self.state.lock().visible_text = text.to_string();
    }

    pub fn set_find_timeout_value(&self, ms: u64) {
        self.state.lock().find_timeout = ms;
    }

    pub fn find_timeout_value(&self) -> u64 {
        self.state.lock().find_timeout
    }

    pub fn fail(&self, method: Method, error: ApiError) {
        self.state.lock().failures.insert(method, error);
    }

    /// `method` fails only when it targets the element called `id`.
    pub fn fail_on(&self, id: &str, method: Method, error: ApiError) {
        self.state
            .lock()
            .element_failures
            .insert((id.to_string(), method), error);
    }

    /// The first `successes` calls of `method` go through, every later one fails.
    pub fn fail_after(&self, method: Method, successes: usize, error: ApiError) {
        self.state
            .lock()
            .late_failures
            .insert(method, (successes, error));
    }

    pub fn set_context(&self, context: CommandContext) {
        self.state.lock().context = context;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn calls_of(&self, method: Method) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method)
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Values written with `setFindTimeout`, in order.
    pub fn find_timeout_writes(&self) -> Vec<u64> {
        self.calls_of(Method::SetFindTimeout)
            .iter()
            .filter_map(|call| call.args.first().and_then(Arg::as_u64))
            .collect()
    }

    fn answer(&self, method: Method, target: &Target, args: &[Arg]) -> Result<Reply, ApiError> {
        let mut state = self.state.lock();
        if let Some(error) = state.failures.get(&method) {
            return Err(error.clone());
        }
        if let Target::Element(element) = target {
            if let Some(error) = state
                .element_failures
                .get(&(element.element_id.clone(), method))
            {
                return Err(error.clone());
            }
        }
        if let Some((successes, error)) = state.late_failures.get(&method) {
            let seen = state.calls.iter().filter(|call| call.method == method).count();
            if seen >= *successes {
                return Err(error.clone());
            }
        }

        match method {
            Method::Find => {
                let using = string_at(args, 0);
                let value = string_at(args, 1);
                state
                    .elements
                    .get(&(using.clone(), value.clone()))
                    .cloned()
                    .map(Reply::Element)
                    .ok_or(ApiError::NoSuchElement { using, value })
            }
            Method::FindAll => {
                let using = string_at(args, 0);
                let value = string_at(args, 1);
                let found = state
                    .elements
                    .get(&(using, value))
                    .cloned()
                    .into_iter()
                    .collect();
                Ok(Reply::Elements(found))
            }
            Method::GetFindTimeout => Ok(Reply::Value(json!(state.find_timeout))),
            Method::SetFindTimeout => {
                state.find_timeout = args.first().and_then(Arg::as_u64).unwrap_or(0);
                Ok(Reply::Undefined)
            }
            Method::IsDisplayed => {
                let id = element_id(target);
                Ok(Reply::from(state.displayed.get(&id).copied().unwrap_or(false)))
            }
            Method::GetProperty => {
                let id = element_id(target);
                Ok(Reply::Value(
                    state.page_indexes.get(&id).cloned().unwrap_or(Value::Null),
                ))
            }
            Method::GetVisibleText => Ok(Reply::Value(json!(state.visible_text))),
            Method::GetAttribute => Ok(Reply::Value(json!(format!(
                "{}@{}",
                string_at(args, 0),
                match target {
                    Target::Context => "context".to_string(),
                    Target::Element(element) => element.element_id.clone(),
                }
            )))),
            Method::Equals => {
                let other = args.first().and_then(Arg::as_element).cloned();
                let same = match target {
                    Target::Element(element) => other.as_ref() == Some(element),
                    Target::Context => other
                        .map(|other| state.context.elements.contains(&other))
                        .unwrap_or(false),
                };
                Ok(Reply::from(same))
            }
            Method::Execute => {
                let script = string_at(args, 0);
                let script_args = args.get(1).map(Arg::to_value).unwrap_or(Value::Null);
                let elapsed = self.started.elapsed();
                if script == VISIBILITY_SCRIPT {
                    let id = script_args[0]["ELEMENT"].as_str().unwrap_or_default().to_string();
                    let visible = state
                        .visible_after
                        .get(&id)
                        .map(|delay| elapsed >= *delay)
                        .unwrap_or(false);
                    Ok(Reply::Value(if visible { json!(true) } else { Value::Null }))
                } else if script == CONDITION_SCRIPT {
                    let truthy = state
                        .condition_after
                        .map(|delay| elapsed >= delay)
                        .unwrap_or(false);
                    Ok(Reply::Value(if truthy { json!(true) } else { Value::Null }))
                } else {
                    Ok(Reply::Value(json!({ "script": script, "args": script_args })))
                }
            }
            _ => Ok(echo(method, target, args)),
        }
    }
}

#[async_trait]
impl CommandEngine for FakeEngine {
    async fn invoke(
        &self,
        method: Method,
        target: Target,
        args: Vec<Arg>,
    ) -> Result<Reply, ApiError> {
        let reply = self.answer(method, &target, &args);
        self.state.lock().calls.push(Call {
            method,
            target,
            args,
        });
        reply
    }

    fn context(&self) -> CommandContext {
        self.state.lock().context.clone()
    }

    fn session(&self) -> SessionInfo {
        self.state.lock().session.clone()
    }
}

fn string_at(args: &[Arg], index: usize) -> String {
    args.get(index)
        .and_then(Arg::as_str)
        .unwrap_or_default()
        .to_string()
}

fn element_id(target: &Target) -> String {
    match target {
        Target::Element(element) => element.element_id.clone(),
        Target::Context => String::new(),
    }
}

pub fn echo(method: Method, target: &Target, args: &[Arg]) -> Reply {
    let on = match target {
        Target::Context => Value::Null,
        Target::Element(element) => json!(element.element_id),
    };
    Reply::Value(json!({
        "method": method.as_str(),
        "target": on,
        "args": args.iter().map(Arg::to_value).collect::<Vec<_>>(),
    }))
}

/// A legacy command over `engine`, a private notifier and the events it publishes.
pub struct Harness {
    pub engine: Arc<FakeEngine>,
    pub command: LegacyCommand,
    pub notifier: Arc<DeprecationNotifier>,
    pub events: Arc<Mutex<Vec<DeprecationEvent>>>,
    pub table: MethodTable,
}

impl Harness {
    pub fn new(engine: Arc<FakeEngine>) -> Self {
        Self::with_waits(engine, WaitConfig::default())
    }

    pub fn with_waits(engine: Arc<FakeEngine>, waits: WaitConfig) -> Self {
        let notifier = Arc::new(DeprecationNotifier::new());
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        notifier.subscribe(move |event: &DeprecationEvent| sink.lock().push(event.clone()));

        let table = AliasRegistry::new(notifier.clone(), waits).build(&default_strategies());
        let mut command = LegacyCommand::new(engine.clone());
        table.apply_to(&mut command as &mut dyn CommandPrototype);

        Self {
            engine,
            command,
            notifier,
            events,
            table,
        }
    }

    pub async fn call(&self, name: &str, args: Vec<Arg>) -> Result<Reply, ApiError> {
        self.command.call(name, args).await
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events.lock().iter().map(|event| event.name.clone()).collect()
    }

    pub fn last_event(&self) -> Option<DeprecationEvent> {
        self.events.lock().last().cloned()
    }
}
