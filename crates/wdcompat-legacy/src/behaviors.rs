//! Legacy methods whose behavior is more than a rename.
//!
//! Every function here emits its deprecation notice first and then either
//! propagates the engine's outcome unchanged or, for the documented probes
//! (`elementOrNull`, `elementIfExists`, `hasElement`, `isVisible(using, value)`),
//! turns a lookup failure into a sentinel.

use crate::deprecation::DeprecationNotifier;
use crate::dispatch::rotate_trailing_handle;
use crate::member::Invocation;
use crate::poll::{CONDITION_SCRIPT, VisibilityPoller, poll_until};
use crate::scoped::{FindTimeout, with_temporary_setting};
use futures::future::try_join_all;
use log::debug;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use wdcompat_core::WaitConfig;
use wdcompat_interfaces::{ApiError, Arg, ElementHandle, Method, Reply, Target};

const NON_STANDARD: &str = "This command is not part of any WebDriver standard.";
const NO_OP: &str = "This command is not part of any WebDriver standard. This command is a no-op.";

/// State shared by every resolved legacy method.
#[derive(Debug)]
pub struct LegacyEnv {
    pub notifier: Arc<DeprecationNotifier>,
    pub waits: WaitConfig,
}

impl LegacyEnv {
    pub fn new(notifier: Arc<DeprecationNotifier>, waits: WaitConfig) -> Self {
        Self { notifier, waits }
    }

    pub fn notify(&self, name: &str, replacement: Option<&str>, extra: Option<&str>) {
        self.notifier.notify(name, replacement, extra);
    }

    /// Notice for a plain rename, in `Command#` notation.
    pub fn deprecate(&self, from: &str, to: &str) {
        self.notify(
            &format!("Command#{}", from),
            Some(&format!("Command#{}", to)),
            None,
        );
    }

    /// Notice for the `(element, ...)` call shape of `from`.
    pub fn deprecate_element_form(&self, from: &str, to: &str) {
        self.notify(
            &format!("Command#{}(element)", from),
            Some(&format!(
                "Command#find then Command#{}, or Command#find then Command#then(element => element.{}())",
                from, to
            )),
            None,
        );
    }
}

// --- Session and server ---

pub async fn status(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#status", None, None);
    inv.engine.invoke(Method::GetStatus, Target::Context, Vec::new()).await
}

pub async fn init(env: Arc<LegacyEnv>, _inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#init", None, None);
    Ok(Reply::Chain)
}

pub async fn sessions(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#sessions", None, None);
    inv.engine.invoke(Method::GetSessions, Target::Context, Vec::new()).await
}

pub async fn session_capabilities(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#sessionCapabilities",
        Some("the Command#session.capabilities property"),
        None,
    );
    Ok(Reply::Value(inv.engine.session().capabilities))
}

pub async fn alt_session_capabilities(
    env: Arc<LegacyEnv>,
    inv: Invocation,
) -> Result<Reply, ApiError> {
    env.notify(
        "Command#altSessionCapabilities",
        Some("the Command#session.capabilities property"),
        None,
    );
    Ok(Reply::Value(inv.engine.session().capabilities))
}

pub async fn get_session_id(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#getSessionId",
        Some("the Command#session.sessionId property"),
        None,
    );
    Ok(Reply::Value(Value::from(inv.engine.session().session_id)))
}

pub async fn get_session_id_upper(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#getSessionID",
        Some("the Command#session.sessionId property"),
        None,
    );
    Ok(Reply::Value(Value::from(inv.engine.session().session_id)))
}

// --- Scripts ---

async fn eval_code(inv: Invocation) -> Result<Reply, ApiError> {
    let code = inv.value_arg(0);
    inv.engine
        .execute("return eval(arguments[0]);", vec![code])
        .await
        .map(Reply::Value)
}

pub async fn eval(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#eval", Some("Command#execute with a return call"), None);
    eval_code(inv).await
}

pub async fn safe_eval(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#safeEval", Some("Command#execute with a return call"), None);
    eval_code(inv).await
}

pub async fn new_window(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#newWindow", Some("Command#execute"), None);
    let args = vec![inv.value_arg(0), inv.value_arg(1)];
    inv.engine
        .execute("window.open(arguments[0], arguments[1]);", args)
        .await
        .map(Reply::Value)
}

pub async fn window_name(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#windowName", Some("Command#execute"), None);
    inv.engine
        .execute("return window.name;", Vec::new())
        .await
        .map(Reply::Value)
}

// --- Windows ---

pub async fn set_window_size(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    let (args, rotated) = rotate_trailing_handle(inv.args);
    if rotated {
        env.notify(
            "Command#setWindowSize(width, height, handle)",
            Some("Command#setWindowSize(handle, width, height)"),
            None,
        );
    }
    inv.engine.invoke(Method::SetWindowSize, Target::Context, args).await
}

pub async fn set_window_position(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    let (args, rotated) = rotate_trailing_handle(inv.args);
    if rotated {
        env.notify(
            "Command#setWindowPosition(x, y, handle)",
            Some("Command#setWindowPosition(handle, x, y)"),
            None,
        );
    }
    inv.engine.invoke(Method::SetWindowPosition, Target::Context, args).await
}

pub async fn get_location_in_view(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#getLocationInView",
        Some("Command#getPosition"),
        Some(
            "This command is internal to the WebDriver protocol and should never have been exposed to end users. \
             The returned value of this command will be the same as Command#getPosition, which may not match \
             prior behaviour.",
        ),
    );
    inv.engine.invoke(Method::GetPosition, Target::Context, inv.args).await
}

// --- Lookups ---

pub async fn elements_by_id(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#elementsById", Some("Command#findById"), None);
    let value = inv.str_arg(0, "value")?;
    inv.engine
        .invoke(
            Method::FindAll,
            Target::Context,
            vec![Arg::from("id"), Arg::from(value)],
        )
        .await
}

pub async fn element_or_null(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#elementOrNull",
        Some("Command#find and Command#always, or Command#findAll"),
        None,
    );
    let using = inv.str_arg(0, "using")?;
    let value = inv.str_arg(1, "value")?;
    match inv.engine.find(&using, &value).await {
        Ok(element) => Ok(Reply::Element(element)),
        Err(err) => {
            debug!("elementOrNull({}, {}) found nothing: {}", using, value, err);
            Ok(Reply::Value(Value::Null))
        }
    }
}

pub async fn element_if_exists(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#elementIfExists",
        Some("Command#find and Command#always, or Command#findAll"),
        None,
    );
    let using = inv.str_arg(0, "using")?;
    let value = inv.str_arg(1, "value")?;
    match inv.engine.find(&using, &value).await {
        Ok(element) => Ok(Reply::Element(element)),
        Err(err) => {
            debug!("elementIfExists({}, {}) found nothing: {}", using, value, err);
            Ok(Reply::Undefined)
        }
    }
}

pub async fn has_element(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#hasElement",
        Some("Command#find and Command#then(exists, doesNotExist)"),
        None,
    );
    let using = inv.str_arg(0, "using")?;
    let value = inv.str_arg(1, "value")?;
    let found = inv.engine.find(&using, &value).await.is_ok();
    Ok(Reply::from(found))
}

// --- Element state ---

pub async fn get_value(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    let target = match inv.element_arg(0) {
        Some(element) => {
            env.notify(
                "Command#getValue(element)",
                Some(
                    "Command#find then Command#getAttribute('value'), or Command#find then \
                     Command#then(element => element.getAttribute('value'))",
                ),
                None,
            );
            Target::Element(element.clone())
        }
        None => {
            env.notify(
                "Command#getValue",
                Some("Command#find then Command#getAttribute('value')"),
                None,
            );
            Target::Context
        }
    };
    inv.engine.get_attribute(target, "value").await.map(Reply::Value)
}

pub async fn equals_element(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    let element = inv.element_arg(0).cloned().ok_or_else(|| {
        ApiError::InvalidParameters("equalsElement expects an element handle".to_string())
    })?;

    let equal = match inv.element_arg(1) {
        Some(other) => {
            env.notify(
                "Command#equalsElement(element, other)",
                Some("element.equals(other)"),
                None,
            );
            inv.engine
                .equals(Target::Element(element), other.clone())
                .await?
        }
        None => {
            env.deprecate("equalsElement", "equals");
            inv.engine.equals(Target::Context, element).await?
        }
    };
    Ok(Reply::from(equal))
}

/// `textPresent(searchText, element?)`.
///
/// The legacy documentation listed these two arguments the other way round; the
/// `(searchText, element)` order is what callers actually relied on and is kept.
pub async fn text_present(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#textPresent",
        Some("Command#getVisibleText and a promise helper"),
        None,
    );
    let search_text = inv.str_arg(0, "searchText")?;
    let target = match inv.element_arg(1) {
        Some(element) => Target::Element(element.clone()),
        None => Target::Context,
    };
    let text = inv.engine.get_visible_text(target).await?;
    Ok(Reply::from(text.contains(&search_text)))
}

/// First element of a single-element context, or every element in order.
fn context_elements(inv: &Invocation) -> Result<(Vec<ElementHandle>, bool), ApiError> {
    let context = inv.engine.context();
    if context.is_single {
        let first = context.elements.into_iter().next().ok_or_else(|| {
            ApiError::InvalidParameters("the command context holds no element".to_string())
        })?;
        Ok((vec![first], true))
    } else {
        Ok((context.elements, false))
    }
}

pub async fn get_page_index(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#getPageIndex", None, Some(NON_STANDARD));
    let engine = inv.engine.clone();

    if let Some(element) = inv.element_arg(0) {
        return engine
            .get_property(element.clone(), "pageIndex")
            .await
            .map(Reply::Value);
    }

    let (elements, single) = context_elements(&inv)?;
    let indexes = try_join_all(
        elements
            .into_iter()
            .map(|element| engine.get_property(element, "pageIndex")),
    )
    .await?;

    if single {
        Ok(Reply::Value(indexes.into_iter().next().unwrap_or(Value::Null)))
    } else {
        Ok(Reply::Value(Value::Array(indexes)))
    }
}

pub async fn is_visible(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#isVisible",
        Some("Command#isDisplayed"),
        Some("This command is implemented using Command#isDisplayed, which may not match the prior behaviour."),
    );
    let engine = inv.engine.clone();

    if inv.args.len() == 2 {
        let lookup = match (inv.str_arg(0, "using"), inv.str_arg(1, "value")) {
            (Ok(using), Ok(value)) => match engine.find(&using, &value).await {
                Ok(element) => engine.is_displayed(Target::Element(element)).await,
                Err(err) => Err(err),
            },
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        return Ok(Reply::from(lookup.unwrap_or(false)));
    }

    if inv.args.len() == 1 {
        if let Some(element) = inv.element_arg(0) {
            let displayed = engine.is_displayed(Target::Element(element.clone())).await?;
            return Ok(Reply::from(displayed));
        }
    }

    let (elements, single) = context_elements(&inv)?;
    let displayed = try_join_all(
        elements
            .into_iter()
            .map(|element| engine.is_displayed(Target::Element(element))),
    )
    .await?;

    if single {
        Ok(Reply::from(displayed.into_iter().next().unwrap_or(false)))
    } else {
        Ok(Reply::Value(Value::Array(
            displayed.into_iter().map(Value::Bool).collect(),
        )))
    }
}

// --- Waits ---

pub async fn wait_for_element(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#waitForElement",
        Some("Command#setFindTimeout and Command#find"),
        Some("This command is implemented using implicit timeouts, which may not match the prior behaviour."),
    );
    let using = inv.str_arg(0, "using")?;
    let value = inv.str_arg(1, "value")?;
    let timeout = inv.u64_arg(2, "timeout")?;

    let engine = inv.engine.as_ref();
    let element = with_temporary_setting(
        &FindTimeout::new(engine),
        timeout,
        engine.find(&using, &value),
    )
    .await?;
    Ok(Reply::Element(element))
}

pub async fn wait_for_visible(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    let started = Instant::now();
    env.notify(
        "Command#waitForVisible",
        None,
        Some("This command is partially implemented using implicit timeouts, which may not match the prior behaviour."),
    );
    let using = inv.str_arg(0, "using")?;
    let value = inv.str_arg(1, "value")?;
    let timeout = inv.u64_arg(2, "timeout")?;

    let engine = inv.engine.as_ref();
    let poller = VisibilityPoller::new(env.waits.visibility_poll_interval);
    with_temporary_setting(&FindTimeout::new(engine), timeout, async {
        let element = engine.find(&using, &value).await?;
        let remaining = Duration::from_millis(timeout).saturating_sub(started.elapsed());
        if poller.wait_until_visible(engine, &element, remaining).await? {
            Ok(Reply::Undefined)
        } else {
            Err(ApiError::ElementNotVisible {
                using: using.clone(),
                value: value.clone(),
            })
        }
    })
    .await
}

async fn wait_for_expression(env: &LegacyEnv, inv: Invocation) -> Result<Reply, ApiError> {
    let expression = inv.str_arg(0, "expression")?;
    // Zero or missing falls back to the configured defaults, as the legacy API did.
    let timeout = inv
        .arg(1)
        .and_then(Arg::as_u64)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(env.waits.condition_timeout);
    let interval = inv
        .arg(2)
        .and_then(Arg::as_u64)
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(env.waits.condition_poll_interval);

    let outcome = poll_until(
        inv.engine.as_ref(),
        CONDITION_SCRIPT,
        vec![Value::from(expression.clone())],
        timeout,
        interval,
    )
    .await?;

    if outcome.is_null() {
        Err(ApiError::ConditionTimeout {
            expression,
            timeout_ms: timeout.as_millis() as u64,
        })
    } else {
        Ok(Reply::Value(outcome))
    }
}

pub async fn wait_for_condition(env: Arc<LegacyEnv>, inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#waitForCondition",
        Some("Command#executeAsync or a pollUntil helper"),
        None,
    );
    wait_for_expression(&env, inv).await
}

pub async fn wait_for_condition_in_browser(
    env: Arc<LegacyEnv>,
    inv: Invocation,
) -> Result<Reply, ApiError> {
    env.notify(
        "Command#waitForConditionInBrowser",
        Some("Command#executeAsync or a pollUntil helper"),
        None,
    );
    wait_for_expression(&env, inv).await
}

// --- Compatibility no-ops ---

pub async fn upload_file(env: Arc<LegacyEnv>, _inv: Invocation) -> Result<Reply, ApiError> {
    env.notify(
        "Command#uploadFile",
        Some("Command#type to type a file path into a file upload form control"),
        Some(NO_OP),
    );
    Ok(Reply::Chain)
}

pub async fn set_http_inactivity_timeout(
    env: Arc<LegacyEnv>,
    _inv: Invocation,
) -> Result<Reply, ApiError> {
    env.notify("Command#setHTTPInactivityTimeout", None, None);
    Ok(Reply::Chain)
}

pub async fn sauce_job_update(env: Arc<LegacyEnv>, _inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#sauceJobUpdate", None, Some(NO_OP));
    Ok(Reply::Chain)
}

pub async fn sauce_job_status(env: Arc<LegacyEnv>, _inv: Invocation) -> Result<Reply, ApiError> {
    env.notify("Command#sauceJobStatus", None, Some(NO_OP));
    Ok(Reply::Chain)
}
