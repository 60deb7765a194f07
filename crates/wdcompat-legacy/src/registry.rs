//! The legacy-name → behavior table.

use crate::behaviors::{self, LegacyEnv};
use crate::deprecation::DeprecationNotifier;
use crate::dispatch::{Signature, split_leading_element};
use crate::installer::MethodTable;
use crate::member::{Invocation, LegacyGetter, LegacyMethod, Member};
use crate::strategies::StrategyExpander;
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use wdcompat_core::WaitConfig;
use wdcompat_interfaces::{ApiError, LocatorStrategy, Method, Reply, Target};

/// How a legacy name maps onto the current API.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Same arguments, renamed command, current context.
    Delegate(Method),
    /// Acts on a leading element handle when one is passed, otherwise on the
    /// current context (through `fallback` when set).
    ElementAware {
        to: Method,
        fallback: Option<LegacyMethod>,
    },
    /// Anything that needs more than a rename.
    Custom(LegacyMethod),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorKind {
    Delegate,
    ElementAware,
    Custom,
}

impl Behavior {
    pub fn kind(&self) -> BehaviorKind {
        match self {
            Behavior::Delegate(_) => BehaviorKind::Delegate,
            Behavior::ElementAware { .. } => BehaviorKind::ElementAware,
            Behavior::Custom(_) => BehaviorKind::Custom,
        }
    }
}

/// A single row of the alias table.
#[derive(Debug, Clone)]
pub struct LegacyMethodEntry {
    pub name: String,
    pub behavior: Behavior,
}

impl LegacyMethodEntry {
    /// Turns the row into a callable bound to `env`.
    pub fn resolve(&self, env: &Arc<LegacyEnv>) -> LegacyMethod {
        match &self.behavior {
            Behavior::Delegate(to) => delegate(env, &self.name, *to),
            Behavior::ElementAware { to, fallback } => {
                element_aware(env, &self.name, *to, fallback.clone())
            }
            Behavior::Custom(method) => method.clone(),
        }
    }
}

fn delegate(env: &Arc<LegacyEnv>, from: &str, to: Method) -> LegacyMethod {
    let env = env.clone();
    let from = from.to_string();
    LegacyMethod::new(move |inv: Invocation| {
        let env = env.clone();
        let from = from.clone();
        async move {
            env.deprecate(&from, to.as_str());
            inv.engine.invoke(to, Target::Context, inv.args).await
        }
    })
}

fn element_aware(
    env: &Arc<LegacyEnv>,
    from: &str,
    to: Method,
    fallback: Option<LegacyMethod>,
) -> LegacyMethod {
    let env = env.clone();
    let from = from.to_string();
    LegacyMethod::new(move |inv: Invocation| {
        let env = env.clone();
        let from = from.clone();
        let fallback = fallback.clone();
        async move {
            let engine = inv.engine.clone();
            match split_leading_element(inv.args) {
                Signature::Element { element, rest } => {
                    env.deprecate_element_form(&from, to.as_str());
                    engine.invoke(to, Target::Element(element), rest).await
                }
                Signature::Context(args) => match fallback {
                    Some(fallback) => fallback.call(Invocation::new(engine, args)).await,
                    None => {
                        // `click()` and friends are current API in their context form.
                        if from != to.as_str() {
                            env.deprecate(&from, to.as_str());
                        }
                        engine.invoke(to, Target::Context, args).await
                    }
                },
            }
        }
    })
}

fn session_id_getter(env: &Arc<LegacyEnv>) -> LegacyGetter {
    let env = env.clone();
    LegacyGetter::new(move |engine| {
        env.notify(
            "Command#sessionID",
            Some("the Command#session.sessionId property"),
            None,
        );
        Value::from(engine.session().session_id)
    })
}

/// Name of the read-only accessor every table carries.
pub const SESSION_ID_PROPERTY: &str = "sessionID";

/// Assembles the legacy method table.
///
/// Each legacy name is defined exactly once; `build` resolves the rows into
/// callables and adds the locator-strategy families and the `sessionID` getter.
pub struct AliasRegistry {
    env: Arc<LegacyEnv>,
    entries: BTreeMap<String, Behavior>,
}

impl AliasRegistry {
    pub fn new(notifier: Arc<DeprecationNotifier>, waits: WaitConfig) -> Self {
        let mut registry = Self {
            env: Arc::new(LegacyEnv::new(notifier, waits)),
            entries: BTreeMap::new(),
        };
        registry.register_renames();
        registry.register_element_methods();
        registry.register_custom();
        registry
    }

    pub fn env(&self) -> &Arc<LegacyEnv> {
        &self.env
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn kind_of(&self, name: &str) -> Option<BehaviorKind> {
        self.entries.get(name).map(Behavior::kind)
    }

    pub fn entries(&self) -> impl Iterator<Item = LegacyMethodEntry> + '_ {
        self.entries.iter().map(|(name, behavior)| LegacyMethodEntry {
            name: name.clone(),
            behavior: behavior.clone(),
        })
    }

    /// Resolves every row and adds the generated strategy families.
    pub fn build(&self, strategies: &[LocatorStrategy]) -> MethodTable {
        let mut table = MethodTable::default();
        for entry in self.entries() {
            let method = entry.resolve(&self.env);
            table.insert(entry.name, Member::Method(method));
        }
        for (name, method) in StrategyExpander::new(strategies).expand(&self.env) {
            table.insert(name, Member::Method(method));
        }
        table.insert(
            SESSION_ID_PROPERTY.to_string(),
            Member::Getter(session_id_getter(&self.env)),
        );

        info!(
            "Built legacy method table: {} aliases, {} members in total",
            self.entries.len(),
            table.len()
        );
        table
    }

    fn define(&mut self, name: &str, behavior: Behavior) {
        let previous = self.entries.insert(name.to_string(), behavior);
        debug_assert!(previous.is_none(), "legacy method {} defined twice", name);
    }

    fn rename(&mut self, from: &str, to: Method) {
        self.define(from, Behavior::Delegate(to));
    }

    fn element_method(&mut self, from: &str, to: Method) {
        self.define(from, Behavior::ElementAware { to, fallback: None });
    }

    /// Element-aware, with the context form deprecated in favour of `to`.
    fn element_or_rename(&mut self, from: &str, to: Method) {
        let fallback = delegate(&self.env, from, to);
        self.define(
            from,
            Behavior::ElementAware {
                to,
                fallback: Some(fallback),
            },
        );
    }

    fn custom<F, Fut>(&mut self, name: &str, f: F)
    where
        F: Fn(Arc<LegacyEnv>, Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Reply, ApiError>> + Send + 'static,
    {
        let env = self.env.clone();
        let method = LegacyMethod::new(move |inv| f(env.clone(), inv));
        self.define(name, Behavior::Custom(method));
    }

    fn register_renames(&mut self) {
        // `otherwise` and `always` have no rows: their callbacks cannot be passed as `Arg`s,
        // and awaiting the returned future already covers `catch`/`finally`.
        // Timeouts
        self.rename("setAsyncScriptTimeout", Method::SetExecuteAsyncTimeout);
        self.rename("setWaitTimeout", Method::SetFindTimeout);
        self.rename("setImplicitWaitTimeout", Method::SetFindTimeout);
        // Windows and navigation
        self.rename("windowHandle", Method::GetCurrentWindowHandle);
        self.rename("windowHandles", Method::GetAllWindowHandles);
        self.rename("url", Method::GetCurrentUrl);
        self.rename("forward", Method::GoForward);
        self.rename("back", Method::GoBack);
        self.rename("frame", Method::SwitchToFrame);
        self.rename("window", Method::SwitchToWindow);
        self.rename("close", Method::CloseCurrentWindow);
        self.rename("windowSize", Method::SetWindowSize);
        self.rename("maximize", Method::MaximizeWindow);
        self.rename("source", Method::GetPageSource);
        self.rename("title", Method::GetPageTitle);
        // Scripts
        self.rename("safeExecute", Method::Execute);
        self.rename("safeExecuteAsync", Method::ExecuteAsync);
        // Cookies and storage
        self.rename("allCookies", Method::GetCookies);
        self.rename("deleteAllCookies", Method::ClearCookies);
        self.rename("setLocalStorageKey", Method::SetLocalStorageItem);
        self.rename("getLocalStorageKey", Method::GetLocalStorageItem);
        self.rename("removeLocalStorageKey", Method::DeleteLocalStorageItem);
        // Logs
        self.rename("log", Method::GetLogsFor);
        self.rename("logTypes", Method::GetAvailableLogTypes);
        // Single lookups
        self.rename("element", Method::Find);
        self.rename("elementByClassName", Method::FindByClassName);
        self.rename("elementByCssSelector", Method::FindByCssSelector);
        self.rename("elementById", Method::FindById);
        self.rename("elementByName", Method::FindByName);
        self.rename("elementByLinkText", Method::FindByLinkText);
        self.rename("elementByPartialLinkText", Method::FindByPartialLinkText);
        self.rename("elementByTagName", Method::FindByTagName);
        self.rename("elementByXPath", Method::FindByXpath);
        self.rename("elementByCss", Method::FindByCssSelector);
        // Multiple lookups
        self.rename("elements", Method::FindAll);
        self.rename("elementsByClassName", Method::FindAllByClassName);
        self.rename("elementsByCssSelector", Method::FindAllByCssSelector);
        self.rename("elementsByName", Method::FindAllByName);
        self.rename("elementsByLinkText", Method::FindAllByLinkText);
        self.rename("elementsByPartialLinkText", Method::FindAllByPartialLinkText);
        self.rename("elementsByTagName", Method::FindAllByTagName);
        self.rename("elementsByXPath", Method::FindAllByXpath);
        self.rename("elementsByCss", Method::FindAllByCssSelector);
        self.rename("active", Method::GetActiveElement);
        // Input
        self.rename("keys", Method::Type);
        self.rename("alertText", Method::GetAlertText);
        self.rename("alertKeys", Method::TypeInPrompt);
        self.rename("buttonDown", Method::PressMouseButton);
        self.rename("buttonUp", Method::ReleaseMouseButton);
        self.rename("doubleclick", Method::DoubleClick);
        self.rename("flick", Method::FlickFinger);
    }

    fn register_element_methods(&mut self) {
        self.element_method("clickElement", Method::Click);
        self.element_method("submit", Method::Submit);
        // Whether a caller means the old element `type` or the session one cannot be
        // told apart from the context form, so it passes through unchanged.
        self.element_method("type", Method::Type);
        self.element_method("getTagName", Method::GetTagName);
        self.element_method("isSelected", Method::IsSelected);
        self.element_method("isEnabled", Method::IsEnabled);
        self.element_method("getAttribute", Method::GetAttribute);
        self.element_method("isDisplayed", Method::IsDisplayed);
        self.element_method("getSize", Method::GetSize);
        self.element_method("click", Method::Click);
        self.element_method("tapElement", Method::Tap);

        self.element_or_rename("text", Method::GetVisibleText);
        self.element_or_rename("clear", Method::ClearValue);
        self.element_or_rename("enabled", Method::IsEnabled);
        self.element_or_rename("displayed", Method::IsDisplayed);
        self.element_or_rename("getLocation", Method::GetPosition);
        self.element_or_rename("getComputedCss", Method::GetComputedStyle);
        self.element_or_rename("getComputedCSS", Method::GetComputedStyle);
        self.element_or_rename("moveTo", Method::MoveMouseTo);
    }

    fn register_custom(&mut self) {
        self.custom("status", behaviors::status);
        self.custom("init", behaviors::init);
        self.custom("sessions", behaviors::sessions);
        self.custom("sessionCapabilities", behaviors::session_capabilities);
        self.custom("altSessionCapabilities", behaviors::alt_session_capabilities);
        self.custom("getSessionId", behaviors::get_session_id);
        self.custom("getSessionID", behaviors::get_session_id_upper);

        self.custom("eval", behaviors::eval);
        self.custom("safeEval", behaviors::safe_eval);
        self.custom("newWindow", behaviors::new_window);
        self.custom("windowName", behaviors::window_name);

        self.custom("setWindowSize", behaviors::set_window_size);
        self.custom("setWindowPosition", behaviors::set_window_position);
        self.custom("getLocationInView", behaviors::get_location_in_view);

        self.custom("elementsById", behaviors::elements_by_id);
        self.custom("elementOrNull", behaviors::element_or_null);
        self.custom("elementIfExists", behaviors::element_if_exists);
        self.custom("hasElement", behaviors::has_element);

        self.custom("getValue", behaviors::get_value);
        self.custom("equalsElement", behaviors::equals_element);
        self.custom("textPresent", behaviors::text_present);
        self.custom("getPageIndex", behaviors::get_page_index);
        self.custom("isVisible", behaviors::is_visible);

        self.custom("waitForElement", behaviors::wait_for_element);
        self.custom("waitForVisible", behaviors::wait_for_visible);
        self.custom("waitForCondition", behaviors::wait_for_condition);
        self.custom(
            "waitForConditionInBrowser",
            behaviors::wait_for_condition_in_browser,
        );

        self.custom("uploadFile", behaviors::upload_file);
        self.custom("setHTTPInactivityTimeout", behaviors::set_http_inactivity_timeout);
        self.custom("sauceJobUpdate", behaviors::sauce_job_update);
        self.custom("sauceJobStatus", behaviors::sauce_job_status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AliasRegistry {
        AliasRegistry::new(Arc::new(DeprecationNotifier::new()), WaitConfig::default())
    }

    #[test]
    fn rows_have_the_documented_kinds() {
        let registry = registry();
        assert_eq!(registry.kind_of("url"), Some(BehaviorKind::Delegate));
        assert_eq!(registry.kind_of("elementByXPath"), Some(BehaviorKind::Delegate));
        assert_eq!(registry.kind_of("clickElement"), Some(BehaviorKind::ElementAware));
        assert_eq!(registry.kind_of("text"), Some(BehaviorKind::ElementAware));
        assert_eq!(registry.kind_of("waitForVisible"), Some(BehaviorKind::Custom));
        assert_eq!(registry.kind_of("sauceJobStatus"), Some(BehaviorKind::Custom));
        assert_eq!(registry.kind_of("findById"), None);
    }

    #[test]
    fn callback_chaining_names_are_not_registered() {
        let registry = registry();
        assert_eq!(registry.kind_of("otherwise"), None);
        assert_eq!(registry.kind_of("always"), None);
    }

    #[test]
    fn fallback_only_on_context_renames() {
        let registry = registry();
        for entry in registry.entries() {
            if let Behavior::ElementAware { fallback, .. } = &entry.behavior {
                let expects_fallback = matches!(
                    entry.name.as_str(),
                    "text"
                        | "clear"
                        | "enabled"
                        | "displayed"
                        | "getLocation"
                        | "getComputedCss"
                        | "getComputedCSS"
                        | "moveTo"
                );
                assert_eq!(fallback.is_some(), expects_fallback, "{}", entry.name);
            }
        }
    }

    #[test]
    fn table_contains_aliases_strategies_and_getter() {
        let registry = registry();
        let strategies = wdcompat_interfaces::default_strategies();
        let table = registry.build(&strategies);

        // Five per strategy, plus the duplicate CSS family, plus `sessionID`.
        let expected = registry.len() + 5 * (strategies.len() + 1) + 1;
        assert_eq!(table.len(), expected);
        assert!(matches!(table.get(SESSION_ID_PROPERTY), Some(Member::Getter(_))));
        assert!(matches!(table.get("hasElementByXPath"), Some(Member::Method(_))));
    }
}
