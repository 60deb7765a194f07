//! Per-strategy legacy method families.
//!
//! Every locator strategy yields five methods, each prepending the strategy's
//! `using` id to the caller's arguments and delegating to the generic behavior:
//!
//! | generated name                    | generic behavior  |
//! |-----------------------------------|-------------------|
//! | `elementBy{wd_suffix}OrNull`      | `elementOrNull`   |
//! | `elementBy{wd_suffix}IfExists`    | `elementIfExists` |
//! | `hasElementBy{wd_suffix}`         | `hasElement`      |
//! | `waitForElementBy{wd_suffix}`     | `waitForElement`  |
//! | `waitForVisibleBy{wd_suffix}`     | `waitForVisible`  |
//!
//! All five use the legacy spelling (`XPath`, not `Xpath`), so they sit next to
//! the plain `elementByXPath` rename. The `css selector` strategy gets a second
//! family under the `Css` suffix.

use crate::behaviors::{self, LegacyEnv};
use crate::member::{Invocation, LegacyMethod};
use std::future::Future;
use std::sync::Arc;
use wdcompat_interfaces::{ApiError, Arg, LocatorStrategy, Reply};

const CSS_SELECTOR: &str = "css selector";
const CSS_SHORT_SUFFIX: &str = "Css";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFamily<'a> {
    pub strategy_id: &'a str,
    pub suffix: &'a str,
    pub wd_suffix: &'a str,
}

impl StrategyFamily<'_> {
    /// Generated names, in the order of the table above.
    pub fn method_names(&self) -> [String; 5] {
        [
            format!("elementBy{}OrNull", self.wd_suffix),
            format!("elementBy{}IfExists", self.wd_suffix),
            format!("hasElementBy{}", self.wd_suffix),
            format!("waitForElementBy{}", self.wd_suffix),
            format!("waitForVisibleBy{}", self.wd_suffix),
        ]
    }
}

pub struct StrategyExpander<'a> {
    strategies: &'a [LocatorStrategy],
}

impl<'a> StrategyExpander<'a> {
    pub fn new(strategies: &'a [LocatorStrategy]) -> Self {
        Self { strategies }
    }

    pub fn families(&self) -> Vec<StrategyFamily<'a>> {
        let mut families = Vec::with_capacity(self.strategies.len() + 1);
        for strategy in self.strategies {
            families.push(StrategyFamily {
                strategy_id: &strategy.strategy_id,
                suffix: &strategy.suffix,
                wd_suffix: &strategy.wd_suffix,
            });
            if strategy.strategy_id == CSS_SELECTOR {
                families.push(StrategyFamily {
                    strategy_id: &strategy.strategy_id,
                    suffix: CSS_SHORT_SUFFIX,
                    wd_suffix: CSS_SHORT_SUFFIX,
                });
            }
        }
        families
    }

    /// Resolved `(name, method)` pairs for every family.
    pub fn expand(&self, env: &Arc<LegacyEnv>) -> Vec<(String, LegacyMethod)> {
        let mut methods = Vec::new();
        for family in self.families() {
            let using = family.strategy_id;
            let [or_null, if_exists, has, wait_for, wait_visible] = family.method_names();
            methods.push((or_null, bind(env, using, behaviors::element_or_null)));
            methods.push((if_exists, bind(env, using, behaviors::element_if_exists)));
            methods.push((has, bind(env, using, behaviors::has_element)));
            methods.push((wait_for, bind(env, using, behaviors::wait_for_element)));
            methods.push((wait_visible, bind(env, using, behaviors::wait_for_visible)));
        }
        methods
    }
}

/// `behavior` with `using` fixed as its first argument.
fn bind<F, Fut>(env: &Arc<LegacyEnv>, using: &str, behavior: F) -> LegacyMethod
where
    F: Fn(Arc<LegacyEnv>, Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Reply, ApiError>> + Send + 'static,
{
    let env = env.clone();
    let using = using.to_string();
    LegacyMethod::new(move |inv: Invocation| {
        let Invocation { engine, args } = inv;
        let mut bound = Vec::with_capacity(args.len() + 1);
        bound.push(Arg::from(using.as_str()));
        bound.extend(args);
        behavior(env.clone(), Invocation::new(engine, bound))
    })
}
