use serde::{Deserialize, Serialize};

/// A way of locating elements, with the two method-name suffixes it is known by.
///
/// `suffix` is the current API's spelling (`findByXpath`), `wd_suffix` the legacy
/// one (`hasElementByXPath`). They differ only in casing, and only for XPath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorStrategy {
    /// Value sent to the remote end as `using`.
    pub strategy_id: String,
    pub suffix: String,
    pub wd_suffix: String,
}

impl LocatorStrategy {
    pub fn new(
        strategy_id: impl Into<String>,
        suffix: impl Into<String>,
        wd_suffix: impl Into<String>,
    ) -> Self {
        Self {
            strategy_id: strategy_id.into(),
            suffix: suffix.into(),
            wd_suffix: wd_suffix.into(),
        }
    }
}

/// The locator strategies every WebDriver remote end understands, in a fixed order.
pub fn default_strategies() -> Vec<LocatorStrategy> {
    vec![
        LocatorStrategy::new("class name", "ClassName", "ClassName"),
        LocatorStrategy::new("css selector", "CssSelector", "CssSelector"),
        LocatorStrategy::new("id", "Id", "Id"),
        LocatorStrategy::new("name", "Name", "Name"),
        LocatorStrategy::new("link text", "LinkText", "LinkText"),
        LocatorStrategy::new("partial link text", "PartialLinkText", "PartialLinkText"),
        LocatorStrategy::new("tag name", "TagName", "TagName"),
        LocatorStrategy::new("xpath", "Xpath", "XPath"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xpath_keeps_both_casings() {
        let xpath = default_strategies()
            .into_iter()
            .find(|s| s.strategy_id == "xpath")
            .unwrap();
        assert_eq!(xpath.suffix, "Xpath");
        assert_eq!(xpath.wd_suffix, "XPath");
    }

    #[test]
    fn other_strategies_share_one_spelling() {
        for strategy in default_strategies() {
            if strategy.strategy_id != "xpath" {
                assert_eq!(strategy.suffix, strategy.wd_suffix);
            }
        }
    }
}
