//! Installing a method table onto a command prototype.

use crate::member::{Invocation, Member};
use log::{debug, warn};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use wdcompat_interfaces::{ApiError, Arg, CommandEngine, Reply};

/// Anything legacy members can be defined on.
pub trait CommandPrototype {
    /// Defines (or replaces) the member called `name`.
    fn define_member(&mut self, name: &str, member: Member);
}

impl CommandPrototype for HashMap<String, Member> {
    fn define_member(&mut self, name: &str, member: Member) {
        self.insert(name.to_string(), member);
    }
}

impl CommandPrototype for BTreeMap<String, Member> {
    fn define_member(&mut self, name: &str, member: Member) {
        self.insert(name.to_string(), member);
    }
}

/// Resolved legacy members, keyed by their legacy name.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    members: BTreeMap<String, Member>,
}

impl MethodTable {
    pub(crate) fn insert(&mut self, name: String, member: Member) {
        self.members.insert(name, member);
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, member)| (name.as_str(), member))
    }

    /// Defines every member on `target`.
    ///
    /// Installing the same table twice leaves `target` exactly as after the
    /// first install: the same names, bound to the same callables.
    pub fn apply_to<T: CommandPrototype + ?Sized>(&self, target: &mut T) {
        for (name, member) in &self.members {
            target.define_member(name, member.clone());
        }
        debug!("Installed {} legacy members", self.members.len());
    }
}

/// A command chain bound to an engine, carrying installed members.
pub struct LegacyCommand {
    engine: Arc<dyn CommandEngine>,
    members: HashMap<String, Member>,
}

impl LegacyCommand {
    pub fn new(engine: Arc<dyn CommandEngine>) -> Self {
        Self {
            engine,
            members: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &Arc<dyn CommandEngine> {
        &self.engine
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Sorted names of every installed member.
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.members.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Calls the method called `name`.
    ///
    /// # Returns
    /// - whatever the method resolves to.
    /// - `Err(ApiError::UnknownMember)` if nothing is installed under `name`.
    /// - `Err(ApiError::InvalidParameters)` if `name` is a property, not a method.
    pub async fn call(&self, name: &str, args: Vec<Arg>) -> Result<Reply, ApiError> {
        match self.members.get(name) {
            Some(Member::Method(method)) => {
                method
                    .call(Invocation::new(self.engine.clone(), args))
                    .await
            }
            Some(Member::Getter(_)) => Err(ApiError::InvalidParameters(format!(
                "{} is a property, not a method",
                name
            ))),
            None => {
                warn!("Call to unknown command member {}", name);
                Err(ApiError::UnknownMember(name.to_string()))
            }
        }
    }

    /// Reads the property called `name`.
    pub fn property(&self, name: &str) -> Result<Value, ApiError> {
        match self.members.get(name) {
            Some(Member::Getter(getter)) => Ok(getter.get(self.engine.as_ref())),
            Some(Member::Method(_)) => Err(ApiError::InvalidParameters(format!(
                "{} is a method, not a property",
                name
            ))),
            None => Err(ApiError::UnknownMember(name.to_string())),
        }
    }
}

impl CommandPrototype for LegacyCommand {
    fn define_member(&mut self, name: &str, member: Member) {
        self.members.insert(name.to_string(), member);
    }
}

impl fmt::Debug for LegacyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyCommand")
            .field("engine", &self.engine)
            .field("members", &self.members.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deprecation::DeprecationNotifier;
    use crate::registry::AliasRegistry;
    use wdcompat_core::WaitConfig;
    use wdcompat_interfaces::default_strategies;

    fn table() -> MethodTable {
        AliasRegistry::new(Arc::new(DeprecationNotifier::new()), WaitConfig::default())
            .build(&default_strategies())
    }

    #[test]
    fn installing_twice_is_idempotent() {
        let table = table();
        let mut prototype: HashMap<String, Member> = HashMap::new();

        table.apply_to(&mut prototype);
        let first: BTreeMap<String, Member> = prototype.clone().into_iter().collect();
        table.apply_to(&mut prototype);

        assert_eq!(prototype.len(), first.len());
        assert_eq!(prototype.len(), table.len());
        for (name, member) in &first {
            let reinstalled = &prototype[name];
            assert!(reinstalled.same_as(member), "{} was rebound", name);
        }
    }

    #[test]
    fn install_replaces_existing_members_of_the_same_name() {
        let table = table();
        let mut prototype: BTreeMap<String, Member> = BTreeMap::new();
        let url = table.get("url").expect("url is in the table").clone();
        prototype.insert("click".to_string(), url);

        table.apply_to(&mut prototype);

        let click = table.get("click").expect("click is in the table");
        assert!(prototype["click"].same_as(click));
        assert!(!prototype["click"].same_as(&prototype["url"]));
    }

    #[test]
    fn table_exposes_sorted_names() {
        let table = table();
        let names: Vec<&str> = table.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(table.contains("waitForVisibleByCss"));
        assert!(!table.is_empty());
    }
}
