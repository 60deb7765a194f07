//! Callable members installed on a command prototype.

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use wdcompat_interfaces::{ApiError, Arg, CommandEngine, ElementHandle, Reply};

/// Future returned by every legacy method.
pub type MethodFuture = BoxFuture<'static, Result<Reply, ApiError>>;

/// One call of a legacy method: the engine it runs against and its arguments.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub engine: Arc<dyn CommandEngine>,
    pub args: Vec<Arg>,
}

impl Invocation {
    pub fn new(engine: Arc<dyn CommandEngine>, args: Vec<Arg>) -> Self {
        Self { engine, args }
    }

    /// Same engine, different arguments.
    pub fn with_args(&self, args: Vec<Arg>) -> Self {
        Self {
            engine: self.engine.clone(),
            args,
        }
    }

    pub fn arg(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    pub fn element_arg(&self, index: usize) -> Option<&ElementHandle> {
        self.arg(index).and_then(Arg::as_element)
    }

    /// Wire value of an argument; missing arguments read as `null`.
    pub fn value_arg(&self, index: usize) -> Value {
        self.arg(index).map(Arg::to_value).unwrap_or(Value::Null)
    }

    pub fn str_arg(&self, index: usize, name: &str) -> Result<String, ApiError> {
        self.arg(index)
            .and_then(Arg::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                ApiError::InvalidParameters(format!("argument {} ({}) must be a string", index, name))
            })
    }

    pub fn u64_arg(&self, index: usize, name: &str) -> Result<u64, ApiError> {
        self.arg(index).and_then(Arg::as_u64).ok_or_else(|| {
            ApiError::InvalidParameters(format!(
                "argument {} ({}) must be a non-negative integer",
                index, name
            ))
        })
    }
}

type MethodFn = dyn Fn(Invocation) -> MethodFuture + Send + Sync;
type GetterFn = dyn Fn(&dyn CommandEngine) -> Value + Send + Sync;

/// A legacy method resolved to a callable.
#[derive(Clone)]
pub struct LegacyMethod(Arc<MethodFn>);

impl LegacyMethod {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Reply, ApiError>> + Send + 'static,
    {
        Self(Arc::new(move |invocation| f(invocation).boxed()))
    }

    pub fn call(&self, invocation: Invocation) -> MethodFuture {
        (self.0)(invocation)
    }

    pub fn ptr_eq(&self, other: &LegacyMethod) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LegacyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LegacyMethod")
    }
}

/// A read-only accessor.
#[derive(Clone)]
pub struct LegacyGetter(Arc<GetterFn>);

impl LegacyGetter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn CommandEngine) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn get(&self, engine: &dyn CommandEngine) -> Value {
        (self.0)(engine)
    }

    pub fn ptr_eq(&self, other: &LegacyGetter) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LegacyGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LegacyGetter")
    }
}

/// Everything a prototype member can be.
#[derive(Debug, Clone)]
pub enum Member {
    Method(LegacyMethod),
    Getter(LegacyGetter),
}

impl Member {
    /// Whether both members are the very same callable.
    pub fn same_as(&self, other: &Member) -> bool {
        match (self, other) {
            (Member::Method(a), Member::Method(b)) => a.ptr_eq(b),
            (Member::Getter(a), Member::Getter(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}
