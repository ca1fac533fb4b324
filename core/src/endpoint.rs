//! Endpoint declarations.
//!
//! An `Endpoint<T>` names a method and a path template and is typed by the
//! payload a successful call returns. Declaring one is all it takes to call a
//! new endpoint; the adapter is the same for every payload type.

use std::fmt;
use std::marker::PhantomData;

use crate::http::HttpMethod;

pub struct Endpoint<T> {
    method: HttpMethod,
    path: &'static str,
    _payload: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path,
            _payload: PhantomData,
        }
    }

    pub const fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub const fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub const fn put(path: &'static str) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub const fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Substitute `{name}` placeholders with the given parameters.
    /// Placeholders without a matching parameter are left as they are.
    pub fn render_path(&self, params: &[(&str, String)]) -> String {
        let mut path = self.path.to_string();
        for (name, value) in params {
            path = path.replace(&format!("{{{name}}}"), value);
        }
        path
    }
}

// Manual impls: `T` is only a marker and need not be `Clone` or `Debug`.
impl<T> Clone for Endpoint<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Endpoint<T> {}

impl<T> fmt::Debug for Endpoint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.path)
    }
}

/// Per-call arguments: path parameters and an optional request body.
#[derive(Debug, Clone)]
pub struct Args<'a, B = ()> {
    pub(crate) params: Vec<(&'a str, String)>,
    pub(crate) body: Option<B>,
}

impl<'a> Args<'a> {
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            body: None,
        }
    }
}

impl Default for Args<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, B> Args<'a, B> {
    pub fn param(mut self, name: &'a str, value: impl fmt::Display) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    pub fn body<N>(self, body: N) -> Args<'a, N> {
        Args {
            params: self.params,
            body: Some(body),
        }
    }
}
