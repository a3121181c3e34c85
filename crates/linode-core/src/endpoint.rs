//! Endpoint policies for resource families.
//!
//! A family's collection path is a template relative to the API base URL.
//! Nested families carry exactly one `{id}` placeholder for the parent
//! resource, e.g. `nodebalancers/{id}/configs`. Templates are checked once,
//! when a client is constructed, so building a request path never fails.

use std::fmt;
use std::marker::PhantomData;

use crate::error::{Error, Result};

/// Placeholder substituted with the parent identifier.
pub const PARENT_PLACEHOLDER: &str = "{id}";

/// Identifier of the resource a family is nested under.
///
/// `()` marks a top-level family.
pub trait ParentId: Copy + Send + Sync + 'static {
    /// Whether the family's template must contain a parent placeholder.
    const NESTED: bool;

    /// Path segment substituted for the placeholder.
    fn segment(self) -> Option<String>;
}

impl ParentId for () {
    const NESTED: bool = false;

    fn segment(self) -> Option<String> {
        None
    }
}

/// A validated endpoint template for one resource family.
pub struct Endpoint<P> {
    template: String,
    _parent: PhantomData<fn(P)>,
}

impl<P: ParentId> Endpoint<P> {
    /// Validate a template against the family's parent type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the template is empty, contains other
    /// braces, or its placeholder count does not match `P::NESTED`.
    pub fn parse(template: &str) -> Result<Self> {
        let trimmed = template.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("endpoint template is empty".to_string()));
        }

        let placeholders = trimmed.matches(PARENT_PLACEHOLDER).count();
        let expected = usize::from(P::NESTED);
        if placeholders != expected {
            return Err(Error::Config(format!(
                "endpoint template `{trimmed}` has {placeholders} parent placeholder(s), expected {expected}"
            )));
        }

        let stray = trimmed.replace(PARENT_PLACEHOLDER, "");
        if stray.contains('{') || stray.contains('}') {
            return Err(Error::Config(format!(
                "endpoint template `{trimmed}` contains an unknown placeholder"
            )));
        }

        Ok(Self {
            template: trimmed.to_string(),
            _parent: PhantomData,
        })
    }

    /// The raw template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Collection path, e.g. `nodebalancers/12/configs`.
    #[must_use]
    pub fn collection(&self, parent: P) -> String {
        match parent.segment() {
            Some(segment) => self.template.replacen(PARENT_PLACEHOLDER, &segment, 1),
            None => self.template.clone(),
        }
    }

    /// Item path, e.g. `nodebalancers/12/configs/34`.
    #[must_use]
    pub fn item(&self, parent: P, id: impl fmt::Display) -> String {
        format!("{}/{id}", self.collection(parent))
    }
}

impl<P> Clone for Endpoint<P> {
    fn clone(&self) -> Self {
        Self {
            template: self.template.clone(),
            _parent: PhantomData,
        }
    }
}

impl<P> fmt::Debug for Endpoint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("template", &self.template)
            .finish()
    }
}
