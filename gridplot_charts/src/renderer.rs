// Copyright 2025 the gridplot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stateful front end over [`compose`]: compiled-expression caching and last-good output.

use core::fmt;

use gridplot_core::{Document, ExpressionEvaluator, RenderError};

use crate::compose::compose;
use crate::expr::ExpressionCache;
use crate::figure::Figure;

/// Renders figures with an owned evaluator and cache, remembering the last good document.
///
/// A failed render returns the error and leaves [`last_good`](Self::last_good) untouched, so a
/// preview can keep showing the previous figure while the user fixes their input.
pub struct Renderer<E> {
    evaluator: E,
    cache: ExpressionCache,
    last_good: Option<Document>,
}

impl<E> fmt::Debug for Renderer<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("cache", &self.cache)
            .field("has_last_good", &self.last_good.is_some())
            .finish_non_exhaustive()
    }
}

impl<E: ExpressionEvaluator> Renderer<E> {
    /// Creates a renderer with an empty, unbounded cache.
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: ExpressionCache::new(),
            last_good: None,
        }
    }

    /// Replaces the expression cache (for example with a bounded one).
    pub fn with_cache(mut self, cache: ExpressionCache) -> Self {
        self.cache = cache;
        self
    }

    /// Renders `figure`. On success the document also becomes the new last-good document.
    pub fn render(&mut self, figure: &Figure) -> Result<&Document, RenderError> {
        let evaluator = &self.evaluator;
        let cache = &mut self.cache;
        match compose(figure, |src: &str| cache.get_or_compile(src, evaluator)) {
            Ok(doc) => Ok(self.last_good.insert(doc)),
            Err(err) => {
                tracing::warn!(%err, "render rejected; keeping last good document");
                Err(err)
            }
        }
    }

    /// The most recent successfully rendered document.
    pub fn last_good(&self) -> Option<&Document> {
        self.last_good.as_ref()
    }

    /// The compiled-expression cache.
    pub fn cache(&self) -> &ExpressionCache {
        &self.cache
    }

    /// The compiled-expression cache, mutably (for example to clear it).
    pub fn cache_mut(&mut self) -> &mut ExpressionCache {
        &mut self.cache
    }

    /// The expression evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}
