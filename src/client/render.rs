//! Rendering seam.
//!
//! The client hands normalized text to an injected [`Renderer`] and returns
//! whatever it produces. Rendering failures are surfaced to the caller.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

// ============================================================================
// Rendered
// ============================================================================

/// Output of a [`Renderer`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Rendered {
    /// Final text.
    pub text: String,

    /// Optional HTML rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Optional renderer-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Rendered {
    /// Creates a text-only rendering.
    #[inline]
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: None,
            data: None,
        }
    }

    /// Attaches an HTML rendering.
    #[inline]
    #[must_use]
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Attaches structured data.
    #[inline]
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Turns normalized text into the final presentation.
///
/// # Example
///
/// ```ignore
/// struct Upper;
///
/// #[async_trait]
/// impl Renderer for Upper {
///     async fn render(&self, text: &str) -> Result<Rendered> {
///         Ok(Rendered::text(text.to_uppercase()))
///     }
/// }
/// ```
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Renders normalized text.
    ///
    /// # Errors
    ///
    /// Implementations should return [`crate::Error::Render`].
    async fn render(&self, text: &str) -> Result<Rendered>;
}

// ============================================================================
// PlainRenderer
// ============================================================================

/// Passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

#[async_trait]
impl Renderer for PlainRenderer {
    async fn render(&self, text: &str) -> Result<Rendered> {
        Ok(Rendered::text(text))
    }
}

// ============================================================================
// Tests
// ============================================================================
