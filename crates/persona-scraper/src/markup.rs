//! Narrow markup-traversal interface used by the normalizer, with an
//! implementation over `scraper`'s HTML tree.
//!
//! The normalizer only ever asks three questions of a page: which fragments
//! does it contain, what child element matches a selector, and what text does
//! an element hold. Keeping the surface that small lets the normalizer be
//! tested against in-memory fakes.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// One element of a parsed page.
pub trait MarkupFragment: Sized {
    /// `true` if the element carries `class` in its class list.
    fn has_class(&self, class: &str) -> bool;

    /// First descendant matching the CSS `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] if `selector` is not valid CSS.
    fn find_child(&self, selector: &str) -> Result<Option<Self>, ScraperError>;

    /// Whitespace-normalized text content.
    fn text_of(&self) -> String;

    /// Value of the attribute `name`, if present.
    fn attr(&self, name: &str) -> Option<String>;
}

/// A parsed page that can be split into fragments.
pub trait MarkupDocument {
    type Fragment<'a>: MarkupFragment
    where
        Self: 'a;

    /// All elements matching the CSS `selector`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Selector`] if `selector` is not valid CSS.
    fn find_fragments(&self, selector: &str) -> Result<Vec<Self::Fragment<'_>>, ScraperError>;
}

fn compile(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// An HTML page parsed with `scraper`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }
}

impl MarkupDocument for HtmlDocument {
    type Fragment<'a> = HtmlFragment<'a>;

    fn find_fragments(&self, selector: &str) -> Result<Vec<HtmlFragment<'_>>, ScraperError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).map(HtmlFragment).collect())
    }
}

/// An element borrowed from an [`HtmlDocument`].
#[derive(Clone, Copy)]
pub struct HtmlFragment<'a>(ElementRef<'a>);

impl MarkupFragment for HtmlFragment<'_> {
    fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }

    fn find_child(&self, selector: &str) -> Result<Option<Self>, ScraperError> {
        let selector = compile(selector)?;
        Ok(self.0.select(&selector).next().map(HtmlFragment))
    }

    fn text_of(&self) -> String {
        self.0
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(str::to_string)
    }
}
