//! HTML helper functions
//!
//! Fragments are assembled with [`Element`], a small builder that keeps
//! attribute order as written and escapes attribute values. Child content is
//! inserted as-is: captions, titles and bodies are author-written HTML.

use std::fmt;

/// An HTML element under construction
///
/// # Examples
/// ```ignore
/// Element::new("figure").class("content-image").child(img).render()
/// // -> <figure class="content-image">...</figure>
/// ```
#[derive(Debug, Clone)]
pub struct Element {
    name: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: String,
    void: bool,
}

impl Element {
    /// Create an element with a closing tag
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            children: String::new(),
            void: false,
        }
    }

    /// Create a void element (`img`, `source`, ...)
    pub fn void(name: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(name)
        }
    }

    /// Set an attribute; the value is escaped when rendered
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Set a boolean attribute (`muted`, `allowfullscreen`, ...)
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    /// Append a class to the class list
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        let class = class.as_ref();
        if class.is_empty() {
            return self;
        }

        match self.attrs.iter_mut().find(|(name, _)| *name == "class") {
            Some((_, Some(existing))) => {
                existing.push(' ');
                existing.push_str(class);
            }
            _ => self.attrs.push(("class", Some(class.to_string()))),
        }
        self
    }

    /// Append `<prefix>-<value>` to the class list when a value is present
    pub fn modifier(self, prefix: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.class(format!("{}-{}", prefix, value)),
            _ => self,
        }
    }

    /// Append raw HTML content
    pub fn child(mut self, html: impl AsRef<str>) -> Self {
        self.children.push_str(html.as_ref());
        self
    }

    /// Append raw HTML content when present
    pub fn child_opt(self, html: Option<impl AsRef<str>>) -> Self {
        match html {
            Some(html) => self.child(html),
            None => self,
        }
    }

    /// Render to a string
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attrs {
            match value {
                Some(value) => write!(f, r#" {}="{}""#, name, html_escape(value))?,
                None => write!(f, " {}", name)?,
            }
        }
        f.write_str(">")?;

        if !self.void {
            write!(f, "{}</{}>", self.children, self.name)?;
        }
        Ok(())
    }
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape source code for a `<pre>` block (`&`, `<` and `>` only)
pub fn escape_code(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Turn single newlines into `<br>`
pub fn line_breaks(s: &str) -> String {
    s.replace('\n', "<br>")
}

/// Split text on blank lines into `<p>` elements, keeping single newlines as `<br>`.
///
/// Empty and whitespace-only paragraphs are dropped.
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .filter(|para| !para.trim().is_empty())
        .map(|para| Element::new("p").child(line_breaks(para)).render())
        .collect()
}
