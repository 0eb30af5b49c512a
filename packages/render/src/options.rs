use serde::Deserialize;

/// Rendering configuration, fixed for the lifetime of a [`MarkdownRenderer`](crate::MarkdownRenderer).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Enable GitHub-flavored extensions (tables, strikethrough, task lists,
    /// footnotes, autolinked URLs and emails). Default: true.
    #[serde(default = "default_gfm")]
    pub gfm: bool,
    /// Render single newlines as `<br />`. Default: false.
    #[serde(default)]
    pub breaks: bool,
    /// Highlight fenced code blocks whose language hint is recognized.
    /// Default: true.
    #[serde(default = "default_syntax_highlight")]
    pub syntax_highlight: bool,
}

fn default_gfm() -> bool {
    true
}
fn default_syntax_highlight() -> bool {
    true
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: default_gfm(),
            breaks: false,
            syntax_highlight: default_syntax_highlight(),
        }
    }
}
