//! Markdown to HTML rendering for stored notes.
//!
//! Rendering is pure: no I/O, deterministic for a given input and
//! [`RenderOptions`], and infallible. Malformed markdown degrades to
//! best-effort HTML. Raw HTML embedded in the source is passed through
//! unchanged.

mod autolink;
mod highlight;
mod options;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use pulldown_cmark_escape::escape_html;

use crate::autolink::Autolinker;
use crate::highlight::Highlighter;

pub use options::RenderOptions;

/// Renders markdown with a configuration fixed at construction.
pub struct MarkdownRenderer {
    options: RenderOptions,
    highlighter: Option<Highlighter>,
    autolinker: Option<Autolinker>,
}

/// A fenced code block being collected for highlighting.
struct CodeBlock {
    lang: String,
    source: String,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        let highlighter = options.syntax_highlight.then(Highlighter::new);
        let autolinker = options.gfm.then(Autolinker::new);
        Self {
            options,
            highlighter,
            autolinker,
        }
    }

    /// Render `markdown` to an HTML fragment.
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());

        let mut events = Vec::new();
        let mut block: Option<CodeBlock> = None;
        // Text inside code or an existing link is never autolinked.
        let mut in_code = false;
        let mut link_depth = 0usize;

        for event in TextMergeStream::new(parser) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                    if self.highlighter.is_some() =>
                {
                    match code_language(&info).map(str::to_string) {
                        Some(lang) => {
                            block = Some(CodeBlock {
                                lang,
                                source: String::new(),
                            });
                        }
                        None => {
                            in_code = true;
                            events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(
                                info,
                            ))));
                        }
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code = true;
                    events.push(Event::Start(Tag::CodeBlock(kind)));
                }
                Event::Text(text) if block.is_some() => {
                    if let Some(code) = block.as_mut() {
                        code.source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => match block.take() {
                    Some(code) => events.push(Event::Html(self.render_code_block(&code).into())),
                    None => {
                        in_code = false;
                        events.push(Event::End(TagEnd::CodeBlock));
                    }
                },
                Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                    link_depth += 1;
                    events.push(Event::Start(tag));
                }
                Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                    link_depth = link_depth.saturating_sub(1);
                    events.push(Event::End(end));
                }
                Event::Text(text) if !in_code && link_depth == 0 => match &self.autolinker {
                    Some(autolinker) => autolinker.push_text(text, &mut events),
                    None => events.push(Event::Text(text)),
                },
                Event::SoftBreak if self.options.breaks => events.push(Event::HardBreak),
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }

    fn render_code_block(&self, code: &CodeBlock) -> String {
        let body = self
            .highlighter
            .as_ref()
            .and_then(|h| h.highlight(&code.lang, &code.source))
            .unwrap_or_else(|| escaped(&code.source));

        format!(
            "<pre><code class=\"hljs language-{}\">{}</code></pre>\n",
            escaped(&code.lang),
            body
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a `String` cannot fail.
    let _ = escape_html(&mut out, text);
    out
}

/// First word of a fenced block's info string, e.g. `rust` for ```` ```rust,ignore ````.
fn code_language(info: &str) -> Option<&str> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .find(|s| !s.is_empty())
}
