use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

/// Turns bare URLs, `www.` hosts and email addresses in running text into links.
pub(crate) struct Autolinker {
    finder: LinkFinder,
}

impl Autolinker {
    pub(crate) fn new() -> Self {
        let mut finder = LinkFinder::new();
        finder.url_must_have_scheme(false);
        Self { finder }
    }

    /// Push `text` onto `out`, with every linkable span wrapped in a link.
    pub(crate) fn push_text<'a>(&self, text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
        let mut last = 0;
        for link in self.finder.links(&text) {
            let Some((link_type, dest_url)) = destination(link.as_str(), link.kind()) else {
                continue;
            };
            if link.start() > last {
                out.push(Event::Text(text[last..link.start()].to_string().into()));
            }
            out.push(Event::Start(Tag::Link {
                link_type,
                dest_url: dest_url.into(),
                title: CowStr::Borrowed(""),
                id: CowStr::Borrowed(""),
            }));
            out.push(Event::Text(link.as_str().to_string().into()));
            out.push(Event::End(TagEnd::Link));
            last = link.end();
        }

        if last == 0 {
            out.push(Event::Text(text));
        } else if last < text.len() {
            out.push(Event::Text(text[last..].to_string().into()));
        }
    }
}

/// Link target for a detected span. Bare domains without `www.` stay text.
fn destination(span: &str, kind: &LinkKind) -> Option<(LinkType, String)> {
    match kind {
        LinkKind::Email => Some((LinkType::Email, span.to_string())),
        LinkKind::Url if span.contains("://") => Some((LinkType::Autolink, span.to_string())),
        LinkKind::Url if span.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) => {
            Some((LinkType::Autolink, format!("http://{span}")))
        }
        _ => None,
    }
}
