//! Markdown rendering with optional syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::MarkdownConfig;
use crate::error::{Error, Result};

/// Markdown renderer
pub struct MarkdownRenderer {
    options: Options,
    sanitize: bool,
    highlighter: Option<Highlighter>,
}

/// Syntect state used for fenced code blocks
struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings (GFM on, raw HTML dropped, no highlighting)
    pub fn new() -> Self {
        let config = MarkdownConfig::default();
        Self {
            options: options_for(&config),
            sanitize: config.sanitize,
            highlighter: None,
        }
    }

    /// Create with custom settings
    pub fn with_config(config: &MarkdownConfig) -> Result<Self> {
        let highlighter = if config.highlight.enable {
            let mut theme_set = ThemeSet::load_defaults();
            let theme = theme_set
                .themes
                .remove(&config.highlight.theme)
                .ok_or_else(|| Error::UnknownTheme(config.highlight.theme.clone()))?;
            Some(Highlighter {
                syntax_set: SyntaxSet::load_defaults_newlines(),
                theme,
                line_numbers: config.highlight.line_number,
            })
        } else {
            None
        };

        Ok(Self {
            options: options_for(config),
            sanitize: config.sanitize,
            highlighter,
        })
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, self.options);

        let mut events: Vec<Event> = Vec::new();
        // Set while collecting the body of a block that will be highlighted
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Html(_) | Event::InlineHtml(_) if self.sanitize => {}
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info)))
                    if self.highlighter.is_some() && fence_language(info).is_some() =>
                {
                    code_block_lang = fence_language(info);
                    code_block_content.clear();
                }
                Event::Text(text) if code_block_lang.is_some() => {
                    code_block_content.push_str(&text);
                }
                Event::End(TagEnd::CodeBlock) if code_block_lang.is_some() => {
                    let lang = code_block_lang.take().unwrap_or_default();
                    if let Some(highlighter) = &self.highlighter {
                        let highlighted = highlighter.highlight(&code_block_content, &lang)?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Highlight a code block
    fn highlight(&self, code: &str, lang: &str) -> Result<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme)
            .map_err(|e| Error::Render(format!("highlighting {} block: {}", lang, e)))?;

        if self.line_numbers {
            Ok(add_line_numbers(&highlighted, code, lang))
        } else {
            Ok(format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ))
        }
    }
}

fn options_for(config: &MarkdownConfig) -> Options {
    let mut options = Options::empty();
    if config.gfm {
        options |= Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
    }
    if config.smart_punctuation {
        options |= Options::ENABLE_SMART_PUNCTUATION;
    }
    options
}

/// First word of a fence info string, e.g. `rust` for "rust,ignore"
///
/// The result is written into a class attribute, so it keeps only
/// `[A-Za-z0-9_+#.-]`.
fn fence_language(info: &str) -> Option<String> {
    let word = info.split(|c: char| c.is_whitespace() || c == ',').next()?;
    let lang: String = word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '#' | '.' | '-'))
        .collect();
    Some(lang).filter(|lang| !lang.is_empty())
}

/// Put a line-number gutter beside highlighted code
fn add_line_numbers(highlighted: &str, code: &str, lang: &str) -> String {
    let gutter = (1..=code.lines().count())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang, gutter, highlighted
    )
}
