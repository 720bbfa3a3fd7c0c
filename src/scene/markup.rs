//! Caption markup.
//!
//! Captions use a small TeX subset: `\textbf{..}`, `\textit{..}`, `\text{..}`, inline math
//! between `$` signs (letters italic, `_`/`^` scripts), `\\` line breaks, `\,` thin spaces and the
//! usual escaped specials. Anything else is rejected; a caption that fails to parse aborts the
//! render.

use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::color::Color;

/// Vertical script position of a span.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Script {
    /// Baseline text.
    #[default]
    Normal,
    /// Subscript.
    Sub,
    /// Superscript.
    Super,
}

/// Styling shared by every character of a span.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpanStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Script position.
    pub script: Script,
    /// Overrides the run color when set.
    pub color: Option<Color>,
}

/// A maximal run of characters with one style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Span text.
    pub text: String,
    /// Span style.
    pub style: SpanStyle,
}

/// One rendered line.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// Spans in reading order.
    pub spans: Vec<Span>,
}

impl Line {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Styled multi-line text.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RichText {
    /// Lines top to bottom.
    pub lines: Vec<Line>,
}

impl RichText {
    /// Plain text, `\n` separates lines.
    pub fn plain(text: &str, style: SpanStyle) -> Self {
        let lines = text
            .split('\n')
            .map(|l| Line {
                spans: vec![Span {
                    text: l.to_owned(),
                    style,
                }],
            })
            .collect();
        let mut rt = Self { lines };
        rt.normalize();
        rt
    }

    /// Parse caption markup in text mode.
    pub fn parse(src: &str) -> ReelResult<Self> {
        Parser::new(src).run(false)
    }

    /// Parse caption markup as if the whole string were inside `$..$`.
    pub fn parse_math(src: &str) -> ReelResult<Self> {
        Parser::new(src).run(true)
    }

    /// Color every occurrence of `needle`.
    pub fn colorize(&mut self, needle: &str, color: Color) {
        if needle.is_empty() {
            return;
        }
        for line in &mut self.lines {
            let mut out = Vec::with_capacity(line.spans.len());
            for span in line.spans.drain(..) {
                let mut rest = span.text.as_str();
                while let Some(at) = rest.find(needle) {
                    if at > 0 {
                        out.push(Span {
                            text: rest[..at].to_owned(),
                            style: span.style,
                        });
                    }
                    out.push(Span {
                        text: needle.to_owned(),
                        style: SpanStyle {
                            color: Some(color),
                            ..span.style
                        },
                    });
                    rest = &rest[at + needle.len()..];
                }
                if !rest.is_empty() {
                    out.push(Span {
                        text: rest.to_owned(),
                        style: span.style,
                    });
                }
            }
            line.spans = out;
        }
    }

    /// Apply `f` to the style of every span.
    pub fn restyle(&mut self, f: impl Fn(&mut SpanStyle)) {
        for span in self.lines.iter_mut().flat_map(|l| l.spans.iter_mut()) {
            f(&mut span.style);
        }
    }

    /// Concatenated text with `\n` between lines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn normalize(&mut self) {
        for line in &mut self.lines {
            if let Some(first) = line.spans.first_mut() {
                first.text = first.text.trim_start().to_owned();
            }
            if let Some(last) = line.spans.last_mut() {
                last.text = last.text.trim_end().to_owned();
            }
            line.spans.retain(|s| !s.text.is_empty());
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Close {
    End,
    Brace,
    Dollar,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    done: Vec<Line>,
    cur: Line,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.chars().collect(),
            pos: 0,
            done: Vec::new(),
            cur: Line::default(),
        }
    }

    fn run(mut self, math: bool) -> ReelResult<RichText> {
        self.seq(SpanStyle::default(), math, Close::End)?;
        self.done.push(self.cur);
        let mut rt = RichText { lines: self.done };
        rt.normalize();
        Ok(rt)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn err(&self, msg: &str) -> ReelError {
        let src: String = self.chars.iter().collect();
        ReelError::markup(format!("{msg} at offset {} in \"{src}\"", self.pos))
    }

    fn push(&mut self, c: char, style: SpanStyle) {
        match self.cur.spans.last_mut() {
            Some(span) if span.style == style => span.text.push(c),
            _ => self.cur.spans.push(Span {
                text: c.to_string(),
                style,
            }),
        }
    }

    fn seq(&mut self, style: SpanStyle, math: bool, close: Close) -> ReelResult<()> {
        while let Some(c) = self.peek() {
            match c {
                '}' => {
                    if close != Close::Brace {
                        return Err(self.err("unbalanced '}'"));
                    }
                    self.pos += 1;
                    return Ok(());
                }
                '$' => {
                    self.pos += 1;
                    if math {
                        if close != Close::Dollar {
                            return Err(self.err("'$' inside a math group"));
                        }
                        return Ok(());
                    }
                    self.seq(style, true, Close::Dollar)?;
                }
                '{' => {
                    self.pos += 1;
                    self.seq(style, math, Close::Brace)?;
                }
                '\\' => {
                    self.pos += 1;
                    self.command(style)?;
                }
                '_' | '^' => {
                    if !math {
                        return Err(self.err("script outside math mode"));
                    }
                    self.pos += 1;
                    let script = if c == '_' { Script::Sub } else { Script::Super };
                    let inner = SpanStyle { script, ..style };
                    match self.bump() {
                        Some('{') => self.seq(inner, math, Close::Brace)?,
                        Some(ch) if ch.is_alphanumeric() => {
                            self.push(ch, math_style(ch, inner));
                        }
                        _ => return Err(self.err("script needs an argument")),
                    }
                }
                '~' => {
                    self.pos += 1;
                    self.push('\u{a0}', style);
                }
                _ => {
                    self.pos += 1;
                    let st = if math { math_style(c, style) } else { style };
                    self.push(c, st);
                }
            }
        }

        match close {
            Close::End => Ok(()),
            Close::Brace => Err(self.err("missing '}'")),
            Close::Dollar => Err(self.err("unterminated math, missing '$'")),
        }
    }

    fn command(&mut self, style: SpanStyle) -> ReelResult<()> {
        let Some(c) = self.bump() else {
            return Err(self.err("dangling '\\'"));
        };
        match c {
            '\\' => {
                self.done.push(std::mem::take(&mut self.cur));
                return Ok(());
            }
            ',' => {
                self.push('\u{2009}', style);
                return Ok(());
            }
            '%' | '$' | '{' | '}' | '&' | '#' | '_' => {
                self.push(c, style);
                return Ok(());
            }
            ' ' => {
                self.push(' ', style);
                return Ok(());
            }
            _ if c.is_ascii_alphabetic() => {}
            _ => return Err(self.err(&format!("unknown control symbol '\\{c}'"))),
        }

        let mut name = String::from(c);
        while let Some(n) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(n);
            self.pos += 1;
        }

        let inner = match name.as_str() {
            "textbf" => SpanStyle {
                bold: true,
                ..style
            },
            "textit" => SpanStyle {
                italic: true,
                ..style
            },
            "text" => SpanStyle {
                italic: false,
                ..style
            },
            _ => return Err(self.err(&format!("unknown command '\\{name}'"))),
        };

        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        if self.bump() != Some('{') {
            return Err(self.err(&format!("'\\{name}' expects a braced argument")));
        }
        // Arguments are always text mode, even when the command sits inside math.
        self.seq(inner, false, Close::Brace)
    }
}

fn math_style(c: char, style: SpanStyle) -> SpanStyle {
    if c.is_alphabetic() {
        SpanStyle {
            italic: true,
            ..style
        }
    } else {
        style
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/markup.rs"]
mod tests;
