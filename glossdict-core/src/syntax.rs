use crate::error::Result;
use regex::Regex;

/// `[label](#id)`
const LINK: &str = r"\[([^\]]*)\]\(#([^)]*)\)";
/// `_text_` with no spaces inside
const EMPHASIS: &str = r"_([^ ]+)_";
/// `A (B) C`, C may be empty
const PARENTHETICAL: &str = r"^([^(]*[^( ]) *\(([^)]*)\) *(.*)";
/// `al'Lan`: one or two lowercase letters and an apostrophe
const PARTICLE: &str = r"^[a-z]{1,2}'(.*)";

/// Every pattern the conversion uses, compiled once by the entry point and
/// handed to each stage.
#[derive(Debug, Clone)]
pub struct Syntax {
    pub(crate) link: Regex,
    pub(crate) emphasis: Regex,
    pub(crate) parenthetical: Regex,
    pub(crate) particle: Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Link {
        label: &'a str,
        id: &'a str,
        raw: &'a str,
    },
}

impl Syntax {
    pub fn compile() -> Result<Self> {
        Ok(Syntax {
            link: Regex::new(LINK)?,
            emphasis: Regex::new(EMPHASIS)?,
            parenthetical: Regex::new(PARENTHETICAL)?,
            particle: Regex::new(PARTICLE)?,
        })
    }

    /// Split `text` into plain runs and markdown link tokens. Concatenating
    /// the raw pieces gives back the input.
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut last = 0;
        for caps in self.link.captures_iter(text) {
            let (Some(whole), Some(label), Some(id)) = (caps.get(0), caps.get(1), caps.get(2)) else {
                continue;
            };
            if whole.start() > last {
                tokens.push(Token::Text(&text[last..whole.start()]));
            }
            tokens.push(Token::Link {
                label: label.as_str(),
                id: id.as_str(),
                raw: whole.as_str(),
            });
            last = whole.end();
        }
        if last < text.len() {
            tokens.push(Token::Text(&text[last..]));
        }
        tokens
    }

    /// Identifiers of every markdown link in `text`, in order of appearance.
    pub fn linked_ids<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.link
            .captures_iter(text)
            .filter_map(|caps| caps.get(2).map(|m| m.as_str()))
    }
}
