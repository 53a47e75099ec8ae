//! Parsed-document model.
//!
//! A [`ParsedDoc`] is the output of an external linguistic analysis
//! service: tokens carrying POS tags, lemmas and dependency heads, grouped
//! into sentences. The tree is stored as head links; children, subtrees
//! and ancestor chains are derived from them on construction.

use std::ops::{Index, Range};

use serde::{Deserialize, Serialize};

use crate::DocError;

/// Universal POS tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UPos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
}

impl UPos {
    /// Read a UPOS column value. Unknown tags become [`UPos::X`].
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "ADJ" => UPos::Adj,
            "ADP" => UPos::Adp,
            "ADV" => UPos::Adv,
            "AUX" => UPos::Aux,
            "CCONJ" | "CONJ" => UPos::Cconj,
            "DET" => UPos::Det,
            "INTJ" => UPos::Intj,
            "NOUN" => UPos::Noun,
            "NUM" => UPos::Num,
            "PART" => UPos::Part,
            "PRON" => UPos::Pron,
            "PROPN" => UPos::Propn,
            "PUNCT" => UPos::Punct,
            "SCONJ" => UPos::Sconj,
            "SYM" => UPos::Sym,
            "VERB" => UPos::Verb,
            "SPACE" => UPos::Space,
            _ => UPos::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UPos::Adj => "ADJ",
            UPos::Adp => "ADP",
            UPos::Adv => "ADV",
            UPos::Aux => "AUX",
            UPos::Cconj => "CCONJ",
            UPos::Det => "DET",
            UPos::Intj => "INTJ",
            UPos::Noun => "NOUN",
            UPos::Num => "NUM",
            UPos::Part => "PART",
            UPos::Pron => "PRON",
            UPos::Propn => "PROPN",
            UPos::Punct => "PUNCT",
            UPos::Sconj => "SCONJ",
            UPos::Sym => "SYM",
            UPos::Verb => "VERB",
            UPos::Space => "SPACE",
            UPos::X => "X",
        }
    }

    /// Nouns and proper nouns.
    pub fn is_nominal(&self) -> bool {
        matches!(self, UPos::Noun | UPos::Propn)
    }
}

/// One token of an analysed sentence, as delivered by the analysis service.
///
/// `head` is 1-based within the sentence with `0` marking the root, which
/// is the CoNLL-U convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntry {
    pub form: String,
    pub lemma: String,
    pub upos: UPos,
    pub xpos: String,
    pub head: usize,
    pub deprel: String,
    pub space_after: bool,
}

/// A token inside a [`ParsedDoc`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Position in the document (0-based, across sentences)
    pub index: usize,
    pub text: String,
    pub lemma: String,
    pub pos: UPos,
    /// Fine-grained tag (Penn tag for English parsers)
    pub tag: String,
    pub dep: String,
    /// Document index of the syntactic head, `None` for a sentence root
    pub head: Option<usize>,
    pub space_after: bool,
    /// Byte offset of the token in [`ParsedDoc::text`]
    pub offset: usize,
    pub sentence: usize,
}

const QUOTE_CHARS: &[char] = &['"', '“', '”'];

fn is_punct_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '“' | '”' | '‘' | '’' | '«' | '»' | '…' | '–' | '—' | '¿' | '¡'
        )
}

impl Token {
    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    /// Lexical punctuation: a PUNCT tag or a form made only of punctuation.
    pub fn is_punct(&self) -> bool {
        self.pos == UPos::Punct || (!self.text.is_empty() && self.text.chars().all(is_punct_char))
    }

    /// Punctuation by form or by attachment label.
    pub fn attaches_as_punct(&self) -> bool {
        self.is_punct() || self.dep == "punct"
    }

    /// Coordinating or subordinating conjunction.
    pub fn is_conjunction(&self) -> bool {
        matches!(self.pos, UPos::Cconj | UPos::Sconj)
    }

    /// A straight or curly double quote.
    pub fn is_quote(&self) -> bool {
        is_quote_text(&self.text)
    }

    pub fn is_root(&self) -> bool {
        self.head.is_none()
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// True for a single straight or curly double quote.
pub fn is_quote_text(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => QUOTE_CHARS.contains(&c),
        _ => false,
    }
}

/// A half-open range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Last token index of a non-empty span.
    pub fn last(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }
}

/// A sentence-split, tagged and dependency-parsed document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    tokens: Vec<Token>,
    sentences: Vec<Range<usize>>,
    children: Vec<Vec<usize>>,
    text: String,
}

impl ParsedDoc {
    /// Build a document from per-sentence token entries.
    ///
    /// The document text is reconstructed from token forms: tokens are
    /// separated by one space unless `space_after` is false, and sentences
    /// are separated by one space.
    pub fn from_sentences(sentences: Vec<Vec<TokenEntry>>) -> Result<Self, DocError> {
        let mut tokens = Vec::new();
        let mut ranges = Vec::new();
        let mut text = String::new();

        for (sentence_idx, entries) in sentences.into_iter().enumerate() {
            if entries.is_empty() {
                continue;
            }
            let sentence = ranges.len();
            let start = tokens.len();
            let len = entries.len();

            for (position, entry) in entries.into_iter().enumerate() {
                let index = start + position;
                let head = match entry.head {
                    0 => None,
                    h if h <= len => Some(start + h - 1),
                    h => {
                        return Err(DocError::HeadOutOfSentence {
                            token: index,
                            head: h,
                            sentence: sentence_idx,
                        })
                    }
                };

                let offset = text.len();
                text.push_str(&entry.form);
                if entry.space_after {
                    text.push(' ');
                }

                tokens.push(Token {
                    index,
                    text: entry.form,
                    lemma: entry.lemma,
                    pos: entry.upos,
                    tag: entry.xpos,
                    dep: entry.deprel,
                    head,
                    space_after: entry.space_after,
                    offset,
                    sentence,
                });
            }

            // sentences are always separated, even without SpaceAfter
            if !text.ends_with(' ') {
                text.push(' ');
                if let Some(last) = tokens.last_mut() {
                    last.space_after = true;
                }
            }
            ranges.push(start..tokens.len());
        }

        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
        if let Some(last) = tokens.last_mut() {
            last.space_after = false;
        }

        let mut children = vec![Vec::new(); tokens.len()];
        for token in &tokens {
            if let Some(head) = token.head {
                children[head].push(token.index);
            }
        }

        let doc = Self {
            tokens,
            sentences: ranges,
            children,
            text,
        };
        doc.check_acyclic()?;
        Ok(doc)
    }

    fn check_acyclic(&self) -> Result<(), DocError> {
        for token in &self.tokens {
            let sentence_len = self.sentences[token.sentence].len();
            let mut current = token.head;
            let mut steps = 0;
            while let Some(head) = current {
                if head == token.index || steps > sentence_len {
                    return Err(DocError::HeadCycle { token: token.index });
                }
                steps += 1;
                current = self.tokens[head].head;
            }
        }
        Ok(())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Range<usize>] {
        &self.sentences
    }

    /// Token range of the sentence containing `index`.
    pub fn sentence_of(&self, index: usize) -> Range<usize> {
        self.tokens
            .get(index)
            .and_then(|t| self.sentences.get(t.sentence))
            .cloned()
            .unwrap_or(0..0)
    }

    /// Heads of `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.tokens.get(index).and_then(|t| t.head),
        }
    }

    /// Direct dependents of `index` in document order.
    pub fn children(&self, index: usize) -> &[usize] {
        self.children.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct dependents to the left of `index`.
    pub fn lefts(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.children(index).iter().copied().filter(move |&c| c < index)
    }

    /// Direct dependents to the right of `index`.
    pub fn rights(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.children(index).iter().copied().filter(move |&c| c > index)
    }

    /// `index` and all its descendants, in document order.
    pub fn subtree(&self, index: usize) -> Vec<usize> {
        if index >= self.tokens.len() {
            return Vec::new();
        }
        let mut collected = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            collected.push(current);
            stack.extend(self.children(current).iter().copied());
        }
        collected.sort_unstable();
        collected
    }

    /// Surface text of a token span, keeping the original spacing.
    pub fn span_text(&self, span: Span) -> String {
        let end = span.end.min(self.tokens.len());
        let mut out = String::new();
        for index in span.start..end {
            let token = &self.tokens[index];
            out.push_str(&token.text);
            if index + 1 < end && token.space_after {
                out.push(' ');
            }
        }
        out
    }

    /// Convert byte offsets in [`Self::text`] into a token span.
    ///
    /// Returns `None` unless both offsets fall exactly on token boundaries.
    pub fn char_span(&self, start: usize, end: usize) -> Option<Span> {
        let first = self.tokens.iter().find(|t| t.offset == start)?;
        let last = self.tokens.iter().find(|t| t.end() == end)?;
        if last.index < first.index {
            return None;
        }
        Some(Span::new(first.index, last.index + 1))
    }
}

impl Index<usize> for ParsedDoc {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

/// Iterator over the head chain of a token.
pub struct Ancestors<'a> {
    doc: &'a ParsedDoc,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.doc.tokens[current].head;
        Some(current)
    }
}
