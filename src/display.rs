use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::{ParsedDoc, Span};

/// Internal representation of an included span for display.
struct IncludedSpan {
    span: Span,
    label: String,
}

/// Renders a document's tokens on one line and underlines spans below it.
///
/// ```text
/// If  it  rains  then  the  match  is  cancelled
///                ╰──╯Trigger("then")
/// ```
pub struct DocDisplay<'a> {
    doc: &'a ParsedDoc,
    include_spans: Vec<IncludedSpan>,
}

impl<'a> std::fmt::Display for DocDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();
        // write opening display text
        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for token in self.doc.tokens() {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }

                token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
                opening_line.push_str(&token.text);
                token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }

        f.write_str(&opening_line)?;

        for included in self.include_spans.iter() {
            // spans past the end of the document are not drawn
            let Some(last) = included.span.last() else {
                continue;
            };
            if last >= token_idx_to_end_display_char_idx.len() {
                continue;
            }

            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[included.span.start];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[last];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&included.label)?;
        }

        Ok(())
    }
}

impl<'a> DocDisplay<'a> {
    pub fn new(doc: &'a ParsedDoc) -> Self {
        DocDisplay {
            doc,
            include_spans: Vec::new(),
        }
    }

    pub fn include(&mut self, span: Span, label: impl Into<String>) {
        self.include_spans.push(IncludedSpan {
            span,
            label: label.into(),
        });
    }

    /// Takes self
    pub fn with(mut self, span: Span, label: impl Into<String>) -> Self {
        self.include(span, label);
        self
    }

    /// Include every span with the same label.
    pub fn with_all(mut self, spans: impl IntoIterator<Item = Span>, label: &str) -> Self {
        for span in spans {
            self.include(span, label);
        }
        self
    }
}
