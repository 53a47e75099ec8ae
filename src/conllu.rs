//! CoNLL-U reader.
//!
//! The analysis service is external; its output reaches this crate as
//! CoNLL-U. Ten columns per token line:
//!
//! ```text
//! ID  FORM  LEMMA  UPOS  XPOS  FEATS  HEAD  DEPREL  DEPS  MISC
//! ```
//!
//! Columns are tab-separated. Lines without any tab are split on
//! whitespace instead, which keeps hand-written fixtures readable.
//! Comment lines, multi-word token ranges (`1-2`) and empty nodes (`1.1`)
//! are skipped. `SpaceAfter=No` in MISC controls text reconstruction.

use std::fs;
use std::path::Path;

use crate::{DocError, ParsedDoc, TokenEntry, UPos};

/// Parse a CoNLL-U document.
pub fn parse_conllu(input: &str) -> Result<ParsedDoc, DocError> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for (line_idx, raw) in input.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            if !current.is_empty() {
                sentences.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.trim_start().starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = if line.contains('\t') {
            line.split('\t').collect()
        } else {
            line.split_whitespace().collect()
        };
        if columns.len() != 10 {
            return Err(DocError::Conllu {
                line: line_no,
                message: format!("expected 10 columns, found {}", columns.len()),
            });
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            continue;
        }
        let expected = current.len() + 1;
        match id.parse::<usize>() {
            Ok(n) if n == expected => {}
            Ok(n) => {
                return Err(DocError::Conllu {
                    line: line_no,
                    message: format!("token id {} out of sequence, expected {}", n, expected),
                })
            }
            Err(_) => {
                return Err(DocError::Conllu {
                    line: line_no,
                    message: format!("invalid token id {:?}", id),
                })
            }
        }

        let head = columns[6].parse::<usize>().map_err(|_| DocError::Conllu {
            line: line_no,
            message: format!("invalid head {:?}", columns[6]),
        })?;

        let form = columns[1].to_string();
        let lemma = match columns[2] {
            "_" => form.to_lowercase(),
            lemma => lemma.to_string(),
        };

        current.push(TokenEntry {
            form,
            lemma,
            upos: UPos::parse(columns[3]),
            xpos: none_if_blank(columns[4]),
            head,
            deprel: none_if_blank(columns[7]),
            space_after: !columns[9].split('|').any(|item| item == "SpaceAfter=No"),
        });
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    let doc = ParsedDoc::from_sentences(sentences)?;
    tracing::trace!(
        sentences = doc.sentences().len(),
        tokens = doc.len(),
        "parsed conllu document"
    );
    Ok(doc)
}

/// Read and parse a CoNLL-U file.
pub fn read_conllu_file(path: &Path) -> Result<ParsedDoc, DocError> {
    let content = fs::read_to_string(path).map_err(|e| DocError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_conllu(&content)
}

fn none_if_blank(column: &str) -> String {
    if column == "_" {
        String::new()
    } else {
        column.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SENTENCES: &str = "\
# text = It rains.
1\tIt\tit\tPRON\tPRP\t_\t2\tnsubj\t_\t_
2\train\train\tVERB\tVBZ\t_\t0\tROOT\t_\tSpaceAfter=No
3\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_

1-2\tCan't\t_\t_\t_\t_\t_\t_\t_\t_
1\tCa\tcan\tAUX\tMD\t_\t3\taux\t_\tSpaceAfter=No
2\tn't\tnot\tPART\tRB\t_\t3\tneg\t_\t_
3\tstop\tstop\tVERB\tVB\t_\t0\tROOT\t_\t_
";

    #[test]
    fn reads_sentences_and_offsets() {
        let doc = parse_conllu(TWO_SENTENCES).unwrap();
        assert_eq!(doc.text(), "It rain. Can't stop");
        assert_eq!(doc.sentences(), &[0..3, 3..6]);
        assert_eq!(doc[5].head, None);
        assert_eq!(doc[3].head, Some(5));
        assert_eq!(doc[4].offset, 11);
        assert_eq!(doc[1].tag, "VBZ");
        assert_eq!(doc.char_span(9, 14), Some(crate::Span::new(3, 5)));
    }

    #[test]
    fn whitespace_columns_are_accepted() {
        let doc = parse_conllu("1 Hello hello INTJ UH _ 0 ROOT _ _\n").unwrap();
        assert_eq!(doc[0].pos, UPos::Intj);
        assert_eq!(doc[0].dep, "ROOT");
    }

    #[test]
    fn wrong_column_count_is_reported_with_line() {
        let err = parse_conllu("1 Hello hello\n").unwrap_err();
        assert!(matches!(err, DocError::Conllu { line: 1, .. }));
    }

    #[test]
    fn ids_must_be_sequential() {
        let err = parse_conllu("2 Hello hello INTJ UH _ 0 ROOT _ _\n").unwrap_err();
        assert!(matches!(err, DocError::Conllu { line: 1, .. }));
    }

    #[test]
    fn reads_fixture_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join("dog-running.conllu");
        let doc = read_conllu_file(&path).unwrap();
        assert_eq!(doc.text(), "A dog running is a way of saying a dog is active");
        assert_eq!(doc.len(), 12);
    }
}
