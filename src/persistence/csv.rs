//! Delimited text rows
//!
//! Comma separated, double-quote delimited fields. Quoted fields may hold
//! commas, line breaks and doubled quotes (`""` for one `"`). Rows end with
//! `\n`; `\r\n` is accepted when reading. All structural characters are
//! ASCII, so scanning bytes never splits a UTF-8 sequence.

use std::fmt;

const DELIMITER: u8 = b',';
const QUOTE: u8 = b'"';

/// A field to be written
#[derive(Debug, Clone, Copy)]
pub enum Field<'a> {
    /// Free text, always quoted
    Text(&'a str),
    /// Numbers, dates and codes; quoted only when they would break the row
    Plain(&'a str),
}

/// Append one row, terminated by `\n`
pub fn write_row(out: &mut String, fields: &[Field<'_>]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER as char);
        }
        match *field {
            Field::Text(value) => push_quoted(out, value),
            Field::Plain(value) if needs_quotes(value) => push_quoted(out, value),
            Field::Plain(value) => out.push_str(value),
        }
    }
    out.push('\n');
}

/// Append the header row
pub fn write_header(out: &mut String, columns: &[&str]) {
    out.push_str(&columns.join(","));
    out.push('\n');
}

fn needs_quotes(value: &str) -> bool {
    value
        .bytes()
        .any(|b| matches!(b, DELIMITER | QUOTE | b'\n' | b'\r'))
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    out.push_str(&value.replace('"', "\"\""));
    out.push('"');
}

/// One parsed row and the line it starts on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Row that could not be split into fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub reason: &'static str,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Iterator over the rows of a delimited text document
///
/// Blank lines are skipped. After a broken row the reader resumes on the
/// next line, except for an unterminated quote, which ends the document.
pub struct RowReader<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> RowReader<'a> {
    pub fn new(input: &'a str) -> Self {
        // Skip a UTF-8 byte order mark left by spreadsheet tools
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn read_row(&mut self) -> Result<Vec<String>, RowError> {
        let bytes = self.bytes();
        let start_line = self.line;
        let mut fields = Vec::new();

        loop {
            let field = if bytes.get(self.pos) == Some(&QUOTE) {
                self.read_quoted(start_line)?
            } else {
                self.read_plain()
            };
            fields.push(field);

            match bytes.get(self.pos) {
                Some(&DELIMITER) => self.pos += 1,
                Some(b'\r') | Some(b'\n') | None => break,
                Some(_) => {
                    return Err(RowError {
                        line: self.line,
                        reason: "unexpected character after closing quote",
                    })
                }
            }
        }

        self.end_line();
        Ok(fields)
    }

    fn read_plain(&mut self) -> String {
        let bytes = self.bytes();
        let start = self.pos;
        while let Some(&b) = bytes.get(self.pos) {
            if matches!(b, DELIMITER | b'\r' | b'\n') {
                break;
            }
            self.pos += 1;
        }
        self.input[start..self.pos].to_string()
    }

    fn read_quoted(&mut self, start_line: usize) -> Result<String, RowError> {
        let bytes = self.bytes();
        let mut value = String::new();
        self.pos += 1;

        loop {
            let Some(offset) = bytes[self.pos..].iter().position(|&b| b == QUOTE) else {
                self.pos = bytes.len();
                return Err(RowError {
                    line: start_line,
                    reason: "unterminated quoted field",
                });
            };
            let chunk = &self.input[self.pos..self.pos + offset];
            self.line += chunk.matches('\n').count();
            value.push_str(chunk);
            self.pos += offset + 1;

            if bytes.get(self.pos) == Some(&QUOTE) {
                value.push('"');
                self.pos += 1;
            } else {
                return Ok(value);
            }
        }
    }

    /// Consume the line break ending the current row
    fn end_line(&mut self) {
        let bytes = self.bytes();
        if bytes.get(self.pos) == Some(&b'\r') {
            self.pos += 1;
        }
        if bytes.get(self.pos) == Some(&b'\n') {
            self.pos += 1;
        }
        self.line += 1;
    }

    /// Move past the rest of a broken row
    fn skip_line(&mut self) {
        let bytes = self.bytes();
        while let Some(&b) = bytes.get(self.pos) {
            self.pos += 1;
            if b == b'\n' {
                break;
            }
        }
        self.line += 1;
    }
}

impl Iterator for RowReader<'_> {
    type Item = Result<Row, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.pos >= self.input.len() {
                return None;
            }

            let line = self.line;
            match self.read_row() {
                Ok(fields) if fields.len() == 1 && fields[0].is_empty() => continue,
                Ok(fields) => return Some(Ok(Row { line, fields })),
                Err(err) => {
                    if self.pos < self.input.len() {
                        self.skip_line();
                    }
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(input: &str) -> Vec<Result<Row, RowError>> {
        RowReader::new(input).collect()
    }

    fn fields(input: &str) -> Vec<Vec<String>> {
        rows(input)
            .into_iter()
            .map(|r| r.expect("row should parse").fields)
            .collect()
    }

    #[test]
    fn test_write_row_quotes_text() {
        let mut out = String::new();
        write_row(
            &mut out,
            &[
                Field::Plain("1"),
                Field::Text("Rust \"Meetup\", SP"),
                Field::Plain("2025-01-10"),
            ],
        );
        assert_eq!(out, "1,\"Rust \"\"Meetup\"\", SP\",2025-01-10\n");
    }

    #[test]
    fn test_write_row_quotes_plain_only_when_needed() {
        let mut out = String::new();
        write_row(&mut out, &[Field::Plain("a,b"), Field::Plain("ok")]);
        assert_eq!(out, "\"a,b\",ok\n");
    }

    #[test]
    fn test_read_plain_and_quoted() {
        let parsed = fields("id,nome\n1,\"Ana, a primeira\"\n2,Bruno\n");
        assert_eq!(
            parsed,
            vec![
                vec!["id".to_string(), "nome".to_string()],
                vec!["1".to_string(), "Ana, a primeira".to_string()],
                vec!["2".to_string(), "Bruno".to_string()],
            ]
        );
    }

    #[test]
    fn test_read_doubled_quotes_and_line_breaks() {
        let parsed = rows("1,\"say \"\"hi\"\"\nnext line\"\n2,x\n");
        let first = parsed[0].as_ref().unwrap();
        assert_eq!(first.line, 1);
        assert_eq!(first.fields[1], "say \"hi\"\nnext line");

        let second = parsed[1].as_ref().unwrap();
        assert_eq!(second.line, 3);
        assert_eq!(second.fields, vec!["2", "x"]);
    }

    #[test]
    fn test_read_crlf_blank_lines_and_missing_final_newline() {
        let parsed = fields("a,b\r\n\r\n\nc,\"d\"");
        assert_eq!(parsed, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_read_empty_fields() {
        let parsed = fields("1,,\"\",x\n");
        assert_eq!(parsed, vec![vec!["1", "", "", "x"]]);
    }

    #[test]
    fn test_garbage_after_quote_skips_row() {
        let parsed = rows("1,\"a\"b,c\n2,d\n");
        assert_eq!(
            parsed[0],
            Err(RowError {
                line: 1,
                reason: "unexpected character after closing quote"
            })
        );
        assert_eq!(parsed[1].as_ref().unwrap().fields, vec!["2", "d"]);
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_unterminated_quote_ends_document() {
        let parsed = rows("1,ok\n2,\"never closed\n3,x\n");
        assert_eq!(parsed.len(), 2);
        assert!(parsed[0].is_ok());
        assert_eq!(parsed[1].as_ref().unwrap_err().line, 2);
    }

    #[test]
    fn test_written_rows_read_back() {
        let text = "quote \" comma , newline \n end";
        let mut out = String::new();
        write_header(&mut out, &["id", "texto"]);
        write_row(&mut out, &[Field::Plain("7"), Field::Text(text)]);

        let parsed = fields(&out);
        assert_eq!(parsed[1], vec!["7", text]);
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let parsed = fields("\u{feff}id,nome\n");
        assert_eq!(parsed, vec![vec!["id", "nome"]]);
    }
}
