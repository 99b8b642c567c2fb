use crate::extraction::table::is_table_header;
use regex::Regex;
use std::sync::LazyLock;

/// Line classification and row assembly.
///
/// A logical transaction may span several physical lines: the line that
/// carries the date opens the row, the `AMOUNT BALANCE` tail may sit on that
/// same line or arrive at the end of a later continuation line, and any other
/// text while a row is open extends the description. Lines outside an open
/// row are page furniture and dropped. The scan is strictly sequential; each
/// line is classified exactly once.

/// One assembled row, raw fields only. Amounts are optional because a row can
/// close before its `AMOUNT BALANCE` tail ever appeared; such rows surface as
/// `MalformedAmount` during validation rather than vanishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub date_raw: String,
    pub description_raw: String,
    pub amount_raw: Option<String>,
    pub balance_raw: Option<String>,
}

// DATE DESCRIPTION AMOUNT BALANCE on a single line. DESCRIPTION is
// non-greedy so it stops where the remaining suffix itself matches
// AMOUNT BALANCE.
static FULL_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+",
        r"(?P<desc>.+?)\s+",
        r"(?P<amount>[-+]?\$-?[\d,]+\.\d{2}\*?)\s+",
        r"(?P<balance>\$[\d,]+\.\d{2})\s*$"
    ))
    .expect("full row regex")
});

// DATE DESCRIPTION with no amount tail: opens a row whose amounts arrive on
// a continuation line.
static OPEN_ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<date>\d{2}/\d{2}/\d{4})\s+(?P<desc>\S.*?)\s*$").expect("open row regex")
});

// Continuation line ending in the AMOUNT BALANCE pair that completes the
// open row.
static TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<desc>.*?)\s*",
        r"(?P<amount>[-+]?\$-?[\d,]+\.\d{2}\*?)\s+",
        r"(?P<balance>\$[\d,]+\.\d{2})\s*$"
    ))
    .expect("tail regex")
});

/// Explicit continuation state: either no row is open, or exactly one is.
enum State {
    NoOpenRow,
    RowOpen(RawRow),
}

pub struct RowAssembler {
    state: State,
    rows: Vec<RawRow>,
}

impl RowAssembler {
    pub fn new() -> Self {
        RowAssembler {
            state: State::NoOpenRow,
            rows: Vec::new(),
        }
    }

    /// Classify one physical line and fold it into the assembly.
    pub fn feed_line(&mut self, line: &str) {
        // Multi-page tables repeat the column header on every page; it ends
        // the open row instead of polluting its description.
        if is_table_header(line) {
            self.close_open_row();
            return;
        }

        if let Some(caps) = FULL_ROW_RE.captures(line) {
            self.close_open_row();
            self.state = State::RowOpen(RawRow {
                date_raw: caps["date"].to_string(),
                description_raw: collapse_ws(&caps["desc"]),
                amount_raw: Some(caps["amount"].to_string()),
                balance_raw: Some(caps["balance"].to_string()),
            });
            return;
        }

        if let Some(caps) = OPEN_ROW_RE.captures(line) {
            self.close_open_row();
            self.state = State::RowOpen(RawRow {
                date_raw: caps["date"].to_string(),
                description_raw: collapse_ws(&caps["desc"]),
                amount_raw: None,
                balance_raw: None,
            });
            return;
        }

        match &mut self.state {
            State::NoOpenRow => {} // header lines, blanks, page furniture
            State::RowOpen(row) => {
                if row.amount_raw.is_none() {
                    if let Some(caps) = TAIL_RE.captures(line) {
                        append_description(&mut row.description_raw, &caps["desc"]);
                        row.amount_raw = Some(caps["amount"].to_string());
                        row.balance_raw = Some(caps["balance"].to_string());
                        return;
                    }
                }
                append_description(&mut row.description_raw, line);
            }
        }
    }

    /// Close out any still-open row and return the assembled rows in order.
    pub fn finish(mut self) -> Vec<RawRow> {
        self.close_open_row();
        self.rows
    }

    fn close_open_row(&mut self) {
        if let State::RowOpen(row) = std::mem::replace(&mut self.state, State::NoOpenRow) {
            self.rows.push(row);
        }
    }
}

impl Default for RowAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble all rows from the table region's lines.
pub fn assemble_rows<'a, I>(lines: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut assembler = RowAssembler::new();
    for line in lines {
        assembler.feed_line(line);
    }
    assembler.finish()
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn append_description(description: &mut String, extra: &str) {
    let extra = collapse_ws(extra);
    if extra.is_empty() {
        return;
    }
    if !description.is_empty() {
        description.push(' ');
    }
    description.push_str(&extra);
}
