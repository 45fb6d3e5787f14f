use std::borrow::Cow;

#[derive(Clone, Copy)]
enum State {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

/// Rewrite `$N` placeholders as SQLite's `?N`.
///
/// Statements are always written with `$N`; the SQLite executor calls this before preparing.
/// Quoted literals and comments are copied untouched. Returns a borrowed `Cow` when nothing
/// needed rewriting.
#[must_use]
pub fn to_sqlite_placeholders(sql: &str) -> Cow<'_, str> {
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut state = State::Normal;
    let mut copied_to = 0;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'-' if bytes.get(idx + 1) == Some(&b'-') => state = State::LineComment,
                b'/' if bytes.get(idx + 1) == Some(&b'*') => state = State::BlockComment,
                b'$' => {
                    let digits_end = scan_digits(bytes, idx + 1);
                    if digits_end > idx + 1 {
                        let buf = out.get_or_insert_with(|| String::with_capacity(sql.len()));
                        buf.push_str(&sql[copied_to..idx]);
                        buf.push('?');
                        buf.push_str(&sql[idx + 1..digits_end]);
                        copied_to = digits_end;
                        idx = digits_end;
                        continue;
                    }
                }
                _ => {}
            },
            // A doubled quote is an escaped quote; leaving and re-entering the state handles it.
            State::SingleQuoted => {
                if b == b'\'' {
                    state = State::Normal;
                }
            }
            State::DoubleQuoted => {
                if b == b'"' {
                    state = State::Normal;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied_to..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

fn scan_digits(bytes: &[u8], start: usize) -> usize {
    let mut idx = start;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    idx
}
