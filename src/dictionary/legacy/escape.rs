//! Decoding of PHP string literals: quoted strings, heredoc and nowdoc.

/// Removes an optional binary-string prefix (`b'...'`) and the surrounding quotes.
fn quoted_body(text: &str, quote: char) -> Option<&str> {
    let text = text.strip_prefix(['b', 'B']).unwrap_or(text);
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// Decodes a single-quoted literal such as `'It\'s'`.
///
/// Only `\\` and `\'` are escapes; any other backslash is kept.
pub(super) fn single_quoted(text: &str) -> Option<String> {
    let body = quoted_body(text, '\'')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&(escaped @ ('\\' | '\''))) = chars.peek()
        {
            out.push(escaped);
            chars.next();
        } else {
            out.push(c);
        }
    }

    Some(out)
}

/// Decodes a double-quoted literal such as `"Hei\tdu"`.
///
/// Variables inside the string are not interpolated and stay as written.
pub(super) fn double_quoted(text: &str) -> Option<String> {
    quoted_body(text, '"').map(|body| unescape(body, Some(b'"')))
}

/// Longest prefix of `bytes`, at most `max` long, made of digits in `radix`.
fn digit_run(bytes: &[u8], max: usize, radix: u32) -> &[u8] {
    let len = bytes.iter().take(max).take_while(|b| char::from(**b).is_digit(radix)).count();
    bytes.get(..len).unwrap_or_default()
}

/// Value of a digit run produced by [`digit_run`].
fn parse_digits(digits: &[u8], radix: u32) -> Option<u32> {
    u32::from_str_radix(std::str::from_utf8(digits).ok()?, radix).ok()
}

/// Decodes a `\u{...}` escape whose body starts at `rest` (just after `u`).
///
/// Returns the encoded character and the number of bytes consumed.
fn unicode_escape(rest: &[u8]) -> Option<(String, usize)> {
    let inner = rest.strip_prefix(b"{")?;
    let digits = digit_run(inner, inner.len(), 16);
    if digits.is_empty() || inner.get(digits.len()) != Some(&b'}') {
        return None;
    }
    let c = char::from_u32(parse_digits(digits, 16)?)?;
    Some((c.to_string(), digits.len() + 2))
}

/// Applies the escapes of double-quoted strings and heredocs.
///
/// `quote` is the delimiter that may be escaped (`"` for strings, none for
/// heredocs). Octal and hex escapes produce raw bytes; invalid UTF-8 is
/// replaced.
fn unescape(body: &str, quote: Option<u8>) -> String {
    let bytes = body.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut pos = 0;

    while let Some(&byte) = bytes.get(pos) {
        pos += 1;
        if byte != b'\\' {
            out.push(byte);
            continue;
        }
        let Some(&next) = bytes.get(pos) else {
            out.push(byte);
            break;
        };
        let rest = bytes.get(pos + 1..).unwrap_or_default();

        let simple = match next {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'v' => Some(0x0b),
            b'e' => Some(0x1b),
            b'f' => Some(0x0c),
            b'\\' => Some(b'\\'),
            b'$' => Some(b'$'),
            other if Some(other) == quote => Some(other),
            _ => None,
        };
        if let Some(decoded) = simple {
            out.push(decoded);
            pos += 1;
            continue;
        }

        match next {
            b'0'..=b'7' => {
                let digits = digit_run(bytes.get(pos..).unwrap_or_default(), 3, 8);
                // "\400" は "\000" と同じ (下位 8 ビットのみ)
                let value = parse_digits(digits, 8).unwrap_or_default() & 0xff;
                out.push(u8::try_from(value).unwrap_or_default());
                pos += digits.len();
            }
            b'x' if !digit_run(rest, 2, 16).is_empty() => {
                let digits = digit_run(rest, 2, 16);
                let value = parse_digits(digits, 16).unwrap_or_default();
                out.push(u8::try_from(value).unwrap_or_default());
                pos += 1 + digits.len();
            }
            b'u' => {
                if let Some((encoded, consumed)) = unicode_escape(rest) {
                    out.extend_from_slice(encoded.as_bytes());
                    pos += 1 + consumed;
                } else {
                    out.push(byte);
                }
            }
            // 未知のエスケープはバックスラッシュごと残す
            _ => out.push(byte),
        }
    }

    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Decodes a heredoc (`<<<EOT`) or nowdoc (`<<<'EOT'`) literal.
///
/// The indentation of the closing marker is removed from every body line,
/// and the newline before the marker is not part of the value. Heredoc
/// bodies get the double-quoted escapes; nowdoc bodies are taken verbatim.
pub(super) fn heredoc(text: &str) -> Option<String> {
    let rest = text.strip_prefix("<<<")?;
    let (opener, body) = rest.split_once('\n')?;
    let opener = opener.trim();

    let (label, verbatim) = match opener.strip_prefix('\'').and_then(|l| l.strip_suffix('\'')) {
        Some(label) => (label, true),
        None => (opener.trim_matches('"'), false),
    };

    let body = body.trim_end();
    let (content, closing) = body.rsplit_once('\n').unwrap_or(("", body));
    let indent = closing.strip_suffix(label)?;
    if !indent.chars().all(|c| c == ' ' || c == '\t') {
        return None;
    }

    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.strip_prefix(indent).unwrap_or_else(|| line.trim_start_matches([' ', '\t']))
        })
        .collect();
    let joined = lines.join("\n");

    Some(if verbatim { joined } else { unescape(&joined, None) })
}
