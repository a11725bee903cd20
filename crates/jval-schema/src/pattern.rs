use once_cell::sync::Lazy;

static CONTROL_GROUPS_RE: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\\c[A-Za-z]").unwrap());

/// Compiles a JSON Schema `pattern` into a usable regex.
///
/// Schema patterns follow ECMA 262, which differs from the Rust regex
/// dialect in a few character classes, so those are rewritten before
/// compilation.
pub fn compile_pattern(pattern: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    let pattern = CONTROL_GROUPS_RE.replace_all(pattern, replace_control_group);
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    // A `\` may start a character group that needs rewriting, so look at
    // the char that follows it
    while let Some(current) = chars.next() {
        if current == '\\' {
            match chars.next() {
                Some('d') => out.push_str("[0-9]"),
                Some('D') => out.push_str("[^0-9]"),
                Some('w') => out.push_str("[A-Za-z0-9_]"),
                Some('W') => out.push_str("[^A-Za-z0-9_]"),
                Some('s') => {
                    out.push_str("[ \t\n\r\u{000b}\u{000c}\u{2003}\u{feff}\u{2029}\u{00a0}]")
                }
                Some('S') => {
                    out.push_str("[^ \t\n\r\u{000b}\u{000c}\u{2003}\u{feff}\u{2029}\u{00a0}]")
                }
                Some(next) => {
                    out.push(current);
                    out.push(next);
                }
                // Incomplete escape sequence, compilation will reject it
                None => out.push(current),
            }
        } else {
            out.push(current);
        }
    }
    fancy_regex::Regex::new(&out)
}

fn replace_control_group(captures: &regex::Captures) -> String {
    // The minimum value is 65 (char 'A'), so the subtraction cannot overflow
    ((captures[0]
        .trim_start_matches(r"\c")
        .chars()
        .next()
        .expect("the regex rule guarantees [A-Za-z] here")
        .to_ascii_uppercase() as u8
        - 64) as char)
        .to_string()
}
