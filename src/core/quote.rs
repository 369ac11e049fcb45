use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::ScriptError;

static RE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""[^"]+"|\S+"#).unwrap());

/// Wraps a token in double quotes, completing a half-quoted one. Tokens with
/// a quote inside them are kept as they are and a lone `"` is dropped, so
/// the output splits back into the same tokens.
pub fn quote_token(token: &str) -> Option<String> {
    if token == "\"" {
        return None;
    }

    let mut inner = token.chars();
    inner.next();
    inner.next_back();
    if inner.as_str().contains('"') {
        return Some(token.to_string());
    }

    let quoted = match (token.starts_with('"'), token.ends_with('"')) {
        (true, true) => token.to_string(),
        (true, false) => format!("{token}\""),
        (false, true) => format!("\"{token}"),
        (false, false) => format!("\"{token}\""),
    };
    Some(quoted)
}

pub fn quote_line(line: &str) -> String {
    RE_TOKEN
        .find_iter(line)
        .filter_map(|m| quote_token(m.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn quoted_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("-quoted");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

/// Quotes every token of `input` and writes the result to `<stem>-quoted<ext>`.
pub fn quotify(input: &Path) -> Result<PathBuf, ScriptError> {
    let file = File::open(input).map_err(|e| ScriptError::io(input, e))?;

    let mut quoted = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| ScriptError::io(input, e))?;
        quoted.push_str(&quote_line(&line));
        quoted.push('\n');
    }

    let output = quoted_path(input);
    fs::write(&output, quoted).map_err(|e| ScriptError::io(&output, e))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_and_quoted_tokens() {
        assert_eq!(quote_line(r#"foo "bar baz" qux"#), r#""foo" "bar baz" "qux""#);
    }

    #[test]
    fn half_quoted_tokens_are_closed() {
        assert_eq!(quote_token(r#""open"#).as_deref(), Some(r#""open""#));
        assert_eq!(quote_token(r#"close""#).as_deref(), Some(r#""close""#));
    }

    #[test]
    fn lone_quotes_are_dropped() {
        assert_eq!(quote_token("\""), None);
        assert_eq!(quote_line(r#"" foo"#), r#""foo""#);
    }

    #[test]
    fn inner_quotes_pass_through() {
        assert_eq!(
            quote_line(r#"-vf drawtext=text="hi""#),
            r#""-vf" drawtext=text="hi""#
        );
        assert_eq!(quote_token(r#"a"b"#).as_deref(), Some(r#"a"b"#));
        assert_eq!(quote_token(r#""""x"#).as_deref(), Some(r#""""x"#));
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(quote_line("  -i\tinput.mov   -y "), r#""-i" "input.mov" "-y""#);
        assert_eq!(quote_line("   "), "");
    }

    #[test]
    fn quoting_is_idempotent() {
        let lines = [
            r#"foo "bar baz" qux"#,
            r#"ffmpeg -i "my clip.mov" -c copy out.mkv"#,
            r#""half open"#,
            r#"-vf drawtext=text="hi" -y"#,
            r#"a"b c"d "e f""#,
            r#"x "" y " z"#,
            r#"""x "q r""#,
        ];
        for line in lines {
            let once = quote_line(line);
            assert_eq!(quote_line(&once), once, "line: {line}");
        }
    }

    #[test]
    fn quotify_writes_sibling_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("args.txt");
        fs::write(&input, "a b\n\"c d\" e\n").unwrap();

        let output = quotify(&input).unwrap();
        assert_eq!(output, dir.path().join("args-quoted.txt"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "\"a\" \"b\"\n\"c d\" \"e\"\n");

        let again = quotify(&output).unwrap();
        assert_eq!(
            fs::read_to_string(again).unwrap(),
            fs::read_to_string(&output).unwrap()
        );
    }

    #[test]
    fn quoted_path_without_extension() {
        assert_eq!(quoted_path(Path::new("/tmp/cmd")), PathBuf::from("/tmp/cmd-quoted"));
    }

    #[cfg(unix)]
    #[test]
    fn quoted_path_keeps_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"/tmp/caf\xe9.txt"));
        assert_eq!(
            quoted_path(input),
            Path::new(OsStr::from_bytes(b"/tmp/caf\xe9-quoted.txt"))
        );
    }
}
