//! Text encodings for the task file, the archive blocks and the settings file.

use std::collections::HashMap;

use crate::models::Task;

pub const FIELD_SEPARATOR: char = '|';

/// Local time with its UTC offset, e.g. `Sat Oct 17 10:00:00 +02:00 2026`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %Z %Y";
const ARCHIVE_FOOTER: &str = "=== End Session ===";

/// `description|completed`. A `|` inside the description is written as-is and will
/// not survive a reload.
pub fn encode_task(task: &Task) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}",
        task.description(),
        task.completed
    )
}

pub fn encode_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&encode_task(task));
        out.push('\n');
    }
    out
}

/// Trailing empty fields are dropped before counting, so `a|true|` is a task and
/// `a|` is not.
pub fn decode_task(line: &str) -> Option<Task> {
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    let [description, flag] = fields[..] else {
        return None;
    };
    if description.trim().is_empty() {
        return None;
    }
    let completed = flag.trim().eq_ignore_ascii_case("true");
    Some(Task::with_completed(description, completed))
}

/// Turns raw file bytes into text line by line. A line that is not valid UTF-8
/// becomes an empty line so the readers skip it and keep line numbers intact.
pub fn decode_lines(bytes: &[u8]) -> String {
    bytes
        .split(|byte| *byte == b'\n')
        .map(|line| std::str::from_utf8(line).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decodes every well-formed row in file order. Malformed rows are dropped.
pub fn decode_tasks(content: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    for (number, line) in content.lines().enumerate() {
        match decode_task(line) {
            Some(task) => tasks.push(task),
            None => log::debug!("skipping malformed task row line={}", number + 1),
        }
    }
    tasks
}

pub fn encode_archive_block(tasks: &[Task], timestamp: &str) -> String {
    let mut out = format!("=== Mass Delete Session - {timestamp} ===\n");
    out.push_str(&encode_tasks(tasks));
    out.push_str(ARCHIVE_FOOTER);
    out.push_str("\n\n");
    out
}

/// Reads `key=value` lines. Later duplicates win. Continuation lines (trailing
/// backslash) are not supported; `render_properties` never produces them.
pub fn parse_properties(content: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in content.lines() {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = split_entry(line);
        entries.insert(unescape(key), unescape(value));
    }
    entries
}

pub fn render_properties(comments: &[String], entries: &[(&str, String)]) -> String {
    let mut out = String::new();
    for comment in comments {
        out.push('#');
        out.push_str(comment);
        out.push('\n');
    }
    for (key, value) in entries {
        out.push_str(&escape(key, true));
        out.push('=');
        out.push_str(&escape(value, false));
        out.push('\n');
    }
    out
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => return (&line[..index], line[index + 1..].trim_start()),
            c if c.is_whitespace() => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }
    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix(|c: char| c == '=' || c == ':')
        .map(str::trim_start)
        .unwrap_or(rest);
    (&line[..key_end], rest)
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for (index, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{c}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || index == 0 => out.push_str("\\ "),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_task_writes_lowercase_flag() {
        assert_eq!(encode_task(&Task::new("Buy milk")), "Buy milk|false");
        assert_eq!(
            encode_task(&Task::with_completed("Walk dog", true)),
            "Walk dog|true"
        );
        assert_eq!(encode_tasks(&[]), "");
    }

    #[test]
    fn decode_task_accepts_any_case_flag() {
        assert_eq!(
            decode_task("Buy milk|TRUE"),
            Some(Task::with_completed("Buy milk", true))
        );
        assert_eq!(decode_task("Buy milk|False"), Some(Task::new("Buy milk")));
        assert_eq!(decode_task("Buy milk|maybe"), Some(Task::new("Buy milk")));
    }

    #[test]
    fn decode_task_rejects_wrong_field_counts_and_empty_descriptions() {
        assert_eq!(decode_task("no separator"), None);
        assert_eq!(decode_task("a|b|true"), None);
        assert_eq!(decode_task("a|"), None);
        assert_eq!(decode_task("a||"), None);
        assert_eq!(decode_task(""), None);
        assert_eq!(decode_task("|true"), None);
        assert_eq!(decode_task("   |true"), None);
    }

    #[test]
    fn decode_task_ignores_trailing_separators() {
        assert_eq!(
            decode_task("a|true|"),
            Some(Task::with_completed("a", true))
        );
        assert_eq!(decode_task("a|false||"), Some(Task::new("a")));
    }

    #[test]
    fn decode_lines_blanks_invalid_utf8_lines() {
        let text = decode_lines(b"one|true\n\xff\xfe|false\nthree|false\n");
        assert_eq!(text, "one|true\n\nthree|false\n");
        assert_eq!(
            decode_tasks(&text),
            vec![Task::with_completed("one", true), Task::new("three")]
        );
    }

    #[test]
    fn timestamp_carries_utc_offset() {
        use chrono::TimeZone;

        let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2026, 10, 17, 10, 0, 0).unwrap();
        assert_eq!(
            at.format(TIMESTAMP_FORMAT).to_string(),
            "Sat Oct 17 10:00:00 +02:00 2026"
        );
    }

    #[test]
    fn decode_tasks_skips_malformed_middle_line() {
        let content = "first|false\nbroken line\nthird|true\n";
        let tasks = decode_tasks(content);
        assert_eq!(
            tasks,
            vec![Task::new("first"), Task::with_completed("third", true)]
        );
    }

    #[test]
    fn decode_tasks_handles_crlf() {
        let tasks = decode_tasks("a|true\r\nb|false\r\n");
        assert_eq!(tasks, vec![Task::with_completed("a", true), Task::new("b")]);
    }

    #[test]
    fn archive_block_has_header_rows_footer_and_blank_line() {
        let block = encode_archive_block(
            &[Task::new("a"), Task::with_completed("b", true)],
            "Sat Oct 17 10:00:00 +02:00 2026",
        );
        assert_eq!(
            block,
            "=== Mass Delete Session - Sat Oct 17 10:00:00 +02:00 2026 ===\n\
             a|false\n\
             b|true\n\
             === End Session ===\n\n"
        );
    }

    #[test]
    fn parse_properties_handles_separators_and_comments() {
        let content = "#To-Do List Settings\n\
                       ! another comment\n\
                       \n\
                       autoSave=false\n\
                       theme : Dark\n\
                       primaryColor   1,2,3\n\
                       empty=\n";
        let props = parse_properties(content);
        assert_eq!(props.get("autoSave").map(String::as_str), Some("false"));
        assert_eq!(props.get("theme").map(String::as_str), Some("Dark"));
        assert_eq!(props.get("primaryColor").map(String::as_str), Some("1,2,3"));
        assert_eq!(props.get("empty").map(String::as_str), Some(""));
        assert_eq!(props.len(), 4);
    }

    #[test]
    fn properties_escape_special_characters() {
        let rendered = render_properties(
            &["header".to_string()],
            &[("theme", " Night: #1 = best\\".to_string())],
        );
        assert_eq!(rendered, "#header\ntheme=\\ Night\\: \\#1 \\= best\\\\\n");

        let props = parse_properties(&rendered);
        assert_eq!(
            props.get("theme").map(String::as_str),
            Some(" Night: #1 = best\\")
        );
    }

    #[test]
    fn unescape_decodes_unicode_sequences() {
        let props = parse_properties("theme=Caf\\u00e9\n");
        assert_eq!(props.get("theme").map(String::as_str), Some("Café"));
    }
}
