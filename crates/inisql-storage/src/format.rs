//! INI text format: reading and writing whole [`Store`]s.
//!
//! ```text
//! # comment
//! [section]
//! key = value
//! multi = first line
//!     continued line
//! ```

use crate::IniOptions;
use inisql_core::{Error, Result, Store};
use std::collections::HashSet;
use std::fmt::Write as _;

/// Parse INI text into a [`Store`].
pub fn parse(text: &str, options: &IniOptions) -> Result<Store> {
    let mut store = Store::new();
    let mut current: Option<String> = None;
    // Key whose value an indented line would continue
    let mut last_key: Option<String> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            last_key = None;
            continue;
        }
        if trimmed.starts_with(options.comment_prefixes.as_slice()) {
            continue;
        }

        let indented = trimmed.len() != line.len();
        if indented {
            if let (Some(section), Some(key)) = (current.as_deref(), last_key.as_deref()) {
                let section = store
                    .section_mut(section)
                    .ok_or_else(|| parse_error(line_no, "continuation outside a section"))?;
                let mut value = section.get(key).unwrap_or_default().to_string();
                value.push('\n');
                value.push_str(trimmed);
                section.set(key, value)?;
                continue;
            }
        }

        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if name.is_empty() {
                return Err(parse_error(line_no, "empty section name"));
            }
            if !store.add_section(name)? {
                return Err(parse_error(line_no, format!("duplicate section '{}'", name)));
            }
            current = Some(name.to_string());
            last_key = None;
            continue;
        }

        let section_name = current
            .as_deref()
            .ok_or_else(|| parse_error(line_no, "entry before any section header"))?;
        let split = trimmed
            .find(options.delimiters.as_slice())
            .ok_or_else(|| parse_error(line_no, format!("expected key{}value", options.primary_delimiter())))?;
        let key = options.key_case.normalize(trimmed[..split].trim());
        let value = trimmed[split..]
            .chars()
            .skip(1)
            .collect::<String>()
            .trim()
            .to_string();
        if key.is_empty() {
            return Err(parse_error(line_no, "empty key"));
        }

        let section = store
            .section_mut(section_name)
            .ok_or_else(|| parse_error(line_no, "entry outside a section"))?;
        if section.contains_key(&key) {
            return Err(parse_error(
                line_no,
                format!("duplicate key '{}' in section '{}'", key, section_name),
            ));
        }
        section.set(&*key, value)?;
        last_key = Some(key.into_owned());
    }

    Ok(store)
}

/// Render a [`Store`] as INI text.
pub fn render(store: &Store, options: &IniOptions) -> String {
    let delimiter = if options.space_around_delimiters {
        format!(" {} ", options.primary_delimiter())
    } else {
        options.primary_delimiter().to_string()
    };

    let mut out = String::new();
    for (name, section) in store.sections() {
        let _ = writeln!(out, "[{}]", name);
        for (key, value) in section.iter() {
            let key = options.key_case.normalize(key);
            let _ = writeln!(out, "{}{}{}", key, delimiter, value.replace('\n', "\n\t"));
        }
        out.push('\n');
    }
    out
}

/// Reject names the format cannot read back unchanged.
pub fn validate(store: &Store, options: &IniOptions) -> Result<()> {
    for (name, section) in store.sections() {
        if name.contains(['\n', '\r']) {
            return Err(Error::InvalidInput(format!(
                "Section name '{}' cannot contain line breaks",
                name.escape_debug()
            )));
        }
        let mut written = HashSet::new();
        for (key, value) in section.iter() {
            if !written.insert(options.key_case.normalize(key)) {
                return Err(Error::InvalidInput(format!(
                    "Key '{}' in section '{}' collides with another key once case is folded",
                    key, name
                )));
            }
            if key.contains(['\n', '\r']) || key.contains(options.delimiters.as_slice()) {
                return Err(Error::InvalidInput(format!(
                    "Key '{}' in section '{}' cannot contain line breaks or delimiters",
                    key.escape_debug(),
                    name
                )));
            }
            if key.starts_with('[') || key.starts_with(options.comment_prefixes.as_slice()) {
                return Err(Error::InvalidInput(format!(
                    "Key '{}' in section '{}' cannot start with '[' or a comment prefix",
                    key, name
                )));
            }
            if key.trim() != key {
                return Err(Error::InvalidInput(format!(
                    "Key '{}' in section '{}' cannot have surrounding whitespace",
                    key, name
                )));
            }
            if value.split('\n').skip(1).any(|line| line.trim().is_empty()) {
                return Err(Error::InvalidInput(format!(
                    "Value of '{}' in section '{}' cannot contain blank continuation lines",
                    key, name
                )));
            }
        }
    }
    Ok(())
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inisql_core::{ErrorKind, KeyCase};

    const SMB_CONF: &str = "\
# Samba config
[global]
workgroup = HOME
server string = Samba Server
; alternate comment
security=user

[homes]
comment: Home Directories
browseable = no
path = /srv/a
   /srv/b
";

    #[test]
    fn test_parse_sections_and_delimiters() {
        let store = parse(SMB_CONF, &IniOptions::default()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_value("global", "server string"), Some("Samba Server"));
        assert_eq!(store.get_value("global", "security"), Some("user"));
        assert_eq!(store.get_value("homes", "comment"), Some("Home Directories"));
        assert_eq!(store.get_value("homes", "path"), Some("/srv/a\n/srv/b"));
    }

    #[test]
    fn test_parse_errors() {
        let options = IniOptions::default();
        let err = parse("key = value\n", &options).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));

        let err = parse("[a]\nno delimiter here\n", &options).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));

        assert_eq!(
            parse("[a]\n[a]\n", &options).unwrap_err().kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            parse("[a]\nk=1\nk=2\n", &options).unwrap_err().kind(),
            ErrorKind::Parse
        );
        assert_eq!(parse("[]\n", &options).unwrap_err().kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_value_keeps_later_delimiters() {
        let store = parse("[a]\nurl = http://x/?q=1\n", &IniOptions::default()).unwrap();
        assert_eq!(store.get_value("a", "url"), Some("http://x/?q=1"));
    }

    #[test]
    fn test_render_round_trip() {
        let options = IniOptions::default();
        let store = parse(SMB_CONF, &options).unwrap();
        let text = render(&store, &options);

        assert!(text.starts_with("[global]\nworkgroup = HOME\n"));
        assert!(text.contains("path = /srv/a\n\t/srv/b\n"));
        assert_eq!(parse(&text, &options).unwrap(), store);
    }

    #[test]
    fn test_render_compact_delimiter() {
        let options = IniOptions::default().with_space_around_delimiters(false);
        let mut store = Store::new();
        store.add_section("s").unwrap();
        store.set_value("s", "k", "").unwrap();
        assert_eq!(render(&store, &options), "[s]\nk=\n\n");
    }

    #[test]
    fn test_validate_rejects_unreadable_keys() {
        let options = IniOptions::default();
        for key in ["a:b", "#k", ";k", "[k", " k"] {
            let mut store = Store::new();
            store.add_section("s").unwrap();
            store.set_value("s", key, "v").unwrap();
            assert_eq!(
                validate(&store, &options).unwrap_err().kind(),
                ErrorKind::InvalidInput,
                "key {key:?}"
            );
        }
    }

    #[test]
    fn test_keys_fold_to_lowercase() {
        let text = "[Global]\nWorkgroup = HOME\nServer String = Samba\n";
        let store = parse(text, &IniOptions::default()).unwrap();
        assert_eq!(store.get_value("Global", "workgroup"), Some("HOME"));
        assert_eq!(store.get_value("Global", "server string"), Some("Samba"));
        assert!(store.get_value("global", "workgroup").is_none());

        let err = parse("[a]\nKey = 1\nkey = 2\n", &IniOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));

        let preserve = IniOptions::default().with_key_case(KeyCase::Preserve);
        let store = parse(text, &preserve).unwrap();
        assert_eq!(store.get_value("Global", "Workgroup"), Some("HOME"));
        assert!(store.get_value("Global", "workgroup").is_none());
    }

    #[test]
    fn test_render_folds_keys() {
        let mut store = Store::new();
        store.add_section("s").unwrap();
        store.set_value("s", "Path", "/srv").unwrap();

        let options = IniOptions::default();
        assert_eq!(render(&store, &options), "[s]\npath = /srv\n\n");

        let preserve = IniOptions::default().with_key_case(KeyCase::Preserve);
        assert_eq!(render(&store, &preserve), "[s]\nPath = /srv\n\n");
    }

    #[test]
    fn test_validate_rejects_keys_colliding_after_folding() {
        let mut store = Store::new();
        store.add_section("s").unwrap();
        store.set_value("s", "Path", "a").unwrap();
        store.set_value("s", "path", "b").unwrap();

        assert_eq!(
            validate(&store, &IniOptions::default()).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        let preserve = IniOptions::default().with_key_case(KeyCase::Preserve);
        assert!(validate(&store, &preserve).is_ok());
    }
}
