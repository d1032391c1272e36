//! `[DOC key=value ...]` header directive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{key_type, DocumentConfig, KeyType};

use super::options::ParseOptions;
use super::tokenize::{split_pair, tokenize};

static DOC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[DOC(\s+.*)?\]$").unwrap());

/// Result of inspecting the first non-blank line.
#[derive(Debug, Clone, Default)]
pub struct Header {
    /// Parsed configuration (defaults when no header is present)
    pub config: DocumentConfig,

    /// Keys outside the whitelist that were ignored
    pub unknown_keys: Vec<String>,

    /// 0-based index of the consumed header line
    pub index: Option<usize>,
}

/// Parse the optional header from already-normalized lines.
pub fn parse_header<S: AsRef<str>>(lines: &[S], options: &ParseOptions) -> Result<Header> {
    let Some((index, first)) = lines
        .iter()
        .map(AsRef::as_ref)
        .enumerate()
        .find(|(_, l)| !l.trim().is_empty())
    else {
        return Ok(Header::default());
    };

    let trimmed = first.trim();
    let Some(caps) = DOC_RE.captures(trimmed) else {
        return Ok(Header::default());
    };

    let line = index + 1;
    let config_error = |message: String| Error::Config {
        line,
        message,
        context: trimmed.to_string(),
    };

    let body = caps.get(1).map_or("", |m| m.as_str());
    let tokens = tokenize(body).map_err(|e| config_error(e.to_string()))?;

    let mut config = DocumentConfig::default();
    let mut unknown_keys = Vec::new();

    for token in &tokens {
        let Some((key, value)) = split_pair(token) else {
            log::warn!("line {}: ignoring header token without `=`: {}", line, token);
            continue;
        };

        let Some(ty) = key_type(key) else {
            if options.is_strict() {
                return Err(config_error(format!("unknown key `{}`", key)));
            }
            log::warn!("line {}: ignoring unknown header key `{}`", line, key);
            if !unknown_keys.iter().any(|k| k == key) {
                unknown_keys.push(key.to_string());
            }
            continue;
        };

        match ty {
            KeyType::Bool => {
                let value = parse_bool(value).ok_or_else(|| {
                    config_error(format!("`{}` expects a boolean, got `{}`", key, value))
                })?;
                set_bool(&mut config, key, value);
            }
            KeyType::Int => {
                let value = value.trim().parse::<i64>().map_err(|_| {
                    config_error(format!("`{}` expects an integer, got `{}`", key, value))
                })?;
                config.toc_max_level = value;
            }
            KeyType::String => set_string(&mut config, key, value.to_string()),
        }
    }

    Ok(Header {
        config,
        unknown_keys,
        index: Some(index),
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn set_bool(config: &mut DocumentConfig, key: &str, value: bool) {
    match key {
        "include_title_block" => config.include_title_block = value,
        "include_toc" => config.include_toc = value,
        "footer_show_page" => config.footer_show_page = value,
        "footer_link_to_toc" => config.footer_link_to_toc = Some(value),
        _ => {}
    }
}

fn set_string(config: &mut DocumentConfig, key: &str, value: String) {
    let slot = match key {
        "out" => &mut config.out,
        "title" => &mut config.title,
        "subtitle" => &mut config.subtitle,
        "meta_line" => &mut config.meta_line,
        "footer_left" => &mut config.footer_left,
        "footer_center" => &mut config.footer_center,
        "footer_right" => &mut config.footer_right,
        "author" => &mut config.author,
        "subject" => &mut config.subject,
        "keywords" => &mut config.keywords,
        "system" => &mut config.system,
        "contacto" => &mut config.contacto,
        "toc_title" => {
            config.toc_title = value;
            return;
        }
        _ => return,
    };
    *slot = Some(value);
}
