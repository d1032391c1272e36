//! `[FIG file="..." page=N caption="..." zoom=F]` directive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Figure;

use super::options::ParseOptions;
use super::tokenize::{split_pair, tokenize};

static FIG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[FIG(\s+.*)?\]$").unwrap());

/// Check if a trimmed line is a figure directive.
pub fn is_figure_directive(line: &str) -> bool {
    FIG_RE.is_match(line)
}

/// Parse a figure directive. `line` is the 1-based source line number.
///
/// Keys may appear in any order; `file` and `page` are required.
pub fn parse_figure(text: &str, line: usize, options: &ParseOptions) -> Result<Figure> {
    let syntax_error = |message: String| Error::FigureSyntax {
        line,
        message,
        context: text.to_string(),
    };

    let caps = FIG_RE
        .captures(text)
        .ok_or_else(|| syntax_error("not a figure directive".to_string()))?;
    let body = caps.get(1).map_or("", |m| m.as_str());
    let tokens = tokenize(body).map_err(|e| syntax_error(e.to_string()))?;

    let mut file = None;
    let mut page = None;
    let mut caption = None;
    let mut zoom = None;

    for token in &tokens {
        let Some((key, value)) = split_pair(token) else {
            if options.is_strict() {
                return Err(syntax_error(format!("expected key=value, got `{}`", token)));
            }
            log::warn!("line {}: ignoring figure token without `=`: {}", line, token);
            continue;
        };

        match key {
            "file" => file = Some(value.trim().to_string()),
            "page" => {
                let n = value
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| syntax_error(format!("invalid page `{}`", value)))?;
                if n == 0 {
                    return Err(syntax_error("page numbers start at 1".to_string()));
                }
                page = Some(n);
            }
            "caption" => caption = Some(value.to_string()),
            "zoom" => {
                let z = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|z| z.is_finite() && *z > 0.0)
                    .ok_or_else(|| syntax_error(format!("invalid zoom `{}`", value)))?;
                zoom = Some(z);
            }
            other => {
                if options.is_strict() {
                    return Err(syntax_error(format!("unknown key `{}`", other)));
                }
                log::warn!("line {}: ignoring unknown figure key `{}`", line, other);
            }
        }
    }

    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| syntax_error("missing `file`".to_string()))?;
    let page = page.ok_or_else(|| syntax_error("missing `page`".to_string()))?;

    Ok(Figure {
        file,
        page,
        caption: caption.filter(|c: &String| !c.trim().is_empty()),
        zoom: zoom.unwrap_or(options.default_zoom),
    })
}
