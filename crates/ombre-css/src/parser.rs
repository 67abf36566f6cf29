use crate::color::Rgba;
use crate::error::ParseError;
use crate::gradient::{GradientDesc, GradientFormat, GradientStop};

// ── Entry point ───────────────────────────────────────────────────────────

/// Parses a CSS gradient string into a [`GradientDesc`].
///
/// Grammar restrictions:
/// - function name must be one of `linear-gradient`, `radial-gradient`,
///   `conic-gradient` (case-insensitive);
/// - stop colors are `#rgb` / `#rrggbb` hex or `rgba(r, g, b, a)`, each with
///   an optional trailing `NN%` position;
/// - tokens before the first color token form the format's `prefix`
///   (a lone `<n>deg` linear prefix is lifted into `angle`).
///
/// Tokens that do not match either color form are silently dropped. Missing
/// positions are inferred: when no stop declares one, stops spread evenly
/// over `[0, 100]` (a single stop lands at 50); when only some declare one,
/// the first missing defaults to 0, the last to 100, and interior ones
/// spread evenly by index.
pub fn parse_gradient(input: &str) -> Result<GradientDesc, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("empty input"));
    }

    let (format, inner) = split_function(trimmed)?;
    let parts = split_top_level(inner);

    let first_stop = parts
        .iter()
        .position(|p| looks_like_color(p))
        .ok_or_else(|| ParseError::new("no color stops found"))?;

    let mut prefix = parts[..first_stop].join(", ");
    let mut angle = 90.0;
    if format == GradientFormat::Linear {
        if let Some(deg) = parse_angle(&prefix) {
            angle = deg;
            prefix.clear();
        }
    }

    let mut colors = Vec::new();
    let mut positions = Vec::new();
    for token in &parts[first_stop..] {
        if let Some((color, position)) = parse_stop_token(token) {
            colors.push(color);
            positions.push(position);
        }
    }
    if colors.is_empty() {
        return Err(ParseError::new("no parseable color stops"));
    }

    let resolved = resolve_positions(&positions);

    let mut stops: Vec<GradientStop> = colors
        .into_iter()
        .zip(resolved)
        .map(|(color, p)| GradientStop::new(p.clamp(0.0, 100.0), color))
        .collect();
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));

    Ok(GradientDesc { format, angle, prefix, stops })
}

// ── Tokenization ──────────────────────────────────────────────────────────

/// Splits `name(args)` into the detected format and the argument substring.
fn split_function(s: &str) -> Result<(GradientFormat, &str), ParseError> {
    let open = s
        .find('(')
        .ok_or_else(|| ParseError::new("missing '(' after function name"))?;

    let format = GradientFormat::from_css_name(&s[..open])
        .ok_or_else(|| ParseError::new(format!("unsupported function {:?}", &s[..open])))?;

    let rest = &s[open + 1..];
    let inner = rest
        .strip_suffix(')')
        .ok_or_else(|| ParseError::new("missing closing ')'"))?;

    Ok((format, inner))
}

/// Splits on commas at parenthesis depth zero, so commas inside `rgba(...)`
/// do not separate stops. Empty segments are dropped.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in s.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let piece = s[start..i].trim();
                if !piece.is_empty() {
                    parts.push(piece);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    let tail = s[start..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

/// A token is a stop candidate when it carries a hex or rgba color.
#[inline]
fn looks_like_color(token: &str) -> bool {
    token.contains('#') || token.to_ascii_lowercase().contains("rgba(")
}

// ── Stop tokens ───────────────────────────────────────────────────────────

/// Parses one stop token: a color followed by an optional `NN%` position.
fn parse_stop_token(token: &str) -> Option<(Rgba, Option<f32>)> {
    let t = token.trim();

    if t.starts_with('#') {
        let (color_part, rest) = match t.find(char::is_whitespace) {
            Some(i) => (&t[..i], t[i..].trim()),
            None => (t, ""),
        };
        let color = Rgba::from_hex(color_part)?;
        let position = parse_position(rest)?;
        return Some((color, position));
    }

    if t.to_ascii_lowercase().starts_with("rgba(") {
        let close = t.find(')')?;
        let color = Rgba::parse(&t[..=close])?;
        let position = parse_position(t[close + 1..].trim())?;
        return Some((color, position));
    }

    None
}

/// Parses the optional `NN%` suffix. `Some(None)` means no position was
/// declared; an outer `None` means the suffix was present but malformed.
fn parse_position(s: &str) -> Option<Option<f32>> {
    if s.is_empty() {
        return Some(None);
    }
    let number = s.strip_suffix('%')?;
    let value = number.trim().parse::<f32>().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(Some(value.clamp(0.0, 100.0)))
}

/// Lifts a lone `<n>deg` prefix into a linear angle.
fn parse_angle(prefix: &str) -> Option<f32> {
    let deg = prefix.trim().strip_suffix("deg")?;
    let value = deg.trim().parse::<f32>().ok()?;
    value.is_finite().then_some(value)
}

// ── Position inference ────────────────────────────────────────────────────

/// Fills in missing positions.
///
/// Interior fills spread evenly by index rather than interpolating between
/// the nearest declared neighbors, an approximation kept for output
/// stability.
fn resolve_positions(declared: &[Option<f32>]) -> Vec<f32> {
    let n = declared.len();
    let any_declared = declared.iter().any(|p| p.is_some());

    if !any_declared {
        if n == 1 {
            return vec![50.0];
        }
        return (0..n)
            .map(|i| i as f32 / (n - 1) as f32 * 100.0)
            .collect();
    }

    declared
        .iter()
        .enumerate()
        .map(|(i, p)| match p {
            Some(v) => *v,
            None if i == 0 => 0.0,
            None if i == n - 1 => 100.0,
            None => i as f32 / (n - 1) as f32 * 100.0,
        })
        .collect()
}
