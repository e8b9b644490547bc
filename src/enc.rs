use crate::{error::PatternError, pos::Pos2};
use regex::Regex;
use std::sync::OnceLock;

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)").expect("valid header regex"))
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // the last alternative catches anything that is not a run, so it can be reported
    RE.get_or_init(|| Regex::new(r"(\d*)([bo$!])|(\d*\S)").expect("valid token regex"))
}

/// Furthest row or column a pattern may reach
const MAX_EXTENT: i32 = 1 << 16;

/// Live cells of a pattern, relative to its top-left corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    width: usize,
    height: usize,
    alive: Vec<Pos2>,
}

impl Pattern {
    /// A pattern just large enough to hold `alive`
    pub fn from_alive(mut alive: Vec<Pos2>) -> Self {
        alive.sort();
        alive.dedup();
        let width = alive.iter().map(|p| p.x + 1).max().unwrap_or_default() as usize;
        let height = alive.iter().map(|p| p.y + 1).max().unwrap_or_default() as usize;
        Self {
            width,
            height,
            alive,
        }
    }

    /// Decodes run-length encoded pattern text
    ///
    /// `#` starts a comment line, an optional `x = W, y = H` header declares the
    /// bounding box, and the body is a sequence of `<count>b` (dead), `<count>o`
    /// (alive) and `<count>$` (end of row) runs ending at `!`.
    pub fn parse_rle(value: &str) -> Result<Self, PatternError> {
        let mut declared = None;
        let mut alive = Vec::new();
        let mut cursor = Pos2::zero();
        'lines_loop: for (i, line) in value.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if line.starts_with('x') {
                let caps = header_regex()
                    .captures(line)
                    .ok_or(PatternError::Header { line: line_no })?;
                let parse = |idx: usize| {
                    caps[idx]
                        .parse::<usize>()
                        .map_err(|_| PatternError::Header { line: line_no })
                };
                declared = Some((parse(1)?, parse(2)?));
                continue;
            }

            for caps in token_regex().captures_iter(line) {
                if let Some(token) = caps.get(3) {
                    return Err(PatternError::UnexpectedToken {
                        line: line_no,
                        token: token.as_str().to_owned(),
                    });
                }
                let run_str = &caps[1];
                let run = if run_str.is_empty() {
                    1
                } else {
                    run_str.parse::<i32>().map_err(|_| PatternError::RunLength {
                        line: line_no,
                        run: run_str.to_owned(),
                    })?
                };
                let moved = |from: i32| {
                    from.checked_add(run)
                        .filter(|&to| to <= MAX_EXTENT)
                        .ok_or_else(|| PatternError::RunLength {
                            line: line_no,
                            run: run_str.to_owned(),
                        })
                };
                match &caps[2] {
                    "!" => break 'lines_loop,
                    "o" => {
                        let end = moved(cursor.x)?;
                        alive.extend((cursor.x..end).map(|x| Pos2::new(x, cursor.y)));
                        cursor.x = end;
                    }
                    "b" => cursor.x = moved(cursor.x)?,
                    "$" => {
                        cursor.x = 0;
                        cursor.y = moved(cursor.y)?;
                    }
                    _ => unreachable!(),
                }
            }
        }

        let mut pattern = Self::from_alive(alive);
        if let Some((w, h)) = declared {
            pattern.width = pattern.width.max(w);
            pattern.height = pattern.height.max(h);
        }
        Ok(pattern)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
    #[inline]
    pub fn alive(&self) -> &[Pos2] {
        &self.alive
    }

    /// Whether the pattern fits inside a `width` by `height` grid
    #[inline]
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.width <= width && self.height <= height
    }

    /// The live cells moved so the pattern sits in the middle of a `width` by `height` grid
    pub fn centered(&self, width: usize, height: usize) -> Vec<Pos2> {
        let offset = Pos2::new(
            (width.saturating_sub(self.width) / 2) as i32,
            (height.saturating_sub(self.height) / 2) as i32,
        );
        self.alive.iter().map(|&p| p + offset).collect()
    }
}
