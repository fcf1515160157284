//! Point-list ingest and the human-readable dump format.
//!
//! Neither function here is part of the core per se (spec.md scopes the
//! text menu loop and file ingestion out as a thin collaborator shell),
//! but both are specified closely enough — and exercised by the core's
//! own tests via this same format — that they live alongside it rather
//! than in a separate binary crate.
use std::io;
use std::io::BufRead;

use crate::error::PavageError;
use crate::io_utils::parse_next;
use crate::point::Point;

/// One parsed `(coordinates, value)` line from a point-list file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPoint {
    pub coords: Vec<f64>,
    pub value: f64,
}

/// Reads a point list in the format consumed by the original ingest
/// collaborator: line 1 is the dimension, line 2 is an advisory (and
/// here unenforced) point count, and every subsequent line holds
/// whitespace-separated reals for one point.
///
/// Fails with [PavageError::FileFormatError] if the declared dimension
/// does not match `expected_dim`.
///
/// Per line, beyond the first `expected_dim` tokens (extra tokens are
/// ignored, missing ones default to 0), a scalar value is associated
/// with the point. The original source takes that value from the
/// *last parsed token of the line* — which, absent a dedicated value
/// column, conflates it with the last coordinate whenever the line has
/// exactly `expected_dim` tokens. That is almost certainly a bug (see
/// the design note on file-format value ambiguity), so it is only
/// reproduced when `corrected` is `false`; when `corrected` is `true`,
/// each line must carry an explicit `expected_dim + 1`th token for the
/// value and a short line is an error.
///
/// `filter_display_bounds` drops any point with a coordinate outside
/// `[-250, 250]`, mirroring the 2-D viewer's ingest filter.
pub fn read_points<R: BufRead>(
    r: R,
    expected_dim: usize,
    corrected: bool,
    filter_display_bounds: bool,
) -> Result<Vec<ParsedPoint>, PavageError> {
    let lines: Vec<String> = r.lines().collect::<io::Result<Vec<String>>>().map_err(|_| {
        PavageError::FileFormatError {
            expected: expected_dim,
            found: 0,
        }
    })?;
    let mut lines = lines.into_iter();

    let dim: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .ok_or(PavageError::FileFormatError {
            expected: expected_dim,
            found: 0,
        })?;
    if dim != expected_dim {
        return Err(PavageError::FileFormatError {
            expected: expected_dim,
            found: dim,
        });
    }

    // The advisory count on line 2 is read but never checked against the
    // number of data lines that follow.
    let _advisory_count: usize = lines
        .next()
        .and_then(|l| l.trim().parse().ok())
        .unwrap_or(0);

    let mut points = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut token_iter = tokens.iter().copied().peekable();

        // Mirrors the teacher's `read_point_cloud`, which also fills its
        // coordinate array via `parse_next(&mut coords)` per slot — the
        // only deviation is that a short line here stops early rather
        // than erroring, since missing trailing coordinates default to 0.
        let mut coords = vec![0.0; dim];
        for slot in coords.iter_mut() {
            if token_iter.peek().is_none() {
                break;
            }
            *slot = parse_next(&mut token_iter).map_err(|_| PavageError::FileFormatError {
                expected: expected_dim,
                found: dim,
            })?;
        }

        let value = if corrected {
            parse_next(&mut token_iter).map_err(|_| PavageError::FileFormatError {
                expected: expected_dim,
                found: dim,
            })?
        } else {
            tokens
                .last()
                .and_then(|t| t.parse::<f64>().ok())
                .unwrap_or(0.0)
        };

        if filter_display_bounds {
            let p = Point::new(&coords, dim);
            if p.out_of_display_bounds() {
                continue;
            }
        }

        points.push(ParsedPoint { coords, value });
    }

    Ok(points)
}

/// Renders the `"<npoints> points, <nfigures> figures."` summary line
/// followed by one `"Figure k : P0  P1  ...  PN "` line per simplex
/// (1-based), each point printed as `"(c0, c1, ..., c_{n-1})"`.
pub fn dump(complex: &crate::Complex) -> String {
    let mut out = String::new();
    let npoints = complex.single_points().count();
    let nfigures = complex.figures().count();
    out.push_str(&format!("{npoints} points, {nfigures} figures.\n"));
    for (k, figure) in complex.figures().enumerate() {
        out.push_str(&format!("Figure {} : ", k + 1));
        for &id in figure.vertices() {
            let (_, lp) = complex
                .single_points()
                .find(|(vid, _)| *vid == id)
                .expect("every simplex vertex resolves in the store");
            out.push_str(&format!("{}  ", lp.point));
        }
        out.push('\n');
    }
    out
}

/// Parses the summary line produced by [dump], returning
/// `(point_count, figure_count)`. Used by round-trip tests; it does not
/// reconstruct the geometry, only the counts the format's header line
/// asserts.
pub fn parse_dump_header(s: &str) -> Option<(usize, usize)> {
    let first_line = s.lines().next()?;
    let mut parts = first_line.split_whitespace();
    let npoints: usize = parts.next()?.parse().ok()?;
    parts.next()?; // "points,"
    let nfigures: usize = parts.next()?.parse().ok()?;
    Some((npoints, nfigures))
}

/// Recovers every point's `"(c0, c1, ..., c_{n-1})"` substring out of the
/// `"Figure k : ..."` lines produced by [dump], in printed order
/// (duplicated once per incident figure, exactly as printed). Used by the
/// round-trip test to check that re-parsing a dump reproduces the same
/// set of points, not merely the header counts.
pub fn parse_dump_points(s: &str) -> Vec<String> {
    let mut points = Vec::new();
    for line in s.lines() {
        if !line.starts_with("Figure") {
            continue;
        }
        let mut rest = line;
        while let Some(start) = rest.find('(') {
            let after = &rest[start..];
            let Some(end) = after.find(')') else {
                break;
            };
            points.push(after[..=end].to_string());
            rest = &after[end + 1..];
        }
    }
    points
}
