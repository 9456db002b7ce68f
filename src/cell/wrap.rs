use crate::util::unicode;
use unicode_segmentation::UnicodeSegmentation;

/// A single visual line produced by wrapping a logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    /// Index into the text's logical lines
    pub logical_line: usize,
    /// Byte offset within the logical line where this visual line starts
    pub byte_start: usize,
    /// Byte offset (exclusive) within the logical line where this visual line ends
    pub byte_end: usize,
}

struct Grapheme<'a> {
    s: &'a str,
    byte_offset: usize,
    display_width: usize,
}

fn graphemes(line: &str) -> Vec<Grapheme<'_>> {
    line.grapheme_indices(true)
        .map(|(i, g)| Grapheme {
            s: g,
            byte_offset: i,
            display_width: unicode::grapheme_display_width(g),
        })
        .collect()
}

fn is_blank(g: &Grapheme<'_>) -> bool {
    g.s.chars().all(|c| c.is_whitespace())
}

/// Wrap a single logical line into visual lines no wider than `width` cells.
///
/// Break opportunities, in priority order:
/// 1. Whitespace (the whitespace run is dropped at the break)
/// 2. After a hyphen inside a word
/// 3. Between graphemes, when a single word is wider than the line
pub fn wrap_line(line: &str, width: usize, logical_line: usize) -> Vec<VisualLine> {
    let whole = VisualLine {
        logical_line,
        byte_start: 0,
        byte_end: line.len(),
    };
    if width == 0 || unicode::display_width(line) <= width {
        return vec![whole];
    }

    let gs = graphemes(line);
    let total = gs.len();
    let byte_at = |idx: usize| -> usize {
        if idx < total {
            gs[idx].byte_offset
        } else {
            line.len()
        }
    };

    let mut result = Vec::new();
    let mut vl_start = 0;
    let mut col = 0;
    let mut i = 0;

    let emit = |result: &mut Vec<VisualLine>, start: usize, end: usize| {
        result.push(VisualLine {
            logical_line,
            byte_start: byte_at(start),
            byte_end: byte_at(end),
        });
    };

    while i < total {
        let token_start = i;
        let ws = is_blank(&gs[i]);
        if ws {
            while i < total && is_blank(&gs[i]) {
                i += 1;
            }
        } else {
            while i < total && !is_blank(&gs[i]) {
                let was_hyphen = gs[i].s == "-";
                i += 1;
                if was_hyphen && i < total && !is_blank(&gs[i]) {
                    break;
                }
            }
        }

        let token_dw: usize = gs[token_start..i].iter().map(|g| g.display_width).sum();

        if col + token_dw <= width {
            col += token_dw;
            continue;
        }

        if ws {
            // Break at the whitespace and swallow it
            emit(&mut result, vl_start, token_start);
            vl_start = i;
            col = 0;
            continue;
        }

        if token_start > vl_start {
            emit(&mut result, vl_start, token_start);
            vl_start = token_start;
        }
        col = token_dw;

        if token_dw > width {
            let mut placed = 0;
            for j in token_start..i {
                let gdw = gs[j].display_width;
                if placed + gdw > width && placed > 0 {
                    emit(&mut result, vl_start, j);
                    vl_start = j;
                    placed = 0;
                }
                placed += gdw;
            }
            col = placed;
        }
    }

    if vl_start < total || result.is_empty() {
        emit(&mut result, vl_start, total);
    }
    result
}

/// Wrap every logical line of `text` to `width` cells and return the visual
/// lines as owned strings with trailing whitespace removed.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        for vl in wrap_line(line, width, idx) {
            out.push(line[vl.byte_start..vl.byte_end].trim_end().to_string());
        }
    }
    out
}
