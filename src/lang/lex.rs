/// Lines beginning with this marker open and close an included region.
pub const FENCE: &str = "~~~";

/// Collect the lines between fence markers, paired with their 1-based
/// line number in the whole source. Lines outside any fenced region are
/// dropped, as are the markers themselves. Nothing is trimmed here; the
/// assembler and the token reader each decide what whitespace means.
pub fn fenced(source: &str) -> Vec<(usize, &str)> {
    let mut include = false;
    let mut lines = vec![];
    for (index, line) in source.lines().enumerate() {
        if line.starts_with(FENCE) {
            include = !include;
            continue;
        }
        if include {
            lines.push((index + 1, line));
        }
    }
    lines
}

/// Operator input is split on single spaces. Runs of spaces would
/// produce empty tokens, which are skipped.
pub fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ')
        .map(|t| t.trim_end_matches(|c| c == '\r' || c == '\n'))
        .filter(|t| !t.is_empty())
}
