/// Returns the leading whitespace of the line containing `offset`, up to
/// `offset` itself.
///
/// This is the "left padding" handed to element handlers so quick-fixes can
/// indent inserted markup to match the element.
pub fn line_padding(text: &str, offset: usize) -> &str {
    let offset = clamp_to_boundary(text, offset);
    let line_start = text[..offset].rfind('\n').map_or(0, |nl| nl + 1);
    let line = &text[line_start..offset];
    let width = line
        .bytes()
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count();
    &line[..width]
}

/// Converts a byte offset to a 1-based `(line, column)` pair.
///
/// Columns count chars, not bytes, so they match what an editor shows.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let offset = clamp_to_boundary(text, offset);
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}

fn clamp_to_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
