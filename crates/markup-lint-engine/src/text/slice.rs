/// Finds `pat` in `text` at or after `from`, returning the absolute offset.
pub fn find_from(text: &str, pat: &str, from: usize) -> Option<usize> {
    text.get(from..)?.find(pat).map(|rel| from + rel)
}
