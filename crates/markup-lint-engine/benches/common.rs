// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_page(grids: usize, rows: usize) -> String {
    let mut content = String::from("<Page>\n  <StackPanel>\n");
    for grid in 0..grids {
        content.push_str(&generate_grid(grid, rows, 2));
    }
    content.push_str("  </StackPanel>\n</Page>\n");
    content
}

/// A grid with `rows` definitions, a nested grid and one child per row.
#[allow(dead_code)]
pub fn generate_grid(id: usize, rows: usize, indent: usize) -> String {
    let pad = " ".repeat(indent * 2);
    let mut content = format!("{pad}<Grid x:Name=\"Grid{id}\">\n{pad}  <Grid.RowDefinitions>\n");
    for _ in 0..rows {
        content.push_str(&format!("{pad}    <RowDefinition Height=\"Auto\" />\n"));
    }
    content.push_str(&format!("{pad}  </Grid.RowDefinitions>\n"));

    for row in 0..rows {
        content.push_str(&format!(
            "{pad}  <TextBlock Grid.Row=\"{row}\" Text=\"Label {id} {row}\" />\n"
        ));
    }
    content.push_str(&format!(
        "{pad}  <Grid Grid.Row=\"1\" Grid.RowSpan=\"2\">\n{pad}    <Button Grid.Row=\"3\" Content=\"Go\" />\n{pad}  </Grid>\n"
    ));
    content.push_str(&format!("{pad}  <Image Source=\"a.png\" Grid.Row=\"{rows}\" />\n"));
    content.push_str(&format!("{pad}</Grid>\n"));
    content
}
