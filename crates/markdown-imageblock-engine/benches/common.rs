// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with some content.\n\n::: image source=\"img/cat.png\" alt-text=\"A cat\" :::\nCaption text.\n:::image-end:::\n\n:::: image source=\"img/dog.png\" alt-text=\"A dog\" :::\n:::image-end:::\n::::image-end:::\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_malformed_markdown(size: usize) -> String {
    let base = "::: image source=\"a.png\" :::\n::: image source=\"a.png\" alt-text=\"b\" title=\"c\" :::\n::: image source=\"unterminated :::\n\n";
    base.repeat(size)
}
