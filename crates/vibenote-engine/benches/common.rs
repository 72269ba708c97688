// Bench helper functions - rustc's dead code analysis doesn't see that
// sibling bench files in this directory use these
#[allow(dead_code)]
pub fn generate_note_content(sections: usize) -> String {
    let base = "# Meeting notes\n\nSome agenda thoughts with **bold** and *italic* text.\n\n- first point\n- second point\n- third point\n\n```rust\nfn demo() {\n    println!(\"hi\");\n}\n```\n\n> a quote to close the section\n\n";
    base.repeat(sections)
}

#[allow(dead_code)]
pub fn generate_plain_prose(words: usize) -> String {
    let mut content = String::new();
    for i in 0..words {
        content.push_str("word");
        if i % 12 == 11 {
            content.push('\n');
        } else {
            content.push(' ');
        }
    }
    content
}
