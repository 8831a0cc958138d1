// Also compiled as its own bench target, where nothing calls these.
/// A journal-style outline holding `posts` marked posts, each wrapped in
/// two category levels and surrounded by unrelated notes.
#[allow(dead_code)]
pub fn generate_journal(posts: usize) -> String {
    let mut content = String::new();

    for i in 0..posts {
        content.push_str(&format!("- Note {i} with a [[link]] and **bold** text\n"));
        content.push_str(&format!("- [[Category {i}]]\n"));
        content.push_str("  - [[Blog]]\n");
        content.push_str("    - type:: blog\n");
        content.push_str(&format!("      date:: 2026-01-{:02}\n", i % 28 + 1));
        content.push_str(&format!("      title:: Post number {i}\n"));
        content.push_str("      status:: online\n");
        content.push_str("    - Opening paragraph with _emphasis_ and a ![pic](../assets/pic.png)\n");
        content.push_str("    - ## A heading\n");
        content.push_str("      - first point\n");
        content.push_str("      - second point\n");
        content.push_str("    - Closing words.\n");
    }

    content
}

/// A page using free-standing properties followed by `items` list entries.
#[allow(dead_code)]
pub fn generate_page(items: usize) -> String {
    let mut content = String::from("type:: blog\ndate:: 2026-01-17\ntitle:: Long page\n\n");
    for i in 0..items {
        content.push_str(&format!("- Entry {i}\n  - detail {i}\n"));
    }
    content
}
