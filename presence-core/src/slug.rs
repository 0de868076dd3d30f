//! Label to file-name slug transform
//!
//! Status labels are human readable ("Ute på oppdrag"); the image for a
//! status lives at `/static/content/<slug>.png`.

/// URL prefix the status images are served under
pub const IMAGE_PREFIX: &str = "/static/content";

/// Fixed replacements applied before lowercasing
const DIGRAPHS: &[(char, &str)] = &[
    ('æ', "ae"),
    ('Æ', "Ae"),
    ('ø', "o"),
    ('Ø', "O"),
    ('å', "a"),
    ('Å', "A"),
];

/// Convert a label into a lowercase, URL and filesystem safe token
pub fn slugify(label: &str) -> String {
    let mut expanded = String::with_capacity(label.len());
    for c in label.chars() {
        match DIGRAPHS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => expanded.push_str(to),
            None => expanded.push(c),
        }
    }

    expanded
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Image path for a status label
pub fn image_path(label: &str) -> String {
    format!("{}/{}.png", IMAGE_PREFIX, slugify(label))
}
