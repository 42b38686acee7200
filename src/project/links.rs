// src/project/links.rs

use crate::models::material::Material;

/// 外部検索リンクの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Datasheet,
    Publications,
    Suppliers,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::Datasheet, SearchKind::Publications, SearchKind::Suppliers];

    pub fn label(&self) -> &'static str {
        match self {
            SearchKind::Datasheet => "Datasheet",
            SearchKind::Publications => "Publications",
            SearchKind::Suppliers => "Suppliers",
        }
    }
}

/// encodeURIComponent と同じ規則でのパーセントエンコード
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// 材料名から検索URLを組み立てる
pub fn search_url(kind: SearchKind, material: &Material) -> String {
    let name = encode_component(material.name);
    match kind {
        SearchKind::Datasheet => format!("https://www.google.com/search?q={}+datasheet+piezoelectric", name),
        SearchKind::Publications => format!("https://scholar.google.com/scholar?q={}+piezoelectric+sensor", name),
        SearchKind::Suppliers => format!("https://www.google.com/search?q={}+piezoelectric+material+supplier", name),
    }
}

/// 3種類すべての検索リンク
pub fn search_links(material: &Material) -> Vec<(SearchKind, String)> {
    SearchKind::ALL
        .iter()
        .map(|&kind| (kind, search_url(kind, material)))
        .collect()
}
