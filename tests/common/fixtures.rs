/// Rule set turning an invoice into an XSL-FO skeleton
pub const INVOICE_RULES: &str = r#"
{
    "name": "invoice-to-fo",
    "rules": [
        { "match": "/invoice", "action": "rename", "to": "fo:root",
          "setAttributes": { "xmlns:fo": "http://www.w3.org/1999/XSL/Format" } },
        { "match": "invoice/line", "action": "rename", "to": "fo:block",
          "removeAttributes": ["debug"] },
        { "match": "internal|audit", "action": "drop" },
        { "match": "em", "action": "unwrap" }
    ]
}
"#;

pub const INVOICE_XML: &str = r#"<invoice number="42"><line id="1" debug="x">Widget <em>A</em></line><audit><who>bot</who></audit><line id="2">Gadget</line><internal/></invoice>"#;

pub const INVOICE_FO: &str = r#"<fo:root number="42" xmlns:fo="http://www.w3.org/1999/XSL/Format"><fo:block id="1">Widget A</fo:block><fo:block id="2">Gadget</fo:block></fo:root>"#;

/// Generate an invoice with `lines` line items numbered from `first`
pub fn invoice_with_lines(first: usize, lines: usize) -> String {
    let mut doc = String::from("<invoice>");
    for i in first..first + lines {
        doc.push_str(&format!(r#"<line id="{i}">Item {i}</line>"#));
    }
    doc.push_str("</invoice>");
    doc
}
