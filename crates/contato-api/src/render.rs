//! HTML rendering for the contact listing page.

use std::fmt::Write;

use contato_core::ContactRequest;

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Contatos</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #ccc; padding: .4rem .6rem; text-align: left; }
th { background: #f2f2f2; }
</style>
</head>
<body>
<h1>Contatos</h1>
<table>
<thead><tr><th>id</th><th>nome</th><th>email</th><th>telefone</th><th>empresa</th></tr></thead>
<tbody>
"#;

const FOOTER: &str = "</tbody>\n</table>\n</body>\n</html>\n";

/// Renders the records as one table row each, in the order given.
pub fn render_contacts_page(contacts: &[ContactRequest]) -> String {
    let mut html = String::with_capacity(HEADER.len() + FOOTER.len() + contacts.len() * 128);
    html.push_str(HEADER);
    for contact in contacts {
        let id = contact.id.map(|id| id.to_string()).unwrap_or_default();
        // Writing to a String cannot fail.
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            id,
            escape_html(&contact.nome),
            escape_html(&contact.email),
            escape_html(&contact.telefone),
            escape_html(contact.empresa.as_deref().unwrap_or("")),
        );
    }
    html.push_str(FOOTER);
    html
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Ana"), "Ana");
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("d'agua"), "d&#x27;agua");
    }

    #[test]
    fn test_empty_listing_has_table() {
        let html = render_contacts_page(&[]);
        assert!(html.contains("<th>id</th><th>nome</th><th>email</th><th>telefone</th><th>empresa</th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_rows_keep_given_order_and_escape() {
        let contacts = vec![
            ContactRequest::new("<b>Bia</b>", "bia@y.com", "2")
                .with_empresa("A&B")
                .with_id(2),
            ContactRequest::new("Ana", "ana@x.com", "1").with_id(1),
        ];
        let html = render_contacts_page(&contacts);
        assert!(html.contains(
            "<tr><td>2</td><td>&lt;b&gt;Bia&lt;/b&gt;</td><td>bia@y.com</td><td>2</td><td>A&amp;B</td></tr>"
        ));
        assert!(html.contains("<tr><td>1</td><td>Ana</td><td>ana@x.com</td><td>1</td><td></td></tr>"));
        let bia = html.find("bia@y.com").unwrap_or(usize::MAX);
        let ana = html.find("ana@x.com").unwrap_or(0);
        assert!(bia < ana);
    }
}
