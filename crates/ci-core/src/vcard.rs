//! Minimal vCard 3.0 generation for recent contacts

/// Properties of a generated card
#[derive(Debug, Clone, Default)]
pub struct CardProperties {
    pub uid: String,
    pub full_name: String,
    pub categories: Option<String>,
    pub local_uid: Option<String>,
    pub email: Option<String>,
    pub cloud_id: Option<String>,
}

/// Render a vCard 3.0 document with CRLF line endings
pub fn generate(props: &CardProperties) -> String {
    let mut vcard = String::new();

    vcard.push_str("BEGIN:VCARD\r\n");
    vcard.push_str("VERSION:3.0\r\n");
    vcard.push_str("PRODID:-//contactsinteraction//EN\r\n");
    vcard.push_str(&format!("UID:{}\r\n", escape(&props.uid)));
    vcard.push_str(&format!("FN:{}\r\n", escape(&props.full_name)));

    if let Some(ref categories) = props.categories {
        vcard.push_str(&format!("CATEGORIES:{}\r\n", escape(categories)));
    }

    if let Some(ref uid) = props.local_uid {
        vcard.push_str(&format!("X-NEXTCLOUD-UID:{}\r\n", escape(uid)));
    }

    if let Some(ref email) = props.email {
        vcard.push_str(&format!("EMAIL;TYPE=OTHER:{}\r\n", escape(email)));
    }

    if let Some(ref cloud_id) = props.cloud_id {
        vcard.push_str(&format!("CLOUD:{}\r\n", escape(cloud_id)));
    }

    vcard.push_str("END:VCARD\r\n");

    vcard
}

/// First value of `name` in a card, unescaped
pub fn property(card: &str, name: &str) -> Option<String> {
    unfold(card)
        .iter()
        .map(|line| line.trim())
        .find(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with(':') || rest.starts_with(';'))
        })
        .and_then(|line| line.find(':').map(|pos| &line[pos + 1..]))
        .filter(|value| !value.is_empty())
        .map(unescape)
}

/// Join folded lines: a line starting with a space or tab continues the previous one
fn unfold(card: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in card.lines() {
        match line.strip_prefix([' ', '\t']) {
            Some(continuation) if !lines.is_empty() => {
                if let Some(previous) = lines.last_mut() {
                    previous.push_str(continuation);
                }
            }
            _ => lines.push(line.to_string()),
        }
    }
    lines
}

/// Escape a text value (RFC 6350 section 3.4)
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ',' => escaped.push_str("\\,"),
            ';' => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => result.push('\n'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_minimal() {
        let card = generate(&CardProperties {
            uid: "1234".to_string(),
            full_name: "bob@example.com".to_string(),
            ..Default::default()
        });

        assert!(card.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert!(card.ends_with("END:VCARD\r\n"));
        assert!(card.contains("UID:1234\r\n"));
        assert!(card.contains("FN:bob@example.com\r\n"));
        assert!(!card.contains("EMAIL"));
        assert!(!card.contains("CLOUD"));
    }

    #[test]
    fn test_generate_full() {
        let card = generate(&CardProperties {
            uid: "abcd".to_string(),
            full_name: "bob".to_string(),
            categories: Some("Recently contacted".to_string()),
            local_uid: Some("bob".to_string()),
            email: Some("bob@example.com".to_string()),
            cloud_id: Some("bob@cloud.example.com".to_string()),
        });

        assert!(card.contains("CATEGORIES:Recently contacted\r\n"));
        assert!(card.contains("X-NEXTCLOUD-UID:bob\r\n"));
        assert!(card.contains("EMAIL;TYPE=OTHER:bob@example.com\r\n"));
        assert!(card.contains("CLOUD:bob@cloud.example.com\r\n"));
    }

    #[test]
    fn test_escaping() {
        let card = generate(&CardProperties {
            uid: "u".to_string(),
            full_name: "Doe, John; Jr.".to_string(),
            ..Default::default()
        });
        assert!(card.contains("FN:Doe\\, John\\; Jr.\r\n"));
        assert_eq!(property(&card, "FN").as_deref(), Some("Doe, John; Jr."));
    }

    #[test]
    fn test_property_with_parameters() {
        let card = "BEGIN:VCARD\r\nEMAIL;TYPE=WORK:bob@example.com\r\nEND:VCARD\r\n";
        assert_eq!(property(card, "EMAIL").as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_property_requires_exact_name() {
        let card = "BEGIN:VCARD\r\nFNX:nope\r\nEND:VCARD\r\n";
        assert!(property(card, "FN").is_none());
    }

    #[test]
    fn test_property_unfolds_continuation_lines() {
        let card = "BEGIN:VCARD\r\nFN:Bartholomew Jo\r\n nathan Smith\r\nNOTE:met at\r\n\t the conference\r\nEND:VCARD\r\n";
        assert_eq!(property(card, "FN").as_deref(), Some("Bartholomew Jonathan Smith"));
        assert_eq!(property(card, "NOTE").as_deref(), Some("met at the conference"));
    }
}
