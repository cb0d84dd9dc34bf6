//! Structured resume document produced by the builder structuring step.
//!
//! Field names follow the camelCase JSON the structuring prompt asks for.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Assigned server-side when the structuring response is accepted.
    #[serde(default)]
    pub id: String,
    /// experience | education | skills | projects | certifications
    #[serde(rename = "type", default)]
    pub section_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub contact: ResumeContact,
    pub sections: Vec<Section>,
}

impl Resume {
    /// Plain-text rendering used to score a builder document directly.
    pub fn to_plain_text(&self) -> String {
        let c = &self.contact;
        let header = format!("Contact: {} {} {} {}", c.name, c.email, c.phone, c.location);
        let body = self
            .sections
            .iter()
            .map(|s| {
                format!(
                    "{}:\n{} {}\n{}",
                    s.section_type.to_uppercase(),
                    s.title,
                    s.subtitle.as_deref().unwrap_or(""),
                    s.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{header}\n\n{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_reads_camel_case_keys() {
        let section: Section = serde_json::from_value(serde_json::json!({
            "type": "experience",
            "title": "Software Engineer",
            "subtitle": "Acme",
            "content": "Built things",
            "startDate": "01/2021",
            "endDate": "Present"
        }))
        .unwrap();
        assert_eq!(section.section_type, "experience");
        assert_eq!(section.start_date.as_deref(), Some("01/2021"));
        assert_eq!(section.end_date.as_deref(), Some("Present"));
        assert!(section.location.is_none());
        assert!(section.id.is_empty());
    }

    #[test]
    fn test_plain_text_rendering() {
        let resume = Resume {
            contact: ResumeContact {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Austin, TX".to_string(),
            },
            sections: vec![
                Section {
                    id: "section-1-0".to_string(),
                    section_type: "experience".to_string(),
                    title: "Engineer".to_string(),
                    subtitle: Some("Acme".to_string()),
                    content: "Shipped the billing service".to_string(),
                    start_date: None,
                    end_date: None,
                    location: None,
                },
                Section {
                    id: "section-1-1".to_string(),
                    section_type: "skills".to_string(),
                    title: "Languages".to_string(),
                    subtitle: None,
                    content: "Rust, Go".to_string(),
                    start_date: None,
                    end_date: None,
                    location: None,
                },
            ],
        };
        assert_eq!(
            resume.to_plain_text(),
            "Contact: Jane Doe jane@example.com 555-0100 Austin, TX\n\n\
             EXPERIENCE:\nEngineer Acme\nShipped the billing service\n\n\
             SKILLS:\nLanguages \nRust, Go"
        );
    }
}
