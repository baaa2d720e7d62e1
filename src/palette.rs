use crate::{DecisionData, GroupData, NodeKind, NoteData, ProcessData, Section};

/// A button in the node palette
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteTemplate {
    pub kind: NodeKind,
}

impl PaletteTemplate {
    fn process(label: &str, section: Section, icon: &str) -> Self {
        Self {
            kind: NodeKind::Process(ProcessData::labelled(label).in_section(section).with_icon(icon)),
        }
    }

    /// Text shown on the button
    pub fn caption(&self) -> String {
        match &self.kind {
            NodeKind::Process(data) => match &data.icon {
                Some(icon) => format!("{} {}", icon, data.label),
                None => data.label.clone(),
            },
            NodeKind::Decision(data) => format!("{} 🔷", data.label),
            NodeKind::Note(data) => format!("{} 📝", data.label),
            NodeKind::Group(data) => data.label.clone(),
        }
    }
}

/// A titled block of templates
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCategory {
    pub name: &'static str,
    pub templates: Vec<PaletteTemplate>,
}

/// The built-in palette
pub fn catalogue() -> Vec<PaletteCategory> {
    vec![
        PaletteCategory {
            name: "Console",
            templates: vec![
                PaletteTemplate::process("User action", Section::Console, "👤"),
                PaletteTemplate::process("Frontend handling", Section::Console, "💻"),
            ],
        },
        PaletteCategory {
            name: "API call",
            templates: vec![PaletteTemplate::process("Direct API call", Section::ApiDirect, "📡")],
        },
        PaletteCategory {
            name: "NEXT platform",
            templates: vec![
                PaletteTemplate::process("NEXT API", Section::NextPlatform, "🔌"),
                PaletteTemplate::process("NEXT business logic", Section::NextPlatform, "⚙️"),
                PaletteTemplate::process("NEXT post-processing", Section::NextPlatform, "🔄"),
            ],
        },
        PaletteCategory {
            name: "Billing platform",
            templates: vec![
                PaletteTemplate::process("Start billing", Section::BillingPlatform, "💰"),
                PaletteTemplate::process("Stop billing", Section::BillingPlatform, "💸"),
                PaletteTemplate::process("Billing run", Section::BillingPlatform, "💳"),
            ],
        },
        PaletteCategory {
            name: "OpenStack",
            templates: vec![
                PaletteTemplate::process("OpenStack task", Section::OpenStack, "☁️"),
                PaletteTemplate::process("OpenStack status check", Section::OpenStack, "🔍"),
            ],
        },
        PaletteCategory {
            name: "Fail / error",
            templates: vec![
                PaletteTemplate::process("Error handling", Section::Fail, "❌"),
                PaletteTemplate::process("Rollback", Section::Fail, "↩️"),
            ],
        },
        PaletteCategory {
            name: "Special nodes",
            templates: vec![
                PaletteTemplate {
                    kind: NodeKind::Decision(DecisionData::labelled("Check / branch")),
                },
                PaletteTemplate {
                    kind: NodeKind::Note(NoteData {
                        content: Some("Describe the details here.".to_string()),
                        ..NoteData::labelled("Important note")
                    }),
                },
            ],
        },
        PaletteCategory {
            name: "Groups",
            templates: vec![PaletteTemplate {
                kind: NodeKind::Group(GroupData {
                    color: Some("lightblue".to_string()),
                    ..GroupData::labelled("Group area")
                }),
            }],
        },
    ]
}

/// Look up a template by category name and position within it
pub fn find_template(category: &str, index: usize) -> Option<PaletteTemplate> {
    catalogue()
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(category))
        .and_then(|c| c.templates.into_iter().nth(index))
}
