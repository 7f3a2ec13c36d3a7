use crate::ids::SectionId;
use serde::{Deserialize, Serialize};

/// One named region of the page, as authored in the content catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    /// Text shown for this section in the navigation bar.
    pub label: String,
    #[serde(default)]
    pub content: SectionContent,
}

impl Section {
    pub fn new(id: impl Into<SectionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            content: SectionContent::default(),
        }
    }

    pub fn with_content(mut self, content: SectionContent) -> Self {
        self.content = content;
        self
    }
}

/// Payload rendered inside a section.
///
/// The navigation core never looks inside this; it only exists so the
/// catalog can carry everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Hero {
        name: String,
        tagline: String,
        #[serde(default)]
        highlights: Vec<String>,
    },
    About {
        description: String,
        location: String,
        experience: String,
        #[serde(rename = "currentRole")]
        current_role: String,
    },
    Skills {
        categories: Vec<SkillCategory>,
    },
    Experience {
        roles: Vec<ExperienceRole>,
    },
    Projects {
        projects: Vec<ProjectEntry>,
    },
    Contact {
        links: Vec<ContactLink>,
    },
    Markup {
        #[serde(default)]
        html: String,
    },
}

impl Default for SectionContent {
    fn default() -> Self {
        SectionContent::Markup {
            html: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    /// Icon name understood by the renderer (e.g. `"cloud"`).
    #[serde(default)]
    pub icon: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRole {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    #[serde(default)]
    pub icon: Option<String>,
    pub label: String,
    pub href: String,
}
