pub mod content;
pub mod geometry;
pub mod ids;

pub use content::{
    ContactLink, ExperienceRole, ProjectEntry, Section, SectionContent, SkillCategory,
};
pub use geometry::{Bounds, ScrollBehavior};
pub use ids::SectionId;
