pub mod resume;

pub use resume::{
    CustomSection, Education, PersonalInfo, Project, ResumeDocument, SectionKey, SkillGroup,
    StyleConfig, WorkExperience,
};
