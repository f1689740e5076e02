mod generate_vm;
mod study_vm;

pub use generate_vm::{GenerateForm, GenerateRequest};
pub use study_vm::{
    CompleteVm, PreStudyVm, SOURCE_PREVIEW_CHARS, StudyCardVm, StudyVm, map_complete,
    map_pre_study, map_study_card,
};
