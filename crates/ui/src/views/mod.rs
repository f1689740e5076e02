mod complete;
mod controller;
mod generate;
mod notice;
mod pre_study;
mod root;
mod study;

pub use complete::CompleteView;
pub use controller::{DEFAULT_STUDY_MINUTES, StudyController, use_study_controller};
pub use generate::GenerateView;
pub use notice::NoticeBar;
pub use pre_study::PreStudyView;
pub use root::StudyRoot;
pub use study::StudyView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
