use thiserror::Error;

pub type Result<T> = std::result::Result<T, GpulseError>;

#[derive(Error, Debug)]
pub enum GpulseError {
    #[error("Clone failed: {0}")]
    Clone(String),
    #[error("History walk failed: {0}")]
    Walk(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Failed to publish report to {path}: {source}")]
    Publish {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep them boxed inside the enum
impl From<gix::object::find::existing::Error> for GpulseError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        GpulseError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GpulseError {
    fn from(err: gix::object::commit::Error) -> Self {
        GpulseError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GpulseError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GpulseError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GpulseError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GpulseError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GpulseError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GpulseError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GpulseError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GpulseError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GpulseError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GpulseError::DiffTreeToTree(Box::new(err))
    }
}

impl From<gix::discover::Error> for GpulseError {
    fn from(err: gix::discover::Error) -> Self {
        GpulseError::GitDiscover(Box::new(err))
    }
}
