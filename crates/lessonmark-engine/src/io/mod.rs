use relative_path::{RelativePath, RelativePathBuf};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Lesson not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content directory: {0}")]
    InvalidContentDir(String),
    #[error("Invalid lesson reference: {0}")]
    InvalidLessonRef(String),
}

/// A lesson addressed by subject and number, stored at
/// `<content_root>/<subject>/<number>.md`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LessonRef {
    pub subject: String,
    pub number: u32,
}

impl LessonRef {
    pub fn new(subject: impl Into<String>, number: u32) -> Result<Self, IoError> {
        let subject = subject.into();
        if !is_valid_subject(&subject) {
            return Err(IoError::InvalidLessonRef(format!(
                "subject `{subject}` must be a single directory name"
            )));
        }
        Ok(Self { subject, number })
    }

    /// `<subject>/<number>.md`
    pub fn relative_path(&self) -> RelativePathBuf {
        self.with_extension("md")
    }

    /// `<subject>/<number>.<extension>`, for output files.
    pub fn with_extension(&self, extension: &str) -> RelativePathBuf {
        RelativePathBuf::from(format!("{}/{}.{extension}", self.subject, self.number))
    }

    /// The reverse of [`LessonRef::relative_path`]; `None` for anything that
    /// is not `<subject>/<number>.md`.
    pub fn from_relative_path(path: &RelativePath) -> Option<Self> {
        if path.extension() != Some("md") {
            return None;
        }
        let number = path.file_stem()?.parse().ok()?;
        let subject = path.parent()?.as_str();
        Self::new(subject, number).ok()
    }
}

fn is_valid_subject(subject: &str) -> bool {
    !subject.is_empty()
        && subject != "."
        && subject != ".."
        && !subject.contains(['/', '\\'])
}

impl fmt::Display for LessonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.subject, self.number)
    }
}

impl FromStr for LessonRef {
    type Err = IoError;

    /// Parses `subject/number`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IoError::InvalidLessonRef(format!("expected `subject/number`, got `{s}`"));
        let (subject, number) = s.split_once('/').ok_or_else(invalid)?;
        let number = number.parse().map_err(|_| invalid())?;
        Self::new(subject, number)
    }
}

/// Read a file relative to the content root
pub fn read_file(relative_path: &RelativePath, content_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(content_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Read a lesson's source text
pub fn read_lesson(content_root: &Path, lesson: &LessonRef) -> Result<String, IoError> {
    read_file(&lesson.relative_path(), content_root)
}

/// Write content to a file, creating parent directories
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// List every lesson under `<content_root>/<subject>/<number>.md`, sorted by
/// subject then number. Files whose stem is not a number are skipped.
pub fn scan_lessons(content_root: &Path) -> Result<Vec<LessonRef>, IoError> {
    validate_content_dir(content_root)?;

    let mut lessons = Vec::new();
    for entry in fs::read_dir(content_root).map_err(IoError::Io)? {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(subject) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        scan_subject(&path, subject, &mut lessons)?;
    }
    lessons.sort();
    Ok(lessons)
}

fn scan_subject(dir: &Path, subject: &str, lessons: &mut Vec<LessonRef>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir).map_err(IoError::Io)? {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let relative = RelativePathBuf::from(format!("{subject}/{name}"));
        match LessonRef::from_relative_path(&relative) {
            Some(lesson) => lessons.push(lesson),
            None if name.ends_with(".md") => {
                log::debug!("skipping {relative}: not a numbered lesson");
            }
            None => {}
        }
    }
    Ok(())
}

pub fn validate_content_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidContentDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
