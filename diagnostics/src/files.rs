use crate::render::SourceProvider;
use crate::FileId;
use std::sync::Arc;

/// In-memory file names and source text, for rendering diagnostics from the CLI and tests.
///
/// `FileId`s are allocated in insertion order starting from zero.
#[derive(Clone, Debug, Default)]
pub struct SimpleFiles {
  files: Vec<SimpleFile>,
}

#[derive(Clone, Debug)]
struct SimpleFile {
  name: Arc<str>,
  text: Arc<str>,
}

impl SimpleFiles {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, name: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> FileId {
    let file = FileId(u32::try_from(self.files.len()).unwrap_or(u32::MAX));
    self.files.push(SimpleFile {
      name: name.into(),
      text: text.into(),
    });
    file
  }
}

impl SourceProvider for SimpleFiles {
  fn file_name(&self, file: FileId) -> Option<&str> {
    self.files.get(file.0 as usize).map(|file| file.name.as_ref())
  }

  fn file_text(&self, file: FileId) -> Option<&str> {
    self.files.get(file.0 as usize).map(|file| file.text.as_ref())
  }
}
