use crate::api::Question;
use log::debug;

/// Cursor over the externally supplied question list.
///
/// With `wrap` the cursor cycles forever; without it the feed runs out and
/// `current()` returns None once every question has been answered.
#[derive(Debug, Clone)]
pub struct QuestionFeed {
    questions: Vec<Question>,
    index: usize,
    wrap: bool,
}

impl QuestionFeed {
    pub fn new(questions: Vec<Question>, wrap: bool) -> Self {
        Self {
            questions,
            index: 0,
            wrap,
        }
    }
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }
    pub fn advance(&mut self) {
        if self.wrap {
            if !self.questions.is_empty() {
                self.index = (self.index + 1) % self.questions.len();
            }
        } else {
            self.index = self.index.saturating_add(1);
        }
        if self.is_complete() && !self.questions.is_empty() {
            debug!("Question feed completed after {} questions", self.questions.len());
        }
    }
    pub fn rewind(&mut self) {
        self.index = 0;
    }
    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn wraps(&self) -> bool {
        self.wrap
    }
    pub fn len(&self) -> usize {
        self.questions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
