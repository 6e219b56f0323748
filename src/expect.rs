use std::ptr;
use std::sync::Arc;

use crate::context::{DefaultContext, MatcherContext};
use crate::error::AssertionError;
use crate::file::File;
use crate::matcher::{to_be_file, MatcherResult, Received};
use crate::options::ComparisonOptions;

/// Starts an assertion on `received`.
///
/// ```no_run
/// # use filematch::{expect, File};
/// # async fn run() -> Result<(), filematch::AssertionError> {
/// let a = File::new("hello", "a.txt");
/// let b = a.clone();
/// expect(&a).to_be_file(&b).await?;
/// # Ok(())
/// # }
/// ```
pub fn expect<'a>(received: impl Into<Received<'a>>) -> Expectation<'a> {
    Expectation {
        received: received.into(),
        is_not: false,
        context: Arc::new(DefaultContext::plain()),
    }
}

pub struct Expectation<'a> {
    received: Received<'a>,
    is_not: bool,
    context: Arc<dyn MatcherContext>,
}

impl<'a> Expectation<'a> {
    /// Negates the assertion.
    pub fn not(mut self) -> Self {
        self.is_not = !self.is_not;
        self
    }

    pub fn with_context(mut self, context: Arc<dyn MatcherContext>) -> Self {
        self.context = context;
        self
    }

    pub fn is_not(&self) -> bool {
        self.is_not
    }

    pub async fn to_be_file(&self, expected: &File) -> Result<(), AssertionError> {
        self.to_be_file_with(expected, &ComparisonOptions::default())
            .await
    }

    pub async fn to_be_file_with(
        &self,
        expected: &File,
        options: &ComparisonOptions,
    ) -> Result<(), AssertionError> {
        let result = to_be_file(self.received, expected, options, Arc::clone(&self.context)).await;
        self.settle(&result)
    }

    /// Instance identity.
    pub fn to_be(&self, expected: &File) -> Result<(), AssertionError> {
        let same = matches!(self.received, Received::File(file) if ptr::eq(file, expected));
        if same != self.is_not {
            return Ok(());
        }
        let message = if self.is_not {
            "Expected the received file not to be the same instance as the expected file"
        } else {
            "Expected the received file to be the same instance as the expected file"
        };
        Err(AssertionError::new(message))
    }

    fn settle(&self, result: &MatcherResult) -> Result<(), AssertionError> {
        if result.holds(self.is_not) {
            Ok(())
        } else {
            Err(AssertionError::new(result.message()))
        }
    }
}
