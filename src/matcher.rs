use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::context::{MatcherContext, Value};
use crate::file::File;
use crate::options::{ComparisonOptions, ContentMode, FileField};
use crate::reader::read_file;

pub const MATCHER_NAME: &str = "to_be_file";
pub const IDENTITY_MATCHER_NAME: &str = "to_be";

/// Outcome of a comparison before the assertion's polarity is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    /// Fails whether or not the assertion is negated.
    ForcedFail,
}

pub type Message = Box<dyn Fn() -> String + Send + Sync>;

/// A verdict plus a message rendered only when asked for.
pub struct MatcherResult {
    verdict: Verdict,
    message: Message,
}

impl MatcherResult {
    fn new(verdict: Verdict, message: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self {
            verdict,
            message: Box::new(message),
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The `pass` flag a host framework expects. A forced failure reports the
    /// negation state so that the host's own inversion still fails.
    pub fn pass(&self, is_not: bool) -> bool {
        match self.verdict {
            Verdict::Pass => true,
            Verdict::Fail => false,
            Verdict::ForcedFail => is_not,
        }
    }

    /// Whether the assertion holds under the given polarity.
    pub fn holds(&self, is_not: bool) -> bool {
        self.pass(is_not) != is_not
    }

    pub fn message(&self) -> String {
        (self.message)()
    }
}

impl fmt::Debug for MatcherResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherResult")
            .field("verdict", &self.verdict)
            .field("message", &"<lazy>")
            .finish()
    }
}

/// The value under test.
#[derive(Debug, Clone, Copy)]
pub enum Received<'a> {
    File(&'a File),
    /// Any other object, described by its type name.
    Object { constructor: &'a str },
    /// A plain value with no constructor, e.g. a string or a number.
    Primitive { type_of: &'a str },
}

impl<'a> Received<'a> {
    pub fn object<T: ?Sized>(_value: &T) -> Received<'static> {
        Received::Object {
            constructor: short_type_name::<T>(),
        }
    }

    pub fn primitive(type_of: &'a str) -> Self {
        Received::Primitive { type_of }
    }
}

impl<'a> From<&'a File> for Received<'a> {
    fn from(file: &'a File) -> Self {
        Received::File(file)
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

fn field_value(file: &File, field: FileField) -> Value {
    match field {
        FileField::Name => Value::from(file.name()),
        FileField::Type => Value::from(file.mime_type()),
        FileField::Size => Value::from(file.size()),
        FileField::LastModified => Value::from(file.last_modified()),
    }
}

fn print(ctx: &dyn MatcherContext, name: &str, expected: Value, received: Value) -> String {
    let expected = expected.stringify_number();
    let received = received.stringify_number();
    format!(
        "Expected {}{name} to be:\n\n{}",
        File::TYPE_NAME,
        ctx.diff(&expected, &received)
    )
}

fn compare_field(
    ctx: &Arc<dyn MatcherContext>,
    field: FileField,
    expected: &File,
    received: &File,
) -> Option<MatcherResult> {
    let expected = field_value(expected, field);
    let received = field_value(received, field);
    if ctx.equals(&expected, &received) {
        return None;
    }

    tracing::debug!(field = %field, "file field mismatch");
    let ctx = Arc::clone(ctx);
    Some(MatcherResult::new(Verdict::Fail, move || {
        print(&*ctx, &format!(".{field}"), expected.clone(), received.clone())
    }))
}

/// Compares `received` against `expected` field by field and then by content.
#[tracing::instrument(level = "debug", skip_all, fields(expected = %expected.name()))]
pub async fn to_be_file(
    received: Received<'_>,
    expected: &File,
    options: &ComparisonOptions,
    ctx: Arc<dyn MatcherContext>,
) -> MatcherResult {
    let received = match received {
        Received::File(file) if ptr::eq(file, expected) => {
            return MatcherResult::new(Verdict::ForcedFail, move || {
                ctx.dim(&format!(
                    "The expected file is the same as the received, replace \"{MATCHER_NAME}\" with \"{IDENTITY_MATCHER_NAME}\""
                ))
            });
        }
        Received::File(file) => file,
        Received::Primitive { .. } => {
            return MatcherResult::new(Verdict::Fail, || {
                "Received value is not an Object".to_string()
            });
        }
        Received::Object { constructor } => {
            let constructor = constructor.to_string();
            return MatcherResult::new(Verdict::Fail, move || {
                ctx.print_diff_or_stringify(
                    File::TYPE_NAME,
                    &constructor,
                    "Expected constructor",
                    "Received constructor",
                )
            });
        }
    };

    for field in options.compared_fields() {
        if let Some(mismatch) = compare_field(&ctx, field, expected, received) {
            return mismatch;
        }
    }

    if let ContentMode::Read(strategy) = options.content {
        tracing::debug!(%strategy, "comparing file contents");
        match tokio::try_join!(read_file(received, strategy), read_file(expected, strategy)) {
            Ok((received_content, expected_content)) => {
                if !ctx.equals(&expected_content, &received_content) {
                    return MatcherResult::new(Verdict::Fail, move || {
                        print(
                            &*ctx,
                            " contents",
                            expected_content.clone(),
                            received_content.clone(),
                        )
                    });
                }
            }
            Err(reason) => {
                tracing::warn!(%reason, "could not read file content");
                return MatcherResult::new(Verdict::ForcedFail, move || {
                    format!("Could not read file content. Reason: {reason}")
                });
            }
        }
    }

    MatcherResult::new(Verdict::Pass, move || {
        ctx.dim("Received and expected files are equal")
    })
}
