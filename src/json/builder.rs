use serde_json::{Map, Value};
use thiserror::Error;

/// Builder contract violations. Any of these firing is a programming
/// error in the caller, not bad input data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("key is only legal directly inside a dict")]
    KeyOutsideDict,
    #[error("key cannot immediately follow another key")]
    AdjacentKeys,
    #[error("value is not legal in this context")]
    MisplacedValue,
    #[error("end_dict does not close a dict")]
    UnmatchedEndDict,
    #[error("end_array does not close an array")]
    UnmatchedEndArray,
    #[error("document is not finished")]
    UnfinishedDocument,
}

#[derive(Debug)]
enum Frame {
    Array(Vec<Value>),
    Dict {
        entries: Map<String, Value>,
        pending_key: Option<String>,
    },
}

/// Fluent, runtime-checked builder for the answer document.
///
/// Operations return `Result<&mut Self, Error>` so call sites chain them
/// with `?`; an out-of-context operation fails immediately instead of
/// producing a malformed document.
///
/// ```
/// use omnibus::json::Builder;
///
/// let mut builder = Builder::new();
/// builder
///     .start_dict()?
///     .key("answer")?
///     .value(42)?
///     .end_dict()?;
/// let value = builder.build()?;
/// assert_eq!(value, serde_json::json!({ "answer": 42 }));
/// # Ok::<(), omnibus::json::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl Builder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Announces the key the next value attaches to. Legal only directly
    /// inside a dict, and never twice in a row.
    pub fn key(&mut self, key: impl Into<String>) -> Result<&mut Self, self::Error> {
        match self.stack.last_mut() {
            Some(Frame::Dict { pending_key, .. }) => {
                if pending_key.is_some() {
                    return Err(self::Error::AdjacentKeys);
                }
                *pending_key = Some(key.into());
                Ok(self)
            }
            _ => Err(self::Error::KeyOutsideDict),
        }
    }

    /// Emits a complete value into the current open slot: the empty top
    /// level, the current array, or the pending key of the current dict.
    pub fn value(&mut self, value: impl Into<Value>) -> Result<&mut Self, self::Error> {
        self.attach(value.into())?;
        Ok(self)
    }

    pub fn start_dict(&mut self) -> Result<&mut Self, self::Error> {
        self.check_open_slot()?;
        self.stack.push(Frame::Dict {
            entries: Map::new(),
            pending_key: None,
        });
        Ok(self)
    }

    pub fn start_array(&mut self) -> Result<&mut Self, self::Error> {
        self.check_open_slot()?;
        self.stack.push(Frame::Array(Vec::new()));
        Ok(self)
    }

    pub fn end_dict(&mut self) -> Result<&mut Self, self::Error> {
        if !matches!(
            self.stack.last(),
            Some(Frame::Dict {
                pending_key: None,
                ..
            })
        ) {
            return Err(self::Error::UnmatchedEndDict);
        }
        let Some(Frame::Dict { entries, .. }) = self.stack.pop() else {
            unreachable!("top frame was just matched as a dict");
        };
        self.attach(Value::Object(entries))?;
        Ok(self)
    }

    pub fn end_array(&mut self) -> Result<&mut Self, self::Error> {
        if !matches!(self.stack.last(), Some(Frame::Array(_))) {
            return Err(self::Error::UnmatchedEndArray);
        }
        let Some(Frame::Array(items)) = self.stack.pop() else {
            unreachable!("top frame was just matched as an array");
        };
        self.attach(Value::Array(items))?;
        Ok(self)
    }

    /// Finishes building. Succeeds only when every container is closed and
    /// a root value exists.
    pub fn build(self) -> Result<Value, self::Error> {
        if !self.stack.is_empty() {
            return Err(self::Error::UnfinishedDocument);
        }
        self.root.ok_or(self::Error::UnfinishedDocument)
    }

    /// A value or container may only open where the document has a slot
    /// for it: the empty top level, an array, or a dict key awaiting its
    /// value.
    fn check_open_slot(&self) -> Result<(), self::Error> {
        match self.stack.last() {
            None if self.root.is_some() => Err(self::Error::MisplacedValue),
            None => Ok(()),
            Some(Frame::Array(_)) => Ok(()),
            Some(Frame::Dict {
                pending_key: Some(_),
                ..
            }) => Ok(()),
            Some(Frame::Dict {
                pending_key: None, ..
            }) => Err(self::Error::MisplacedValue),
        }
    }

    fn attach(&mut self, value: Value) -> Result<(), self::Error> {
        match self.stack.last_mut() {
            None => {
                if self.root.is_some() {
                    return Err(self::Error::MisplacedValue);
                }
                self.root = Some(value);
                Ok(())
            }
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Dict {
                entries,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => {
                    entries.insert(key, value);
                    Ok(())
                }
                None => Err(self::Error::MisplacedValue),
            },
        }
    }
}
