use std::fmt::Display;

pub trait ErrorType: Display + PartialEq {}

// Where an error came from: a grammar file path or the name given to an
// in-memory rule text, plus the 1-based line (0 when not line specific)
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub source: String,
    pub line: usize
}

impl Location {
    pub fn new(source: impl Into<String>, line: usize) -> Self {
        Location {
            source: source.into(),
            line
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.source)
        } else {
            write!(f, "{}:{}", self.source, self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]  {}", self.location, self.error)
    }
}

impl<T: ErrorType + std::fmt::Debug> std::error::Error for Error<T> {}

pub type Errors<T> = Vec<Error<T>>;
