//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::num;
use std::fmt;
use std::path::PathBuf;
use csv;

/// Type alias for chromafauna errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while counting or analyzing
#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    CsvError(csv::Error),
    ParseIntError(num::ParseIntError),
    MissingFile(&'static str, PathBuf, Option<io::Error>),
    MissingColumn(&'static str, &'static str),
    MissingValue(&'static str, &'static str, String),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::CsvError(ref err) => write!(f, "Table error: {}", err),
            Error::ParseIntError(ref err) => write!(f, "Error parsing count: {}", err),
            Error::MissingFile(info, ref path, ref opt_err) => {
                write!(f,
                    "The {} must already exist at {} but there was a problem opening it. \
                    Wrong directory? Maybe missed a step? The OS error was: ",
                    info, path.display())?;
                if let Some(ref err) = *opt_err { write!(f, "{}", err) }
                else { write!(f, "Unknown") }
            },
            Error::MissingColumn(table, column) =>
                write!(f, "The {} has no column named '{}'", table, column),
            Error::MissingValue(table, column, ref row) =>
                write!(f, "The {} has an empty '{}' for '{}'", table, column, row),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::IOError(ref err) => Some(err),
            Error::CsvError(ref err) => Some(err),
            Error::ParseIntError(ref err) => Some(err),
            Error::MissingFile(_, _, Some(ref err)) => Some(err),
            Error::MissingFile(_, _, None) => None,
            Error::MissingColumn(_, _) => None,
            Error::MissingValue(_, _, _) => None,
            Error::Other(_) => None,
        }
    }
}
//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CsvError(err)
    }
}
impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Self {
        Error::ParseIntError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn missing_file_names_the_input_and_path() {
        let os = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = Error::MissingFile("corpus", PathBuf::from("wiki.txt"), Some(os));
        let text = err.to_string();
        assert!(text.contains("corpus"));
        assert!(text.contains("wiki.txt"));
        assert!(text.contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn converts_into_io_error() {
        let err: io::Error = Error::Other("boom".to_string()).into();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(err.to_string(), "boom");
    }
}
