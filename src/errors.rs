//! Error types for stereo-bench.

use plotters::drawing::DrawingAreaErrorKind;
use std::error::Error as StdError;

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        /// The directory to work on is absent.
        MissingDirectory(path: String) {
            description("target directory does not exist")
            display("directory {} does not exist", path)
        }
        /// A results table or sample file has an unexpected layout.
        SchemaMismatch(path: String, reason: String) {
            description("results table does not match the expected layout")
            display("unexpected table layout in {}: {}", path, reason)
        }
        /// A name does not follow the configuration name grammar.
        InvalidFileName(name: String) {
            description("name does not encode a benchmark configuration")
            display("cannot parse configuration from name '{}'", name)
        }
        /// A timing cannot be divided by.
        InvalidTiming(variant: String, value: f64) {
            description("timing cannot be used as a speed-up target")
            display("timing {} of {} cannot be used as a speed-up target", value, variant)
        }
        /// A matrix size has no value to aggregate.
        EmptyAggregation(group: String, size: String) {
            description("no sample to aggregate")
            display("no sample for {} at matrix {}", group, size)
        }
        /// The chart backend failed.
        Render(msg: String) {
            description("error in rendering a chart")
            display("chart rendering failed: {}", msg)
        }
    }

    foreign_links {
        Io(::std::io::Error) #[doc = "I/O error"];
        Csv(::csv::Error) #[doc = "CSV parse or write error"];
        Toml(::toml::de::Error) #[doc = "setting parse error"];
    }
}

impl<E: StdError + Send + Sync> From<DrawingAreaErrorKind<E>> for Error {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::from_kind(ErrorKind::Render(err.to_string()))
    }
}
