pub mod csv_source;
pub mod report_writer;

pub use csv_source::CsvAttendanceSource;
pub use report_writer::{CsvReportSink, JsonReportSink, OutputTarget};
