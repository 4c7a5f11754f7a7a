//! CSV report writer
//!
//! The image report is streamed: its header is written on creation and every
//! qualifying row is flushed as soon as it is accepted. The failure report is
//! written in one pass at finalization.

use crate::crawler::ImageDetails;
use crate::output::traits::{
    FailureRecord, ImageReportRow, OutputError, OutputResult, ReportSink,
};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the image report and the failed-website report
pub struct ReportWriter<W: Write> {
    images: csv::Writer<W>,
    failures: csv::Writer<W>,
    min_image_bytes: u64,
    finalized: bool,
}

impl ReportWriter<File> {
    /// Creates (truncating) both report files and writes the image header
    ///
    /// Missing parent directories are created.
    pub fn create(
        image_report: &Path,
        failed_websites: &Path,
        min_image_bytes: u64,
    ) -> OutputResult<Self> {
        let images = create_file(image_report)?;
        let failures = create_file(failed_websites)?;
        Self::new(images, failures, min_image_bytes)
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wraps two writers; the image header is written immediately
    pub fn new(images: W, failures: W, min_image_bytes: u64) -> OutputResult<Self> {
        let mut images = csv_writer(images);
        images.write_record(ImageReportRow::HEADER)?;
        images.flush()?;

        Ok(Self {
            images,
            failures: csv_writer(failures),
            min_image_bytes,
            finalized: false,
        })
    }

    /// Inclusive byte threshold for the image report
    pub fn min_image_bytes(&self) -> u64 {
        self.min_image_bytes
    }

    /// Whether an image of `size_bytes` belongs in the report
    pub fn qualifies(&self, size_bytes: u64) -> bool {
        size_bytes >= self.min_image_bytes
    }

    /// Appends one row to the image report and flushes it
    pub fn write_image_row(&mut self, row: &ImageReportRow) -> OutputResult<()> {
        self.images.serialize(row)?;
        self.images.flush()?;
        Ok(())
    }

    /// Returns the underlying writers `(images, failures)`
    pub fn into_inner(self) -> OutputResult<(W, W)> {
        let images = self
            .images
            .into_inner()
            .map_err(|e| OutputError::Write(e.to_string()))?;
        let failures = self
            .failures
            .into_inner()
            .map_err(|e| OutputError::Write(e.to_string()))?;
        Ok((images, failures))
    }
}

impl<W: Write> ReportSink for ReportWriter<W> {
    fn offer_image(&mut self, website: &str, details: &ImageDetails) -> OutputResult<bool> {
        if !self.qualifies(details.size_bytes) {
            return Ok(false);
        }

        let row = ImageReportRow {
            website: website.to_string(),
            image: details.url.to_string(),
            bytes: details.size_bytes,
            width: details.dimensions.map(|d| d.width),
            height: details.dimensions.map(|d| d.height),
        };
        self.write_image_row(&row)?;
        Ok(true)
    }

    fn finalize(&mut self, failures: &[FailureRecord]) -> OutputResult<()> {
        if self.finalized {
            return Err(OutputError::Write("reports already finalized".to_string()));
        }

        self.failures.write_record(FailureRecord::HEADER)?;
        for record in failures {
            self.failures.serialize(record)?;
        }
        self.failures.flush()?;
        self.images.flush()?;

        self.finalized = true;
        Ok(())
    }
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    // Headers are written explicitly so they appear even with zero rows
    csv::WriterBuilder::new().has_headers(false).from_writer(inner)
}

fn create_file(path: &Path) -> OutputResult<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}
