//! Replay of job operations onto a session.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::schema::{Job, JobBarcode, JobImage, JobText, Operation};
use crate::error::{EscPosError, Result};
use crate::printer::{Printer, PrinterMode};
use crate::protocol::barcode::BarcodeOptions;
use crate::protocol::text::TextOptions;
use crate::raster::{self, RasterOptions};
use crate::transport::Transport;

impl Job {
    /// Parse a job from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EscPosError::Job(e.to_string()))
    }

    /// Read a job file. Image paths in it resolve against the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let mut job: Job = serde_json::from_str(&json)
            .map_err(|e| EscPosError::Job(format!("{}: {}", path.display(), e)))?;
        job.base_dir = path.parent().map(Path::to_path_buf);
        Ok(job)
    }

    /// Apply every operation in order, then flush if the session is
    /// buffered. Stops at the first failing operation.
    pub fn run<T: Transport>(&self, printer: &mut Printer<T>) -> Result<()> {
        for (index, operation) in self.operations.iter().enumerate() {
            debug!(index, op = operation.name(), "applying job operation");
            operation.apply(printer, self.base_dir.as_deref())?;
        }
        if printer.mode() == PrinterMode::Buffered {
            printer.flush()?;
        }
        Ok(())
    }
}

impl Operation {
    fn apply<T: Transport>(&self, printer: &mut Printer<T>, base_dir: Option<&Path>) -> Result<()> {
        match self {
            Operation::Init => printer.reinitialize(),
            Operation::Clear => {
                printer.clear();
                Ok(())
            }
            Operation::Raw(raw) => printer.print_raw(&raw.bytes),
            Operation::Repeat(r) => printer.print_repeated(r.byte, r.count),
            Operation::Text(t) => printer.print_text_with(&t.content, t.options()),
            Operation::Feed(f) => printer.feed(f.lines),
            Operation::Cut(c) => printer.cut_with(c.mode),
            Operation::Size(s) => printer.set_magnification(s.horizontal, s.vertical),
            Operation::Underline(u) => printer.set_underline(u.mode),
            Operation::Bold(t) => printer.set_bold(t.enabled),
            Operation::Invert(t) => printer.set_inverted(t.enabled),
            Operation::Font(f) => printer.set_font(f.font),
            Operation::Rotate(t) => printer.set_clockwise_rotation(t.enabled),
            Operation::Align(a) => printer.set_align(a.align),
            Operation::Barcode(b) => printer.print_barcode(b.symbology, &b.data, b.options()),
            Operation::Code2d(c) => {
                printer.print_2d(c.symbol, c.data.as_bytes(), c.size, c.correction)
            }
            Operation::Image(img) => {
                let source = raster::open(&img.resolve(base_dir))?;
                printer.print_image(&source, img.options())
            }
        }
    }
}

impl JobText {
    fn options(&self) -> TextOptions {
        let defaults = TextOptions::default();
        TextOptions {
            newline: !self.is_inline,
            page_code: self.page_code.unwrap_or(defaults.page_code),
            code_page: self.code_page.unwrap_or(defaults.code_page),
        }
    }
}

impl JobBarcode {
    fn options(&self) -> BarcodeOptions {
        let defaults = BarcodeOptions::default();
        BarcodeOptions {
            height: self.height.unwrap_or(defaults.height),
            width: self.width.unwrap_or(defaults.width),
            hri_position: self.hri.unwrap_or(defaults.hri_position),
            hri_font: self.hri_font.unwrap_or(defaults.hri_font),
            code_set: self.code_set.unwrap_or(defaults.code_set),
        }
    }
}

impl JobImage {
    fn options(&self) -> RasterOptions {
        let defaults = RasterOptions::default();
        RasterOptions {
            threshold: self.threshold.unwrap_or(defaults.threshold),
            width_dots: self.width.unwrap_or(defaults.width_dots),
            inverted: self.inverted,
        }
    }

    fn resolve(&self, base_dir: Option<&Path>) -> PathBuf {
        match base_dir {
            Some(dir) if self.path.is_relative() => dir.join(&self.path),
            _ => self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::PrinterEndpoint;
    use crate::protocol::barcode::{CodeSet, Symbology};
    use crate::protocol::commands::CutMode;
    use crate::transport::MemoryTransport;

    fn buffered() -> Printer<MemoryTransport> {
        Printer::new(
            PrinterEndpoint::new("job", 9100, PrinterMode::Buffered),
            MemoryTransport::new(),
        )
    }

    #[test]
    fn test_minimal_job() {
        let job = Job::from_json(r#"{"operations": [{"op": "feed", "lines": 3}]}"#).unwrap();
        let mut printer = buffered();
        job.run(&mut printer).unwrap();

        assert_eq!(
            printer.transport().jobs(),
            &[vec![0x1B, 0x40, 0x1B, 0x53, 0x1B, 0x64, 3]]
        );
        assert!(printer.pending().is_empty());
    }

    #[test]
    fn test_unit_and_toggle_ops() {
        let job = Job::from_json(
            r#"{"operations": [
                {"op": "clear"},
                {"op": "bold"},
                {"op": "invert", "enabled": false},
                {"op": "init"}
            ]}"#,
        )
        .unwrap();
        let mut printer = buffered();
        job.run(&mut printer).unwrap();

        assert_eq!(
            printer.transport().bytes(),
            vec![0x1B, 0x45, 1, 0x1D, 0x42, 0, 0x1B, 0x40, 0x1B, 0x53]
        );
    }

    #[test]
    fn test_text_options() {
        let job = Job::from_json(
            r#"{"operations": [{"op": "text", "content": "hi", "inline": true, "page_code": 16}]}"#,
        )
        .unwrap();
        let Operation::Text(text) = &job.operations[0] else {
            panic!("expected text op");
        };
        let options = text.options();
        assert!(!options.newline);
        assert_eq!(options.page_code, 16);
        assert_eq!(options.code_page, 1252);
    }

    #[test]
    fn test_barcode_defaults_fill_in() {
        let job = Job::from_json(
            r#"{"operations": [{"op": "barcode", "symbology": "code128", "data": "1234", "code_set": "C", "width": 2}]}"#,
        )
        .unwrap();
        let Operation::Barcode(barcode) = &job.operations[0] else {
            panic!("expected barcode op");
        };
        assert_eq!(barcode.symbology, Symbology::Code128);
        let options = barcode.options();
        assert_eq!(options.width, 2);
        assert_eq!(options.height, BarcodeOptions::default().height);
        assert_eq!(options.code_set, CodeSet::C);
    }

    #[test]
    fn test_cut_mode_default() {
        let job =
            Job::from_json(r#"{"operations": [{"op": "cut"}, {"op": "cut", "mode": "partial"}]}"#)
                .unwrap();
        let modes: Vec<CutMode> = job
            .operations
            .iter()
            .map(|op| match op {
                Operation::Cut(c) => c.mode,
                _ => panic!("expected cut op"),
            })
            .collect();
        assert_eq!(modes, vec![CutMode::Full, CutMode::Partial]);
    }

    #[test]
    fn test_unknown_op_is_job_error() {
        let err = Job::from_json(r#"{"operations": [{"op": "explode"}]}"#).unwrap_err();
        assert!(matches!(err, EscPosError::Job(_)));
    }

    #[test]
    fn test_failing_operation_stops_job() {
        let job = Job::from_json(
            r#"{"operations": [
                {"op": "feed", "lines": 1},
                {"op": "size", "horizontal": 8},
                {"op": "feed", "lines": 2}
            ]}"#,
        )
        .unwrap();
        let mut printer = buffered();
        let err = job.run(&mut printer).unwrap_err();

        assert!(matches!(err, EscPosError::InvalidParameter(_)));
        assert_eq!(printer.transport().attempts(), 0);
        assert_eq!(printer.pending(), &[0x1B, 0x40, 0x1B, 0x53, 0x1B, 0x64, 1]);
        printer.clear();
    }

    #[test]
    fn test_direct_session_is_not_flushed_at_end() {
        let job = Job::from_json(r#"{"operations": [{"op": "feed", "lines": 1}]}"#).unwrap();
        let mut printer = Printer::new(
            PrinterEndpoint::new("job", 9100, PrinterMode::Direct),
            MemoryTransport::new(),
        );
        job.run(&mut printer).unwrap();
        assert_eq!(printer.transport().attempts(), 1);
    }

    #[test]
    fn test_image_path_resolution() {
        let image = JobImage {
            path: PathBuf::from("logo.png"),
            threshold: None,
            width: Some(200.0),
            inverted: true,
        };
        assert_eq!(
            image.resolve(Some(Path::new("/jobs"))),
            PathBuf::from("/jobs/logo.png")
        );
        assert_eq!(image.resolve(None), PathBuf::from("logo.png"));

        let options = image.options();
        assert_eq!(options.width_dots, 200.0);
        assert_eq!(options.threshold, raster::DEFAULT_THRESHOLD);
        assert!(options.inverted);
    }
}
