use std::io;
use std::ops::Range;

use crate::error::ReconcileError;
use crate::input::SourceInput;
use crate::output::FormattedOutput;
use crate::replacement::Replacement;

/// Streams `text` to `sink` with each replacement spliced in.
///
/// `replacements` must be sorted by start and non-overlapping; this is not re-checked.
pub fn apply_replacements<W: io::Write + ?Sized>(
    text: &str,
    replacements: &[Replacement],
    sink: &mut W,
) -> io::Result<()> {
    let bytes = text.as_bytes();
    let mut cursor = 0;
    for replacement in replacements {
        let range = replacement.range();
        let start = range.start.min(bytes.len());
        if cursor < start {
            sink.write_all(&bytes[cursor..start])?;
        }
        sink.write_all(replacement.text().as_bytes())?;
        cursor = cursor.max(range.end.min(bytes.len()));
    }
    if cursor < bytes.len() {
        sink.write_all(&bytes[cursor..])?;
    }
    Ok(())
}

impl<I: SourceInput> FormattedOutput<'_, I> {
    /// Writes the original document with the requested tok ranges reformatted.
    pub fn render<W: io::Write + ?Sized>(
        &self,
        sink: &mut W,
        requests: &[Range<usize>],
    ) -> Result<(), ReconcileError> {
        let replacements = self.compute_replacements(requests)?;
        apply_replacements(self.input.text(), &replacements, sink)?;
        Ok(())
    }

    pub fn render_to_string(&self, requests: &[Range<usize>]) -> Result<String, ReconcileError> {
        let mut merged = Vec::with_capacity(self.input.text().len());
        self.render(&mut merged, requests)?;
        String::from_utf8(merged)
            .map_err(|err| ReconcileError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}
