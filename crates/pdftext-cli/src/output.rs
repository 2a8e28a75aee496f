use std::io::Write;

use pdftext_core::Envelope;

/// Write the envelope as a single JSON line.
pub fn print_envelope(w: &mut dyn Write, envelope: &Envelope) -> anyhow::Result<()> {
    envelope.write_json(&mut *w)?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}
