use std::panic::{self, AssertUnwindSafe};

/// Extracts the text layer of a PDF held in memory.
///
/// `pdf-extract` panics on some malformed inputs, so the call is isolated and a
/// panic is reported as an ordinary extraction failure.
pub(super) fn extract(bytes: &[u8]) -> Result<String, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("Error reading PDF file: {e}")),
        Err(_) => Err("Error reading PDF file: parser aborted on malformed input".to_string()),
    }
}
