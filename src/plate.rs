use crate::ocr::TextBlock;

/// Picks the plate candidate from OCR output.
///
/// Policy: walk every line of the first block and keep the last one seen.
/// This matches the behavior of the deployed unit, but it is almost certainly
/// not what was meant — a plate-shaped pattern match would be more robust.
/// Kept until real captures show the last line is the wrong one.
pub fn select_plate(blocks: &[TextBlock]) -> Option<String> {
    keep_last_line(blocks)
}

fn keep_last_line(blocks: &[TextBlock]) -> Option<String> {
    blocks.first()?.lines.last().cloned()
}
